pub(super) mod config;
pub(super) mod diff;
pub(super) mod inspect;
pub(super) mod toggle;
