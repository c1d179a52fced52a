//! Catalog item editing: location availability, reporting-category
//! resolution and unsaved-change detection.
//!
//! The domain lives in `catalog-core` (re-exported as [`core`]); this crate
//! adds configuration, telemetry, the edit session and the CLI.

#![forbid(unsafe_code)]

pub use catalog_core as core;

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
mod paths;
pub mod session;
pub mod store;
pub mod telemetry;

pub use error::{Effect, Error, Transience};
pub type Result<T> = std::result::Result<T, Error>;

pub use crate::core::{
    CatalogObjectId, CategoryAssignment, CategoryDirectory, CategoryId, ChangeSet, ItemRecord,
    ItemWire, Limits, LocationId, LocationUniverse, PresenceSet, TrackingMode, VariationRecord,
};
pub use session::{EditSession, SaveOutcome, SessionContext};
pub use store::{CatalogStore, MemoryStore, StoreError};
