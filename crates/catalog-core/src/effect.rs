//! Failure classification shared by core and host errors.

/// Whether repeating the failed call could succeed.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Transience {
    /// Same input, same failure.
    Permanent,
    /// The collaborator may recover (network, contention).
    Retryable,
    Unknown,
}

impl Transience {
    pub fn is_retryable(self) -> bool {
        matches!(self, Transience::Retryable)
    }
}

/// Whether anything was persisted before the error surfaced.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Effect {
    /// Nothing was written.
    None,
    /// The write landed even though the call failed.
    Some,
    Unknown,
}

crate::enum_str! {
    impl Effect {
        pub fn as_str(&self) -> &'static str;
        fn parse_str(raw: &str) -> Option<Self>;
        variants {
            None => ["none"],
            Some => ["some"],
            Unknown => ["unknown"],
        }
    }
}
