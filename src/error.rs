use std::path::PathBuf;

use thiserror::Error;

pub use catalog_core::{Effect, Transience};

use crate::config::ConfigError;
use crate::core::CoreError;
use crate::store::StoreError;

/// Crate-level convenience error.
///
/// A thin wrapper over the capability errors; each keeps its own
/// classification.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("invalid item json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("item has no variation at index {index}")]
    NoSuchVariation { index: usize },

    #[error("item has no variation `{id}`")]
    UnknownVariation { id: String },

    /// The store accepted the write; its copy of the item did not decode.
    #[error("item {} was stored but could not be read back: {source}", id.as_deref().unwrap_or("(no id)"))]
    StoredUnreadable {
        id: Option<String>,
        #[source]
        source: CoreError,
    },
}

impl Error {
    pub fn transience(&self) -> Transience {
        match self {
            Error::Core(e) => e.transience(),
            Error::Store(e) => e.transience(),
            Error::Io { .. } => Transience::Unknown,
            Error::StoredUnreadable { .. }
            | Error::Config(_)
            | Error::Json(_)
            | Error::NoSuchVariation { .. }
            | Error::UnknownVariation { .. } => Transience::Permanent,
        }
    }

    pub fn effect(&self) -> Effect {
        match self {
            Error::Core(e) => e.effect(),
            Error::Store(e) => e.effect(),
            Error::StoredUnreadable { .. } => Effect::Some,
            Error::Config(_)
            | Error::Json(_)
            | Error::Io { .. }
            | Error::NoSuchVariation { .. }
            | Error::UnknownVariation { .. } => Effect::None,
        }
    }
}
