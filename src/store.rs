//! The remote catalog service, seen from the editor.
//!
//! Sessions only need an upsert: send the whole item, get back the stored
//! record with server-assigned ids and versions.

use std::collections::BTreeMap;

use thiserror::Error;
use uuid::Uuid;

use crate::core::{Effect, ItemWire, Transience};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreError {
    #[error("catalog service unavailable: {reason}")]
    Unavailable { reason: String },
    #[error("catalog service rejected item: {reason}")]
    Rejected { reason: String },
    #[error("item {id} changed remotely (expected version {expected:?}, found {actual})")]
    VersionConflict {
        id: String,
        expected: Option<i64>,
        actual: i64,
    },
    #[error("item {id} does not exist")]
    NotFound { id: String },
}

impl StoreError {
    pub fn transience(&self) -> Transience {
        match self {
            StoreError::Unavailable { .. } => Transience::Retryable,
            StoreError::Rejected { .. }
            | StoreError::VersionConflict { .. }
            | StoreError::NotFound { .. } => Transience::Permanent,
        }
    }

    pub fn effect(&self) -> Effect {
        match self {
            StoreError::Unavailable { .. } => Effect::Unknown,
            _ => Effect::None,
        }
    }
}

pub trait CatalogStore {
    /// Create or replace an item. Returns the record as stored.
    fn upsert_item(&mut self, item: &ItemWire) -> Result<ItemWire, StoreError>;
}

/// In-process store with the service's id and version rules: missing ids are
/// assigned, versions must match the stored one and are bumped on write.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: BTreeMap<String, ItemWire>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&ItemWire> {
        self.items.get(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Successful upserts so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

fn new_object_id() -> String {
    Uuid::new_v4().simple().to_string().to_ascii_uppercase()
}

impl CatalogStore for MemoryStore {
    fn upsert_item(&mut self, item: &ItemWire) -> Result<ItemWire, StoreError> {
        let mut stored = item.clone();
        let version = match item.id.as_deref() {
            Some(id) => {
                let existing = self.items.get(id).ok_or_else(|| StoreError::NotFound {
                    id: id.to_string(),
                })?;
                let actual = existing.version.unwrap_or(0);
                if item.version != Some(actual) {
                    return Err(StoreError::VersionConflict {
                        id: id.to_string(),
                        expected: item.version,
                        actual,
                    });
                }
                actual + 1
            }
            None => {
                stored.id = Some(new_object_id());
                1
            }
        };
        stored.version = Some(version);
        for variation in &mut stored.variations {
            if variation.id.is_none() {
                variation.id = Some(new_object_id());
            }
            variation.version = Some(version);
        }

        let id = stored.id.clone().unwrap_or_default();
        tracing::debug!(item = %id, version, "item stored");
        self.items.insert(id, stored.clone());
        self.writes += 1;
        Ok(stored)
    }
}
