//! Editing limits (defaults match the catalog service).

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, LimitError};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Entries kept in a recency list.
    pub max_recent_items: usize,
    pub max_variations: usize,
    /// Per variation.
    pub max_location_overrides: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_recent_items: 15,
            max_variations: 250,
            max_location_overrides: 1_000,
        }
    }
}

impl Limits {
    pub fn check_variations(&self, count: usize) -> Result<(), CoreError> {
        check("variations", count, self.max_variations)
    }

    pub fn check_location_overrides(&self, count: usize) -> Result<(), CoreError> {
        check("location_overrides", count, self.max_location_overrides)
    }
}

fn check(field: &'static str, value: usize, max: usize) -> Result<(), CoreError> {
    if value > max {
        Err(LimitError { field, value, max }.into())
    } else {
        Ok(())
    }
}
