//! Core errors (boundary parsing and load limits).
//!
//! Editing operations are total; only turning external data into domain
//! values can fail, and those failures are permanent for a given input.

use thiserror::Error;

use crate::effect::{Effect, Transience};

/// Invalid identifier.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvalidId {
    #[error("location id `{raw}` is invalid: {reason}")]
    Location { raw: String, reason: String },
    #[error("category id `{raw}` is invalid: {reason}")]
    Category { raw: String, reason: String },
    #[error("tax id `{raw}` is invalid: {reason}")]
    Tax { raw: String, reason: String },
    #[error("modifier list id `{raw}` is invalid: {reason}")]
    ModifierList { raw: String, reason: String },
    #[error("image id `{raw}` is invalid: {reason}")]
    Image { raw: String, reason: String },
    #[error("catalog object id `{raw}` is invalid: {reason}")]
    CatalogObject { raw: String, reason: String },
}

/// Invalid money amount or currency code.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("money `{raw}` is invalid: {reason}")]
pub struct InvalidMoney {
    pub raw: String,
    pub reason: String,
}

/// Unknown spelling for a string-backed enum.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{kind} `{raw}` is not recognized")]
pub struct InvalidEnum {
    pub kind: &'static str,
    pub raw: String,
}

/// A record exceeds a configured limit.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{field} count {value} exceeds limit {max}")]
pub struct LimitError {
    pub field: &'static str,
    pub value: usize,
    pub max: usize,
}

/// Canonical error enum for the catalog core.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CoreError {
    #[error(transparent)]
    InvalidId(#[from] InvalidId),
    #[error(transparent)]
    InvalidMoney(#[from] InvalidMoney),
    #[error(transparent)]
    InvalidEnum(#[from] InvalidEnum),
    #[error(transparent)]
    Limit(#[from] LimitError),
}

impl CoreError {
    /// Boundary parsing is deterministic.
    pub fn transience(&self) -> Transience {
        Transience::Permanent
    }

    pub fn effect(&self) -> Effect {
        Effect::None
    }
}
