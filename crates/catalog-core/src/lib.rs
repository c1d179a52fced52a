//! Core domain types for catalog item editing (Layers 1-8)
//!
//! Module hierarchy follows type dependency order:
//! - identity: LocationId, CategoryId, TaxId, CatalogObjectId (Layer 1)
//! - domain: PricingType, TrackingMode, Money (Layer 2)
//! - presence: PresenceSet, LocationUniverse (Layer 3)
//! - category: CategoryAssignment, resolve (Layer 3)
//! - variation: VariationRecord, LocationOverride (Layer 4)
//! - availability: per-location sellable and tracking state (Layer 5)
//! - item: ItemRecord (Layer 6)
//! - tracker: Snapshot, ChangeTracker, diff (Layer 7)
//! - wire: ItemWire, from_wire/to_wire (Layer 8)

#![forbid(unsafe_code)]

// Re-export enum_str! macro from catalog-macros for internal use and downstream consumers
pub use catalog_macros::enum_str;

pub mod availability;
pub mod category;
pub mod domain;
pub mod effect;
pub mod error;
pub mod identity;
pub mod item;
pub mod limits;
pub mod presence;
pub mod recent;
pub mod tracker;
pub mod variation;
pub mod wire;

pub use category::{
    CategoryAssignment, CategoryDirectory, CategoryRef, ResolutionNote, resolve, resolve_with_note,
};
pub use domain::{Currency, InventoryAlert, Money, PricingType, TrackingMode};
pub use effect::{Effect, Transience};
pub use error::{CoreError, InvalidEnum, InvalidId, InvalidMoney, LimitError};
pub use identity::{CatalogObjectId, CategoryId, ImageId, LocationId, ModifierListId, TaxId};
pub use item::ItemRecord;
pub use limits::Limits;
pub use presence::{LocationUniverse, PresenceNormalization, PresenceSet};
pub use recent::RecentList;
pub use tracker::{
    ChangeSet, ChangeTracker, Compare, DirtyState, FieldValue, ListOrder, Snapshot, Tracked,
    TrackedField, TrackerOptions,
};
pub use variation::{LocationOverride, VariationRecord};
pub use wire::{
    CategoryRefWire, ItemWire, LoadNote, LoadReport, Loaded, LocationOverrideWire, MoneyWire,
    PresenceWire, VariationWire,
};
