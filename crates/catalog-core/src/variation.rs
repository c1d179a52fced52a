//! Layer 4: Variations
//!
//! VariationRecord: one sellable unit of an item
//! LocationOverride: per-location customization of a variation

use super::domain::{InventoryAlert, Money, PricingType, TrackingMode};
use super::identity::{CatalogObjectId, LocationId};
use super::presence::PresenceSet;

/// Per-location customization. Absent until the user changes something for
/// that location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocationOverride {
    pub location_id: LocationId,
    pub price: Option<Money>,
    pub alert: InventoryAlert,
    tracking_mode: TrackingMode,
}

impl LocationOverride {
    pub fn new(location_id: LocationId, tracking_mode: TrackingMode) -> Self {
        Self {
            location_id,
            price: None,
            alert: InventoryAlert::None,
            tracking_mode,
        }
    }

    pub fn tracking_mode(&self) -> TrackingMode {
        self.tracking_mode
    }

    /// Boolean mirror of `tracking_mode`, as stored by the catalog service.
    pub fn track_inventory(&self) -> bool {
        self.tracking_mode.is_tracking()
    }

    pub fn set_tracking_mode(&mut self, mode: TrackingMode) {
        self.tracking_mode = mode;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariationRecord {
    pub id: Option<CatalogObjectId>,
    pub version: Option<i64>,
    pub name: String,
    pub sku: String,
    pub upc: String,
    pub ordinal: Option<i32>,
    pub pricing_type: PricingType,
    pub price: Option<Money>,
    /// Where this variation can be sold.
    pub sellable: PresenceSet,
    /// Template tracking flag, used for locations without an override.
    pub track_inventory: bool,
    pub location_overrides: Vec<LocationOverride>,
}

impl VariationRecord {
    /// A blank fixed-price variation sold everywhere.
    pub fn new() -> Self {
        Self {
            id: None,
            version: None,
            name: String::new(),
            sku: String::new(),
            upc: String::new(),
            ordinal: None,
            pricing_type: PricingType::Fixed,
            price: None,
            sellable: PresenceSet::everywhere(),
            track_inventory: false,
            location_overrides: Vec::new(),
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::new()
        }
    }

    /// Price amount in minor units; variable pricing has none.
    pub fn price_amount(&self) -> Option<i64> {
        match self.pricing_type {
            PricingType::Fixed => self.price.map(|m| m.amount),
            PricingType::Variable => None,
        }
    }
}

impl Default for VariationRecord {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_mirror_follows_mode() {
        let mut o = LocationOverride::new(LocationId::parse("L1").unwrap(), TrackingMode::Untracked);
        assert!(!o.track_inventory());
        o.set_tracking_mode(TrackingMode::StockCount);
        assert!(o.track_inventory());
    }

    #[test]
    fn variable_pricing_hides_amount() {
        let mut v = VariationRecord::named("Regular");
        v.price = Some(Money::usd(300));
        assert_eq!(v.price_amount(), Some(300));
        v.pricing_type = PricingType::Variable;
        assert_eq!(v.price_amount(), None);
    }
}
