//! Layer 5: Variation availability
//!
//! For-sale presence delegates to the variation's `PresenceSet`. Inventory
//! tracking is resolved per location: an override wins, otherwise the
//! variation-level template flag applies. Overrides are only created when a
//! location is customized.

use super::domain::{InventoryAlert, Money, TrackingMode};
use super::identity::LocationId;
use super::presence::LocationUniverse;
use super::variation::{LocationOverride, VariationRecord};

impl VariationRecord {
    pub fn is_for_sale(&self, location: &LocationId) -> bool {
        self.sellable.is_enabled(location)
    }

    pub fn set_for_sale(&mut self, location: &LocationId, for_sale: bool) {
        self.sellable.set_enabled(location, for_sale);
    }

    pub fn override_for(&self, location: &LocationId) -> Option<&LocationOverride> {
        self.location_overrides
            .iter()
            .find(|o| &o.location_id == location)
    }

    fn override_for_mut(&mut self, location: &LocationId) -> Option<&mut LocationOverride> {
        self.location_overrides
            .iter_mut()
            .find(|o| &o.location_id == location)
    }

    /// The override for `location`, created with the template tracking mode
    /// if missing.
    fn materialize_override(&mut self, location: &LocationId) -> &mut LocationOverride {
        let template = TrackingMode::from_flag(self.track_inventory);
        let idx = match self
            .location_overrides
            .iter()
            .position(|o| &o.location_id == location)
        {
            Some(idx) => idx,
            None => {
                self.location_overrides
                    .push(LocationOverride::new(location.clone(), template));
                self.location_overrides.len() - 1
            }
        };
        &mut self.location_overrides[idx]
    }

    pub fn is_tracking(&self, location: &LocationId) -> bool {
        match self.override_for(location) {
            Some(o) => o.tracking_mode().is_tracking(),
            None => self.track_inventory,
        }
    }

    pub fn set_tracking(&mut self, location: &LocationId, enabled: bool) {
        let mode = TrackingMode::from_flag(enabled);
        match self.override_for_mut(location) {
            Some(o) => o.set_tracking_mode(mode),
            None => self
                .location_overrides
                .push(LocationOverride::new(location.clone(), mode)),
        }
    }

    /// Whole-variation tracking mode: stock counting if the template or any
    /// customized location counts stock.
    pub fn effective_tracking_mode(&self) -> TrackingMode {
        let any_override = self
            .location_overrides
            .iter()
            .any(|o| o.tracking_mode().is_tracking());
        TrackingMode::from_flag(self.track_inventory || any_override)
    }

    /// Set the template mode and push it onto every existing override.
    pub fn set_tracking_mode(&mut self, mode: TrackingMode) {
        self.track_inventory = mode.is_tracking();
        for o in &mut self.location_overrides {
            o.set_tracking_mode(mode);
        }
    }

    /// Price charged at `location`: the override price if set, else the base
    /// price.
    pub fn price_at(&self, location: &LocationId) -> Option<Money> {
        self.override_for(location)
            .and_then(|o| o.price)
            .or(self.price)
    }

    pub fn set_price_override(&mut self, location: &LocationId, price: Option<Money>) {
        if price.is_none() && self.override_for(location).is_none() {
            return;
        }
        self.materialize_override(location).price = price;
    }

    pub fn set_alert(&mut self, location: &LocationId, alert: InventoryAlert) {
        if alert == InventoryAlert::None && self.override_for(location).is_none() {
            return;
        }
        self.materialize_override(location).alert = alert;
    }

    /// Overrides that reference locations outside `universe`.
    pub fn unknown_override_locations<'a>(
        &'a self,
        universe: &LocationUniverse,
    ) -> Vec<&'a LocationId> {
        self.location_overrides
            .iter()
            .map(|o| &o.location_id)
            .filter(|id| !universe.contains(id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presence::PresenceSet;

    fn loc(raw: &str) -> LocationId {
        LocationId::parse(raw).unwrap()
    }

    #[test]
    fn tracking_falls_back_to_template_without_overrides() {
        let mut v = VariationRecord::named("Regular");
        v.track_inventory = true;
        assert!(v.is_tracking(&loc("L1")));
        assert!(v.is_tracking(&loc("L2")));
        assert_eq!(v.effective_tracking_mode(), TrackingMode::StockCount);

        v.set_tracking(&loc("L1"), false);
        assert!(!v.is_tracking(&loc("L1")));
        assert!(v.is_tracking(&loc("L2")));
        assert_eq!(v.location_overrides.len(), 1);
        assert_eq!(v.location_overrides[0].location_id, loc("L1"));
    }

    #[test]
    fn set_tracking_updates_existing_override_in_place() {
        let mut v = VariationRecord::named("Regular");
        v.set_tracking(&loc("L1"), true);
        v.set_tracking(&loc("L1"), false);
        assert_eq!(v.location_overrides.len(), 1);
        assert!(!v.location_overrides[0].track_inventory());
    }

    #[test]
    fn untracked_template_without_overrides() {
        let v = VariationRecord::named("Regular");
        assert_eq!(v.effective_tracking_mode(), TrackingMode::Untracked);
    }

    #[test]
    fn aggregate_mode_propagates_to_existing_overrides_only() {
        let mut v = VariationRecord::named("Regular");
        v.set_tracking(&loc("L1"), false);
        v.set_tracking(&loc("L2"), true);
        v.set_tracking_mode(TrackingMode::StockCount);

        assert!(v.track_inventory);
        assert_eq!(v.location_overrides.len(), 2);
        assert!(v.location_overrides.iter().all(|o| o.track_inventory()));
        assert!(v.is_tracking(&loc("L3")));

        v.set_tracking_mode(TrackingMode::Untracked);
        assert!(!v.is_tracking(&loc("L2")));
        assert_eq!(v.effective_tracking_mode(), TrackingMode::Untracked);
    }

    #[test]
    fn customized_location_counts_toward_aggregate() {
        let mut v = VariationRecord::named("Regular");
        v.set_tracking(&loc("L2"), true);
        assert_eq!(v.effective_tracking_mode(), TrackingMode::StockCount);
    }

    #[test]
    fn for_sale_delegates_to_presence() {
        let mut v = VariationRecord::named("Regular");
        v.sellable = PresenceSet::nowhere();
        assert!(!v.is_for_sale(&loc("L1")));
        v.set_for_sale(&loc("L1"), true);
        assert!(v.is_for_sale(&loc("L1")));
        assert!(!v.is_for_sale(&loc("L2")));
        assert_eq!(v.sellable, PresenceSet::only([loc("L1")]));
    }

    #[test]
    fn price_override_materializes_with_template_mode() {
        let mut v = VariationRecord::named("Regular");
        v.price = Some(Money::usd(500));
        v.track_inventory = true;

        v.set_price_override(&loc("L1"), None);
        assert!(v.location_overrides.is_empty());

        v.set_price_override(&loc("L1"), Some(Money::usd(450)));
        assert_eq!(v.price_at(&loc("L1")), Some(Money::usd(450)));
        assert_eq!(v.price_at(&loc("L2")), Some(Money::usd(500)));
        assert!(v.is_tracking(&loc("L1")));

        v.set_alert(&loc("L1"), InventoryAlert::LowQuantity { threshold: 3 });
        assert_eq!(v.location_overrides.len(), 1);
        assert_eq!(v.location_overrides[0].alert.threshold(), Some(3));
    }

    #[test]
    fn overrides_outside_universe_are_reported() {
        let mut v = VariationRecord::named("Regular");
        v.set_tracking(&loc("L1"), true);
        v.set_tracking(&loc("GONE"), true);
        let universe: LocationUniverse = [loc("L1"), loc("L2")].into_iter().collect();
        assert_eq!(v.unknown_override_locations(&universe), vec![&loc("GONE")]);
    }
}
