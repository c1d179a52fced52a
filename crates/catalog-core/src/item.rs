//! Layer 6: The item record
//!
//! ItemRecord: everything the editor lets the user change on one catalog
//! item, including its variations.

use super::category::CategoryAssignment;
use super::error::CoreError;
use super::identity::{CatalogObjectId, ImageId, LocationId, ModifierListId, TaxId};
use super::limits::Limits;
use super::presence::PresenceSet;
use super::variation::VariationRecord;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemRecord {
    pub id: Option<CatalogObjectId>,
    pub version: Option<i64>,
    pub name: String,
    pub description: String,
    pub abbreviation: String,
    pub label_color: Option<String>,
    /// Where the item is visible at all.
    pub presence: PresenceSet,
    pub categories: CategoryAssignment,
    pub tax_ids: Vec<TaxId>,
    pub modifier_list_ids: Vec<ModifierListId>,
    pub is_taxable: bool,
    pub skip_modifier_screen: bool,
    pub available_online: bool,
    /// Managed by the image upload flow, never part of change detection.
    pub image_ids: Vec<ImageId>,
    pub variations: Vec<VariationRecord>,
}

impl ItemRecord {
    /// A blank item with one blank variation, present everywhere.
    pub fn new() -> Self {
        Self {
            id: None,
            version: None,
            name: String::new(),
            description: String::new(),
            abbreviation: String::new(),
            label_color: None,
            presence: PresenceSet::everywhere(),
            categories: CategoryAssignment::default(),
            tax_ids: Vec::new(),
            modifier_list_ids: Vec::new(),
            is_taxable: true,
            skip_modifier_screen: false,
            available_online: false,
            image_ids: Vec::new(),
            variations: vec![VariationRecord::new()],
        }
    }

    /// Never saved to the catalog service.
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    pub fn variation(&self, id: &CatalogObjectId) -> Option<&VariationRecord> {
        self.variations.iter().find(|v| v.id.as_ref() == Some(id))
    }

    pub fn variation_mut(&mut self, id: &CatalogObjectId) -> Option<&mut VariationRecord> {
        self.variations
            .iter_mut()
            .find(|v| v.id.as_ref() == Some(id))
    }

    pub fn is_enabled(&self, location: &LocationId) -> bool {
        self.presence.is_enabled(location)
    }

    pub fn master_enabled(&self) -> bool {
        self.presence.master_enabled()
    }

    /// `None` when the item has no variation with that id.
    pub fn is_for_sale(&self, variation: &CatalogObjectId, location: &LocationId) -> Option<bool> {
        self.variation(variation).map(|v| v.is_for_sale(location))
    }

    /// `None` when the item has no variation with that id.
    pub fn is_tracking(&self, variation: &CatalogObjectId, location: &LocationId) -> Option<bool> {
        self.variation(variation).map(|v| v.is_tracking(location))
    }

    /// The same limits `from_wire` applies on load.
    pub fn check_limits(&self, limits: &Limits) -> Result<(), CoreError> {
        limits.check_variations(self.variations.len())?;
        for variation in &self.variations {
            limits.check_location_overrides(variation.location_overrides.len())?;
        }
        Ok(())
    }
}

impl Default for ItemRecord {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oid(raw: &str) -> CatalogObjectId {
        CatalogObjectId::parse(raw).unwrap()
    }

    fn loc(raw: &str) -> LocationId {
        LocationId::parse(raw).unwrap()
    }

    #[test]
    fn queries_by_variation_id() {
        let mut item = ItemRecord::new();
        item.variations[0].id = Some(oid("V1"));
        item.variations[0].track_inventory = true;
        item.variations[0].sellable = PresenceSet::only([loc("L1")]);

        assert_eq!(item.is_for_sale(&oid("V1"), &loc("L1")), Some(true));
        assert_eq!(item.is_for_sale(&oid("V1"), &loc("L2")), Some(false));
        assert_eq!(item.is_tracking(&oid("V1"), &loc("L2")), Some(true));
        assert_eq!(item.is_for_sale(&oid("V9"), &loc("L1")), None);
    }

    #[test]
    fn check_limits_covers_variations_and_overrides() {
        let limits = Limits {
            max_variations: 2,
            max_location_overrides: 1,
            ..Limits::default()
        };
        let mut item = ItemRecord::new();
        item.variations[0].set_tracking(&loc("L1"), true);
        assert!(item.check_limits(&limits).is_ok());

        item.variations[0].set_alert(
            &loc("L2"),
            crate::domain::InventoryAlert::LowQuantity { threshold: 2 },
        );
        let err = item.check_limits(&limits).unwrap_err();
        assert!(err.to_string().starts_with("location_overrides count 2"));

        item.variations[0].location_overrides.pop();
        item.variations.push(VariationRecord::new());
        item.variations.push(VariationRecord::new());
        let err = item.check_limits(&limits).unwrap_err();
        assert!(err.to_string().starts_with("variations count 3"));
    }

    #[test]
    fn new_item_is_unsaved_and_everywhere() {
        let item = ItemRecord::new();
        assert!(item.is_new());
        assert!(item.master_enabled());
        assert!(item.is_enabled(&loc("ANY")));
        assert_eq!(item.variations.len(), 1);
    }
}
