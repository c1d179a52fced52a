//! Layer 8: Record shapes exchanged with the catalog service
//!
//! Wire structs are plain serde mirrors of the stored JSON. Decoding
//! validates ids and enums, normalizes presence, resolves categories, and
//! reports (rather than rejects) data-quality problems in a `LoadReport`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::category::{CategoryRef, ResolutionNote, resolve_with_note};
use crate::domain::{Currency, InventoryAlert, Money, PricingType, TrackingMode};
use crate::error::{CoreError, InvalidEnum};
use crate::identity::{CatalogObjectId, CategoryId, ImageId, LocationId, ModifierListId, TaxId};
use crate::item::ItemRecord;
use crate::limits::Limits;
use crate::presence::{PresenceNormalization, PresenceSet};
use crate::variation::{LocationOverride, VariationRecord};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresenceWire {
    pub present_at_all_locations: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub present_at_location_ids: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub absent_at_location_ids: Vec<String>,
}

/// Missing presence fields mean "present everywhere".
impl Default for PresenceWire {
    fn default() -> Self {
        Self {
            present_at_all_locations: true,
            present_at_location_ids: Vec::new(),
            absent_at_location_ids: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyWire {
    pub amount: i64,
    pub currency: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRefWire {
    pub id: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationOverrideWire {
    pub location_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_money: Option<MoneyWire>,
    /// Absent means "same as the variation".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_inventory: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory_alert_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory_alert_threshold: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariationWire {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    pub name: String,
    pub sku: String,
    pub upc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordinal: Option<i32>,
    pub pricing_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_money: Option<MoneyWire>,
    #[serde(flatten)]
    pub presence: PresenceWire,
    pub track_inventory: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub location_overrides: Vec<LocationOverrideWire>,
}

impl Default for VariationWire {
    fn default() -> Self {
        Self {
            id: None,
            version: None,
            name: String::new(),
            sku: String::new(),
            upc: String::new(),
            ordinal: None,
            pricing_type: PricingType::Fixed.as_str().to_string(),
            price_money: None,
            presence: PresenceWire::default(),
            track_inventory: false,
            location_overrides: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemWire {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    pub name: String,
    pub description: String,
    pub abbreviation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_color: Option<String>,
    #[serde(flatten)]
    pub presence: PresenceWire,
    pub categories: Vec<CategoryRefWire>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reporting_category: Option<CategoryRefWire>,
    /// Single-category field written by older clients.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    pub tax_ids: Vec<String>,
    pub modifier_list_ids: Vec<String>,
    pub is_taxable: bool,
    pub skip_modifier_screen: bool,
    pub available_online: bool,
    pub image_ids: Vec<String>,
    pub variations: Vec<VariationWire>,
}

impl Default for ItemWire {
    fn default() -> Self {
        Self {
            id: None,
            version: None,
            name: String::new(),
            description: String::new(),
            abbreviation: String::new(),
            label_color: None,
            presence: PresenceWire::default(),
            categories: Vec::new(),
            reporting_category: None,
            category_id: None,
            tax_ids: Vec::new(),
            modifier_list_ids: Vec::new(),
            is_taxable: true,
            skip_modifier_screen: false,
            available_online: false,
            image_ids: Vec::new(),
            variations: Vec::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AlertType {
    None,
    LowQuantity,
}

crate::enum_str! {
    impl AlertType {
        fn as_str(&self) -> &'static str;
        fn parse_str(raw: &str) -> Option<Self>;
        variants {
            None => ["NONE"],
            LowQuantity => ["LOW_QUANTITY"],
        }
    }
}

/// A data-quality problem found while decoding. Never fatal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadNote {
    Presence {
        scope: String,
        normalization: PresenceNormalization,
    },
    Category(ResolutionNote),
    /// Override without a tracking flag; took the variation's.
    OverrideTrackingInherited { variation: usize, location: LocationId },
    /// Second override for the same location; dropped.
    DuplicateOverride { variation: usize, location: LocationId },
    /// Malformed id in a reference list; dropped.
    InvalidIdDropped { scope: String, error: CoreError },
}

impl fmt::Display for LoadNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Presence {
                scope,
                normalization,
            } => write!(f, "{scope}: {normalization}"),
            Self::Category(note) => write!(f, "categories: {note}"),
            Self::OverrideTrackingInherited {
                variation,
                location,
            } => write!(
                f,
                "variations[{variation}]: override at {location} has no tracking flag; inherited"
            ),
            Self::DuplicateOverride {
                variation,
                location,
            } => write!(
                f,
                "variations[{variation}]: duplicate override at {location} dropped"
            ),
            Self::InvalidIdDropped { scope, error } => write!(f, "{scope}: {error}; dropped"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    notes: Vec<LoadNote>,
}

impl LoadReport {
    pub fn push(&mut self, note: LoadNote) {
        self.notes.push(note);
    }

    pub fn notes(&self) -> &[LoadNote] {
        &self.notes
    }

    pub fn is_clean(&self) -> bool {
        self.notes.is_empty()
    }
}

/// A decoded record plus what decoding had to smooth over.
#[derive(Clone, Debug)]
pub struct Loaded {
    pub record: ItemRecord,
    pub report: LoadReport,
}

/// Referenced ids that fail to parse are dropped and noted under `scope`.
fn parse_refs<'a, T>(
    raw: impl IntoIterator<Item = &'a str>,
    scope: &str,
    parse: impl Fn(&str) -> Result<T, CoreError>,
    report: &mut LoadReport,
) -> Vec<T> {
    raw.into_iter()
        .filter_map(|s| parse_ref(s, scope, &parse, report))
        .collect()
}

fn parse_ref<T>(
    raw: &str,
    scope: &str,
    parse: impl Fn(&str) -> Result<T, CoreError>,
    report: &mut LoadReport,
) -> Option<T> {
    parse(raw)
        .inspect_err(|error| {
            report.push(LoadNote::InvalidIdDropped {
                scope: scope.to_string(),
                error: error.clone(),
            });
        })
        .ok()
}

fn strs(raw: &[String]) -> impl Iterator<Item = &str> {
    raw.iter().map(String::as_str)
}

fn parse_opt<T>(
    raw: Option<&str>,
    parse: impl Fn(&str) -> Result<T, CoreError>,
) -> Result<Option<T>, CoreError> {
    raw.map(parse).transpose()
}

impl MoneyWire {
    fn decode(&self) -> Result<Money, CoreError> {
        Ok(Money::new(self.amount, Currency::parse(&self.currency)?))
    }

    fn encode(money: &Money) -> Self {
        Self {
            amount: money.amount,
            currency: money.currency.as_str().to_string(),
        }
    }
}

impl PresenceWire {
    fn decode(&self, scope: &str, report: &mut LoadReport) -> PresenceSet {
        let present = parse_refs(
            strs(&self.present_at_location_ids),
            &format!("{scope}.present_at_location_ids"),
            |s| LocationId::parse(s),
            report,
        );
        let absent = parse_refs(
            strs(&self.absent_at_location_ids),
            &format!("{scope}.absent_at_location_ids"),
            |s| LocationId::parse(s),
            report,
        );
        let (set, normalization) =
            PresenceSet::from_parts(self.present_at_all_locations, present, absent);
        if !normalization.is_clean() {
            report.push(LoadNote::Presence {
                scope: scope.to_string(),
                normalization,
            });
        }
        set
    }

    fn encode(set: &PresenceSet) -> Self {
        let (all, present, absent) = set.to_parts();
        Self {
            present_at_all_locations: all,
            present_at_location_ids: present.into_iter().map(String::from).collect(),
            absent_at_location_ids: absent.into_iter().map(String::from).collect(),
        }
    }
}

fn decode_alert(wire: &LocationOverrideWire) -> Result<InventoryAlert, CoreError> {
    let Some(raw) = wire.inventory_alert_type.as_deref() else {
        return Ok(InventoryAlert::None);
    };
    match AlertType::parse_str(raw) {
        Some(AlertType::None) => Ok(InventoryAlert::None),
        Some(AlertType::LowQuantity) => Ok(InventoryAlert::LowQuantity {
            threshold: wire.inventory_alert_threshold.unwrap_or(0),
        }),
        None => Err(InvalidEnum {
            kind: "inventory alert type",
            raw: raw.to_string(),
        }
        .into()),
    }
}

impl VariationRecord {
    fn from_wire(
        wire: &VariationWire,
        index: usize,
        limits: &Limits,
        report: &mut LoadReport,
    ) -> Result<Self, CoreError> {
        limits.check_location_overrides(wire.location_overrides.len())?;
        let scope = format!("variations[{index}]");
        let overrides_scope = format!("{scope}.location_overrides");
        let template = TrackingMode::from_flag(wire.track_inventory);
        let mut overrides: Vec<LocationOverride> = Vec::with_capacity(wire.location_overrides.len());
        for o in &wire.location_overrides {
            let Some(location) = parse_ref(
                o.location_id.as_str(),
                &overrides_scope,
                |s| LocationId::parse(s),
                report,
            ) else {
                continue;
            };
            if overrides.iter().any(|existing| existing.location_id == location) {
                report.push(LoadNote::DuplicateOverride {
                    variation: index,
                    location,
                });
                continue;
            }
            let mode = match o.track_inventory {
                Some(flag) => TrackingMode::from_flag(flag),
                None => {
                    report.push(LoadNote::OverrideTrackingInherited {
                        variation: index,
                        location: location.clone(),
                    });
                    template
                }
            };
            let mut decoded = LocationOverride::new(location, mode);
            decoded.price = o.price_money.as_ref().map(MoneyWire::decode).transpose()?;
            decoded.alert = decode_alert(o)?;
            overrides.push(decoded);
        }

        Ok(Self {
            id: parse_opt(wire.id.as_deref(), |s| CatalogObjectId::parse(s))?,
            version: wire.version,
            name: wire.name.clone(),
            sku: wire.sku.clone(),
            upc: wire.upc.clone(),
            ordinal: wire.ordinal,
            pricing_type: PricingType::parse(&wire.pricing_type)?,
            price: wire.price_money.as_ref().map(MoneyWire::decode).transpose()?,
            sellable: wire.presence.decode(&scope, report),
            track_inventory: wire.track_inventory,
            location_overrides: overrides,
        })
    }

    pub fn to_wire(&self) -> VariationWire {
        VariationWire {
            id: self.id.as_ref().map(|id| id.as_str().to_string()),
            version: self.version,
            name: self.name.clone(),
            sku: self.sku.clone(),
            upc: self.upc.clone(),
            ordinal: self.ordinal,
            pricing_type: self.pricing_type.as_str().to_string(),
            price_money: self.price.as_ref().map(MoneyWire::encode),
            presence: PresenceWire::encode(&self.sellable),
            track_inventory: self.track_inventory,
            location_overrides: self
                .location_overrides
                .iter()
                .map(|o| LocationOverrideWire {
                    location_id: o.location_id.as_str().to_string(),
                    price_money: o.price.as_ref().map(MoneyWire::encode),
                    track_inventory: Some(o.track_inventory()),
                    inventory_alert_type: match o.alert {
                        InventoryAlert::None => None,
                        InventoryAlert::LowQuantity { .. } => {
                            Some(AlertType::LowQuantity.as_str().to_string())
                        }
                    },
                    inventory_alert_threshold: o.alert.threshold(),
                })
                .collect(),
        }
    }
}

impl ItemRecord {
    pub fn from_wire(wire: &ItemWire, limits: &Limits) -> Result<Loaded, CoreError> {
        limits.check_variations(wire.variations.len())?;
        let mut report = LoadReport::default();

        let presence = wire.presence.decode("item", &mut report);

        let assigned = parse_refs(
            wire.categories.iter().map(|c| c.id.as_str()),
            "item.categories",
            |s| CategoryId::parse(s).map(CategoryRef::new),
            &mut report,
        );
        let explicit = wire.reporting_category.as_ref().and_then(|c| {
            parse_ref(
                c.id.as_str(),
                "item.reporting_category",
                |s| CategoryId::parse(s),
                &mut report,
            )
        });
        let legacy = wire.category_id.as_deref().and_then(|raw| {
            parse_ref(
                raw,
                "item.category_id",
                |s| CategoryId::parse(s),
                &mut report,
            )
        });
        let tax_ids = parse_refs(
            strs(&wire.tax_ids),
            "item.tax_ids",
            |s| TaxId::parse(s),
            &mut report,
        );
        let modifier_list_ids = parse_refs(
            strs(&wire.modifier_list_ids),
            "item.modifier_list_ids",
            |s| ModifierListId::parse(s),
            &mut report,
        );
        let image_ids = parse_refs(
            strs(&wire.image_ids),
            "item.image_ids",
            |s| ImageId::parse(s),
            &mut report,
        );
        let (categories, note) = resolve_with_note(&assigned, explicit.as_ref(), legacy.as_ref());
        if let Some(note) = note {
            report.push(LoadNote::Category(note));
        }

        let variations = wire
            .variations
            .iter()
            .enumerate()
            .map(|(idx, v)| VariationRecord::from_wire(v, idx, limits, &mut report))
            .collect::<Result<Vec<_>, _>>()?;

        let record = ItemRecord {
            id: parse_opt(wire.id.as_deref(), |s| CatalogObjectId::parse(s))?,
            version: wire.version,
            name: wire.name.clone(),
            description: wire.description.clone(),
            abbreviation: wire.abbreviation.clone(),
            label_color: wire.label_color.clone(),
            presence,
            categories,
            tax_ids,
            modifier_list_ids,
            is_taxable: wire.is_taxable,
            skip_modifier_screen: wire.skip_modifier_screen,
            available_online: wire.available_online,
            image_ids,
            variations,
        };
        Ok(Loaded { record, report })
    }

    /// Stored shape. Categories are written denormalized: the full list with
    /// the reporting category first, the reporting category itself, and the
    /// legacy single-category field.
    pub fn to_wire(&self) -> ItemWire {
        let reporting = self
            .categories
            .reporting_category_id()
            .map(|id| id.as_str().to_string());
        ItemWire {
            id: self.id.as_ref().map(|id| id.as_str().to_string()),
            version: self.version,
            name: self.name.clone(),
            description: self.description.clone(),
            abbreviation: self.abbreviation.clone(),
            label_color: self.label_color.clone(),
            presence: PresenceWire::encode(&self.presence),
            categories: self
                .categories
                .all_ids()
                .map(|id| CategoryRefWire {
                    id: id.as_str().to_string(),
                })
                .collect(),
            reporting_category: reporting.clone().map(|id| CategoryRefWire { id }),
            category_id: reporting,
            tax_ids: self.tax_ids.iter().map(|id| id.as_str().to_string()).collect(),
            modifier_list_ids: self
                .modifier_list_ids
                .iter()
                .map(|id| id.as_str().to_string())
                .collect(),
            is_taxable: self.is_taxable,
            skip_modifier_screen: self.skip_modifier_screen,
            available_online: self.available_online,
            image_ids: self.image_ids.iter().map(|id| id.as_str().to_string()).collect(),
            variations: self.variations.iter().map(VariationRecord::to_wire).collect(),
        }
    }
}
