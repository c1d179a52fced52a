//! Layer 7: Change tracking
//!
//! A record type lists its tracked fields once, as a static table of
//! `(name, extractor, comparison)` entries. A `Snapshot` holds one extracted
//! value per entry; dirtiness is the table-driven comparison of the live
//! record against that snapshot.
//!
//! Records that were never captured use a different rule: they are dirty as
//! soon as the user has entered any meaningful data.

use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use super::item::ItemRecord;
use super::presence::PresenceSet;
use super::variation::VariationRecord;

/// One extracted field value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    OptText(Option<String>),
    Flag(bool),
    Amount(Option<i64>),
    Count(usize),
    Ids(Vec<String>),
    Presence(PresenceSet),
    /// Nested records, compared positionally.
    Rows(Vec<Row>),
}

/// Named values of one nested record.
pub type Row = Vec<(&'static str, FieldValue)>;

/// How two values of a field are compared.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Compare {
    Exact,
    /// Id lists; order sensitivity follows `TrackerOptions::list_order`.
    List,
    /// Count first, then element-wise per nested field.
    Rows,
}

/// Whether reordering a list counts as an edit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListOrder {
    #[default]
    Ordered,
    Unordered,
}

crate::enum_str! {
    impl ListOrder {
        pub fn as_str(&self) -> &'static str;
        pub fn parse_str(raw: &str) -> Option<Self>;
        variants {
            Ordered => ["ordered"],
            Unordered => ["unordered"],
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerOptions {
    pub list_order: ListOrder,
}

/// One tracked field of `R`.
pub struct TrackedField<R> {
    pub name: &'static str,
    pub compare: Compare,
    extract: fn(&R) -> FieldValue,
}

impl<R> TrackedField<R> {
    pub const fn new(name: &'static str, compare: Compare, extract: fn(&R) -> FieldValue) -> Self {
        Self {
            name,
            compare,
            extract,
        }
    }

    pub fn extract(&self, record: &R) -> FieldValue {
        (self.extract)(record)
    }
}

impl<R> fmt::Debug for TrackedField<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackedField")
            .field("name", &self.name)
            .field("compare", &self.compare)
            .finish()
    }
}

/// Field-set contract for change tracking.
pub trait Tracked: Sized + 'static {
    fn tracked_fields() -> &'static [TrackedField<Self>];

    /// Paths of fields holding meaningful user data. Used for records that
    /// have no baseline.
    fn data_fields(&self) -> Vec<String>;

    fn has_data(&self) -> bool {
        !self.data_fields().is_empty()
    }
}

/// Captured values of a record, one per tracked field.
pub struct Snapshot<R> {
    values: Vec<FieldValue>,
    _record: PhantomData<fn(&R)>,
}

impl<R: Tracked> Snapshot<R> {
    pub fn capture(record: &R) -> Self {
        Self {
            values: R::tracked_fields()
                .iter()
                .map(|field| field.extract(record))
                .collect(),
            _record: PhantomData,
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        R::tracked_fields()
            .iter()
            .position(|field| field.name == name)
            .and_then(|idx| self.values.get(idx))
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        R::tracked_fields()
            .iter()
            .map(|field| field.name)
            .zip(self.values.iter())
    }
}

impl<R> Clone for Snapshot<R> {
    fn clone(&self) -> Self {
        Self {
            values: self.values.clone(),
            _record: PhantomData,
        }
    }
}

impl<R> PartialEq for Snapshot<R> {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl<R> Eq for Snapshot<R> {}

impl<R> fmt::Debug for Snapshot<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("values", &self.values)
            .finish()
    }
}

/// Paths of fields that differ, in table order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChangeSet {
    paths: Vec<String>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.iter().any(|p| p == path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    pub fn into_paths(self) -> Vec<String> {
        self.paths
    }
}

impl fmt::Display for ChangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.paths.join(", "))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirtyState {
    Clean,
    Dirty,
}

impl DirtyState {
    pub fn is_dirty(self) -> bool {
        matches!(self, Self::Dirty)
    }
}

/// Holds the baseline of one record being edited.
pub struct ChangeTracker<R: Tracked> {
    baseline: Option<Snapshot<R>>,
    options: TrackerOptions,
}

impl<R: Tracked> ChangeTracker<R> {
    pub fn new(options: TrackerOptions) -> Self {
        Self {
            baseline: None,
            options,
        }
    }

    /// Replace the baseline with the current values of `record`.
    pub fn capture_baseline(&mut self, record: &R) {
        self.baseline = Some(Snapshot::capture(record));
    }

    pub fn clear_baseline(&mut self) {
        self.baseline = None;
    }

    pub fn baseline(&self) -> Option<&Snapshot<R>> {
        self.baseline.as_ref()
    }

    pub fn options(&self) -> &TrackerOptions {
        &self.options
    }

    pub fn is_dirty(&self, current: &R) -> bool {
        is_dirty(current, self.baseline.as_ref(), &self.options)
    }

    pub fn state(&self, current: &R) -> DirtyState {
        if self.is_dirty(current) {
            DirtyState::Dirty
        } else {
            DirtyState::Clean
        }
    }

    pub fn diff(&self, current: &R) -> ChangeSet {
        diff(current, self.baseline.as_ref(), &self.options)
    }
}

impl<R: Tracked> fmt::Debug for ChangeTracker<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeTracker")
            .field("baseline", &self.baseline)
            .field("options", &self.options)
            .finish()
    }
}

/// Without a baseline, dirty means "has data"; with one, any tracked field
/// differs.
pub fn is_dirty<R: Tracked>(
    current: &R,
    baseline: Option<&Snapshot<R>>,
    options: &TrackerOptions,
) -> bool {
    match baseline {
        None => current.has_data(),
        Some(baseline) => R::tracked_fields()
            .iter()
            .zip(baseline.values.iter())
            .any(|(field, before)| {
                let now = field.extract(current);
                !values_match(field.compare, before, &now, options)
            }),
    }
}

pub fn diff<R: Tracked>(
    current: &R,
    baseline: Option<&Snapshot<R>>,
    options: &TrackerOptions,
) -> ChangeSet {
    let Some(baseline) = baseline else {
        return ChangeSet {
            paths: current.data_fields(),
        };
    };
    let mut paths = Vec::new();
    for (field, before) in R::tracked_fields().iter().zip(baseline.values.iter()) {
        let now = field.extract(current);
        match (field.compare, before, &now) {
            (Compare::Rows, FieldValue::Rows(a), FieldValue::Rows(b)) if a.len() == b.len() => {
                for (idx, (row_a, row_b)) in a.iter().zip(b.iter()).enumerate() {
                    for ((name, va), (_, vb)) in row_a.iter().zip(row_b.iter()) {
                        if va != vb {
                            paths.push(format!("{}[{idx}].{name}", field.name));
                        }
                    }
                }
            }
            (compare, before, now) => {
                if !values_match(compare, before, now, options) {
                    paths.push(field.name.to_string());
                }
            }
        }
    }
    ChangeSet { paths }
}

fn values_match(
    compare: Compare,
    before: &FieldValue,
    now: &FieldValue,
    options: &TrackerOptions,
) -> bool {
    match (compare, options.list_order, before, now) {
        (Compare::List, ListOrder::Unordered, FieldValue::Ids(a), FieldValue::Ids(b)) => {
            let mut a = a.clone();
            let mut b = b.clone();
            a.sort();
            b.sort();
            a == b
        }
        (Compare::Rows, _, FieldValue::Rows(a), FieldValue::Rows(b)) => {
            a.len() == b.len() && a.iter().zip(b.iter()).all(|(ra, rb)| ra == rb)
        }
        _ => before == now,
    }
}

fn not_blank(s: &str) -> bool {
    !s.trim().is_empty()
}

fn ids<T: AsRef<str>>(list: &[T]) -> FieldValue {
    FieldValue::Ids(list.iter().map(|id| id.as_ref().to_string()).collect())
}

static ITEM_FIELDS: &[TrackedField<ItemRecord>] = &[
    TrackedField::new("name", Compare::Exact, |r: &ItemRecord| FieldValue::Text(r.name.clone())),
    TrackedField::new("description", Compare::Exact, |r: &ItemRecord| {
        FieldValue::Text(r.description.clone())
    }),
    TrackedField::new("abbreviation", Compare::Exact, |r: &ItemRecord| {
        FieldValue::Text(r.abbreviation.clone())
    }),
    TrackedField::new("label_color", Compare::Exact, |r: &ItemRecord| {
        FieldValue::OptText(r.label_color.clone())
    }),
    TrackedField::new("is_taxable", Compare::Exact, |r: &ItemRecord| FieldValue::Flag(r.is_taxable)),
    TrackedField::new("skip_modifier_screen", Compare::Exact, |r: &ItemRecord| {
        FieldValue::Flag(r.skip_modifier_screen)
    }),
    TrackedField::new("available_online", Compare::Exact, |r: &ItemRecord| {
        FieldValue::Flag(r.available_online)
    }),
    TrackedField::new("presence", Compare::Exact, |r: &ItemRecord| {
        FieldValue::Presence(r.presence.clone())
    }),
    TrackedField::new("reporting_category_id", Compare::Exact, |r: &ItemRecord| {
        FieldValue::OptText(
            r.categories
                .reporting_category_id()
                .map(|id| id.as_str().to_string()),
        )
    }),
    TrackedField::new("category_ids", Compare::List, |r: &ItemRecord| {
        ids(r.categories.additional_category_ids())
    }),
    TrackedField::new("tax_ids", Compare::List, |r: &ItemRecord| ids(&r.tax_ids)),
    TrackedField::new("modifier_list_ids", Compare::List, |r: &ItemRecord| {
        ids(&r.modifier_list_ids)
    }),
    TrackedField::new("variations", Compare::Rows, |r: &ItemRecord| {
        FieldValue::Rows(r.variations.iter().map(variation_row).collect())
    }),
];

static VARIATION_FIELDS: &[TrackedField<VariationRecord>] = &[
    TrackedField::new("name", Compare::Exact, |v: &VariationRecord| FieldValue::Text(v.name.clone())),
    TrackedField::new("sku", Compare::Exact, |v: &VariationRecord| FieldValue::Text(v.sku.clone())),
    TrackedField::new("upc", Compare::Exact, |v: &VariationRecord| FieldValue::Text(v.upc.clone())),
    TrackedField::new("price_amount", Compare::Exact, |v: &VariationRecord| {
        FieldValue::Amount(v.price_amount())
    }),
    TrackedField::new("pricing_type", Compare::Exact, |v: &VariationRecord| {
        FieldValue::Text(v.pricing_type.as_str().to_string())
    }),
    TrackedField::new("track_inventory", Compare::Exact, |v: &VariationRecord| {
        FieldValue::Flag(v.track_inventory)
    }),
    TrackedField::new("override_count", Compare::Exact, |v: &VariationRecord| {
        FieldValue::Count(v.location_overrides.len())
    }),
];

fn variation_row(v: &VariationRecord) -> Row {
    VARIATION_FIELDS
        .iter()
        .map(|field| (field.name, field.extract(v)))
        .collect()
}

impl Tracked for VariationRecord {
    fn tracked_fields() -> &'static [TrackedField<Self>] {
        VARIATION_FIELDS
    }

    fn data_fields(&self) -> Vec<String> {
        let mut out = Vec::new();
        for (name, value) in [("name", &self.name), ("sku", &self.sku), ("upc", &self.upc)] {
            if not_blank(value) {
                out.push(name.to_string());
            }
        }
        if self.price.is_some_and(|m| m.is_positive()) {
            out.push("price_amount".to_string());
        }
        out
    }
}

impl Tracked for ItemRecord {
    fn tracked_fields() -> &'static [TrackedField<Self>] {
        ITEM_FIELDS
    }

    fn data_fields(&self) -> Vec<String> {
        let mut out = Vec::new();
        for (name, value) in [
            ("name", &self.name),
            ("description", &self.description),
            ("abbreviation", &self.abbreviation),
        ] {
            if not_blank(value) {
                out.push(name.to_string());
            }
        }
        for (idx, variation) in self.variations.iter().enumerate() {
            out.extend(
                variation
                    .data_fields()
                    .into_iter()
                    .map(|name| format!("variations[{idx}].{name}")),
            );
        }
        out
    }
}
