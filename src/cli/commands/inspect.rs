use std::collections::BTreeSet;

use serde::Serialize;

use super::super::render;
use super::super::{Ctx, InspectArgs, print_json, print_line, read_item};
use crate::Result;
use crate::core::{CategoryDirectory, ItemRecord, LocationId, LocationUniverse, VariationRecord};
use crate::session::{EditSession, SessionContext};

#[derive(Debug, Serialize)]
pub(crate) struct InspectView {
    pub id: Option<String>,
    pub version: Option<i64>,
    pub name: String,
    pub master_enabled: bool,
    pub reporting_category: Option<String>,
    pub additional_categories: Vec<String>,
    pub locations: Vec<LocationView>,
    pub variations: Vec<VariationView>,
    pub notes: Vec<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct LocationView {
    pub location: String,
    pub enabled: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct VariationView {
    pub index: usize,
    pub id: Option<String>,
    pub name: String,
    pub tracking_mode: String,
    pub locations: Vec<VariationLocationView>,
}

#[derive(Debug, Serialize)]
pub(crate) struct VariationLocationView {
    pub location: String,
    pub for_sale: bool,
    pub tracking: bool,
    pub price: Option<String>,
}

pub(crate) fn handle(ctx: &Ctx, args: InspectArgs) -> Result<()> {
    let wire = read_item(&args.file)?;
    let universe: LocationUniverse = args.locations.into_iter().collect();
    let session = EditSession::open(
        &wire,
        SessionContext::new(universe, CategoryDirectory::default(), &ctx.config),
    )?;

    let locations: Vec<LocationId> = if session.context().locations.is_empty() {
        mentioned_locations(session.record()).into_iter().collect()
    } else {
        session.context().locations.iter().cloned().collect()
    };
    let view = build_view(&session, &locations);

    if ctx.json {
        print_json(&view)
    } else {
        print_line(&render::render_inspect(&view))
    }
}

/// Every location the item or its variations refer to.
fn mentioned_locations(record: &ItemRecord) -> BTreeSet<LocationId> {
    let mut out = BTreeSet::new();
    out.extend(record.presence.exceptions().iter().cloned());
    out.extend(record.presence.inclusions().iter().cloned());
    for v in &record.variations {
        out.extend(v.sellable.exceptions().iter().cloned());
        out.extend(v.sellable.inclusions().iter().cloned());
        out.extend(v.location_overrides.iter().map(|o| o.location_id.clone()));
    }
    out
}

fn build_view(session: &EditSession, locations: &[LocationId]) -> InspectView {
    let record = session.record();
    InspectView {
        id: record.id.as_ref().map(ToString::to_string),
        version: record.version,
        name: record.name.clone(),
        master_enabled: session.master_enabled(),
        reporting_category: record
            .categories
            .reporting_category_id()
            .map(ToString::to_string),
        additional_categories: record
            .categories
            .additional_category_ids()
            .iter()
            .map(ToString::to_string)
            .collect(),
        locations: locations
            .iter()
            .map(|location| LocationView {
                location: location.to_string(),
                enabled: session.is_enabled(location),
            })
            .collect(),
        variations: record
            .variations
            .iter()
            .enumerate()
            .map(|(index, v)| variation_view(index, v, locations))
            .collect(),
        notes: session
            .load_report()
            .notes()
            .iter()
            .map(ToString::to_string)
            .collect(),
    }
}

fn variation_view(index: usize, v: &VariationRecord, locations: &[LocationId]) -> VariationView {
    VariationView {
        index,
        id: v.id.as_ref().map(ToString::to_string),
        name: v.name.clone(),
        tracking_mode: v.effective_tracking_mode().to_string(),
        locations: locations
            .iter()
            .map(|location| VariationLocationView {
                location: location.to_string(),
                for_sale: v.is_for_sale(location),
                tracking: v.is_tracking(location),
                price: v.price_at(location).map(|m| m.to_string()),
            })
            .collect(),
    }
}
