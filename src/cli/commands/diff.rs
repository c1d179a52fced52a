use serde::Serialize;

use super::super::render;
use super::super::{Ctx, DiffArgs, print_json, print_line, read_item};
use crate::Result;
use crate::core::{ItemRecord, Snapshot, tracker};

#[derive(Debug, Serialize)]
struct DiffView {
    dirty: bool,
    changed: Vec<String>,
}

pub(crate) fn handle(ctx: &Ctx, args: DiffArgs) -> Result<()> {
    let limits = &ctx.config.limits;
    let baseline = ItemRecord::from_wire(&read_item(&args.baseline)?, limits)?.record;
    let current = ItemRecord::from_wire(&read_item(&args.current)?, limits)?.record;

    let snapshot = Snapshot::capture(&baseline);
    let changed = tracker::diff(&current, Some(&snapshot), &ctx.config.tracker);
    tracing::info!(changed = changed.len(), "items compared");

    if ctx.json {
        print_json(&DiffView {
            dirty: !changed.is_empty(),
            changed: changed.into_paths(),
        })
    } else {
        print_line(&render::render_diff(&changed))
    }
}
