use super::super::{Ctx, ToggleArgs, print_json, read_item, resolve_variation};
use crate::core::{CategoryDirectory, LocationUniverse};
use crate::session::{EditSession, SessionContext};
use crate::{Error, Result};

pub(crate) fn handle(ctx: &Ctx, args: ToggleArgs) -> Result<()> {
    let wire = read_item(&args.file)?;
    let variation = args
        .variation
        .as_deref()
        .map(|raw| resolve_variation(&wire, raw))
        .transpose()?;
    let mut session = EditSession::open(
        &wire,
        SessionContext::new(
            LocationUniverse::default(),
            CategoryDirectory::default(),
            &ctx.config,
        ),
    )?;

    let enabled = args.enabled();
    let location = &args.location;
    match (variation, args.tracking) {
        (None, false) => session.set_enabled(location, enabled),
        (Some(index), false) => session.set_for_sale(index, location, enabled)?,
        (Some(index), true) => session.set_tracking(index, location, enabled)?,
        (None, true) => {
            let count = session.record().variations.len();
            if count == 0 {
                return Err(Error::NoSuchVariation { index: 0 });
            }
            for index in 0..count {
                session.set_tracking(index, location, enabled)?;
            }
        }
    }

    if session.is_dirty() {
        tracing::info!(changed = %session.dirty_fields(), "item toggled");
    } else {
        tracing::info!("toggle left the item unchanged");
    }
    print_json(&session.record().to_wire())
}
