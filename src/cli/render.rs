//! Human renderer for CLI outputs.
//!
//! Pure formatting; handlers gather the data.

use std::fmt::Write;

use super::commands::inspect::InspectView;
use crate::core::ChangeSet;

pub(crate) fn render_inspect(view: &InspectView) -> String {
    let mut out = String::new();
    let _ = write!(out, "{}", display_name(&view.name));
    if let Some(id) = &view.id {
        let _ = write!(out, " ({id})");
    }
    if let Some(version) = view.version {
        let _ = write!(out, " v{version}");
    }
    out.push('\n');

    let _ = writeln!(
        out,
        "presence: {}",
        if view.master_enabled {
            "on by default"
        } else {
            "off by default"
        }
    );
    match &view.reporting_category {
        Some(category) => {
            let _ = writeln!(out, "reporting category: {category}");
        }
        None => out.push_str("reporting category: none\n"),
    }
    if !view.additional_categories.is_empty() {
        let _ = writeln!(
            out,
            "additional categories: {}",
            view.additional_categories.join(", ")
        );
    }

    if !view.locations.is_empty() {
        out.push_str("locations:\n");
        for loc in &view.locations {
            let _ = writeln!(
                out,
                "  {}  {}",
                loc.location,
                if loc.enabled { "enabled" } else { "disabled" }
            );
        }
    }

    out.push_str("variations:\n");
    for v in &view.variations {
        let _ = write!(out, "  [{}] {}", v.index, display_name(&v.name));
        if let Some(id) = &v.id {
            let _ = write!(out, " ({id})");
        }
        let _ = writeln!(out, " tracking={}", v.tracking_mode);
        for loc in &v.locations {
            let _ = write!(
                out,
                "      {}  {}, {}",
                loc.location,
                if loc.for_sale { "for sale" } else { "not for sale" },
                if loc.tracking { "tracked" } else { "untracked" }
            );
            if let Some(price) = &loc.price {
                let _ = write!(out, ", {price}");
            }
            out.push('\n');
        }
    }

    if !view.notes.is_empty() {
        out.push_str("notes:\n");
        for note in &view.notes {
            let _ = writeln!(out, "  - {note}");
        }
    }
    out.truncate(out.trim_end().len());
    out
}

pub(crate) fn render_diff(changed: &ChangeSet) -> String {
    if changed.is_empty() {
        return "clean".into();
    }
    changed.iter().collect::<Vec<_>>().join("\n")
}

fn display_name(name: &str) -> &str {
    if name.trim().is_empty() {
        "(unnamed)"
    } else {
        name
    }
}
