use crate::core::ListOrder;

use super::{Config, ConfigLayer};

/// Defaults, then the user layer, then the project layer.
pub fn merge_layers(user: Option<ConfigLayer>, project: Option<ConfigLayer>) -> Config {
    let mut config = Config::default();
    if let Some(layer) = user {
        layer.apply_to(&mut config);
    }
    if let Some(layer) = project {
        layer.apply_to(&mut config);
    }
    config
}

pub fn apply_env_overrides(config: &mut Config) {
    apply_env_overrides_with(config, |key| std::env::var(key).ok());
}

/// `apply_env_overrides` against an arbitrary variable source.
pub fn apply_env_overrides_with(config: &mut Config, var: impl Fn(&str) -> Option<String>) {
    if let Some(raw) = var("CATALOG_EDIT_LIST_ORDER") {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            match ListOrder::parse_str(trimmed) {
                Some(order) => {
                    config.tracker.list_order = order;
                }
                None => {
                    tracing::warn!("invalid CATALOG_EDIT_LIST_ORDER `{trimmed}`, ignoring");
                }
            }
        }
    }

    if let Some(raw) = var("CATALOG_EDIT_MAX_RECENT") {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            match trimmed.parse::<usize>() {
                Ok(value) => {
                    config.limits.max_recent_items = value;
                }
                Err(err) => {
                    tracing::warn!("invalid CATALOG_EDIT_MAX_RECENT, ignoring: {err}");
                }
            }
        }
    }
}
