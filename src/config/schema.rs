use serde::{Deserialize, Serialize};

use crate::core::{Limits, ListOrder, TrackerOptions};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub tracker: TrackerOptions,
    pub limits: Limits,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Tree,
    Pretty,
    Compact,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Logs always go to stderr; stdout carries command output.
    pub stderr: bool,
    pub stderr_format: LogFormat,
    /// Filter directives used when `LOG` is unset.
    pub filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            stderr: true,
            stderr_format: LogFormat::Tree,
            filter: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfigOverride {
    pub stderr: Option<bool>,
    pub stderr_format: Option<LogFormat>,
    pub filter: Option<String>,
}

impl LoggingConfigOverride {
    pub fn apply_to(&self, target: &mut LoggingConfig) {
        if let Some(stderr) = self.stderr {
            target.stderr = stderr;
        }
        if let Some(format) = self.stderr_format {
            target.stderr_format = format;
        }
        if let Some(filter) = self.filter.as_ref() {
            target.filter = Some(filter.clone());
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerOverride {
    pub list_order: Option<ListOrder>,
}

impl TrackerOverride {
    pub fn apply_to(&self, target: &mut TrackerOptions) {
        if let Some(order) = self.list_order {
            target.list_order = order;
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsOverride {
    pub max_recent_items: Option<usize>,
    pub max_variations: Option<usize>,
    pub max_location_overrides: Option<usize>,
}

impl LimitsOverride {
    pub fn apply_to(&self, limits: &mut Limits) {
        if let Some(value) = self.max_recent_items {
            limits.max_recent_items = value;
        }
        if let Some(value) = self.max_variations {
            limits.max_variations = value;
        }
        if let Some(value) = self.max_location_overrides {
            limits.max_location_overrides = value;
        }
    }
}

/// One config file. Every field is optional so a layer only overrides what
/// it names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigLayer {
    pub logging: LoggingConfigOverride,
    pub tracker: TrackerOverride,
    pub limits: LimitsOverride,
}

impl ConfigLayer {
    pub fn apply_to(&self, base: &mut Config) {
        self.logging.apply_to(&mut base.logging);
        self.tracker.apply_to(&mut base.tracker);
        self.limits.apply_to(&mut base.limits);
    }
}
