//! Config loading and persistence.

mod load;
mod merge;
mod schema;

pub use load::{
    ConfigError, config_path, discover_project_root, load, load_for_root, load_project_config,
    load_user_config, project_config_path, write_config,
};
pub use merge::{apply_env_overrides, apply_env_overrides_with, merge_layers};
pub use schema::{
    Config, ConfigLayer, LimitsOverride, LogFormat, LoggingConfig, LoggingConfigOverride,
    TrackerOverride,
};
