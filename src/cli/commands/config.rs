use super::super::{Ctx, print_json, print_line};
use crate::config::{self, Config, ConfigError};
use crate::Result;

pub(crate) fn handle_show(ctx: &Ctx) -> Result<()> {
    if ctx.json {
        print_json(&ctx.config)
    } else {
        let rendered = toml::to_string_pretty(&ctx.config).map_err(ConfigError::from)?;
        print_line(rendered.trim_end())
    }
}

pub(crate) fn handle_init(ctx: &Ctx, force: bool) -> Result<()> {
    let path = config::config_path();
    if path.exists() && !force {
        tracing::info!(path = %path.display(), "config already present");
        return print_line(&format!("config exists: {}", path.display()));
    }
    config::write_config(&path, &Config::default())?;
    if ctx.json {
        print_json(&serde_json::json!({ "written": path }))
    } else {
        print_line(&format!("wrote {}", path.display()))
    }
}
