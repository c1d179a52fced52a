use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::Result;

use super::merge::{apply_env_overrides, merge_layers};
use super::{Config, ConfigLayer};

const PROJECT_CONFIG_FILE: &str = "catalog-edit.toml";

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to render config: {0}")]
    Render(#[from] toml::ser::Error),
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub fn config_path() -> PathBuf {
    crate::paths::config_dir().join("config.toml")
}

pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(PROJECT_CONFIG_FILE)
}

/// Nearest ancestor of the working directory holding a project config.
pub fn discover_project_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    cwd.ancestors()
        .find(|dir| project_config_path(dir).is_file())
        .map(Path::to_path_buf)
}

fn read_layer(path: &Path) -> Result<Option<ConfigLayer>> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let layer = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(layer))
}

pub fn load_user_config() -> Result<Option<ConfigLayer>> {
    read_layer(&config_path())
}

pub fn load_project_config(project_root: &Path) -> Result<Option<ConfigLayer>> {
    read_layer(&project_config_path(project_root))
}

pub fn load() -> Result<Config> {
    load_for_root(discover_project_root().as_deref())
}

pub fn load_for_root(project_root: Option<&Path>) -> Result<Config> {
    let user = load_user_config()?;
    let project = match project_root {
        Some(root) => load_project_config(root)?,
        None => None,
    };
    let mut config = merge_layers(user, project);
    apply_env_overrides(&mut config);
    tracing::debug!(
        list_order = %config.tracker.list_order,
        max_recent = config.limits.max_recent_items,
        "config loaded"
    );
    Ok(config)
}

pub fn write_config(path: &Path, cfg: &Config) -> Result<()> {
    let write_err = |source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };
    let dir = path
        .parent()
        .ok_or_else(|| write_err(std::io::Error::other("config path has no parent")))?;
    fs::create_dir_all(dir).map_err(write_err)?;
    let contents = toml::to_string_pretty(cfg).map_err(ConfigError::from)?;
    let temp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    fs::write(temp.path(), contents.as_bytes()).map_err(write_err)?;
    temp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}
