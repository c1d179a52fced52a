//! XDG directory helpers.

use std::path::PathBuf;

/// Directory holding the user config file.
///
/// Uses `CATALOG_EDIT_CONFIG_DIR` if set, otherwise
/// `$XDG_CONFIG_HOME/catalog-edit` or `~/.config/catalog-edit`.
pub(crate) fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CATALOG_EDIT_CONFIG_DIR")
        && !dir.trim().is_empty()
    {
        return PathBuf::from(dir);
    }

    std::env::var("XDG_CONFIG_HOME")
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("/tmp"))
                .join(".config")
        })
        .join("catalog-edit")
}
