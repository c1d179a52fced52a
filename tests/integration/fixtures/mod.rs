//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use catalog_edit::ItemWire;
use tempfile::TempDir;

pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn latte() -> ItemWire {
    let contents = fs::read_to_string(fixture_path("latte.json")).expect("read fixture");
    serde_json::from_str(&contents).expect("parse fixture")
}

/// Write `item` as JSON into `dir` and return the path.
pub fn write_item(dir: &Path, name: &str, item: &ItemWire) -> PathBuf {
    let path = dir.join(name);
    let json = serde_json::to_string_pretty(item).expect("serialize item");
    fs::write(&path, json).expect("write item");
    path
}

/// The binary with config isolated to `home`.
pub fn catalog_edit(home: &TempDir) -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("catalog-edit");
    cmd.current_dir(home.path());
    cmd.env("CATALOG_EDIT_CONFIG_DIR", home.path().join("config"));
    cmd.env_remove("CATALOG_EDIT_LIST_ORDER");
    cmd.env_remove("CATALOG_EDIT_MAX_RECENT");
    cmd.env_remove("LOG");
    cmd
}
