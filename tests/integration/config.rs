//! Config layering as seen by the binary: defaults, user file, project file,
//! then environment.

use std::fs;

use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

use crate::fixtures::catalog_edit;

fn effective_config(home: &TempDir, envs: &[(&str, &str)]) -> Value {
    let mut cmd = catalog_edit(home);
    for (key, value) in envs {
        cmd.env(key, value);
    }
    let out = cmd
        .args(["config", "show", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    serde_json::from_slice(&out).expect("config json")
}

fn write_user_config(home: &TempDir, contents: &str) {
    let dir = home.path().join("config");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.toml"), contents).unwrap();
}

#[test]
fn defaults_without_any_files() {
    let home = TempDir::new().unwrap();
    let cfg = effective_config(&home, &[]);
    assert_eq!(cfg["tracker"]["list_order"], "ordered");
    assert_eq!(cfg["limits"]["max_recent_items"], 15);
    assert_eq!(cfg["limits"]["max_variations"], 250);
    assert_eq!(cfg["logging"]["stderr_format"], "tree");
}

#[test]
fn project_file_overrides_user_file() {
    let home = TempDir::new().unwrap();
    write_user_config(
        &home,
        "[limits]\nmax_recent_items = 3\nmax_variations = 40\n\n[tracker]\nlist_order = \"unordered\"\n",
    );
    fs::write(
        home.path().join("catalog-edit.toml"),
        "[limits]\nmax_recent_items = 8\n",
    )
    .unwrap();

    let cfg = effective_config(&home, &[]);
    assert_eq!(cfg["limits"]["max_recent_items"], 8);
    assert_eq!(cfg["limits"]["max_variations"], 40);
    assert_eq!(cfg["tracker"]["list_order"], "unordered");
}

#[test]
fn project_file_is_found_from_a_subdirectory() {
    let home = TempDir::new().unwrap();
    fs::write(
        home.path().join("catalog-edit.toml"),
        "[limits]\nmax_location_overrides = 5\n",
    )
    .unwrap();
    let nested = home.path().join("a").join("b");
    fs::create_dir_all(&nested).unwrap();

    let out = catalog_edit(&home)
        .current_dir(&nested)
        .args(["config", "show", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let cfg: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(cfg["limits"]["max_location_overrides"], 5);
}

#[test]
fn env_overrides_files_and_bad_values_are_ignored() {
    let home = TempDir::new().unwrap();
    write_user_config(&home, "[limits]\nmax_recent_items = 3\n");

    let cfg = effective_config(&home, &[("CATALOG_EDIT_MAX_RECENT", "21")]);
    assert_eq!(cfg["limits"]["max_recent_items"], 21);

    let cfg = effective_config(
        &home,
        &[
            ("CATALOG_EDIT_MAX_RECENT", "many"),
            ("CATALOG_EDIT_LIST_ORDER", "sideways"),
        ],
    );
    assert_eq!(cfg["limits"]["max_recent_items"], 3);
    assert_eq!(cfg["tracker"]["list_order"], "ordered");
}

#[test]
fn malformed_user_config_falls_back_to_defaults() {
    let home = TempDir::new().unwrap();
    write_user_config(&home, "[limits\n");
    catalog_edit(&home)
        .args(["config", "show", "--json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("config load failed"));
}

#[test]
fn init_writes_defaults_once() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("config").join("config.toml");

    catalog_edit(&home)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("wrote"));
    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("max_recent_items = 15"));

    fs::write(&path, "[limits]\nmax_recent_items = 2\n").unwrap();
    catalog_edit(&home)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("config exists"));
    assert!(fs::read_to_string(&path).unwrap().contains("max_recent_items = 2"));

    catalog_edit(&home)
        .args(["config", "init", "--force"])
        .assert()
        .success();
    assert!(fs::read_to_string(&path).unwrap().contains("max_recent_items = 15"));
}
