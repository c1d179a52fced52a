//! The `catalog-edit` binary against item files on disk.

use catalog_edit::ItemWire;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

use crate::fixtures::{catalog_edit, fixture_path, latte, write_item};

fn stdout_json(output: &[u8]) -> Value {
    serde_json::from_slice(output).expect("stdout is json")
}

fn stdout_item(output: &[u8]) -> ItemWire {
    serde_json::from_slice(output).expect("stdout is an item")
}

#[test]
fn inspect_reports_every_mentioned_location() {
    let home = TempDir::new().unwrap();
    let out = catalog_edit(&home)
        .args(["--json", "inspect"])
        .arg(fixture_path("latte.json"))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let view = stdout_json(&out);

    assert_eq!(view["reporting_category"], "HOT");
    assert_eq!(view["additional_categories"], serde_json::json!(["DRINKS"]));
    assert_eq!(view["master_enabled"], true);

    let locations = view["locations"].as_array().unwrap();
    let names: Vec<&str> = locations
        .iter()
        .map(|l| l["location"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["L1", "L2", "L3"]);
    assert_eq!(locations[2]["enabled"], false);

    let small_l2 = &view["variations"][0]["locations"][1];
    assert_eq!(small_l2["tracking"], true);
    assert_eq!(small_l2["price"], "3.75 USD");
    let large_l2 = &view["variations"][1]["locations"][1];
    assert_eq!(large_l2["for_sale"], false);
    assert_eq!(large_l2["tracking"], true);
}

#[test]
fn inspect_human_output_honors_location_filter() {
    let home = TempDir::new().unwrap();
    catalog_edit(&home)
        .arg("inspect")
        .arg(fixture_path("latte.json"))
        .args(["--locations", "L3"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Latte (ITEM1) v4"))
        .stdout(predicate::str::contains("L3  disabled"))
        .stdout(predicate::str::contains("L1").not());
}

#[test]
fn diff_of_identical_items_is_clean() {
    let home = TempDir::new().unwrap();
    let path = fixture_path("latte.json");
    catalog_edit(&home)
        .arg("diff")
        .arg(&path)
        .arg(&path)
        .assert()
        .success()
        .stdout("clean\n");
}

#[test]
fn diff_ignores_images_but_not_tax_order() {
    let home = TempDir::new().unwrap();
    let baseline = write_item(home.path(), "base.json", &latte());

    let mut images = latte();
    images.image_ids = vec!["IMG2".into()];
    let images = write_item(home.path(), "images.json", &images);
    catalog_edit(&home)
        .arg("diff")
        .arg(&baseline)
        .arg(&images)
        .assert()
        .success()
        .stdout("clean\n");

    let mut reordered = latte();
    reordered.tax_ids.reverse();
    let reordered = write_item(home.path(), "reordered.json", &reordered);
    let out = catalog_edit(&home)
        .args(["diff", "--json"])
        .arg(&baseline)
        .arg(&reordered)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let view = stdout_json(&out);
    assert_eq!(view["dirty"], true);
    assert_eq!(view["changed"], serde_json::json!(["tax_ids"]));

    catalog_edit(&home)
        .env("CATALOG_EDIT_LIST_ORDER", "unordered")
        .arg("diff")
        .arg(&baseline)
        .arg(&reordered)
        .assert()
        .success()
        .stdout("clean\n");
}

#[test]
fn diff_reports_nested_variation_paths() {
    let home = TempDir::new().unwrap();
    let baseline = write_item(home.path(), "base.json", &latte());
    let mut current = latte();
    current.variations[1].sku = "LAT-L".into();
    let current = write_item(home.path(), "current.json", &current);

    catalog_edit(&home)
        .arg("diff")
        .arg(&baseline)
        .arg(&current)
        .assert()
        .success()
        .stdout("variations[1].sku\n");
}

#[test]
fn toggle_item_presence() {
    let home = TempDir::new().unwrap();
    let out = catalog_edit(&home)
        .arg("toggle")
        .arg(fixture_path("latte.json"))
        .args(["--location", "L3", "--enable"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let item = stdout_item(&out);
    assert!(item.presence.present_at_all_locations);
    assert!(item.presence.absent_at_location_ids.is_empty());
}

#[test]
fn toggle_variation_for_sale_and_tracking() {
    let home = TempDir::new().unwrap();
    let out = catalog_edit(&home)
        .arg("toggle")
        .arg(fixture_path("latte.json"))
        .args(["--location", "L1", "--disable", "--variation", "V_LARGE"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let item = stdout_item(&out);
    let large = &item.variations[1].presence;
    assert!(!large.present_at_all_locations);
    assert!(large.present_at_location_ids.is_empty());

    let out = catalog_edit(&home)
        .arg("toggle")
        .arg(fixture_path("latte.json"))
        .args(["--location", "L2", "--disable", "--variation", "0", "--tracking"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let item = stdout_item(&out);
    let overrides = &item.variations[0].location_overrides;
    assert_eq!(overrides.len(), 1);
    assert_eq!(overrides[0].track_inventory, Some(false));
}

#[test]
fn toggle_tracking_without_variation_applies_to_all() {
    let home = TempDir::new().unwrap();
    let out = catalog_edit(&home)
        .arg("toggle")
        .arg(fixture_path("latte.json"))
        .args(["--location", "L1", "--enable", "--tracking"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let item = stdout_item(&out);
    for variation in &item.variations {
        let at_l1 = variation
            .location_overrides
            .iter()
            .find(|o| o.location_id == "L1")
            .expect("override created at L1");
        assert_eq!(at_l1.track_inventory, Some(true));
    }
}

#[test]
fn unknown_variation_fails() {
    let home = TempDir::new().unwrap();
    catalog_edit(&home)
        .arg("toggle")
        .arg(fixture_path("latte.json"))
        .args(["--location", "L1", "--enable", "--variation", "V_NOPE"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty());
}

#[test]
fn missing_file_fails() {
    let home = TempDir::new().unwrap();
    catalog_edit(&home)
        .args(["inspect", "does-not-exist.json"])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn toggle_requires_enable_or_disable() {
    let home = TempDir::new().unwrap();
    catalog_edit(&home)
        .arg("toggle")
        .arg(fixture_path("latte.json"))
        .args(["--location", "L1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--enable"));
}
