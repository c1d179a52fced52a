//! Edit session lifecycle against the in-memory catalog service.

use catalog_edit::config::Config;
use catalog_edit::core::{CategoryId, Limits, Money, TrackingMode};
use catalog_edit::{
    CatalogStore, CategoryDirectory, EditSession, LocationId, LocationUniverse, MemoryStore,
    SaveOutcome, SessionContext, VariationRecord,
};

use crate::fixtures::latte;

fn loc(raw: &str) -> LocationId {
    LocationId::parse(raw).unwrap()
}

fn context(config: &Config) -> SessionContext {
    let locations: LocationUniverse = ["L1", "L2", "L3"].into_iter().map(loc).collect();
    let categories: CategoryDirectory = [("DRINKS", "Drinks"), ("HOT", "Hot drinks")]
        .into_iter()
        .map(|(id, name)| (CategoryId::parse(id).unwrap(), name.to_string()))
        .collect();
    SessionContext::new(locations, categories, config)
}

/// Seed the store with the fixture, returning the stored copy.
fn seeded(store: &mut MemoryStore) -> catalog_edit::ItemWire {
    let mut item = latte();
    item.id = None;
    item.version = None;
    store.upsert_item(&item).unwrap()
}

#[test]
fn edit_save_reopen_cycle() {
    let mut store = MemoryStore::new();
    let stored = seeded(&mut store);
    let config = Config::default();

    let mut session = EditSession::open(&stored, context(&config)).unwrap();
    assert!(session.load_report().is_clean());
    assert!(!session.is_dirty());
    assert!(!session.is_enabled(&loc("L3")));
    assert!(!session.is_for_sale(1, &loc("L2")).unwrap());

    session.set_enabled(&loc("L3"), true);
    session.set_tracking_mode(0, TrackingMode::StockCount).unwrap();
    session.edit(|r| {
        r.variations[0].set_price_override(&loc("L1"), Some(Money::usd(325)));
    });
    let changed = session.dirty_fields();
    assert!(changed.contains("presence"));
    assert!(changed.contains("variations[0].track_inventory"));
    assert!(changed.contains("variations[0].override_count"));

    let SaveOutcome::Saved { id, version, .. } = session.save(&mut store).unwrap() else {
        panic!("expected a save");
    };
    assert_eq!(version, Some(2));
    assert!(!session.is_dirty());

    let reopened = EditSession::open(store.get(id.as_str()).unwrap(), context(&config)).unwrap();
    assert_eq!(reopened.record(), session.record());
    assert!(reopened.is_enabled(&loc("L3")));
    assert!(reopened.is_tracking(0, &loc("L3")).unwrap());
    assert_eq!(
        reopened.record().variations[0].price_at(&loc("L1")),
        Some(Money::usd(325))
    );
}

#[test]
fn master_toggle_clears_exceptions() {
    let mut store = MemoryStore::new();
    let stored = seeded(&mut store);
    let mut session = EditSession::open(&stored, context(&Config::default())).unwrap();

    session.set_master(false);
    assert!(!session.master_enabled());
    assert!(session.enabled_locations().is_empty());

    session.set_master(true);
    assert!(session.master_enabled());
    assert_eq!(session.enabled_locations().len(), 3);
    assert!(session.record().presence.exceptions().is_empty());
    assert!(session.dirty_fields().contains("presence"));
}

#[test]
fn recent_list_is_capped_and_deduplicated() {
    let config = Config {
        limits: Limits {
            max_recent_items: 2,
            ..Limits::default()
        },
        ..Config::default()
    };
    let mut store = MemoryStore::new();
    let mut ctx = context(&config);
    let mut saved = Vec::new();

    for name in ["Tea", "Scone", "Muffin"] {
        let mut session = EditSession::create(ctx);
        session.edit(|r| r.name = name.to_string());
        let SaveOutcome::Saved { id, .. } = session.save(&mut store).unwrap() else {
            panic!("expected a save");
        };
        saved.push(id);
        ctx = session.into_context();
    }

    let mut session = EditSession::open(store.get(saved[1].as_str()).unwrap(), ctx).unwrap();
    session.edit(|r| r.description = "Blueberry".into());
    session.save(&mut store).unwrap();
    let ctx = session.into_context();

    let recent: Vec<_> = ctx.recent.iter().cloned().collect();
    assert_eq!(recent, vec![saved[1].clone(), saved[2].clone()]);
}

#[test]
fn added_variation_is_saved_with_an_id() {
    let mut store = MemoryStore::new();
    let mut session = EditSession::create(context(&Config::default()));
    session.edit(|r| r.name = "Cold brew".into());
    let index = session.add_variation(VariationRecord::named("Bottle")).unwrap();
    session.set_for_sale(index, &loc("L2"), false).unwrap();

    session.save(&mut store).unwrap();
    let record = session.record();
    assert_eq!(record.variations.len(), 2);
    assert!(record.variations.iter().all(|v| v.id.is_some()));
    assert!(!session.is_for_sale(index, &loc("L2")).unwrap());
    assert!(session.is_for_sale(index, &loc("L1")).unwrap());
}

#[test]
fn stale_version_is_rejected_and_session_stays_dirty() {
    let mut store = MemoryStore::new();
    let stored = seeded(&mut store);
    let config = Config::default();

    let mut first = EditSession::open(&stored, context(&config)).unwrap();
    let mut second = EditSession::open(&stored, context(&config)).unwrap();

    first.edit(|r| r.name = "Oat latte".into());
    first.save(&mut store).unwrap();

    second.edit(|r| r.name = "Soy latte".into());
    let err = second.save(&mut store).unwrap_err();
    assert!(!err.transience().is_retryable());
    assert!(second.is_dirty());
    assert_eq!(second.record().name, "Soy latte");
}

mod toggles {
    use proptest::prelude::*;

    use super::*;

    fn toggle() -> impl Strategy<Value = (usize, bool)> {
        (0usize..4, any::<bool>())
    }

    proptest! {
        #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

        /// Whatever the user toggles survives a save and a reload.
        #[test]
        fn saved_presence_matches_edited_presence(
            toggles in proptest::collection::vec(toggle(), 0..12),
            master in proptest::option::of(any::<bool>()),
        ) {
            let all = ["L1", "L2", "L3", "L4"].map(loc);
            let mut store = MemoryStore::new();
            let stored = seeded(&mut store);
            let mut session = EditSession::open(&stored, context(&Config::default())).unwrap();

            if let Some(master) = master {
                session.set_master(master);
            }
            for (idx, enabled) in &toggles {
                session.set_enabled(&all[*idx], *enabled);
            }
            let expected: Vec<bool> = all.iter().map(|l| session.is_enabled(l)).collect();

            session.save(&mut store).unwrap();
            let id = session.record().id.clone().unwrap();
            let reopened =
                EditSession::open(store.get(id.as_str()).unwrap(), context(&Config::default()))
                    .unwrap();
            let actual: Vec<bool> = all.iter().map(|l| reopened.is_enabled(l)).collect();
            prop_assert_eq!(actual, expected);
            prop_assert!(!reopened.is_dirty());
        }
    }
}
