//! End-to-end transfer pipelines: collect from a mock browser, pass the
//! snapshot through the store the way the relay does, and recreate it in a
//! second mock browser.

use serde_json::Value;

use tt::browser::mock::MockBrowser;
use tt::collector::collect_windows;
use tt::recreator::plan::build_plan;
use tt::recreator::execute;
use tt::relay::SnapshotStore;
use tt::snapshot::{GroupColor, TabSnapshot, UNGROUPED};

use crate::common::fixtures;

/// Serialize through the store and back, the way an export/import pair does.
fn through_store(snapshot: &TabSnapshot) -> TabSnapshot {
    let store = SnapshotStore::new();
    store.replace(serde_json::to_value(snapshot).unwrap());
    serde_json::from_value(store.current().unwrap()).unwrap()
}

#[test]
fn test_collect_store_recreate() {
    crate::common::init_test_logging();

    // Source profile: window with A(pinned, group "Work"), B(group), an
    // internal page, and ungrouped C
    let (source, win) = fixtures::work_browser();
    let collected = collect_windows(&source, &[win]).unwrap();

    // The internal page is gone before anything reaches the relay
    assert_eq!(collected.snapshot.total_tabs(), 3);
    assert_eq!(collected.snapshot.windows[0].groups.len(), 1);

    // Relay round-trip, then recreate in the target profile
    let fetched = through_store(&collected.snapshot);
    assert_eq!(fetched, collected.snapshot);

    let target = MockBrowser::new();
    let plan = build_plan(&fetched);
    let created = execute(&target, &plan).unwrap();
    assert_eq!(created, 3);

    let tabs = target.tabs_in(target.window_ids()[0]);
    assert_eq!(tabs.len(), 3);
    assert_eq!(tabs[0].url, "https://a.test");
    assert!(tabs[0].pinned);
    assert_eq!(tabs[1].url, "https://b.test");
    assert_eq!(tabs[2].url, "https://c.test");

    // A and B share a group titled "Work" colored blue; C is ungrouped
    assert_ne!(tabs[0].group_id, UNGROUPED);
    assert_eq!(tabs[0].group_id, tabs[1].group_id);
    assert_eq!(tabs[2].group_id, UNGROUPED);
    let meta = target.group_meta(tabs[0].group_id).unwrap();
    assert_eq!(meta.title, "Work");
    assert_eq!(meta.color, GroupColor::Blue);
    assert!(!meta.collapsed);
}

#[test]
fn test_recreated_tab_count_matches_snapshot() {
    let snapshot = fixtures::work_snapshot();
    let plan = build_plan(&snapshot);

    let target = MockBrowser::new();
    let created = execute(&target, &plan).unwrap();
    assert_eq!(created, snapshot.total_tabs());
}

#[test]
fn test_second_export_fully_replaces_first() {
    let store = SnapshotStore::new();
    store.replace(serde_json::to_value(fixtures::work_snapshot()).unwrap());
    store.replace(serde_json::to_value(fixtures::other_snapshot()).unwrap());

    let held: TabSnapshot = serde_json::from_value(store.current().unwrap()).unwrap();
    assert_eq!(held, fixtures::other_snapshot());
    assert_eq!(held.total_tabs(), 1);
}

#[test]
fn test_degraded_group_survives_transfer_ungrouped() {
    // Source where group metadata cannot be read
    let source = MockBrowser::new();
    let win = source.add_window();
    source.add_tab(win, "https://a.test", "A", false, 4);
    source.add_tab(win, "https://b.test", "B", false, 4);
    source.fail_group_lookup(4);

    let collected = collect_windows(&source, &[win]).unwrap();
    assert_eq!(collected.degraded_groups, vec![4]);

    let target = MockBrowser::new();
    let plan = build_plan(&through_store(&collected.snapshot));
    assert_eq!(plan.degraded_groups, vec![4]);
    execute(&target, &plan).unwrap();

    let tabs = target.tabs_in(target.window_ids()[0]);
    assert!(tabs.iter().all(|t| t.group_id == UNGROUPED));
}

#[test]
fn test_store_holds_collector_output_verbatim() {
    let (source, win) = fixtures::work_browser();
    let collected = collect_windows(&source, &[win]).unwrap();

    let store = SnapshotStore::new();
    let sent = serde_json::to_value(&collected.snapshot).unwrap();
    store.replace(sent.clone());

    // Echo, not a transformed copy
    let held: Value = store.current().unwrap();
    assert_eq!(held, sent);
}
