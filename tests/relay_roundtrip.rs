//! End-to-end relay tests: a real server on an ephemeral port driven by the
//! blocking client, exactly the way the CLI and the extension talk to it.

mod common;

use std::net::TcpListener;

use tokio::runtime::Runtime;

use tt::browser::mock::MockBrowser;
use tt::error::TtError;
use tt::relay::{Relay, RelayClient, SnapshotStore};
use tt::snapshot::UNGROUPED;

use common::fixtures;

/// Start a relay on an ephemeral port. The returned runtime must stay alive
/// for the duration of the test.
fn start_relay() -> (Runtime, RelayClient, SnapshotStore) {
    let rt = Runtime::new().unwrap();
    let store = SnapshotStore::new();

    let relay = rt
        .block_on(Relay::bind(store.clone(), "127.0.0.1:0".parse().unwrap()))
        .unwrap();
    let addr = relay.local_addr().unwrap();
    rt.spawn(relay.run());

    (rt, RelayClient::new(format!("http://{addr}")), store)
}

/// An address nothing is listening on.
fn dead_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

#[test]
fn test_store_then_retrieve_identity() {
    common::init_test_logging();
    let (_rt, client, _store) = start_relay();

    let snapshot = fixtures::work_snapshot();
    client.export(&snapshot).unwrap();

    let fetched = client.import().unwrap();
    assert_eq!(fetched, snapshot);

    // Non-destructive: a second import returns the same data
    assert_eq!(client.import().unwrap(), snapshot);
}

#[test]
fn test_retrieve_before_store_is_no_snapshot() {
    let (_rt, client, _store) = start_relay();
    assert!(matches!(client.import(), Err(TtError::NoSnapshot)));
}

#[test]
fn test_status_tracks_slot() {
    let (_rt, client, _store) = start_relay();

    let status = client.status().unwrap();
    assert_eq!(status.status, "running");
    assert!(!status.has_data);

    client.export(&fixtures::work_snapshot()).unwrap();
    assert!(client.status().unwrap().has_data);
}

#[test]
fn test_second_export_replaces_first() {
    let (_rt, client, _store) = start_relay();

    client.export(&fixtures::work_snapshot()).unwrap();
    client.export(&fixtures::other_snapshot()).unwrap();

    assert_eq!(client.import().unwrap(), fixtures::other_snapshot());
}

#[test]
fn test_malformed_body_rejected_and_slot_kept() {
    let (_rt, client, store) = start_relay();
    client.export(&fixtures::work_snapshot()).unwrap();

    // Bypass the typed client the way a broken caller would
    let http = reqwest::blocking::Client::new();
    let response = http
        .post(format!("{}/export", client.base_url()))
        .body("{definitely not json")
        .send()
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

    // Previous snapshot still served
    assert!(store.has_data());
    assert_eq!(client.import().unwrap(), fixtures::work_snapshot());
}

#[test]
fn test_unknown_route_is_plain_404() {
    let (_rt, client, _store) = start_relay();

    let http = reqwest::blocking::Client::new();
    let response = http
        .get(format!("{}/nope", client.base_url()))
        .send()
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
    assert_eq!(response.text().unwrap(), "Not Found");
}

#[test]
fn test_extension_actions_end_to_end() {
    let (_rt, client, _store) = start_relay();

    // "export tabs for window-id-set"
    let (source, win) = fixtures::work_browser();
    let exported = tt::collector::export_windows(&source, &client, &[win]).unwrap();
    assert_eq!(exported.tab_count, 3);
    assert!(exported.degraded_groups.is_empty());

    // "import tabs"
    let target = MockBrowser::new();
    let imported = tt::recreator::import(&target, &client).unwrap();
    assert_eq!(imported.tab_count, 3);

    let tabs = target.tabs_in(target.window_ids()[0]);
    assert_eq!(tabs.len(), 3);
    assert!(tabs[0].pinned);
    assert_eq!(tabs[0].group_id, tabs[1].group_id);
    assert_ne!(tabs[0].group_id, UNGROUPED);
    assert_eq!(tabs[2].group_id, UNGROUPED);
}

#[test]
fn test_offline_relay_maps_to_relay_offline() {
    let client = RelayClient::new(dead_url());

    assert!(matches!(client.status(), Err(TtError::RelayOffline { .. })));
    assert!(matches!(
        client.export(&fixtures::work_snapshot()),
        Err(TtError::RelayOffline { .. })
    ));
    assert!(matches!(client.import(), Err(TtError::RelayOffline { .. })));
}
