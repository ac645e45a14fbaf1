//! Export pipeline: capture selected windows into a snapshot and send it to
//! the relay.
//!
//! Tabs on internal browser pages are silently dropped — they cannot be
//! recreated in another profile. Group metadata lookups are best-effort: a
//! failed lookup is logged, the group id disappears from the window's group
//! map, and the id is surfaced in the result for observability.

use tracing::{debug, info, warn};

use crate::browser::{BrowserOperations, WindowId};
use crate::error::Result;
use crate::relay::RelayClient;
use crate::snapshot::{GroupId, TabEntry, TabSnapshot, WindowSnapshot, UNGROUPED};

/// URL prefixes of internal browser pages that cannot be recreated in
/// another profile.
const INTERNAL_SCHEMES: &[&str] = &["chrome://", "chrome-extension://"];

/// Returns true if the URL points at an internal browser page.
#[must_use]
pub fn is_internal_url(url: &str) -> bool {
    INTERNAL_SCHEMES.iter().any(|scheme| url.starts_with(scheme))
}

/// A captured snapshot plus the group ids whose metadata lookup failed.
#[derive(Debug, Clone, PartialEq)]
pub struct Collected {
    pub snapshot: TabSnapshot,
    /// Groups that degraded to untitled/ungrouped because their metadata
    /// could not be read.
    pub degraded_groups: Vec<GroupId>,
}

/// Result of a completed export action.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ExportOutcome {
    /// Number of tabs sent to the relay.
    pub tab_count: usize,
    /// Groups whose metadata was lost during capture.
    pub degraded_groups: Vec<GroupId>,
}

/// Capture the selected windows into a snapshot.
///
/// Window ids not currently open are ignored. Windows left with zero
/// eligible tabs after filtering are omitted entirely.
pub fn collect_windows(
    browser: &dyn BrowserOperations,
    window_ids: &[WindowId],
) -> Result<Collected> {
    let mut snapshot = TabSnapshot::new();
    let mut degraded_groups = Vec::new();

    let all_windows = browser.windows()?;
    let selected = all_windows.iter().filter(|w| window_ids.contains(&w.id));

    for window in selected {
        let mut captured = WindowSnapshot::new();

        for (index, tab) in window.tabs.iter().enumerate() {
            if is_internal_url(&tab.url) {
                debug!(url = %tab.url, "skipping internal page");
                continue;
            }
            // `index` records the tab's position in the source window;
            // restore order comes from array position, not this field.
            captured.add_tab(
                TabEntry::new(tab.url.clone(), tab.title.clone(), index as u32)
                    .pinned(tab.pinned)
                    .in_group(tab.group_id),
            );
        }

        if captured.tabs.is_empty() {
            debug!(window = window.id, "window has no eligible tabs, omitting");
            continue;
        }

        // Distinct group ids among the kept tabs, best-effort metadata
        let mut group_ids: Vec<GroupId> = captured
            .tabs
            .iter()
            .map(|t| t.group_id)
            .filter(|&g| g != UNGROUPED)
            .collect();
        group_ids.sort_unstable();
        group_ids.dedup();

        for group in group_ids {
            match browser.group_info(group) {
                Ok(info) => captured.add_group(group, info),
                Err(e) => {
                    warn!(group, error = %e, "could not read group metadata");
                    degraded_groups.push(group);
                }
            }
        }

        snapshot.windows.push(captured);
    }

    info!(
        windows = snapshot.windows.len(),
        tabs = snapshot.total_tabs(),
        "captured snapshot"
    );

    Ok(Collected {
        snapshot,
        degraded_groups,
    })
}

/// The "export tabs" action: capture the selected windows and store the
/// snapshot on the relay.
///
/// Returns the number of tabs sent. Transport failures surface as
/// [`crate::error::TtError::RelayOffline`]; server rejections carry the
/// relay's message verbatim.
pub fn export_windows(
    browser: &dyn BrowserOperations,
    client: &RelayClient,
    window_ids: &[WindowId],
) -> Result<ExportOutcome> {
    let collected = collect_windows(browser, window_ids)?;
    let tab_count = collected.snapshot.total_tabs();

    client.export(&collected.snapshot)?;

    info!(tab_count, "export complete");
    Ok(ExportOutcome {
        tab_count,
        degraded_groups: collected.degraded_groups,
    })
}
