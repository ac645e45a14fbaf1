//! Import pipeline: fetch the held snapshot, compile it into a restore plan,
//! and execute the plan against a browser.
//!
//! Execution is one linear pass over the steps in order. Any failure aborts
//! the whole import; windows and tabs created before the failure are left in
//! place (no rollback), matching the source tool's behavior.

pub mod plan;

use std::collections::HashMap;

use tracing::{debug, info};

use crate::browser::{BrowserOperations, CreatedWindow, TabId};
use crate::error::{Result, TtError};
use crate::relay::RelayClient;
use crate::snapshot::{GroupId, GroupInfo};
use plan::{build_plan, PlanStep, RestorePlan, TabSlot, WindowSlot};

/// Result of a completed import action.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ImportOutcome {
    /// Number of tabs created across all windows.
    pub tab_count: usize,
    /// Groups whose tabs were restored ungrouped because the snapshot
    /// carried no metadata for them.
    pub degraded_groups: Vec<GroupId>,
}

/// Per-window execution state: the live ids behind the plan's symbolic slots.
struct WindowCtx {
    created: CreatedWindow,
    /// Live tab id per tab slot; slot 0 is the seed tab.
    tabs: HashMap<TabSlot, TabId>,
    /// Source group id → live group id.
    groups: HashMap<GroupId, GroupId>,
}

/// Execute a restore plan against a browser, returning the created-tab count.
///
/// Steps run strictly in plan order. A `CreateGroup` step is realized by
/// temporarily placing the window's seed tab into a fresh group, applying
/// the captured metadata, then removing the seed tab again — the browser
/// cannot create an empty group.
pub fn execute(browser: &dyn BrowserOperations, plan: &RestorePlan) -> Result<usize> {
    let mut windows: HashMap<WindowSlot, WindowCtx> = HashMap::new();
    let mut tab_count = 0;

    for step in &plan.steps {
        debug!(?step, "executing");
        match step {
            PlanStep::CreateWindow { window, url } => {
                let created = browser.create_window(url)?;
                let mut tabs = HashMap::new();
                tabs.insert(0, created.seed_tab);
                windows.insert(
                    *window,
                    WindowCtx {
                        created,
                        tabs,
                        groups: HashMap::new(),
                    },
                );
                tab_count += 1;
            }
            PlanStep::CreateGroup {
                window,
                group,
                title,
                color,
                collapsed,
            } => {
                let ctx = window_ctx(&mut windows, *window)?;
                let seed = ctx.created.seed_tab;
                let live = browser.create_group(seed)?;
                let info = GroupInfo::new(title.clone(), *color).collapsed(*collapsed);
                browser.update_group(live, &info)?;
                // The seed tab does not belong to the group yet; it was only
                // needed to create it.
                browser.ungroup(seed)?;
                ctx.groups.insert(*group, live);
            }
            PlanStep::CreateTab {
                window,
                tab,
                url,
                pinned,
            } => {
                let ctx = window_ctx(&mut windows, *window)?;
                let id = browser.create_tab(ctx.created.id, url, *pinned)?;
                ctx.tabs.insert(*tab, id);
                tab_count += 1;
            }
            PlanStep::AddToGroup { window, tab, group } => {
                let ctx = window_ctx(&mut windows, *window)?;
                let tab_id = resolve_tab(ctx, *tab)?;
                let live = *ctx
                    .groups
                    .get(group)
                    .ok_or(TtError::GroupNotFound { id: *group })?;
                browser.add_to_group(tab_id, live)?;
            }
            PlanStep::PinTab { window, tab } => {
                let ctx = window_ctx(&mut windows, *window)?;
                let tab_id = resolve_tab(ctx, *tab)?;
                browser.pin(tab_id)?;
            }
        }
    }

    info!(tab_count, windows = windows.len(), "restore complete");
    Ok(tab_count)
}

fn window_ctx(
    windows: &mut HashMap<WindowSlot, WindowCtx>,
    slot: WindowSlot,
) -> Result<&mut WindowCtx> {
    windows
        .get_mut(&slot)
        .ok_or_else(|| TtError::Other(format!("plan references window slot {slot} before creation")))
}

fn resolve_tab(ctx: &WindowCtx, slot: TabSlot) -> Result<TabId> {
    ctx.tabs
        .get(&slot)
        .copied()
        .ok_or_else(|| TtError::Other(format!("plan references tab slot {slot} before creation")))
}

/// The "import tabs" action: fetch the snapshot from the relay, compile it,
/// and recreate everything in the target browser.
pub fn import(browser: &dyn BrowserOperations, client: &RelayClient) -> Result<ImportOutcome> {
    let snapshot = client.import()?;
    let plan = build_plan(&snapshot);
    let tab_count = execute(browser, &plan)?;
    Ok(ImportOutcome {
        tab_count,
        degraded_groups: plan.degraded_groups,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::mock::{MockBrowser, Operation};
    use crate::snapshot::{GroupColor, TabEntry, TabSnapshot, WindowSnapshot, UNGROUPED};
    use chrono::Utc;

    fn snapshot_of(windows: Vec<WindowSnapshot>) -> TabSnapshot {
        TabSnapshot {
            windows,
            exported_at: Utc::now(),
        }
    }

    fn work_window() -> WindowSnapshot {
        let mut window = WindowSnapshot::new();
        window.add_tab(TabEntry::new("https://a.test", "A", 0).pinned(true).in_group(1));
        window.add_tab(TabEntry::new("https://b.test", "B", 1).in_group(1));
        window.add_tab(TabEntry::new("https://c.test", "C", 2));
        window.add_group(1, GroupInfo::new("Work", GroupColor::Blue));
        window
    }

    #[test]
    fn test_execute_restores_window_state() {
        let mock = MockBrowser::new();
        let plan = build_plan(&snapshot_of(vec![work_window()]));

        let count = execute(&mock, &plan).unwrap();
        assert_eq!(count, 3);
        assert_eq!(mock.window_count(), 1);

        let window = mock.window_ids()[0];
        let tabs = mock.tabs_in(window);
        assert_eq!(tabs.len(), 3);

        // Order preserved, seed pinned, A and B grouped, C ungrouped
        assert_eq!(tabs[0].url, "https://a.test");
        assert!(tabs[0].pinned);
        assert_eq!(tabs[1].url, "https://b.test");
        assert_eq!(tabs[2].url, "https://c.test");
        assert_ne!(tabs[0].group_id, UNGROUPED);
        assert_eq!(tabs[0].group_id, tabs[1].group_id);
        assert_eq!(tabs[2].group_id, UNGROUPED);

        let meta = mock.group_meta(tabs[0].group_id).unwrap();
        assert_eq!(meta.title, "Work");
        assert_eq!(meta.color, GroupColor::Blue);
    }

    #[test]
    fn test_group_created_via_seed_tab_then_released() {
        let mock = MockBrowser::new();
        let plan = build_plan(&snapshot_of(vec![work_window()]));
        execute(&mock, &plan).unwrap();

        let ops = mock.operations();
        // The group is created around the seed tab, updated, then the seed
        // tab is ungrouped before any other tab is created.
        let create_group = ops
            .iter()
            .position(|op| matches!(op, Operation::CreateGroup { .. }))
            .unwrap();
        let update = ops
            .iter()
            .position(|op| matches!(op, Operation::UpdateGroup { .. }))
            .unwrap();
        let ungroup = ops
            .iter()
            .position(|op| matches!(op, Operation::Ungroup { .. }))
            .unwrap();
        let first_tab = ops
            .iter()
            .position(|op| matches!(op, Operation::CreateTab { .. }))
            .unwrap();
        assert!(create_group < update && update < ungroup && ungroup < first_tab);
    }

    #[test]
    fn test_seed_pin_is_last_operation() {
        let mock = MockBrowser::new();
        let plan = build_plan(&snapshot_of(vec![work_window()]));
        execute(&mock, &plan).unwrap();

        let ops = mock.operations();
        assert!(matches!(ops.last(), Some(Operation::Pin { .. })));
    }

    #[test]
    fn test_failure_aborts_without_rollback() {
        let mock = MockBrowser::new();
        mock.fail_url("https://c.test");
        let plan = build_plan(&snapshot_of(vec![work_window()]));

        let result = execute(&mock, &plan);
        assert!(result.is_err());

        // The window and the tabs created before the failure remain
        assert_eq!(mock.window_count(), 1);
        let tabs = mock.tabs_in(mock.window_ids()[0]);
        assert_eq!(tabs.len(), 2);
    }

    #[test]
    fn test_multiple_windows_accumulate_count() {
        let mut other = WindowSnapshot::new();
        other.add_tab(TabEntry::new("https://d.test", "D", 0));
        other.add_tab(TabEntry::new("https://e.test", "E", 1));

        let mock = MockBrowser::new();
        let plan = build_plan(&snapshot_of(vec![work_window(), other]));
        let count = execute(&mock, &plan).unwrap();
        assert_eq!(count, 5);
        assert_eq!(mock.window_count(), 2);
    }

    #[test]
    fn test_degraded_group_tabs_stay_ungrouped() {
        let mut window = WindowSnapshot::new();
        window.add_tab(TabEntry::new("https://a.test", "A", 0).in_group(77));
        window.add_tab(TabEntry::new("https://b.test", "B", 1).in_group(77));

        let mock = MockBrowser::new();
        let plan = build_plan(&snapshot_of(vec![window]));
        execute(&mock, &plan).unwrap();

        let tabs = mock.tabs_in(mock.window_ids()[0]);
        assert!(tabs.iter().all(|t| t.group_id == UNGROUPED));
        assert_eq!(plan.degraded_groups, vec![77]);
    }
}
