//! Mock browser implementation for unit testing.
//!
//! This module provides a mock browser session that records all operations
//! and supports assertions for testing the collector and recreator without
//! a running browser.
//!
//! # Example
//!
//! ```rust,ignore
//! use tt::browser::mock::{MockBrowser, Operation};
//! use tt::browser::BrowserOperations;
//!
//! let mock = MockBrowser::new();
//! let win = mock.add_window();
//! mock.add_tab(win, "https://example.com", "Example", false, -1);
//!
//! let created = mock.create_window("https://other.test").unwrap();
//! mock.assert_contains(&Operation::CreateWindow {
//!     url: "https://other.test".to_string(),
//! });
//! ```

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::trace;

use super::{BrowserOperations, CreatedWindow, LiveTab, LiveWindow, TabId, WindowId};
use crate::error::{Result, TtError};
use crate::snapshot::{GroupColor, GroupId, GroupInfo, UNGROUPED};

/// Recorded operation for assertions.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    ListWindows,
    GroupInfo {
        group: GroupId,
    },
    CreateWindow {
        url: String,
    },
    CreateTab {
        window: WindowId,
        url: String,
        pinned: bool,
    },
    CreateGroup {
        seed: TabId,
    },
    AddToGroup {
        tab: TabId,
        group: GroupId,
    },
    UpdateGroup {
        group: GroupId,
        title: String,
        color: GroupColor,
        collapsed: bool,
    },
    Ungroup {
        tab: TabId,
    },
    Pin {
        tab: TabId,
    },
}

#[derive(Debug, Clone)]
struct MockTab {
    id: TabId,
    url: String,
    title: String,
    pinned: bool,
    group_id: GroupId,
}

#[derive(Debug, Clone)]
struct MockWindow {
    id: WindowId,
    tabs: Vec<MockTab>,
}

#[derive(Debug, Default)]
struct Inner {
    next_id: i32,
    windows: Vec<MockWindow>,
    groups: HashMap<GroupId, GroupInfo>,
}

impl Inner {
    fn fresh_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn window_mut(&mut self, id: WindowId) -> Result<&mut MockWindow> {
        self.windows
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or(TtError::WindowNotFound { id })
    }

    fn tab_mut(&mut self, id: TabId) -> Result<&mut MockTab> {
        self.windows
            .iter_mut()
            .flat_map(|w| w.tabs.iter_mut())
            .find(|t| t.id == id)
            .ok_or(TtError::TabNotFound { id })
    }
}

/// Mock browser for testing without a real browser session.
///
/// Records all operations for later assertion, tracks window/tab/group state
/// so tests can inspect the result of an import, and provides various ways
/// to simulate browser failures.
#[derive(Default)]
pub struct MockBrowser {
    inner: Mutex<Inner>,
    operation_log: Mutex<Vec<Operation>>,
    error_injection: Mutex<Option<TtError>>,
    failing_groups: Mutex<Vec<GroupId>>,
    failing_urls: Mutex<Vec<String>>,
}

impl MockBrowser {
    /// Create an empty mock browser.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // === Seeding ===

    /// Add an empty window and return its id.
    pub fn add_window(&self) -> WindowId {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.fresh_id();
        inner.windows.push(MockWindow { id, tabs: Vec::new() });
        id
    }

    /// Add a tab to an existing window and return its id.
    ///
    /// # Panics
    ///
    /// Panics if the window does not exist; seeding mistakes are test bugs.
    pub fn add_tab(
        &self,
        window: WindowId,
        url: &str,
        title: &str,
        pinned: bool,
        group: GroupId,
    ) -> TabId {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.fresh_id();
        let win = inner
            .window_mut(window)
            .unwrap_or_else(|_| panic!("seeding unknown window {window}"));
        win.tabs.push(MockTab {
            id,
            url: url.to_string(),
            title: title.to_string(),
            pinned,
            group_id: group,
        });
        id
    }

    /// Record metadata for a group id so `group_info` lookups succeed.
    pub fn define_group(&self, group: GroupId, info: GroupInfo) {
        self.inner.lock().unwrap().groups.insert(group, info);
    }

    // === Failure simulation ===

    /// Inject an error for the next operation.
    pub fn inject_error(&self, error: TtError) {
        *self.error_injection.lock().unwrap() = Some(error);
    }

    /// Make `group_info` fail for a specific group id.
    pub fn fail_group_lookup(&self, group: GroupId) {
        self.failing_groups.lock().unwrap().push(group);
    }

    /// Make window/tab creation fail for a specific URL.
    pub fn fail_url(&self, url: &str) {
        self.failing_urls.lock().unwrap().push(url.to_string());
    }

    // === Assertions ===

    /// Get all recorded operations.
    #[must_use]
    pub fn operations(&self) -> Vec<Operation> {
        self.operation_log.lock().unwrap().clone()
    }

    /// Assert specific operations were performed, in order.
    ///
    /// # Panics
    ///
    /// Panics if the operations don't match.
    pub fn assert_operations(&self, expected: &[Operation]) {
        let actual = self.operations();
        assert_eq!(
            actual, expected,
            "Operation mismatch.\nExpected: {expected:#?}\nActual: {actual:#?}",
        );
    }

    /// Assert a specific operation was performed at least once.
    ///
    /// # Panics
    ///
    /// Panics if the operation was not found.
    pub fn assert_contains(&self, expected: &Operation) {
        let ops = self.operations();
        assert!(
            ops.contains(expected),
            "Expected operation {expected:?} not found in: {ops:#?}",
        );
    }

    /// Clear the operation log for fresh assertions.
    pub fn clear_operations(&self) {
        self.operation_log.lock().unwrap().clear();
    }

    // === State inspection ===

    /// Number of windows currently open.
    #[must_use]
    pub fn window_count(&self) -> usize {
        self.inner.lock().unwrap().windows.len()
    }

    /// Ids of all open windows, in creation order.
    #[must_use]
    pub fn window_ids(&self) -> Vec<WindowId> {
        self.inner.lock().unwrap().windows.iter().map(|w| w.id).collect()
    }

    /// The tabs of a window, in tab order.
    ///
    /// # Panics
    ///
    /// Panics if the window does not exist.
    #[must_use]
    pub fn tabs_in(&self, window: WindowId) -> Vec<LiveTab> {
        let inner = self.inner.lock().unwrap();
        let win = inner
            .windows
            .iter()
            .find(|w| w.id == window)
            .unwrap_or_else(|| panic!("unknown window {window}"));
        win.tabs.iter().map(live_tab).collect()
    }

    /// Current metadata for a group, if the group exists.
    #[must_use]
    pub fn group_meta(&self, group: GroupId) -> Option<GroupInfo> {
        self.inner.lock().unwrap().groups.get(&group).cloned()
    }

    // === Internal helpers ===

    fn record_op(&self, op: Operation) {
        trace!(?op, "Recording operation");
        self.operation_log.lock().unwrap().push(op);
    }

    fn check_error(&self) -> Result<()> {
        if let Some(error) = self.error_injection.lock().unwrap().take() {
            return Err(error);
        }
        Ok(())
    }

    fn check_url(&self, url: &str) -> Result<()> {
        if self.failing_urls.lock().unwrap().iter().any(|u| u == url) {
            return Err(TtError::Browser(format!(
                "mock configured to reject url {url}"
            )));
        }
        Ok(())
    }
}

fn live_tab(tab: &MockTab) -> LiveTab {
    LiveTab {
        id: tab.id,
        url: tab.url.clone(),
        title: tab.title.clone(),
        pinned: tab.pinned,
        group_id: tab.group_id,
    }
}

impl BrowserOperations for MockBrowser {
    fn windows(&self) -> Result<Vec<LiveWindow>> {
        self.check_error()?;
        self.record_op(Operation::ListWindows);
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .windows
            .iter()
            .map(|w| LiveWindow {
                id: w.id,
                tabs: w.tabs.iter().map(live_tab).collect(),
            })
            .collect())
    }

    fn group_info(&self, group: GroupId) -> Result<GroupInfo> {
        self.check_error()?;
        self.record_op(Operation::GroupInfo { group });
        if self.failing_groups.lock().unwrap().contains(&group) {
            return Err(TtError::GroupNotFound { id: group });
        }
        self.inner
            .lock()
            .unwrap()
            .groups
            .get(&group)
            .cloned()
            .ok_or(TtError::GroupNotFound { id: group })
    }

    fn create_window(&self, url: &str) -> Result<CreatedWindow> {
        self.check_error()?;
        self.check_url(url)?;
        self.record_op(Operation::CreateWindow {
            url: url.to_string(),
        });

        let mut inner = self.inner.lock().unwrap();
        let window_id = inner.fresh_id();
        let tab_id = inner.fresh_id();
        inner.windows.push(MockWindow {
            id: window_id,
            tabs: vec![MockTab {
                id: tab_id,
                url: url.to_string(),
                title: String::new(),
                pinned: false,
                group_id: UNGROUPED,
            }],
        });

        Ok(CreatedWindow {
            id: window_id,
            seed_tab: tab_id,
        })
    }

    fn create_tab(&self, window: WindowId, url: &str, pinned: bool) -> Result<TabId> {
        self.check_error()?;
        self.check_url(url)?;
        self.record_op(Operation::CreateTab {
            window,
            url: url.to_string(),
            pinned,
        });

        let mut inner = self.inner.lock().unwrap();
        let id = inner.fresh_id();
        let win = inner.window_mut(window)?;
        win.tabs.push(MockTab {
            id,
            url: url.to_string(),
            title: String::new(),
            pinned,
            group_id: UNGROUPED,
        });
        Ok(id)
    }

    fn create_group(&self, seed: TabId) -> Result<GroupId> {
        self.check_error()?;
        self.record_op(Operation::CreateGroup { seed });

        let mut inner = self.inner.lock().unwrap();
        let group = inner.fresh_id();
        inner.tab_mut(seed)?.group_id = group;
        inner.groups.insert(group, GroupInfo::default());
        Ok(group)
    }

    fn add_to_group(&self, tab: TabId, group: GroupId) -> Result<()> {
        self.check_error()?;
        self.record_op(Operation::AddToGroup { tab, group });

        let mut inner = self.inner.lock().unwrap();
        if !inner.groups.contains_key(&group) {
            return Err(TtError::GroupNotFound { id: group });
        }
        inner.tab_mut(tab)?.group_id = group;
        Ok(())
    }

    fn update_group(&self, group: GroupId, info: &GroupInfo) -> Result<()> {
        self.check_error()?;
        self.record_op(Operation::UpdateGroup {
            group,
            title: info.title.clone(),
            color: info.color,
            collapsed: info.collapsed,
        });

        let mut inner = self.inner.lock().unwrap();
        match inner.groups.get_mut(&group) {
            Some(existing) => {
                *existing = info.clone();
                Ok(())
            }
            None => Err(TtError::GroupNotFound { id: group }),
        }
    }

    fn ungroup(&self, tab: TabId) -> Result<()> {
        self.check_error()?;
        self.record_op(Operation::Ungroup { tab });
        self.inner.lock().unwrap().tab_mut(tab)?.group_id = UNGROUPED;
        Ok(())
    }

    fn pin(&self, tab: TabId) -> Result<()> {
        self.check_error()?;
        self.record_op(Operation::Pin { tab });
        self.inner.lock().unwrap().tab_mut(tab)?.pinned = true;
        Ok(())
    }
}
