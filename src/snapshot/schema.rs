//! Snapshot data types for the transfer wire format.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Browser-assigned tab group identifier.
pub type GroupId = i32;

/// Sentinel group id marking a tab that belongs to no group.
pub const UNGROUPED: GroupId = -1;

/// The complete set of windows captured by one export action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabSnapshot {
    /// Captured windows, in selection order.
    pub windows: Vec<WindowSnapshot>,
    /// When the export was taken.
    pub exported_at: DateTime<Utc>,
}

impl TabSnapshot {
    /// Create an empty snapshot stamped now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            windows: Vec::new(),
            exported_at: Utc::now(),
        }
    }

    /// Total number of tabs across all windows.
    #[must_use]
    pub fn total_tabs(&self) -> usize {
        self.windows.iter().map(|w| w.tabs.len()).sum()
    }
}

impl Default for TabSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

/// One captured window: its tabs in order, plus metadata for the groups
/// those tabs reference.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WindowSnapshot {
    /// Tabs in window order. Position in this array is the restore order.
    pub tabs: Vec<TabEntry>,
    /// Group metadata keyed by the source browser's group id. Ascending id
    /// order; a group whose metadata lookup failed at export time is absent.
    #[serde(default)]
    pub groups: BTreeMap<GroupId, GroupInfo>,
}

impl WindowSnapshot {
    /// Create an empty window snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tab to the window.
    pub fn add_tab(&mut self, tab: TabEntry) {
        self.tabs.push(tab);
    }

    /// Record metadata for a group id.
    pub fn add_group(&mut self, id: GroupId, info: GroupInfo) {
        self.groups.insert(id, info);
    }
}

/// A single captured tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabEntry {
    /// Page URL.
    pub url: String,
    /// Page title at capture time.
    pub title: String,
    /// Whether the tab was pinned.
    pub pinned: bool,
    /// Group the tab belonged to, or [`UNGROUPED`].
    #[serde(default = "ungrouped")]
    pub group_id: GroupId,
    /// Position the tab had in its source window. Descriptive only; restore
    /// order comes from array position.
    pub index: u32,
}

fn ungrouped() -> GroupId {
    UNGROUPED
}

impl TabEntry {
    /// Create an ungrouped, unpinned tab entry.
    #[must_use]
    pub fn new(url: impl Into<String>, title: impl Into<String>, index: u32) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            pinned: false,
            group_id: UNGROUPED,
            index,
        }
    }

    /// Set the pinned flag.
    #[must_use]
    pub fn pinned(mut self, pinned: bool) -> Self {
        self.pinned = pinned;
        self
    }

    /// Set the group id.
    #[must_use]
    pub fn in_group(mut self, group: GroupId) -> Self {
        self.group_id = group;
        self
    }
}

/// Visual metadata for a tab group.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GroupInfo {
    /// Group title, possibly empty.
    pub title: String,
    /// Group color.
    pub color: GroupColor,
    /// Whether the group was collapsed.
    pub collapsed: bool,
}

impl GroupInfo {
    /// Create group metadata with the given title and color, not collapsed.
    #[must_use]
    pub fn new(title: impl Into<String>, color: GroupColor) -> Self {
        Self {
            title: title.into(),
            color,
            collapsed: false,
        }
    }

    /// Set the collapsed flag.
    #[must_use]
    pub fn collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }
}

/// The browser's closed set of tab group colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupColor {
    #[default]
    Grey,
    Blue,
    Red,
    Yellow,
    Green,
    Pink,
    Purple,
    Cyan,
    Orange,
}
