//! Browser abstraction layer for window, tab, and group operations.
//!
//! This module provides a trait-based abstraction over the browser APIs the
//! transfer pipeline needs, enabling testability without a running browser.

pub mod mock;

use crate::error::Result;
use crate::snapshot::{GroupId, GroupInfo};

/// Browser-assigned window identifier.
pub type WindowId = i32;

/// Browser-assigned tab identifier.
pub type TabId = i32;

/// A live tab as reported by the browser.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveTab {
    pub id: TabId,
    pub url: String,
    pub title: String,
    pub pinned: bool,
    /// Group the tab belongs to, or [`crate::snapshot::UNGROUPED`].
    pub group_id: GroupId,
}

/// A live window with its full tab list, in tab order.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveWindow {
    pub id: WindowId,
    pub tabs: Vec<LiveTab>,
}

/// Result of creating a window: the window plus the seed tab the browser
/// opened it with (windows cannot be created empty).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatedWindow {
    pub id: WindowId,
    pub seed_tab: TabId,
}

/// Core browser operations trait.
///
/// This trait abstracts over a real browser session and mock implementations,
/// enabling unit testing of the collector and recreator without a browser.
///
/// # Implementation Notes
///
/// - All operations are sequential; callers issue them one at a time, in
///   program order. Group creation requires an existing tab, and grouping
///   must happen before pinning, so ordering matters for correctness.
/// - Created windows and tabs must not steal focus.
pub trait BrowserOperations {
    /// Enumerate all windows with their full tab lists.
    fn windows(&self) -> Result<Vec<LiveWindow>>;

    /// Fetch title/color/collapsed metadata for a tab group.
    ///
    /// # Errors
    ///
    /// Returns an error if the group does not exist or the lookup fails;
    /// callers treat this as best-effort and degrade.
    fn group_info(&self, group: GroupId) -> Result<GroupInfo>;

    /// Create a new unfocused window seeded with one tab at `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the browser rejects the creation.
    fn create_window(&self, url: &str) -> Result<CreatedWindow>;

    /// Create an inactive tab in an existing window.
    ///
    /// # Errors
    ///
    /// Returns an error if the window does not exist or the browser rejects
    /// the creation.
    fn create_tab(&self, window: WindowId, url: &str, pinned: bool) -> Result<TabId>;

    /// Create a new group containing exactly `seed`, returning the new
    /// group's id.
    ///
    /// # Errors
    ///
    /// Returns an error if the tab does not exist.
    fn create_group(&self, seed: TabId) -> Result<GroupId>;

    /// Add a tab to an existing group.
    ///
    /// # Errors
    ///
    /// Returns an error if the tab or group does not exist.
    fn add_to_group(&self, tab: TabId, group: GroupId) -> Result<()>;

    /// Apply title/color/collapsed metadata to a group.
    ///
    /// # Errors
    ///
    /// Returns an error if the group does not exist.
    fn update_group(&self, group: GroupId, info: &GroupInfo) -> Result<()>;

    /// Remove a tab from whatever group it is in.
    ///
    /// # Errors
    ///
    /// Returns an error if the tab does not exist.
    fn ungroup(&self, tab: TabId) -> Result<()>;

    /// Pin a tab. Must be called after any group operations on the same tab;
    /// the two conflict if reordered.
    ///
    /// # Errors
    ///
    /// Returns an error if the tab does not exist.
    fn pin(&self, tab: TabId) -> Result<()>;
}

/// Type alias for boxed trait object.
pub type BoxedBrowser = Box<dyn BrowserOperations>;
