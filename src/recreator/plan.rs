//! Restore plan compilation.
//!
//! A snapshot is compiled into an explicit ordered list of typed steps
//! before anything touches the browser. This keeps the browser-call sequence
//! assertable in unit tests and makes a dry run (`tt plan`) trivial.
//!
//! Step order per window:
//!
//! 1. `CreateWindow` seeded with the first tab's URL (windows cannot be
//!    created empty).
//! 2. One `CreateGroup` per entry in the window's group map, ascending id.
//!    The interpreter realizes each by temporarily placing the seed tab in a
//!    fresh group, applying metadata, then removing the seed tab again.
//! 3. `CreateTab` for every remaining tab in original order, each followed
//!    by `AddToGroup` when its group id maps to a created group.
//! 4. Seed tab reconciliation: its `AddToGroup` (if grouped), then `PinTab`
//!    (if pinned) — pinning must come after all group operations.

use serde::Serialize;
use tracing::debug;

use crate::snapshot::{GroupColor, GroupId, TabSnapshot, UNGROUPED};

/// Index of a window within the plan (position in the snapshot, after
/// empty-window skipping).
pub type WindowSlot = usize;

/// Index of a tab within its window's snapshot tab list. Slot 0 is the seed
/// tab created together with the window.
pub type TabSlot = usize;

/// One typed step of a restore plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum PlanStep {
    /// Open a new unfocused window seeded with one tab.
    CreateWindow {
        window: WindowSlot,
        url: String,
    },
    /// Create a tab group in `window` carrying the source group id `group`
    /// and the captured metadata.
    CreateGroup {
        window: WindowSlot,
        group: GroupId,
        title: String,
        color: GroupColor,
        collapsed: bool,
    },
    /// Open an inactive tab in `window`.
    CreateTab {
        window: WindowSlot,
        tab: TabSlot,
        url: String,
        pinned: bool,
    },
    /// Put a created tab into the group created for source id `group`.
    AddToGroup {
        window: WindowSlot,
        tab: TabSlot,
        group: GroupId,
    },
    /// Pin a created tab. Always ordered after that tab's group operations.
    PinTab {
        window: WindowSlot,
        tab: TabSlot,
    },
}

/// An ordered restore plan compiled from a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestorePlan {
    pub steps: Vec<PlanStep>,
    /// Number of tabs the plan creates (seed tabs included).
    pub tab_count: usize,
    /// Group ids referenced by tabs but absent from their window's group
    /// map; those tabs stay ungrouped.
    pub degraded_groups: Vec<GroupId>,
}

impl RestorePlan {
    /// Number of windows the plan creates.
    #[must_use]
    pub fn window_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s, PlanStep::CreateWindow { .. }))
            .count()
    }
}

/// Compile a snapshot into a restore plan.
///
/// Windows with an empty tab list are skipped rather than producing a plan
/// that would dereference a nonexistent first tab.
#[must_use]
pub fn build_plan(snapshot: &TabSnapshot) -> RestorePlan {
    let mut steps = Vec::new();
    let mut tab_count = 0;
    let mut degraded_groups: Vec<GroupId> = Vec::new();
    let mut slot = 0;

    for window in &snapshot.windows {
        let Some(seed) = window.tabs.first() else {
            debug!("skipping window with no tabs");
            continue;
        };

        steps.push(PlanStep::CreateWindow {
            window: slot,
            url: seed.url.clone(),
        });
        tab_count += 1;

        for (&group, info) in &window.groups {
            steps.push(PlanStep::CreateGroup {
                window: slot,
                group,
                title: info.title.clone(),
                color: info.color,
                collapsed: info.collapsed,
            });
        }

        for (tab_slot, tab) in window.tabs.iter().enumerate().skip(1) {
            steps.push(PlanStep::CreateTab {
                window: slot,
                tab: tab_slot,
                url: tab.url.clone(),
                pinned: tab.pinned,
            });
            tab_count += 1;

            if tab.group_id != UNGROUPED {
                if window.groups.contains_key(&tab.group_id) {
                    steps.push(PlanStep::AddToGroup {
                        window: slot,
                        tab: tab_slot,
                        group: tab.group_id,
                    });
                } else {
                    note_degraded(tab.group_id, &mut degraded_groups);
                }
            }
        }

        // Seed tab reconciliation: group first, pin last
        if seed.group_id != UNGROUPED {
            if window.groups.contains_key(&seed.group_id) {
                steps.push(PlanStep::AddToGroup {
                    window: slot,
                    tab: 0,
                    group: seed.group_id,
                });
            } else {
                note_degraded(seed.group_id, &mut degraded_groups);
            }
        }
        if seed.pinned {
            steps.push(PlanStep::PinTab {
                window: slot,
                tab: 0,
            });
        }

        slot += 1;
    }

    RestorePlan {
        steps,
        tab_count,
        degraded_groups,
    }
}

fn note_degraded(group: GroupId, degraded: &mut Vec<GroupId>) {
    if !degraded.contains(&group) {
        degraded.push(group);
    }
}
