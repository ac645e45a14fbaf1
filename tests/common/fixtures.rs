//! Sample snapshots and pre-seeded mock browsers for integration tests.

use tt::browser::mock::MockBrowser;
use tt::browser::WindowId;
use tt::snapshot::{GroupColor, GroupInfo, TabEntry, TabSnapshot, WindowSnapshot, UNGROUPED};

/// The reference scenario: one window with tabs
/// [A(pinned, group 1), B(group 1), C(ungrouped)],
/// group 1 = {title: "Work", color: blue}.
pub fn work_snapshot() -> TabSnapshot {
    let mut window = WindowSnapshot::new();
    window.add_tab(
        TabEntry::new("https://a.test", "A", 0)
            .pinned(true)
            .in_group(1),
    );
    window.add_tab(TabEntry::new("https://b.test", "B", 1).in_group(1));
    window.add_tab(TabEntry::new("https://c.test", "C", 2));
    window.add_group(1, GroupInfo::new("Work", GroupColor::Blue));

    TabSnapshot {
        windows: vec![window],
        exported_at: "2024-01-15T09:30:00Z".parse().unwrap(),
    }
}

/// A second, distinguishable snapshot for overwrite tests.
pub fn other_snapshot() -> TabSnapshot {
    let mut window = WindowSnapshot::new();
    window.add_tab(TabEntry::new("https://d.test", "D", 0));

    TabSnapshot {
        windows: vec![window],
        exported_at: "2024-02-01T00:00:00Z".parse().unwrap(),
    }
}

/// A mock browser holding the live-side equivalent of [`work_snapshot`],
/// plus one internal tab that must not survive collection. Returns the
/// browser and the seeded window's id.
pub fn work_browser() -> (MockBrowser, WindowId) {
    let mock = MockBrowser::new();
    let win = mock.add_window();
    mock.add_tab(win, "https://a.test", "A", true, 1);
    mock.add_tab(win, "https://b.test", "B", false, 1);
    mock.add_tab(win, "chrome://extensions", "Extensions", false, UNGROUPED);
    mock.add_tab(win, "https://c.test", "C", false, UNGROUPED);
    mock.define_group(1, GroupInfo::new("Work", GroupColor::Blue));
    (mock, win)
}
