//! The transferred data model.
//!
//! A snapshot is the serialized set of windows, tabs, and tab groups captured
//! at export time. The wire format is JSON with camelCase field names, kept
//! byte-compatible with the browser extension that originally produced it:
//!
//! ```json
//! {
//!   "windows": [
//!     {
//!       "tabs": [
//!         {"url": "...", "title": "...", "pinned": false, "groupId": -1, "index": 0}
//!       ],
//!       "groups": {"12": {"title": "Work", "color": "blue", "collapsed": false}}
//!     }
//!   ],
//!   "exportedAt": "2024-01-01T00:00:00Z"
//! }
//! ```
//!
//! Tab order within a window is array position; the `index` field is
//! descriptive metadata only. Group ids in `tabs` are keys into the same
//! window's `groups` map, except [`UNGROUPED`].

mod schema;

pub use schema::{
    GroupColor, GroupId, GroupInfo, TabEntry, TabSnapshot, WindowSnapshot, UNGROUPED,
};
