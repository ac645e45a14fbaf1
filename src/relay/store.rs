//! The single snapshot slot.

use std::sync::{Arc, Mutex};

use serde_json::Value;
use tracing::debug;

/// Holds zero or one stored snapshot blob.
///
/// An explicit store object rather than a module-level global so request
/// handlers receive it by injection and tests can run isolated instances.
/// The slot stores raw JSON: the relay promises well-formedness, nothing
/// more, and echoes the blob back verbatim on retrieval.
#[derive(Debug, Clone, Default)]
pub struct SnapshotStore {
    slot: Arc<Mutex<Option<Value>>>,
}

impl SnapshotStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the held snapshot unconditionally.
    pub fn replace(&self, snapshot: Value) {
        debug!("replacing snapshot slot");
        *self.slot.lock().unwrap() = Some(snapshot);
    }

    /// The held snapshot, if any. Retrieval is non-destructive.
    #[must_use]
    pub fn current(&self) -> Option<Value> {
        self.slot.lock().unwrap().clone()
    }

    /// Whether a snapshot is currently held.
    #[must_use]
    pub fn has_data(&self) -> bool {
        self.slot.lock().unwrap().is_some()
    }
}
