//! The local relay: a single-process HTTP server holding at most one
//! snapshot in memory, plus the blocking client the transfer pipelines use
//! to talk to it.
//!
//! The relay is deliberately dumb: it validates nothing beyond JSON
//! well-formedness, holds the stored blob verbatim, and serves it back
//! unchanged. A new export overwrites the slot; a relay restart loses it.

mod client;
mod server;
mod store;

pub use client::{RelayClient, RelayStatus, DEFAULT_RELAY_URL};
pub use server::{router, serve, Relay, DEFAULT_PORT};
pub use store::SnapshotStore;
