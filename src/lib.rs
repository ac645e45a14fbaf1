//! Tab Transfer library - move open tabs between browser profiles via a local relay.
//!
//! This library exposes the core functionality of the `tt` CLI for use in tests
//! and potentially other applications.
//!
//! # Modules
//!
//! - `browser`: Browser abstraction layer for window/tab/group operations
//! - `collector`: Export pipeline (capture windows into a snapshot)
//! - `error`: Error types with user-recoverable hints
//! - `recreator`: Import pipeline (restore plan compilation and execution)
//! - `relay`: Local relay server, single-slot store, and blocking client
//! - `snapshot`: The transferred data model
#![forbid(unsafe_code)]

pub mod browser;
pub mod cli;
pub mod collector;
pub mod error;
pub mod logging;
pub mod recreator;
pub mod relay;
pub mod snapshot;
