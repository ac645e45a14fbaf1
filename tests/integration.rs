//! Integration tests for the tab transfer CLI.
//!
//! These tests verify component interactions without a real browser or a
//! running relay process, using the mock browser and isolated store
//! instances.
//!
//! # Modules
//!
//! - `transfer_flow`: End-to-end collector → store → recreator pipelines

mod common;

#[path = "integration/transfer_flow.rs"]
mod transfer_flow;
