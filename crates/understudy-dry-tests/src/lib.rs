// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared test doubles and fixtures for understudy crates.
//!
//! This crate provides commonly used test utilities to reduce duplication
//! across the understudy test suites.
//!
//! # Modules
//!
//! - [`config`] - In-memory config store fake for testing without filesystem
//! - [`inventory`] - Demo "production" component wired through seams and accessors
//! - [`predicates`] - Ready-made argument predicates
//! - [`tree`] - Nested container builders for both container kinds
//! - [`tracing_init`] - Idempotent test log subscriber
#![forbid(unsafe_code)]

pub mod config;
pub mod inventory;
pub mod predicates;
pub mod tracing_init;
pub mod tree;

// Re-export commonly used items at crate root for convenience
pub use config::InMemoryConfigStore;
pub use inventory::{Inventory, INVENTORY_OWNER};
pub use predicates::{greater_than, is_even, is_odd, is_string, one_of};
pub use tracing_init::init_test_tracing;
pub use tree::{kind_variants, reshape, ContainerKind, TreeBuilder};
