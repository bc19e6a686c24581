// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Context-scoped stub registry and call seams for test doubles.
//!
//! Production code calls collaborators through [`Seam`]s. Tests create a
//! [`StubContext`], register stubs against seam identities, and hand the same
//! context to the code under test. Each context owns a private [`StubStore`],
//! so concurrently running tests never see each other's stubs.
//!
//! # Modules
//!
//! - [`matcher`] - Argument specs (literal, predicate, wildcard, nested) and matching
//! - [`store`] - Per-context stub storage with replace-in-place registration
//! - [`calculator`] - Fixed-arity callables that answer a seam from the store
//! - [`context`] - Execution contexts, seam bindings and the call log
//! - [`seam`] - Production-side interceptable call sites
//! - [`config`] - Harness settings and their storage port
//! - [`error`] - Error taxonomy
//! - [`diagnostics`] - Loud-failure helpers for tests
//! - [`value`] - Truthiness and approximate equality over dynamic values
#![forbid(unsafe_code)]

pub mod calculator;
pub mod config;
pub mod context;
pub mod diagnostics;
pub mod error;
pub mod key;
pub mod matcher;
pub mod seam;
pub mod store;
pub mod value;

pub use calculator::{make_calculator, Calculator, MAX_ARITY};
pub use config::{ConfigError, ConfigService, ConfigStore, FsConfigStore, HarnessConfig, UnboundPolicy};
pub use context::{CallOutcome, CallRecord, StubContext};
pub use diagnostics::{fail, OrFail};
pub use error::{ConfigurationError, Error, Result};
pub use key::StubKey;
pub use matcher::{matches, ArgSpec, Predicate};
pub use seam::Seam;
pub use store::{Payload, StubEntry, StubStore};
pub use value::{approx_eq, is_truthy, Value};
