// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Error taxonomy for stubbing and traversal.
//!
//! Every variant is a test-time, fail-fast error. Messages start with a
//! bracketed code so a failing test log can be grepped by failure kind, and
//! name the seam (`owner.function/arity`) plus the actual arguments where
//! they are known.

use serde_json::Value;
use thiserror::Error;

use crate::key::StubKey;
use crate::value::render_args;

/// Raised while building calculators, bindings or accessors, before any
/// stubbed code path runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// Calculators exist for arities `0..=MAX_ARITY` only.
    #[error("[CONFIG_ARITY_CEILING] arity {arity} exceeds the supported maximum of {max}")]
    ArityCeiling {
        /// Requested arity.
        arity: usize,
        /// Supported maximum.
        max: usize,
    },
    /// An argument-spec list or calculator disagrees with the seam's arity.
    #[error("[CONFIG_ARITY_MISMATCH] {key} takes {} arguments, got a spec for {arity}", .key.arity())]
    ArityMismatch {
        /// Seam being configured.
        key: StubKey,
        /// Arity that was supplied.
        arity: usize,
    },
    /// A calculator was bound to a seam other than the one it was built for.
    #[error("[CONFIG_BINDING_MISMATCH] calculator for {calculator} cannot answer {key}")]
    BindingMismatch {
        /// Seam named in the bind call.
        key: StubKey,
        /// Seam the calculator was built for.
        calculator: StubKey,
    },
    /// A calculator was bound into a context other than the one it was built
    /// over.
    #[error("[CONFIG_FOREIGN_CALCULATOR] calculator for {key} was built over another context")]
    ForeignCalculator {
        /// Seam named in the bind call.
        key: StubKey,
    },
    /// Accessor paths have one to three segments.
    #[error("[CONFIG_PATH_LENGTH] accessor paths take 1 to 3 segments, got {len}")]
    PathLength {
        /// Number of segments supplied.
        len: usize,
    },
    /// Only the last path segment may carry a default.
    #[error("[CONFIG_DEFAULT_NOT_LAST] segment {index} carries a default but is not the last segment")]
    DefaultNotLast {
        /// Zero-based index of the offending segment.
        index: usize,
    },
    /// Two accessors in one table share a name.
    #[error("[CONFIG_DUPLICATE_ACCESSOR] accessor `{name}` is declared twice")]
    DuplicateAccessor {
        /// The repeated accessor name.
        name: String,
    },
    /// A table was asked for an accessor it does not declare.
    #[error("[CONFIG_UNKNOWN_ACCESSOR] no accessor named `{name}`")]
    UnknownAccessor {
        /// The requested name.
        name: String,
    },
}

/// Errors surfaced when a seam or accessor is exercised.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Build-time misconfiguration reached a call path.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    /// The seam was called but nothing was ever registered for it.
    #[error("[STUB_NONE_REGISTERED] no stubs registered for {key}")]
    NoStubsRegistered {
        /// Seam that was called.
        key: StubKey,
    },
    /// Stubs exist for the seam but none accepts these arguments.
    #[error("[STUB_NO_MATCH] no stub for {key} matches arguments {}", render_args(.args))]
    NoMatchingStub {
        /// Seam that was called.
        key: StubKey,
        /// Actual arguments of the call.
        args: Vec<Value>,
    },
    /// A stream stub matched but has no values left.
    #[error("[STUB_STREAM_EXHAUSTED] stream stub for {key} is exhausted (arguments {})", render_args(.args))]
    StreamExhausted {
        /// Seam that was called.
        key: StubKey,
        /// Actual arguments of the call.
        args: Vec<Value>,
    },
    /// A call supplied the wrong number of arguments for the seam.
    #[error("[SEAM_ARITY] {key} expects {expected} arguments, called with {actual}")]
    ArityMismatch {
        /// Seam that was called.
        key: StubKey,
        /// Arity of the seam.
        expected: usize,
        /// Number of arguments supplied.
        actual: usize,
    },
    /// Traversal reached the final container and the key was absent.
    #[error("[ACCESS_MISSING_KEY] key `{key}` is missing")]
    MissingKey {
        /// Key that was looked up.
        key: String,
    },
    /// An intermediate traversal level is not a container.
    #[error("[ACCESS_NOT_A_CONTAINER] expected a container at `{}` but found {value}; did you forget to stub this level?", .remaining.join("."))]
    NotAContainer {
        /// The non-container value found.
        value: Value,
        /// Path segments that were still to be traversed.
        remaining: Vec<String>,
    },
    /// The real implementation behind a seam failed.
    #[error("[SEAM_IMPLEMENTATION] {key} failed: {message}")]
    Implementation {
        /// Seam whose implementation failed.
        key: StubKey,
        /// Failure description.
        message: String,
    },
}

/// Result alias used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
