// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Overridable path accessors over nested key/value containers.
//!
//! Production code and tests read nested state through accessors instead of
//! spelling out its shape. An accessor descends one to three levels, where
//! each level is either a JSON object or an ordered list of `[key, value]`
//! pairs, and may end in a default for an absent leaf. Exposed through an
//! [`AccessorSeam`], the same getter can be stubbed per test context.
#![forbid(unsafe_code)]

pub mod accessor;
pub mod container;
pub mod overridable;
pub mod path;
pub mod table;

pub use accessor::{build_accessor, Accessor};
pub use container::Container;
pub use overridable::AccessorSeam;
pub use path::{AccessorPath, Segment, MAX_DEPTH};
pub use table::AccessorTable;
