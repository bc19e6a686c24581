// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Path traversal: the read function behind every accessor.
//!
//! # Traversal Rules
//!
//! - Every level, the root included, must be a [`Container`]. A non-container
//!   anywhere on the way fails with [`Error::NotAContainer`], which outranks
//!   a missing key: it usually means an intermediate level was never stubbed.
//! - Intermediate keys are fetched without defaults; absence fails with
//!   [`Error::MissingKey`].
//! - The last key yields its segment's default when absent, if one was given.
//!
//! Traversal is pure. The same root and path always give the same result or
//! the same failure.

use serde_json::Value;
use understudy_core::{ConfigurationError, Error, Result};

use crate::container::Container;
use crate::path::{AccessorPath, Segment};

/// A read-only getter over a fixed path.
#[derive(Clone, Debug, PartialEq)]
pub struct Accessor {
    path: AccessorPath,
}

impl Accessor {
    /// Wrap an already validated path.
    pub fn new(path: AccessorPath) -> Self {
        Self { path }
    }

    /// The path this accessor reads.
    pub fn path(&self) -> &AccessorPath {
        &self.path
    }

    /// Read the value at this accessor's path under `root`.
    ///
    /// # Errors
    ///
    /// [`Error::NotAContainer`] or [`Error::MissingKey`] per the traversal
    /// rules in the module docs.
    pub fn get(&self, root: &Value) -> Result<Value> {
        // AccessorPath guarantees at least one segment.
        let Some((leaf, intermediate)) = self.path.segments().split_last() else {
            return Err(ConfigurationError::PathLength { len: 0 }.into());
        };
        let mut current = root;
        for (index, segment) in intermediate.iter().enumerate() {
            current = self.level(current, index)?.fetch(segment.name())?;
        }
        let container = self.level(current, intermediate.len())?;
        Ok(match leaf {
            Segment::Key(key) => container.fetch(key)?.clone(),
            Segment::WithDefault(key, default) => container.get_or(key, default),
        })
    }

    fn level<'v>(&self, value: &'v Value, index: usize) -> Result<Container<'v>> {
        Container::of(value).ok_or_else(|| Error::NotAContainer {
            value: value.clone(),
            remaining: self.path.names_from(index),
        })
    }
}

/// Validate `segments` and build an accessor over them.
///
/// ```
/// use serde_json::json;
/// use understudy_access::{build_accessor, Segment};
///
/// let timeout = build_accessor(vec![
///     "http".into(),
///     Segment::with_default("timeout_ms", json!(5_000)),
/// ])
/// .unwrap();
///
/// assert_eq!(timeout.get(&json!({"http": {}})).unwrap(), json!(5_000));
/// assert_eq!(timeout.get(&json!({"http": [["timeout_ms", 250]]})).unwrap(), json!(250));
/// ```
///
/// # Errors
///
/// Any [`ConfigurationError`] from [`AccessorPath::new`].
pub fn build_accessor(segments: Vec<Segment>) -> Result<Accessor, ConfigurationError> {
    AccessorPath::new(segments).map(Accessor::new)
}
