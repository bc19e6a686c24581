// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Accessor paths: one to three key segments, optionally ending in a default.

use std::fmt;

use serde_json::Value;
use understudy_core::ConfigurationError;

/// Longest path an accessor can traverse.
pub const MAX_DEPTH: usize = 3;

/// One step of an accessor path.
#[derive(Clone, Debug, PartialEq)]
pub enum Segment {
    /// Plain key; absence is an error.
    Key(String),
    /// Key with a fallback; only legal as the last segment.
    WithDefault(String, Value),
}

impl Segment {
    /// Plain key segment.
    pub fn key(key: impl Into<String>) -> Self {
        Self::Key(key.into())
    }

    /// Key segment with a default for when the key is absent.
    pub fn with_default(key: impl Into<String>, default: Value) -> Self {
        Self::WithDefault(key.into(), default)
    }

    /// The key this segment looks up.
    pub fn name(&self) -> &str {
        match self {
            Self::Key(k) | Self::WithDefault(k, _) => k,
        }
    }

    /// The default, if this segment carries one.
    pub fn default(&self) -> Option<&Value> {
        match self {
            Self::Key(_) => None,
            Self::WithDefault(_, d) => Some(d),
        }
    }
}

impl From<&str> for Segment {
    fn from(key: &str) -> Self {
        Self::key(key)
    }
}

impl From<(&str, Value)> for Segment {
    fn from((key, default): (&str, Value)) -> Self {
        Self::with_default(key, default)
    }
}

/// A validated path, fixed once built.
#[derive(Clone, Debug, PartialEq)]
pub struct AccessorPath {
    segments: Vec<Segment>,
}

impl AccessorPath {
    /// Validate and wrap `segments`.
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError::PathLength`] unless there are 1 to 3 segments.
    /// - [`ConfigurationError::DefaultNotLast`] when a segment other than the
    ///   last carries a default.
    pub fn new(segments: Vec<Segment>) -> Result<Self, ConfigurationError> {
        if segments.is_empty() || segments.len() > MAX_DEPTH {
            return Err(ConfigurationError::PathLength {
                len: segments.len(),
            });
        }
        let last = segments.len() - 1;
        if let Some(index) = segments[..last].iter().position(|s| s.default().is_some()) {
            return Err(ConfigurationError::DefaultNotLast { index });
        }
        Ok(Self { segments })
    }

    /// Segments in traversal order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Segment names from `index` on, for diagnostics.
    pub(crate) fn names_from(&self, index: usize) -> Vec<String> {
        self.segments[index..]
            .iter()
            .map(|s| s.name().to_string())
            .collect()
    }
}

impl fmt::Display for AccessorPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.segments.iter().map(Segment::name).collect();
        f.write_str(&names.join("."))
    }
}
