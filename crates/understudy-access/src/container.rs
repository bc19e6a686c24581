// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Read-only views over the two container kinds a path can descend through.
//!
//! - **Map**: a JSON object, addressed by key.
//! - **Pairs**: a JSON array whose every element is a `[key, value]` pair
//!   with a string key, addressed by scanning in order. The first pair with
//!   a given key wins. An empty array is an empty pairs container.
//!
//! Which kind a value is gets decided when it is inspected, never declared.

use serde_json::{Map, Value};
use understudy_core::{Error, Result};

/// A value recognised as a container.
#[derive(Clone, Copy, Debug)]
pub enum Container<'a> {
    /// Ordered `[key, value]` pairs.
    Pairs(&'a [Value]),
    /// Key-addressed object.
    Map(&'a Map<String, Value>),
}

impl<'a> Container<'a> {
    /// Classify `value`, or `None` if it is not a container.
    pub fn of(value: &'a Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self::Map(map)),
            Value::Array(items) if items.iter().all(|item| pair(item).is_some()) => {
                Some(Self::Pairs(items))
            }
            _ => None,
        }
    }

    /// Look up `key`; `None` when absent.
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        match self {
            Self::Map(map) => map.get(key),
            Self::Pairs(items) => items
                .iter()
                .filter_map(pair)
                .find_map(|(k, v)| (k == key).then_some(v)),
        }
    }

    /// Look up `key`, failing with [`Error::MissingKey`] when absent.
    pub fn fetch(&self, key: &str) -> Result<&'a Value> {
        self.get(key).ok_or_else(|| Error::MissingKey {
            key: key.to_string(),
        })
    }

    /// Look up `key`, yielding `default` when absent.
    pub fn get_or(&self, key: &str, default: &Value) -> Value {
        self.get(key).unwrap_or(default).clone()
    }

    /// Number of entries (pairs may repeat keys; every pair counts).
    pub fn len(&self) -> usize {
        match self {
            Self::Map(map) => map.len(),
            Self::Pairs(items) => items.len(),
        }
    }

    /// Returns `true` for an empty container.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn pair(item: &Value) -> Option<(&str, &Value)> {
    match item.as_array()?.as_slice() {
        [Value::String(k), v] => Some((k.as_str(), v)),
        _ => None,
    }
}
