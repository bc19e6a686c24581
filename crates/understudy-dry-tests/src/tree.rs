// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Nested container construction for accessor tests.
//!
//! Accessor behaviour must not depend on whether a level is an object or a
//! list of `[key, value]` pairs. [`TreeBuilder`] builds one level in either
//! kind, and [`reshape`] / [`kind_variants`] rewrite an existing tree so a
//! test can run the same path against every mix of kinds.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use understudy_dry_tests::tree::{ContainerKind, TreeBuilder};
//!
//! let root = TreeBuilder::new(ContainerKind::Pairs)
//!     .entry("region", json!("eu"))
//!     .nest("limits", TreeBuilder::map().entry("rps", json!(50)))
//!     .build();
//!
//! assert_eq!(root, json!([["region", "eu"], ["limits", {"rps": 50}]]));
//! ```

use serde_json::{Map, Value};

/// The two container kinds an accessor level can be.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContainerKind {
    /// JSON object.
    Map,
    /// Array of `[key, value]` pairs.
    Pairs,
}

/// Builder for one container level.
///
/// Entries keep insertion order. For [`ContainerKind::Map`] a repeated key
/// overwrites the earlier value; for [`ContainerKind::Pairs`] both pairs are
/// kept and lookups see the first.
#[derive(Clone, Debug)]
pub struct TreeBuilder {
    kind: ContainerKind,
    entries: Vec<(String, Value)>,
}

impl TreeBuilder {
    /// Start an empty level of the given kind.
    pub fn new(kind: ContainerKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
        }
    }

    /// Start an empty object level.
    pub fn map() -> Self {
        Self::new(ContainerKind::Map)
    }

    /// Start an empty pairs level.
    pub fn pairs() -> Self {
        Self::new(ContainerKind::Pairs)
    }

    /// Add a leaf entry.
    pub fn entry(mut self, key: &str, value: Value) -> Self {
        self.entries.push((key.to_string(), value));
        self
    }

    /// Add a nested level.
    pub fn nest(self, key: &str, child: TreeBuilder) -> Self {
        self.entry(key, child.build())
    }

    /// Produce the container value.
    pub fn build(self) -> Value {
        assemble(self.kind, self.entries)
    }
}

fn assemble(kind: ContainerKind, entries: Vec<(String, Value)>) -> Value {
    match kind {
        ContainerKind::Map => Value::Object(entries.into_iter().collect::<Map<_, _>>()),
        ContainerKind::Pairs => Value::Array(
            entries
                .into_iter()
                .map(|(k, v)| Value::Array(vec![Value::String(k), v]))
                .collect(),
        ),
    }
}

/// Rewrite the top `kinds.len()` container levels of `value` into the given
/// kinds, level by level. Leaves and deeper levels are left as they are.
///
/// Only objects are descended into and rewritten; this is meant for trees
/// written as nested objects (`json!({...})`).
pub fn reshape(value: &Value, kinds: &[ContainerKind]) -> Value {
    let (Some((kind, deeper)), Value::Object(map)) = (kinds.split_first(), value) else {
        return value.clone();
    };
    let entries = map
        .iter()
        .map(|(k, v)| (k.clone(), reshape(v, deeper)))
        .collect();
    assemble(*kind, entries)
}

/// Every reshaping of the top `depth` levels of `value`: `2^depth` trees with
/// the same content and every combination of container kinds.
pub fn kind_variants(value: &Value, depth: usize) -> Vec<Value> {
    let mut combos: Vec<Vec<ContainerKind>> = vec![Vec::new()];
    for _ in 0..depth {
        combos = combos
            .into_iter()
            .flat_map(|prefix| {
                [ContainerKind::Map, ContainerKind::Pairs].map(|kind| {
                    let mut next = prefix.clone();
                    next.push(kind);
                    next
                })
            })
            .collect();
    }
    combos.iter().map(|kinds| reshape(value, kinds)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builds_both_kinds() {
        let m = TreeBuilder::map().entry("a", json!(1)).build();
        assert_eq!(m, json!({"a": 1}));
        let p = TreeBuilder::pairs().entry("a", json!(1)).entry("a", json!(2)).build();
        assert_eq!(p, json!([["a", 1], ["a", 2]]));
    }

    #[test]
    fn reshape_rewrites_only_requested_levels() {
        let tree = json!({"a": {"b": {"c": 1}}});
        let out = reshape(&tree, &[ContainerKind::Pairs, ContainerKind::Pairs]);
        assert_eq!(out, json!([["a", [["b", {"c": 1}]]]]));
    }

    #[test]
    fn reshape_leaves_scalars_alone() {
        let tree = json!({"a": 5});
        assert_eq!(
            reshape(&tree, &[ContainerKind::Map, ContainerKind::Pairs]),
            json!({"a": 5})
        );
    }

    #[test]
    fn kind_variants_cover_every_combination() {
        let tree = json!({"a": {"b": 1}});
        let variants = kind_variants(&tree, 2);
        assert_eq!(variants.len(), 4);
        assert!(variants.contains(&json!({"a": {"b": 1}})));
        assert!(variants.contains(&json!([["a", {"b": 1}]])));
        assert!(variants.contains(&json!({"a": [["b", 1]]})));
        assert!(variants.contains(&json!([["a", [["b", 1]]]])));
    }
}
