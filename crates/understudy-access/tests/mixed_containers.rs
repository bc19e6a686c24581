// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Accessors behave identically over objects and `[key, value]` pair lists.
#![allow(clippy::unwrap_used, clippy::panic)]

use proptest::prelude::*;
use serde_json::{json, Value};
use understudy_access::{build_accessor, Accessor, Segment};
use understudy_core::Error;
use understudy_dry_tests::{kind_variants, ContainerKind, TreeBuilder};

fn accessor(segments: Vec<Segment>) -> Accessor {
    build_accessor(segments).unwrap()
}

/// Same outcome for every container-kind mix of the top `depth` levels.
fn assert_kind_independent(acc: &Accessor, tree: &Value, depth: usize) -> Result<Value, Error> {
    let variants = kind_variants(tree, depth);
    let first = acc.get(&variants[0]);
    for variant in &variants[1..] {
        let outcome = acc.get(variant);
        match (&first, &outcome) {
            (Ok(a), Ok(b)) => assert_eq!(a, b, "variant {variant}"),
            (Err(a), Err(b)) => assert_eq!(
                std::mem::discriminant(a),
                std::mem::discriminant(b),
                "variant {variant}"
            ),
            _ => panic!("outcome differs for {variant}: {first:?} vs {outcome:?}"),
        }
    }
    first
}

#[test]
fn documented_round_trips() {
    assert_eq!(accessor(vec!["a".into()]).get(&json!({"a": 1})), Ok(json!(1)));
    assert_eq!(
        accessor(vec!["a".into(), ("b", json!("d")).into()]).get(&json!({"a": {}})),
        Ok(json!("d"))
    );
    assert!(matches!(
        accessor(vec!["a".into(), "b".into()]).get(&json!({"a": {}})),
        Err(Error::MissingKey { .. })
    ));
    assert!(matches!(
        accessor(vec!["a".into(), "b".into()]).get(&json!({"a": 5})),
        Err(Error::NotAContainer { .. })
    ));
}

#[test]
fn three_level_hit_across_every_kind_mix() {
    let tree = json!({"svc": {"db": {"port": 5432, "host": "pg"}}});
    let acc = accessor(vec!["svc".into(), "db".into(), "port".into()]);
    assert_eq!(assert_kind_independent(&acc, &tree, 3), Ok(json!(5432)));
}

#[test]
fn default_and_missing_across_every_kind_mix() {
    let tree = json!({"svc": {"db": {}}});
    let with_default = accessor(vec!["svc".into(), "db".into(), ("port", json!(5432)).into()]);
    assert_eq!(assert_kind_independent(&with_default, &tree, 3), Ok(json!(5432)));

    let without = accessor(vec!["svc".into(), "db".into(), "port".into()]);
    assert_eq!(
        assert_kind_independent(&without, &tree, 3),
        Err(Error::MissingKey { key: "port".into() })
    );
}

#[test]
fn builder_made_trees_are_traversable() {
    let root = TreeBuilder::pairs()
        .nest(
            "limits",
            TreeBuilder::new(ContainerKind::Map).nest("api", TreeBuilder::pairs().entry("rps", json!(50))),
        )
        .build();
    let acc = accessor(vec!["limits".into(), "api".into(), "rps".into()]);
    assert_eq!(acc.get(&root), Ok(json!(50)));
}

proptest! {
    #[test]
    fn traversal_is_referentially_transparent(
        leaf in any::<i64>(),
        present in any::<bool>(),
        default in any::<i32>(),
    ) {
        let tree = if present {
            json!({"a": {"b": {"c": leaf}}})
        } else {
            json!({"a": {"b": {}}})
        };
        let acc = accessor(vec!["a".into(), "b".into(), ("c", json!(default)).into()]);
        let expected = if present { json!(leaf) } else { json!(default) };
        prop_assert_eq!(assert_kind_independent(&acc, &tree, 3), Ok(expected.clone()));
        prop_assert_eq!(acc.get(&tree), acc.get(&tree));
        prop_assert_eq!(acc.get(&tree), Ok(expected));
    }

    #[test]
    fn scalar_in_the_middle_is_never_a_missing_key(scalar in any::<i64>()) {
        let tree = json!({"a": {"b": scalar}});
        let acc = accessor(vec!["a".into(), "b".into(), ("c", json!(0)).into()]);
        let outcome = assert_kind_independent(&acc, &tree, 2);
        let is_not_a_container = matches!(outcome, Err(Error::NotAContainer { .. }));
        prop_assert!(is_not_a_container);
    }
}
