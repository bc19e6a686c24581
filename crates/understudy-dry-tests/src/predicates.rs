// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Ready-made argument predicates.
//!
//! Each call builds a fresh [`Predicate`]. Two separately built predicates are
//! distinct specs, so registering `is_even()` twice appends two entries;
//! clone one predicate to re-register against the same entry.

use serde_json::Value;
use understudy_core::{approx_eq, Predicate};

/// Matches even integers.
pub fn is_even() -> Predicate {
    Predicate::new("is_even", |v| v.as_i64().is_some_and(|n| n % 2 == 0))
}

/// Matches odd integers.
pub fn is_odd() -> Predicate {
    Predicate::new("is_odd", |v| v.as_i64().is_some_and(|n| n % 2 != 0))
}

/// Matches any string.
pub fn is_string() -> Predicate {
    Predicate::new("is_string", Value::is_string)
}

/// Matches numbers strictly greater than `bound`.
pub fn greater_than(bound: f64) -> Predicate {
    Predicate::new("greater_than", move |v| v.as_f64().is_some_and(|n| n > bound))
}

/// Matches any of `values` (approximate equality).
pub fn one_of(values: Vec<Value>) -> Predicate {
    Predicate::new("one_of", move |v| values.iter().any(|c| approx_eq(c, v)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parity() {
        assert!(is_even().test(&json!(4)));
        assert!(!is_even().test(&json!(5)));
        assert!(is_odd().test(&json!(-3)));
        assert!(!is_odd().test(&json!("3")));
    }

    #[test]
    fn bounds_and_membership() {
        assert!(greater_than(1.5).test(&json!(2)));
        assert!(!greater_than(1.5).test(&json!(1.5)));
        let p = one_of(vec![json!("a"), json!(1.0)]);
        assert!(p.test(&json!(1)));
        assert!(!p.test(&json!("b")));
        assert!(is_string().test(&json!("x")));
    }
}
