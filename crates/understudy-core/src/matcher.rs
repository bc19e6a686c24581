// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Argument specs and the matcher that tests them against actual calls.
//!
//! A stub is keyed by a list of [`ArgSpec`]s, one per parameter position. A
//! spec is either a literal (compared with [`approx_eq`]), a [`Predicate`]
//! (applied to the argument and tested for truthiness), a wildcard, or a
//! container literal whose members are themselves specs.
//!
//! Two distinct comparisons live here and must not be confused:
//!
//! - [`matches`] compares specs against *actual arguments* (call time).
//! - `PartialEq for ArgSpec` compares specs against *other specs*
//!   (registration time, to decide replace vs append). Literals compare with
//!   exact `Value` equality, not [`approx_eq`]: `1` and `1.0` are distinct
//!   specs even though both accept the same arguments. Predicates are equal
//!   only to themselves: clones of one [`Predicate`] share an allocation and
//!   compare equal, two separately built predicates never do.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::value::{approx_eq, is_truthy};

type PredicateFn = dyn Fn(&Value) -> bool + Send + Sync;

/// A named argument test.
#[derive(Clone)]
pub struct Predicate {
    name: Arc<str>,
    test: Arc<PredicateFn>,
}

impl Predicate {
    /// Wrap a boolean test.
    pub fn new(name: &str, test: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        Self {
            name: Arc::from(name),
            test: Arc::new(test),
        }
    }

    /// Wrap a value-returning test; the argument matches when the result is
    /// truthy (anything but `null` or `false`).
    pub fn truthy(name: &str, test: impl Fn(&Value) -> Value + Send + Sync + 'static) -> Self {
        Self::new(name, move |v| is_truthy(&test(v)))
    }

    /// Name used in debug output.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Apply the predicate to one argument.
    pub fn test(&self, value: &Value) -> bool {
        (self.test)(value)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Predicate({})", self.name)
    }
}

impl PartialEq for Predicate {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.test, &other.test)
    }
}

/// Per-position matching rule.
#[derive(Clone, Debug)]
pub enum ArgSpec {
    /// Literal value, compared with approximate structural equality.
    Eq(Value),
    /// Arbitrary test applied to the argument.
    Pred(Predicate),
    /// Matches any argument.
    Any,
    /// Array literal whose elements are specs; lengths must agree.
    Seq(Vec<ArgSpec>),
    /// Object literal whose fields are specs; key sets must agree.
    Fields(BTreeMap<String, ArgSpec>),
}

impl ArgSpec {
    /// Shorthand for [`ArgSpec::Pred`] built from a boolean closure.
    pub fn pred(name: &str, test: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        Self::Pred(Predicate::new(name, test))
    }

    /// Does this spec accept `actual`?
    pub fn accepts(&self, actual: &Value) -> bool {
        match self {
            Self::Eq(expected) => approx_eq(expected, actual),
            Self::Pred(p) => p.test(actual),
            Self::Any => true,
            Self::Seq(specs) => match actual {
                Value::Array(items) => matches(specs, items),
                _ => false,
            },
            Self::Fields(specs) => match actual {
                Value::Object(fields) => {
                    specs.len() == fields.len()
                        && specs
                            .iter()
                            .all(|(k, spec)| fields.get(k).is_some_and(|v| spec.accepts(v)))
                }
                _ => false,
            },
        }
    }
}

impl PartialEq for ArgSpec {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Eq(a), Self::Eq(b)) => a == b,
            (Self::Pred(a), Self::Pred(b)) => a == b,
            (Self::Any, Self::Any) => true,
            (Self::Seq(a), Self::Seq(b)) => a == b,
            (Self::Fields(a), Self::Fields(b)) => a == b,
            _ => false,
        }
    }
}

impl From<Value> for ArgSpec {
    fn from(value: Value) -> Self {
        Self::Eq(value)
    }
}

impl From<Predicate> for ArgSpec {
    fn from(p: Predicate) -> Self {
        Self::Pred(p)
    }
}

impl From<&str> for ArgSpec {
    fn from(s: &str) -> Self {
        Self::Eq(Value::from(s))
    }
}

impl From<String> for ArgSpec {
    fn from(s: String) -> Self {
        Self::Eq(Value::from(s))
    }
}

impl From<i64> for ArgSpec {
    fn from(n: i64) -> Self {
        Self::Eq(Value::from(n))
    }
}

impl From<i32> for ArgSpec {
    fn from(n: i32) -> Self {
        Self::Eq(Value::from(n))
    }
}

impl From<f64> for ArgSpec {
    fn from(n: f64) -> Self {
        Self::Eq(Value::from(n))
    }
}

impl From<bool> for ArgSpec {
    fn from(b: bool) -> Self {
        Self::Eq(Value::from(b))
    }
}

/// Match a spec list against actual arguments, position by position.
///
/// A length mismatch never matches. Calculators check arity before calling
/// this, so in practice lengths always agree.
pub fn matches(specs: &[ArgSpec], args: &[Value]) -> bool {
    specs.len() == args.len() && specs.iter().zip(args).all(|(spec, arg)| spec.accepts(arg))
}
