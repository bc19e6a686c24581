// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Dynamic value helpers shared by matching, stubbing and path traversal.
//!
//! Every argument, payload and accessor root is a [`serde_json::Value`]. This
//! module holds the few value-level rules the rest of the crate agrees on:
//! truthiness, approximate equality and diagnostic rendering.

pub use serde_json::Value;

/// Relative tolerance used when comparing two numbers.
pub const FLOAT_TOLERANCE: f64 = 1e-9;

/// Returns `false` for `null` and `false`, `true` for everything else.
pub fn is_truthy(value: &Value) -> bool {
    !matches!(value, Value::Null | Value::Bool(false))
}

/// Structural equality that treats numbers numerically.
///
/// `1` and `1.0` compare equal, and two floats compare equal when they differ
/// by no more than [`FLOAT_TOLERANCE`] relative to the larger magnitude.
/// Arrays compare element-wise and objects key-wise, recursively.
pub fn approx_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
                return x == y;
            }
            if let (Some(x), Some(y)) = (x.as_u64(), y.as_u64()) {
                return x == y;
            }
            match (x.as_f64(), y.as_f64()) {
                (Some(x), Some(y)) => numbers_close(x, y),
                _ => false,
            }
        }
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| approx_eq(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(k, x)| ys.get(k).is_some_and(|y| approx_eq(x, y)))
        }
        _ => a == b,
    }
}

// JSON numbers are always finite, so the subtraction never yields NaN.
fn numbers_close(x: f64, y: f64) -> bool {
    let scale = x.abs().max(y.abs()).max(1.0);
    (x - y).abs() <= FLOAT_TOLERANCE * scale
}

/// Render a value list as compact JSON for error messages.
pub fn render_args(args: &[Value]) -> String {
    let parts: Vec<String> = args.iter().map(Value::to_string).collect();
    format!("[{}]", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_and_false_are_the_only_falsy_values() {
        assert!(!is_truthy(&Value::Null));
        assert!(!is_truthy(&json!(false)));
        assert!(is_truthy(&json!(0)));
        assert!(is_truthy(&json!("")));
        assert!(is_truthy(&json!([])));
    }

    #[test]
    fn integers_and_floats_compare_numerically() {
        assert!(approx_eq(&json!(1), &json!(1.0)));
        assert!(approx_eq(&json!(0.1 + 0.2), &json!(0.3)));
        assert!(!approx_eq(&json!(1), &json!(2)));
        assert!(!approx_eq(&json!(1), &json!("1")));
    }

    #[test]
    fn containers_compare_recursively() {
        assert!(approx_eq(&json!({"a": [1, 2.0]}), &json!({"a": [1.0, 2]})));
        assert!(!approx_eq(&json!({"a": 1}), &json!({"a": 1, "b": 2})));
        assert!(!approx_eq(&json!([1, 2]), &json!([2, 1])));
    }

    #[test]
    fn render_args_is_compact_json() {
        assert_eq!(render_args(&[json!(3), json!("x")]), r#"[3, "x"]"#);
        assert_eq!(render_args(&[]), "[]");
    }
}
