// SPDX-FileCopyrightText: 2026 Plugrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Doubling plugin.

use plugrack_core::{Plugin, PlugrackError};
use serde_json::{Number, Value};

use super::unsupported;

/// Returns its argument repeated twice.
///
/// Strings and arrays are concatenated with themselves; numbers are
/// multiplied by two.
#[derive(Debug, Clone, Copy, Default)]
pub struct Double;

impl Plugin for Double {
    fn description(&self) -> &str {
        "doubles"
    }

    fn perform_operation(&self, argument: &Value) -> Result<Value, PlugrackError> {
        match argument {
            Value::String(s) => Ok(Value::String(s.repeat(2))),
            Value::Array(items) => {
                let mut doubled = items.clone();
                doubled.extend(items.iter().cloned());
                Ok(Value::Array(doubled))
            }
            Value::Number(n) => double_number(n),
            other => Err(unsupported("Double", other)),
        }
    }
}

fn double_number(n: &Number) -> Result<Value, PlugrackError> {
    if let Some(i) = n.as_i64() {
        return i
            .checked_mul(2)
            .map(Value::from)
            .ok_or_else(|| PlugrackError::InvalidArgument(format!("doubling {i} overflows")));
    }
    if let Some(u) = n.as_u64() {
        return u
            .checked_mul(2)
            .map(Value::from)
            .ok_or_else(|| PlugrackError::InvalidArgument(format!("doubling {u} overflows")));
    }
    n.as_f64()
        .and_then(|f| Number::from_f64(f * 2.0))
        .map(Value::Number)
        .ok_or_else(|| PlugrackError::InvalidArgument(format!("cannot double {n}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn doubles_strings() {
        assert_eq!(
            Double.perform_operation(&json!("hi")).unwrap(),
            json!("hihi")
        );
    }

    #[test]
    fn doubles_numbers() {
        assert_eq!(Double.perform_operation(&json!(21)).unwrap(), json!(42));
        assert_eq!(Double.perform_operation(&json!(1.5)).unwrap(), json!(3.0));
    }

    #[test]
    fn doubles_arrays() {
        assert_eq!(
            Double.perform_operation(&json!([1, "a"])).unwrap(),
            json!([1, "a", 1, "a"])
        );
    }

    #[test]
    fn overflow_is_an_error() {
        assert!(Double.perform_operation(&json!(i64::MAX)).is_err());
    }

    #[test]
    fn rejects_objects() {
        assert!(Double.perform_operation(&json!({"a": 1})).is_err());
    }
}
