// SPDX-FileCopyrightText: 2026 Plugrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use plugrack_core::{Plugin, PlugrackError};
use serde_json::Value;

use super::unsupported;

/// Reports the length of strings (in characters), arrays, and objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct Length;

impl Plugin for Length {
    fn description(&self) -> &str {
        "measures length"
    }

    fn perform_operation(&self, argument: &Value) -> Result<Value, PlugrackError> {
        let len = match argument {
            Value::String(s) => s.chars().count(),
            Value::Array(items) => items.len(),
            Value::Object(map) => map.len(),
            other => return Err(unsupported("Length", other)),
        };
        Ok(Value::from(len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn measures_characters_not_bytes() {
        assert_eq!(Length.perform_operation(&json!("héllo")).unwrap(), json!(5));
    }

    #[test]
    fn measures_collections() {
        assert_eq!(Length.perform_operation(&json!([1, 2])).unwrap(), json!(2));
        assert_eq!(Length.perform_operation(&json!({"a": 1})).unwrap(), json!(1));
    }

    #[test]
    fn rejects_booleans() {
        let err = Length.perform_operation(&json!(true)).unwrap_err();
        assert!(err.to_string().contains("boolean"));
    }
}
