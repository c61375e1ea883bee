// SPDX-FileCopyrightText: 2026 Plugrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use plugrack_core::{Plugin, PlugrackError};
use serde_json::Value;

use super::unsupported;

/// Reverses strings (by character) and arrays.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reverse;

impl Plugin for Reverse {
    fn description(&self) -> &str {
        "reverses"
    }

    fn perform_operation(&self, argument: &Value) -> Result<Value, PlugrackError> {
        match argument {
            Value::String(s) => Ok(Value::String(s.chars().rev().collect())),
            Value::Array(items) => Ok(Value::Array(items.iter().rev().cloned().collect())),
            other => Err(unsupported("Reverse", other)),
        }
    }
}
