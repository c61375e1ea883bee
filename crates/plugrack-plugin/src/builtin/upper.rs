// SPDX-FileCopyrightText: 2026 Plugrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Uppercasing plugin.

use plugrack_core::{Plugin, PlugrackError};
use serde_json::Value;

use super::unsupported;

/// Converts a string argument to uppercase.
#[derive(Debug, Clone, Copy, Default)]
pub struct Upper;

impl Plugin for Upper {
    fn description(&self) -> &str {
        "uppercases"
    }

    fn perform_operation(&self, argument: &Value) -> Result<Value, PlugrackError> {
        match argument {
            Value::String(s) => Ok(Value::String(s.to_uppercase())),
            other => Err(unsupported("Upper", other)),
        }
    }
}
