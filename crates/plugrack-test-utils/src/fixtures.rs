// SPDX-FileCopyrightText: 2026 Plugrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixture plugins.

use plugrack_core::{Plugin, PlugrackError};
use serde_json::Value;

/// Returns its argument unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Echo;

impl Plugin for Echo {
    fn description(&self) -> &str {
        "echoes"
    }

    fn perform_operation(&self, argument: &Value) -> Result<Value, PlugrackError> {
        Ok(argument.clone())
    }
}

/// Always fails with an invocation error.
#[derive(Debug, Clone, Copy, Default)]
pub struct Failing;

impl Plugin for Failing {
    fn description(&self) -> &str {
        "fails"
    }

    fn perform_operation(&self, argument: &Value) -> Result<Value, PlugrackError> {
        Err(PlugrackError::Invocation {
            plugin: "Failing".to_string(),
            message: format!("refusing {argument}"),
            source: None,
        })
    }
}

/// Always panics.
#[derive(Debug, Clone, Copy, Default)]
pub struct Panicking;

impl Plugin for Panicking {
    fn description(&self) -> &str {
        "panics"
    }

    fn perform_operation(&self, _argument: &Value) -> Result<Value, PlugrackError> {
        panic!("fixture plugin panicked")
    }
}

/// Keeps the default description.
#[derive(Debug, Clone, Copy, Default)]
pub struct Undescribed;

impl Plugin for Undescribed {
    fn perform_operation(&self, _argument: &Value) -> Result<Value, PlugrackError> {
        Ok(Value::Null)
    }
}
