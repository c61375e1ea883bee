// SPDX-FileCopyrightText: 2026 Plugrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in plugins shipped with Plugrack.
//!
//! These are exposed by the embedded default manifest (see
//! [`crate::manifest::builtin_manifest`]) and registered by
//! [`crate::catalog::builtin_catalog`].

pub mod double;
pub mod length;
pub mod reverse;
pub mod upper;

pub use double::Double;
pub use length::Length;
pub use reverse::Reverse;
pub use upper::Upper;

use plugrack_core::PlugrackError;
use serde_json::Value;

/// Short JSON type name for error messages.
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub(crate) fn unsupported(plugin: &str, value: &Value) -> PlugrackError {
    PlugrackError::InvalidArgument(format!(
        "{plugin} does not accept a {} argument",
        value_kind(value)
    ))
}
