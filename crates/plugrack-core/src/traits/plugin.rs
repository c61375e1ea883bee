// SPDX-FileCopyrightText: 2026 Plugrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The capability contract every discoverable plugin satisfies.

use serde_json::Value;

use crate::error::PlugrackError;

/// Description reported by plugins that do not provide their own.
pub const UNKNOWN_DESCRIPTION: &str = "unknown";

/// The capability contract for all Plugrack plugins.
///
/// A plugin is a human-readable description plus one operation mapping an
/// opaque input value to an output value. Plugins are constructed with no
/// arguments by the registry that discovers them and are never mutated by
/// callers afterwards.
pub trait Plugin: Send + Sync + 'static {
    /// Returns the human-readable description of this plugin.
    fn description(&self) -> &str {
        UNKNOWN_DESCRIPTION
    }

    /// Applies the plugin to `argument` and returns its result.
    fn perform_operation(&self, argument: &Value) -> Result<Value, PlugrackError>;
}

/// The contract type itself.
///
/// Units may expose it alongside their concrete plugins; discovery never
/// instantiates it. Invoking it directly always fails with
/// [`PlugrackError::NotImplemented`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BasePlugin;

impl Plugin for BasePlugin {
    fn perform_operation(&self, _argument: &Value) -> Result<Value, PlugrackError> {
        Err(PlugrackError::NotImplemented {
            type_name: "BasePlugin",
        })
    }
}
