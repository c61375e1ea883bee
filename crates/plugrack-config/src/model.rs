// SPDX-FileCopyrightText: 2026 Plugrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for Plugrack.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so misspelled keys are
//! rejected at startup instead of silently ignored.

use serde::{Deserialize, Serialize};

/// Top-level Plugrack configuration.
///
/// Every section is optional and falls back to its defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PlugrackConfig {
    /// Where discovery starts and which manifest describes the tree.
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Discovery walk behavior.
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Registry binding configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// Dotted namespace discovery starts from.
    #[serde(default = "default_root_namespace")]
    pub root_namespace: String,

    /// Path to a module manifest. `None` uses the embedded built-in manifest.
    #[serde(default)]
    pub manifest_path: Option<String>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            root_namespace: default_root_namespace(),
            manifest_path: None,
        }
    }
}

fn default_root_namespace() -> String {
    "plugins".to_string()
}

/// Discovery walk configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DiscoveryConfig {
    /// Instantiate a type re-exported from several units only once.
    #[serde(default = "default_true")]
    pub deduplicate_types: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            deduplicate_types: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
