// SPDX-FileCopyrightText: 2026 Plugrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use plugrack_core::NamespacePath;

use crate::diagnostic::ConfigError;
use crate::model::PlugrackConfig;

/// Log levels accepted by `logging.level`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure rather than stopping at the first.
pub fn validate_config(config: &PlugrackConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let root = config.registry.root_namespace.trim();
    if root.is_empty() {
        errors.push(ConfigError::Validation {
            message: "registry.root_namespace must not be empty".to_string(),
        });
    } else if let Err(e) = NamespacePath::parse(root) {
        errors.push(ConfigError::Validation {
            message: format!("registry.root_namespace `{root}` is invalid: {e}"),
        });
    }

    if let Some(path) = &config.registry.manifest_path
        && path.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "registry.manifest_path must not be blank when set".to_string(),
        });
    }

    let level = config.logging.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "logging.level `{}` is not one of {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
