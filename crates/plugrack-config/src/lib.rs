// SPDX-FileCopyrightText: 2026 Plugrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for Plugrack.
//!
//! Provides TOML configuration parsing with strict validation
//! (`deny_unknown_fields`), XDG file hierarchy lookup, environment variable
//! overrides, and miette diagnostics with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use plugrack_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("root namespace: {}", config.registry.root_namespace);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::PlugrackConfig;

/// Load configuration from the XDG hierarchy and validate it.
///
/// Figment errors are converted into diagnostics carrying source spans and
/// "did you mean" suggestions.
pub fn load_and_validate() -> Result<PlugrackConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(
            err,
            &collect_toml_sources(),
        )),
    }
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<PlugrackConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = vec![("<inline>".to_string(), toml_content.to_string())];
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Load configuration from an explicit file (plus env overrides) and validate it.
pub fn load_and_validate_path(path: &Path) -> Result<PlugrackConfig, Vec<ConfigError>> {
    match loader::load_config_from_path(path) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources: Vec<(String, String)> = std::fs::read_to_string(path)
                .map(|content| vec![(path.display().to_string(), content)])
                .unwrap_or_default();
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Read every config file that exists, for error span resolution.
fn collect_toml_sources() -> Vec<(String, String)> {
    let mut candidates = vec![
        std::path::PathBuf::from(loader::LOCAL_CONFIG),
        std::path::PathBuf::from(loader::SYSTEM_CONFIG),
    ];
    candidates.extend(loader::user_config_path());

    candidates
        .into_iter()
        .filter_map(|path| {
            let content = std::fs::read_to_string(&path).ok()?;
            tracing::debug!(path = %path.display(), "read config source for diagnostics");
            Some((path.display().to_string(), content))
        })
        .collect()
}
