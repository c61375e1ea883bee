// SPDX-FileCopyrightText: 2026 Plugrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./plugrack.toml` > `~/.config/plugrack/plugrack.toml`
//! > `/etc/plugrack/plugrack.toml`, with environment variable overrides via the
//! `PLUGRACK_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::PlugrackConfig;

pub(crate) const LOCAL_CONFIG: &str = "plugrack.toml";
pub(crate) const SYSTEM_CONFIG: &str = "/etc/plugrack/plugrack.toml";

/// Path of the per-user config file, if a config directory exists.
pub(crate) fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("plugrack").join(LOCAL_CONFIG))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/plugrack/plugrack.toml`
/// 3. `~/.config/plugrack/plugrack.toml`
/// 4. `./plugrack.toml`
/// 5. `PLUGRACK_*` environment variables
pub fn load_config() -> Result<PlugrackConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no environment).
pub fn load_config_from_str(toml_content: &str) -> Result<PlugrackConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PlugrackConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from one explicit file with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<PlugrackConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PlugrackConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// The layered Figment before extraction.
pub fn build_figment() -> Figment {
    let mut figment = Figment::new()
        .merge(Serialized::defaults(PlugrackConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG));
    if let Some(user) = user_config_path() {
        figment = figment.merge(Toml::file(user));
    }
    figment.merge(Toml::file(LOCAL_CONFIG)).merge(env_provider())
}

/// Environment provider mapping `PLUGRACK_<SECTION>_<KEY>` onto `section.key`.
///
/// Only the first underscore after the section name separates it from the
/// key, so `PLUGRACK_REGISTRY_ROOT_NAMESPACE` maps to
/// `registry.root_namespace`.
fn env_provider() -> Env {
    Env::prefixed("PLUGRACK_").map(|key| {
        // Keys arrive in their original case.
        let key_str = key.as_str().to_ascii_lowercase();
        let mapped = key_str
            .replacen("registry_", "registry.", 1)
            .replacen("discovery_", "discovery.", 1)
            .replacen("logging_", "logging.", 1);
        mapped.into()
    })
}
