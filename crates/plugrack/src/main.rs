// SPDX-FileCopyrightText: 2026 Plugrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugrack - discover plugins in a namespace tree and apply values to them.
//!
//! This is the binary entry point.

mod apply;
mod list;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use plugrack_config::PlugrackConfig;
use plugrack_core::{NamespacePath, PlugrackError};
use plugrack_plugin::{
    builtin_catalog, builtin_manifest, DiscoveryOptions, ModuleManifest, PluginRegistry,
};
use tracing::debug;

/// Plugrack - discover plugins in a namespace tree and apply values to them.
#[derive(Parser, Debug)]
#[command(name = "plugrack", version, about, long_about = None)]
struct Cli {
    /// Configuration file to load instead of the standard hierarchy.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Module manifest describing the namespace tree.
    #[arg(long, global = true, value_name = "PATH")]
    manifest: Option<PathBuf>,

    /// Root namespace to discover plugins under.
    #[arg(long, global = true, value_name = "NAMESPACE")]
    root: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// List every discovered plugin with its description.
    List,
    /// Apply a value to every discovered plugin.
    Apply {
        /// The value to broadcast.
        value: String,
        /// Parse VALUE as JSON instead of passing it as a string.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(path) = &cli.config
        && let Err(e) = require_config_file(path)
    {
        eprintln!("plugrack: {e}");
        return ExitCode::FAILURE;
    }

    let loaded = match &cli.config {
        Some(path) => plugrack_config::load_and_validate_path(path),
        None => plugrack_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            plugrack_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.logging.level);

    let registry = match build_registry(&cli, &config) {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("plugrack: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::List => list::run_list(&registry),
        Commands::Apply { value, json } => apply::run_apply(&registry, &value, json),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("plugrack: {e}");
            ExitCode::FAILURE
        }
    }
}

/// An explicit `--config` must exist; figment silently skips missing files.
fn require_config_file(path: &Path) -> Result<(), PlugrackError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(PlugrackError::Config(format!(
            "config file {} does not exist",
            path.display()
        )))
    }
}

/// Build the registry from CLI flags, falling back to configuration and
/// then to the embedded manifest.
fn build_registry(cli: &Cli, config: &PlugrackConfig) -> Result<PluginRegistry, PlugrackError> {
    let root = NamespacePath::parse(
        cli.root
            .as_deref()
            .unwrap_or(&config.registry.root_namespace),
    )?;

    let manifest_path = cli
        .manifest
        .as_deref()
        .or(config.registry.manifest_path.as_deref().map(Path::new));
    let manifest = match manifest_path {
        Some(path) => ModuleManifest::load(path)?,
        None => builtin_manifest()?,
    };

    let registry = PluginRegistry::builder(root)
        .manifest(manifest, builtin_catalog())
        .options(DiscoveryOptions {
            deduplicate_types: config.discovery.deduplicate_types,
        })
        .build()?;

    debug!(
        root = %registry.root_namespace(),
        manifest = ?manifest_path,
        plugins = registry.len(),
        "registry ready"
    );
    Ok(registry)
}

/// Initialize the tracing subscriber on stderr.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("plugrack={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();
}
