// SPDX-FileCopyrightText: 2026 Plugrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `plugrack list` command implementation.

use std::io::IsTerminal;

use plugrack_core::PlugrackError;
use plugrack_plugin::PluginRegistry;

/// Print every discovered plugin in discovery order.
///
/// Always succeeds once the registry exists; an empty registry prints a note
/// instead of a table.
pub fn run_list(registry: &PluginRegistry) -> Result<bool, PlugrackError> {
    let use_color = std::io::stdout().is_terminal();

    println!();
    println!("  plugins under {}", registry.root_namespace());
    println!("  {}", "-".repeat(50));

    if registry.is_empty() {
        println!("    (none found)");
    }

    let width = registry
        .plugins()
        .iter()
        .map(|p| p.qualified_name().len())
        .max()
        .unwrap_or(0);

    for plugin in registry.plugins() {
        if use_color {
            use colored::Colorize;
            println!(
                "    {:<width$}  {}",
                plugin.qualified_name().bold(),
                plugin.description().dimmed()
            );
        } else {
            println!(
                "    {:<width$}  {}",
                plugin.qualified_name(),
                plugin.description()
            );
        }
    }

    println!();
    let count = registry.len();
    let word = if count == 1 { "plugin" } else { "plugins" };
    println!("  {count} {word} found.");

    Ok(true)
}
