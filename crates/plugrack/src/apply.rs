// SPDX-FileCopyrightText: 2026 Plugrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `plugrack apply` command implementation.
//!
//! Broadcasts one value to every discovered plugin and prints one line per
//! outcome, in discovery order.

use std::io::IsTerminal;

use plugrack_core::PlugrackError;
use plugrack_plugin::{InvocationOutcome, PluginRegistry};
use serde_json::Value;

/// Turn the raw CLI argument into the value handed to plugins.
pub fn parse_argument(raw: &str, json: bool) -> Result<Value, PlugrackError> {
    if json {
        serde_json::from_str(raw)
            .map_err(|e| PlugrackError::InvalidArgument(format!("`{raw}` is not valid JSON: {e}")))
    } else {
        Ok(Value::String(raw.to_string()))
    }
}

/// Run the broadcast. Returns `Ok(false)` when at least one plugin failed.
pub fn run_apply(registry: &PluginRegistry, raw: &str, json: bool) -> Result<bool, PlugrackError> {
    let argument = parse_argument(raw, json)?;
    let report = registry.apply_all(&argument);
    let use_color = std::io::stdout().is_terminal();

    for outcome in report.outcomes() {
        println!("{}", format_outcome(outcome, use_color));
    }

    let failures = report.failures().count();
    if failures > 0 {
        let word = if failures == 1 { "plugin" } else { "plugins" };
        eprintln!("plugrack: {failures} of {} {word} failed", report.len());
    }

    Ok(report.all_succeeded())
}

/// One line per outcome: `plugin (description): argument -> result`.
pub fn format_outcome(outcome: &InvocationOutcome, use_color: bool) -> String {
    let head = format!(
        "{} ({}): {}",
        outcome.plugin, outcome.description, outcome.argument
    );
    match (&outcome.result, use_color) {
        (Ok(value), false) => format!("[OK]   {head} -> {value}"),
        (Err(error), false) => format!("[FAIL] {head} -> {error}"),
        (Ok(value), true) => {
            use colored::Colorize;
            format!("{} {head} -> {}", "✓".green(), value.to_string().green())
        }
        (Err(error), true) => {
            use colored::Colorize;
            format!("{} {head} -> {}", "✗".red(), error.to_string().red())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn outcome(result: Result<Value, PlugrackError>) -> InvocationOutcome {
        InvocationOutcome {
            plugin: "plugins.case.Upper".to_string(),
            description: "uppercases".to_string(),
            argument: json!("hi"),
            result,
        }
    }

    #[test]
    fn plain_argument_is_a_string() {
        assert_eq!(parse_argument("[1]", false).unwrap(), json!("[1]"));
    }

    #[test]
    fn json_argument_is_parsed() {
        assert_eq!(parse_argument("[1, 2]", true).unwrap(), json!([1, 2]));
    }

    #[test]
    fn invalid_json_is_rejected() {
        let err = parse_argument("{oops", true).unwrap_err();
        assert!(matches!(err, PlugrackError::InvalidArgument(_)));
    }

    #[test]
    fn success_line_shows_result() {
        let line = format_outcome(&outcome(Ok(json!("HI"))), false);
        assert_eq!(line, r#"[OK]   plugins.case.Upper (uppercases): "hi" -> "HI""#);
    }

    #[test]
    fn failure_line_shows_error() {
        let err = PlugrackError::InvalidArgument("no".to_string());
        let line = format_outcome(&outcome(Err(err)), false);
        assert!(line.starts_with("[FAIL] plugins.case.Upper (uppercases): \"hi\" -> "));
        assert!(line.ends_with("no"));
    }
}
