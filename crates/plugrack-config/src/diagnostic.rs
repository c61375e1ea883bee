// SPDX-FileCopyrightText: 2026 Plugrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Figment-to-miette error bridge with fuzzy match suggestions.
//!
//! Turns Figment extraction errors into miette diagnostics that point at the
//! offending key in its source file and suggest the closest valid key.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Minimum Jaro-Winkler similarity score to suggest a correction.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A configuration error with rich diagnostic information.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// An unknown key was found in the configuration.
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(plugrack::config::unknown_key),
        help("{}", unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        key: String,
        /// Closest valid key, if one is similar enough.
        suggestion: Option<String>,
        /// Comma-separated valid keys for the section.
        valid_keys: String,
        #[label("not a recognized key")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A configuration value has the wrong type.
    #[error("invalid type for key `{key}`: {detail}")]
    #[diagnostic(code(plugrack::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        key: String,
        detail: String,
        expected: String,
    },

    /// A required configuration key is missing.
    #[error("missing required key `{key}`")]
    #[diagnostic(
        code(plugrack::config::missing_key),
        help("add `{key} = <value>` to your plugrack.toml")
    )]
    MissingKey { key: String },

    /// A value deserialized but failed semantic validation.
    #[error("validation error: {message}")]
    #[diagnostic(code(plugrack::config::validation))]
    Validation { message: String },

    /// Catch-all for other configuration errors.
    #[error("configuration error: {0}")]
    #[diagnostic(code(plugrack::config::other))]
    Other(String),
}

fn unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? Valid keys: {valid_keys}"),
        None => format!("valid keys: {valid_keys}"),
    }
}

/// Convert a `figment::Error` (which may hold several errors) into diagnostics.
///
/// `toml_sources` holds `(path, content)` pairs used to locate unknown keys.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    use figment::error::Kind;

    err.into_iter()
        .map(|error| match &error.kind {
            Kind::UnknownField(field, expected) => {
                let valid_keys: Vec<&str> = expected.to_vec();
                let (span, src) = locate_key(&error, field, toml_sources);
                ConfigError::UnknownKey {
                    key: field.clone(),
                    suggestion: suggest_key(field, &valid_keys),
                    valid_keys: valid_keys.join(", "),
                    span,
                    src,
                }
            }
            Kind::MissingField(field) => ConfigError::MissingKey {
                key: field.to_string(),
            },
            Kind::InvalidType(actual, expected) => ConfigError::InvalidType {
                key: error.path.join("."),
                detail: format!("found {actual}, expected {expected}"),
                expected: expected.to_string(),
            },
            _ => ConfigError::Other(error.to_string()),
        })
        .collect()
}

/// Find the span of `field` in whichever source file the error came from.
fn locate_key(
    error: &figment::error::Error,
    field: &str,
    toml_sources: &[(String, String)],
) -> (Option<SourceSpan>, Option<NamedSource<String>>) {
    let origin = error
        .metadata
        .as_ref()
        .and_then(|m| m.source.as_ref())
        .map(|source| match source {
            figment::Source::File(path) => path.display().to_string(),
            _ => "<inline>".to_string(),
        });

    let Some((path, content)) = origin
        .as_deref()
        .and_then(|origin| {
            toml_sources
                .iter()
                .find(|(p, _)| p == origin || std::path::Path::new(origin).ends_with(p))
        })
    else {
        return (None, None);
    };

    // For unknown fields the error path already ends with the field itself.
    let section = match error.path.split_last() {
        Some((last, rest)) if last == field => rest,
        _ => &error.path[..],
    };

    match find_key_offset(content, section, field) {
        Some(offset) => (
            Some(SourceSpan::new(offset.into(), field.len())),
            Some(NamedSource::new(path, content.clone())),
        ),
        None => (None, None),
    }
}

/// Byte offset of `field` as a key in `content`, below the table header for
/// `path` (e.g. `[registry]`). Top-level keys and tables are searched from
/// the start.
pub fn find_key_offset(content: &str, path: &[String], field: &str) -> Option<usize> {
    // An unknown top-level table shows up as its header.
    if path.is_empty()
        && let Some(pos) = content.find(&format!("[{field}]"))
    {
        return Some(pos + 1);
    }

    let start = if path.is_empty() {
        0
    } else {
        let header = format!("[{}]", path.join("."));
        content.find(&header)? + header.len()
    };

    let mut offset = start;
    for line in content.get(start..)?.split_inclusive('\n') {
        let indent = line.len() - line.trim_start().len();
        if let Some(rest) = line.trim_start().strip_prefix(field)
            && rest.trim_start().starts_with('=')
        {
            return Some(offset + indent);
        }
        if line.trim_start().starts_with('[') && offset != start {
            // Next table: the key is not in this section.
            return None;
        }
        offset += line.len();
    }

    None
}

/// Best valid key by Jaro-Winkler similarity, if above the threshold.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    valid_keys
        .iter()
        .map(|key| (strsim::jaro_winkler(unknown, key), *key))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, key)| key.to_string())
}

/// Render diagnostics to stderr using miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    use miette::GraphicalReportHandler;

    let handler = GraphicalReportHandler::new();
    for error in errors {
        let mut buf = String::new();
        if handler.render_report(&mut buf, error as &dyn Diagnostic).is_ok() {
            eprint!("{buf}");
        } else {
            eprintln!("Error: {error}");
        }
    }
}
