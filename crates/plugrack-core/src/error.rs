// SPDX-FileCopyrightText: 2026 Plugrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Plugrack plugin registry.

use strum::Display;
use thiserror::Error;

/// Coarse classification of a [`PlugrackError`].
///
/// Discovery failures abort a whole discovery run. Invocation failures are
/// isolated to the single plugin call that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ErrorKind {
    /// The contract's own operation was invoked instead of an override.
    ContractViolation,
    /// A namespace or unit could not be resolved or loaded.
    DiscoveryFailure,
    /// A concrete plugin's operation failed.
    InvocationFailure,
    /// Invalid configuration.
    Configuration,
    /// Internal or unexpected errors.
    Internal,
}

/// The primary error type used by the contract, discovery, and invocation.
#[derive(Debug, Error)]
pub enum PlugrackError {
    /// `perform_operation` was called on the contract type itself.
    #[error("contract violated: {type_name} must override perform_operation")]
    NotImplemented { type_name: &'static str },

    /// The enumerator has no record of the requested namespace.
    #[error("namespace not found: {namespace}")]
    NamespaceNotFound { namespace: String },

    /// A leaf unit could not be loaded.
    #[error("malformed unit {unit}: {reason}")]
    MalformedUnit { unit: String, reason: String },

    /// A unit exposes a member the type catalog does not know.
    #[error("unknown member `{member}` in unit {unit}{}", format_suggestion(.suggestion))]
    UnknownMember {
        unit: String,
        member: String,
        suggestion: Option<String>,
    },

    /// The module manifest is invalid or unreadable.
    #[error("manifest error: {0}")]
    Manifest(String),

    /// A plugin rejected the argument it was given.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A plugin's operation failed.
    #[error("plugin {plugin} failed: {message}")]
    Invocation {
        plugin: String,
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A plugin panicked while performing its operation.
    #[error("plugin {plugin} panicked: {message}")]
    PluginPanicked { plugin: String, message: String },

    /// Configuration that cannot be loaded at all, such as a missing explicit file.
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PlugrackError {
    /// Classifies this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PlugrackError::NotImplemented { .. } => ErrorKind::ContractViolation,
            PlugrackError::NamespaceNotFound { .. }
            | PlugrackError::MalformedUnit { .. }
            | PlugrackError::UnknownMember { .. }
            | PlugrackError::Manifest(_) => ErrorKind::DiscoveryFailure,
            PlugrackError::InvalidArgument(_)
            | PlugrackError::Invocation { .. }
            | PlugrackError::PluginPanicked { .. } => ErrorKind::InvocationFailure,
            PlugrackError::Config(_) => ErrorKind::Configuration,
            PlugrackError::Internal(_) => ErrorKind::Internal,
        }
    }
}

fn format_suggestion(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!(" (did you mean `{s}`?)"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_member_message_includes_suggestion() {
        let err = PlugrackError::UnknownMember {
            unit: "plugins.case".into(),
            member: "Uper".into(),
            suggestion: Some("Upper".into()),
        };
        assert_eq!(
            err.to_string(),
            "unknown member `Uper` in unit plugins.case (did you mean `Upper`?)"
        );
    }

    #[test]
    fn unknown_member_message_without_suggestion() {
        let err = PlugrackError::UnknownMember {
            unit: "plugins.case".into(),
            member: "Zzz".into(),
            suggestion: None,
        };
        assert_eq!(err.to_string(), "unknown member `Zzz` in unit plugins.case");
    }

    #[test]
    fn not_implemented_names_the_type() {
        let err = PlugrackError::NotImplemented {
            type_name: "BasePlugin",
        };
        assert!(err.to_string().contains("BasePlugin must override"));
    }
}
