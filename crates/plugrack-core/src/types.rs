// SPDX-FileCopyrightText: 2026 Plugrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across discovery and invocation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlugrackError;

/// A dotted namespace path such as `plugins.text`.
///
/// Every segment is a non-empty identifier made of ASCII alphanumerics,
/// `_`, or `-`, and does not start with a digit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NamespacePath(String);

impl NamespacePath {
    /// Parses and validates a dotted namespace path.
    pub fn parse(path: &str) -> Result<Self, PlugrackError> {
        if path.is_empty() {
            return Err(PlugrackError::Manifest(
                "namespace path must not be empty".to_string(),
            ));
        }
        for segment in path.split('.') {
            if !is_identifier(segment) {
                return Err(PlugrackError::Manifest(format!(
                    "invalid segment `{segment}` in namespace path `{path}`"
                )));
            }
        }
        Ok(Self(path.to_string()))
    }

    /// Returns `self.<segment>`.
    pub fn child(&self, segment: &str) -> Result<Self, PlugrackError> {
        if !is_identifier(segment) {
            return Err(PlugrackError::MalformedUnit {
                unit: format!("{}.{segment}", self.0),
                reason: format!("`{segment}` is not a valid identifier"),
            });
        }
        Ok(Self(format!("{}.{segment}", self.0)))
    }

    /// Returns the enclosing namespace, or `None` for a top-level namespace.
    pub fn parent(&self) -> Option<Self> {
        self.0
            .rsplit_once('.')
            .map(|(parent, _)| Self(parent.to_string()))
    }

    /// Returns the final segment.
    pub fn last_segment(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }

    /// Returns true if `self` sits exactly one level below `other`.
    pub fn is_direct_child_of(&self, other: &NamespacePath) -> bool {
        self.parent().as_ref() == Some(other)
    }

    /// Number of segments in the path.
    pub fn depth(&self) -> usize {
        self.0.split('.').count()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NamespacePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for NamespacePath {
    type Err = PlugrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for NamespacePath {
    type Error = PlugrackError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<NamespacePath> for String {
    fn from(value: NamespacePath) -> Self {
        value.0
    }
}

/// A physical location (directory path) backing a namespace.
///
/// Locations are compared by their normalized `/`-separated form, so
/// `plugins/text/` and `plugins//text` name the same location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Location(String);

impl Location {
    pub fn new(path: &str) -> Self {
        let normalized: Vec<&str> = path
            .split(['/', '\\'])
            .filter(|s| !s.is_empty() && *s != ".")
            .collect();
        let joined = normalized.join("/");
        if path.starts_with('/') {
            Self(format!("/{joined}"))
        } else {
            Self(joined)
        }
    }

    /// Returns the directory containing this location, if any.
    pub fn parent(&self) -> Option<Self> {
        self.0
            .rsplit_once('/')
            .filter(|(parent, _)| !parent.is_empty())
            .map(|(parent, _)| Self(parent.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Location {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl From<&str> for Location {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<Location> for String {
    fn from(value: Location) -> Self {
        value.0
    }
}

/// Returns true if `segment` is usable as one namespace or unit name segment.
pub fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn namespace_path_parses_dotted_names() {
        let ns = NamespacePath::parse("plugins.text.case").unwrap();
        assert_eq!(ns.depth(), 3);
        assert_eq!(ns.last_segment(), "case");
        assert_eq!(ns.parent().unwrap().as_str(), "plugins.text");
    }

    #[test]
    fn namespace_path_rejects_bad_segments() {
        assert!(NamespacePath::parse("").is_err());
        assert!(NamespacePath::parse("plugins..text").is_err());
        assert!(NamespacePath::parse("plugins.1text").is_err());
        assert!(NamespacePath::parse("plugins.te xt").is_err());
    }

    #[test]
    fn top_level_namespace_has_no_parent() {
        let ns = NamespacePath::parse("plugins").unwrap();
        assert!(ns.parent().is_none());
        assert_eq!(ns.last_segment(), "plugins");
    }

    #[test]
    fn child_and_direct_child_agree() {
        let root = NamespacePath::parse("plugins").unwrap();
        let child = root.child("text").unwrap();
        assert!(child.is_direct_child_of(&root));
        let grandchild = child.child("case").unwrap();
        assert!(!grandchild.is_direct_child_of(&root));
        assert!(root.child("bad name").is_err());
    }

    #[test]
    fn namespace_path_deserializes_with_validation() {
        let ok: NamespacePath = serde_json::from_str("\"plugins.text\"").unwrap();
        assert_eq!(ok.as_str(), "plugins.text");
        assert!(serde_json::from_str::<NamespacePath>("\"plugins.\"").is_err());
    }

    #[test]
    fn location_normalizes_separators() {
        assert_eq!(Location::new("plugins/text/"), Location::new("plugins//text"));
        assert_eq!(Location::new("./plugins\\text").as_str(), "plugins/text");
        assert_eq!(Location::new("/opt/plugins/").as_str(), "/opt/plugins");
    }

    #[test]
    fn location_parent() {
        assert_eq!(
            Location::new("plugins/text").parent(),
            Some(Location::new("plugins"))
        );
        assert_eq!(Location::new("plugins").parent(), None);
        assert_eq!(Location::new("/plugins").parent(), None);
    }

    proptest! {
        #[test]
        fn parsed_paths_round_trip_through_display(
            segments in proptest::collection::vec("[a-z_][a-z0-9_]{0,6}", 1..5)
        ) {
            let raw = segments.join(".");
            let ns = NamespacePath::parse(&raw).unwrap();
            prop_assert_eq!(ns.to_string(), raw);
            prop_assert_eq!(ns.depth(), segments.len());
        }
    }
}
