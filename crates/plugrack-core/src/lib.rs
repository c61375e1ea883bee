// SPDX-FileCopyrightText: 2026 Plugrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Plugrack plugin registry.
//!
//! This crate provides the capability contract every plugin implements, the
//! error type shared by discovery and invocation, and the small value types
//! (namespace paths, physical locations) that the registry passes around.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::{ErrorKind, PlugrackError};
pub use traits::{BasePlugin, Plugin, UNKNOWN_DESCRIPTION};
pub use types::{Location, NamespacePath};
