// SPDX-FileCopyrightText: 2026 Plugrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions for the Plugrack capability contract.

pub mod plugin;

pub use plugin::{BasePlugin, Plugin, UNKNOWN_DESCRIPTION};
