// SPDX-FileCopyrightText: 2026 Plugrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Plugrack integration tests.
//!
//! Provides fixture plugins and manifest-building helpers for fast,
//! deterministic tests of discovery and broadcast invocation.
//!
//! # Components
//!
//! - [`fixtures`] - plugins that echo, fail, panic, or keep the default description
//! - [`harness`] - manifest builder, fixture catalog, and a failure-injecting enumerator

pub mod fixtures;
pub mod harness;

pub use fixtures::{Echo, Failing, Panicking, Undescribed};
pub use harness::{fixture_catalog, scenario_manifest, FailingEnumerator, ManifestBuilder};
