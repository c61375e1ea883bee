// SPDX-FileCopyrightText: 2026 Plugrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin discovery, module manifest, type catalog, and broadcast invocation.
//!
//! A [`PluginRegistry`] is bound to a root namespace. On construction (and on
//! every [`PluginRegistry::reload_plugins`]) it walks the namespace tree
//! described by a [`NamespaceEnumerator`], asks a [`TypeInspector`] for the
//! members of each leaf unit, and instantiates every member that satisfies the
//! [`plugrack_core::Plugin`] contract. [`PluginRegistry::apply_all`] then
//! invokes every instance against one value and reports each outcome.
//!
//! The namespace tree is an explicit [`ModuleManifest`] rather than a
//! directory scan, and member names resolve through a compiled-in
//! [`TypeCatalog`].

pub mod builtin;
pub mod catalog;
pub mod discovery;
pub mod manifest;
pub mod namespace;
pub mod outcome;
pub mod registry;
pub mod report;

pub use catalog::{builtin_catalog, CatalogEntry, PluginFactory, TypeCatalog};
pub use discovery::{discover, Discovery, DiscoveryOptions, PluginInstance};
pub use manifest::{builtin_manifest, parse_module_manifest, ManifestInspector, ModuleManifest};
pub use namespace::{NamespaceEnumerator, TypeInspector, TypeMember, UnitEntry, UnitKind};
pub use outcome::{BroadcastReport, InvocationOutcome};
pub use registry::{PluginRegistry, PluginRegistryBuilder};
pub use report::{CollectingSink, ReportEvent, ReportSink, TracingSink};
