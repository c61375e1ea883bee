// SPDX-FileCopyrightText: 2026 Plugrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Compiled-in type catalog.
//!
//! Maps the member names a module manifest refers to onto concrete types.
//! Plugin types carry a zero-argument constructor; opaque types are known to
//! exist but do not satisfy the plugin contract.

use std::any::TypeId;
use std::fmt;

use plugrack_core::{BasePlugin, Plugin};

use crate::builtin::{Double, Length, Reverse, Upper};

/// Minimum Jaro-Winkler similarity score to suggest a catalog name.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// Zero-argument constructor for one plugin type.
#[derive(Clone, Copy)]
pub struct PluginFactory {
    type_id: TypeId,
    type_name: &'static str,
    construct: fn() -> Box<dyn Plugin>,
}

impl PluginFactory {
    /// Factory for `T`, constructed through its `Default` impl.
    pub fn of<T: Plugin + Default>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            construct: construct::<T>,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Rust type name of the produced plugin.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// True if this factory produces the contract type itself.
    pub fn is_contract(&self) -> bool {
        self.type_id == TypeId::of::<BasePlugin>()
    }

    /// Creates a fresh instance.
    pub fn create(&self) -> Box<dyn Plugin> {
        (self.construct)()
    }
}

impl fmt::Debug for PluginFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginFactory")
            .field("type_name", &self.type_name)
            .finish()
    }
}

fn construct<T: Plugin + Default>() -> Box<dyn Plugin> {
    Box::new(T::default())
}

/// A single entry in the type catalog.
#[derive(Debug, Clone, Copy)]
pub enum CatalogEntry {
    /// A type satisfying the plugin contract.
    Plugin(PluginFactory),
    /// A type that exists in units but is not a plugin.
    Opaque,
}

/// Ordered registry of known member types, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    entries: Vec<(String, CatalogEntry)>,
}

impl TypeCatalog {
    /// Create a new empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register plugin type `T` under `name`, replacing any previous entry.
    pub fn register_plugin<T: Plugin + Default>(&mut self, name: &str) -> &mut Self {
        self.insert(name, CatalogEntry::Plugin(PluginFactory::of::<T>()))
    }

    /// Register a non-plugin type under `name`.
    pub fn register_type(&mut self, name: &str) -> &mut Self {
        self.insert(name, CatalogEntry::Opaque)
    }

    fn insert(&mut self, name: &str, entry: CatalogEntry) -> &mut Self {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = entry,
            None => self.entries.push((name.to_string(), entry)),
        }
        self
    }

    /// Get a catalog entry by name.
    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, e)| e)
    }

    /// Registered names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Closest registered name to `unknown`, if any is similar enough.
    pub fn suggest(&self, unknown: &str) -> Option<String> {
        let mut best_score = SUGGESTION_THRESHOLD;
        let mut best_match = None;

        for (name, _) in &self.entries {
            let score = strsim::jaro_winkler(unknown, name);
            if score > best_score {
                best_score = score;
                best_match = Some(name.clone());
            }
        }

        best_match
    }

    /// Returns the number of registered types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no types are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Returns a catalog with the contract type and all built-in plugins.
pub fn builtin_catalog() -> TypeCatalog {
    let mut catalog = TypeCatalog::new();
    catalog
        .register_plugin::<BasePlugin>("BasePlugin")
        .register_plugin::<Upper>("Upper")
        .register_plugin::<Double>("Double")
        .register_plugin::<Reverse>("Reverse")
        .register_plugin::<Length>("Length");
    catalog
}
