// SPDX-FileCopyrightText: 2026 Plugrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query interfaces the discovery walk consumes.
//!
//! The walk performs no filesystem or module-loading work itself. It asks a
//! [`NamespaceEnumerator`] what a namespace contains and where it lives, and a
//! [`TypeInspector`] what a leaf unit exposes.

use plugrack_core::{Location, NamespacePath, PlugrackError};

use crate::catalog::PluginFactory;

/// Whether a unit is a nested namespace or a loadable leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    /// A sub-namespace; discovery reaches it through location recursion.
    Namespace,
    /// A leaf unit whose members are inspected for plugins.
    Leaf,
}

/// One directly loadable unit of a namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitEntry {
    /// Unqualified unit name, e.g. `case`.
    pub name: String,
    /// Fully qualified name, e.g. `plugins.case`.
    pub qualified_name: NamespacePath,
    pub kind: UnitKind,
    /// Physical location the unit lives in.
    pub location: Location,
}

/// One type exposed by a leaf unit.
#[derive(Debug, Clone)]
pub struct TypeMember {
    /// Name the unit exposes the type under.
    pub name: String,
    /// `<unit>.<name>`.
    pub qualified_name: String,
    /// Present when the type satisfies the plugin contract.
    pub factory: Option<PluginFactory>,
}

impl TypeMember {
    /// True for members discovery should instantiate: conforming types other
    /// than the contract type itself.
    pub fn is_discoverable(&self) -> bool {
        self.factory.as_ref().is_some_and(|f| !f.is_contract())
    }
}

/// Lists namespace contents and physical backing locations.
pub trait NamespaceEnumerator: Send + Sync {
    /// Units directly inside `namespace`, leaf units and sub-namespaces alike,
    /// in enumeration order.
    ///
    /// The discovery walk only loads [`UnitKind::Leaf`] entries; it reaches
    /// sub-namespaces through [`subdirectories`](Self::subdirectories) so
    /// that each physical location is walked once.
    fn units(&self, namespace: &NamespacePath) -> Result<Vec<UnitEntry>, PlugrackError>;

    /// Physical locations backing `namespace`.
    fn locations(&self, namespace: &NamespacePath) -> Result<Vec<Location>, PlugrackError>;

    /// Names of the immediate subdirectories of `location`.
    fn subdirectories(&self, location: &Location) -> Result<Vec<String>, PlugrackError>;
}

/// Lists the types a loaded leaf unit exposes.
pub trait TypeInspector: Send + Sync {
    /// Members of `unit` in declaration order.
    fn members(&self, unit: &UnitEntry) -> Result<Vec<TypeMember>, PlugrackError>;
}
