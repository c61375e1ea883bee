// SPDX-FileCopyrightText: 2026 Plugrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Recursive namespace walk that finds and instantiates plugins.
//!
//! The walk visits a namespace's leaf units before recursing into its
//! subdirectories (pre-order), follows enumerator and member order without
//! re-sorting, and walks each physical location at most once.

use std::any::TypeId;
use std::collections::HashSet;
use std::fmt;

use plugrack_core::{Location, NamespacePath, Plugin, PlugrackError};
use tracing::{debug, trace};

use crate::catalog::PluginFactory;
use crate::namespace::{NamespaceEnumerator, TypeInspector, UnitEntry, UnitKind};
use crate::report::ReportSink;

/// Knobs for a discovery run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryOptions {
    /// Instantiate a type only at its first position when several units at
    /// different locations expose it.
    pub deduplicate_types: bool,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            deduplicate_types: true,
        }
    }
}

/// One instantiated plugin, owned by the registry that discovered it.
pub struct PluginInstance {
    qualified_name: String,
    type_id: TypeId,
    plugin: Box<dyn Plugin>,
}

impl PluginInstance {
    pub(crate) fn create(qualified_name: String, factory: &PluginFactory) -> Self {
        Self {
            qualified_name,
            type_id: factory.type_id(),
            plugin: factory.create(),
        }
    }

    /// `<namespace>.<unit>.<type>`.
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    pub fn description(&self) -> &str {
        self.plugin.description()
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn plugin(&self) -> &dyn Plugin {
        self.plugin.as_ref()
    }
}

impl fmt::Debug for PluginInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginInstance")
            .field("qualified_name", &self.qualified_name)
            .field("description", &self.description())
            .finish()
    }
}

/// Result of a complete discovery run.
#[derive(Debug, Default)]
pub struct Discovery {
    /// Instances in discovery order.
    pub plugins: Vec<PluginInstance>,
    /// Physical locations walked, in visit order, without duplicates.
    pub visited_locations: Vec<Location>,
}

/// Walk the tree rooted at `root` and return every discovered plugin.
///
/// Unlike [`crate::PluginRegistry::reload_plugins`], a failure here discards
/// whatever was collected before it.
pub fn discover(
    root: &NamespacePath,
    enumerator: &dyn NamespaceEnumerator,
    inspector: &dyn TypeInspector,
    options: &DiscoveryOptions,
    sink: &dyn ReportSink,
) -> Result<Discovery, PlugrackError> {
    let mut discovery = Discovery::default();
    Walk::new(
        enumerator,
        inspector,
        options,
        sink,
        &mut discovery.plugins,
        &mut discovery.visited_locations,
    )
    .run(root)?;
    Ok(discovery)
}

/// In-progress walk writing into caller-owned state.
///
/// The registry hands in its own `plugins` and `visited_locations`, so an
/// aborted walk leaves them holding everything found up to the failure.
pub(crate) struct Walk<'a> {
    enumerator: &'a dyn NamespaceEnumerator,
    inspector: &'a dyn TypeInspector,
    options: &'a DiscoveryOptions,
    sink: &'a dyn ReportSink,
    plugins: &'a mut Vec<PluginInstance>,
    visited: &'a mut Vec<Location>,
    seen_types: HashSet<TypeId>,
}

impl<'a> Walk<'a> {
    pub(crate) fn new(
        enumerator: &'a dyn NamespaceEnumerator,
        inspector: &'a dyn TypeInspector,
        options: &'a DiscoveryOptions,
        sink: &'a dyn ReportSink,
        plugins: &'a mut Vec<PluginInstance>,
        visited: &'a mut Vec<Location>,
    ) -> Self {
        Self {
            enumerator,
            inspector,
            options,
            sink,
            plugins,
            visited,
            seen_types: HashSet::new(),
        }
    }

    pub(crate) fn run(mut self, root: &NamespacePath) -> Result<(), PlugrackError> {
        self.plugins.clear();
        self.visited.clear();
        self.sink.discovery_started(root);
        self.walk_namespace(root)?;
        self.sink.discovery_finished(self.plugins.len());
        Ok(())
    }

    fn walk_namespace(&mut self, namespace: &NamespacePath) -> Result<(), PlugrackError> {
        debug!(namespace = %namespace, "walking namespace");

        let units = self.enumerator.units(namespace)?;
        for unit in units.iter().filter(|u| u.kind == UnitKind::Leaf) {
            if self.visited.contains(&unit.location) {
                trace!(unit = %unit.qualified_name, location = %unit.location, "location already walked, skipping unit");
                continue;
            }
            self.load_unit(unit)?;
        }

        for location in self.enumerator.locations(namespace)? {
            if self.visited.contains(&location) {
                trace!(namespace = %namespace, location = %location, "location already walked");
                continue;
            }
            self.visited.push(location.clone());

            for child in self.enumerator.subdirectories(&location)? {
                let child_namespace = namespace.child(&child)?;
                self.walk_namespace(&child_namespace)?;
            }
        }

        Ok(())
    }

    fn load_unit(&mut self, unit: &UnitEntry) -> Result<(), PlugrackError> {
        debug!(unit = %unit.qualified_name, "loading unit");

        for member in self.inspector.members(unit)? {
            let Some(factory) = member.factory.as_ref().filter(|_| member.is_discoverable()) else {
                trace!(member = %member.qualified_name, "not a plugin");
                continue;
            };
            if self.options.deduplicate_types && !self.seen_types.insert(factory.type_id()) {
                debug!(plugin = %member.qualified_name, "type already instantiated, skipping");
                self.sink.duplicate_skipped(&member.qualified_name);
                continue;
            }

            let instance = PluginInstance::create(member.qualified_name.clone(), factory);
            self.sink.plugin_discovered(&instance);
            self.plugins.push(instance);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::catalog::builtin_catalog;
    use crate::manifest::{builtin_manifest, ManifestInspector, ModuleManifest};
    use crate::report::TracingSink;

    fn run(manifest: ModuleManifest, root: &str, options: &DiscoveryOptions) -> Result<Discovery, PlugrackError> {
        let manifest = Arc::new(manifest);
        let inspector = ManifestInspector::new(manifest.clone(), Arc::new(builtin_catalog()));
        discover(
            &NamespacePath::parse(root).unwrap(),
            &*manifest,
            &inspector,
            options,
            &TracingSink,
        )
    }

    fn names(discovery: &Discovery) -> Vec<&str> {
        discovery.plugins.iter().map(|p| p.qualified_name()).collect()
    }

    #[test]
    fn builtin_tree_is_walked_pre_order() {
        let discovery = run(builtin_manifest().unwrap(), "plugins", &DiscoveryOptions::default()).unwrap();
        assert_eq!(
            names(&discovery),
            vec![
                "plugins.case.Upper",
                "plugins.repeat.Double",
                "plugins.text.shape.Reverse",
                "plugins.text.shape.Length",
            ]
        );
        assert_eq!(
            discovery.visited_locations,
            vec![Location::new("plugins"), Location::new("plugins/text")]
        );
    }

    #[test]
    fn sub_namespace_can_be_used_as_root() {
        let discovery = run(builtin_manifest().unwrap(), "plugins.text", &DiscoveryOptions::default()).unwrap();
        assert_eq!(
            names(&discovery),
            vec!["plugins.text.shape.Reverse", "plugins.text.shape.Length"]
        );
    }

    #[test]
    fn missing_root_fails() {
        let err = run(builtin_manifest().unwrap(), "absent", &DiscoveryOptions::default()).unwrap_err();
        assert!(matches!(err, PlugrackError::NamespaceNotFound { .. }));
    }

    #[test]
    fn reexported_type_is_instantiated_once_by_default() {
        let mut manifest = ModuleManifest::new();
        manifest
            .add_namespace("root", &["lib"])
            .unwrap()
            .add_namespace("root.more", &["lib/more"])
            .unwrap()
            .add_unit("a", "lib", &["Upper"])
            .unwrap()
            .add_unit("b", "lib/more", &["Upper", "Double"])
            .unwrap();

        let deduped = run(manifest.clone(), "root", &DiscoveryOptions::default()).unwrap();
        assert_eq!(names(&deduped), vec!["root.a.Upper", "root.more.b.Double"]);

        let all = run(
            manifest,
            "root",
            &DiscoveryOptions {
                deduplicate_types: false,
            },
        )
        .unwrap();
        assert_eq!(
            names(&all),
            vec!["root.a.Upper", "root.more.b.Upper", "root.more.b.Double"]
        );
    }

    #[test]
    fn namespace_with_several_locations_walks_each() {
        let mut manifest = ModuleManifest::new();
        manifest
            .add_namespace("root", &["lib", "vendor"])
            .unwrap()
            .add_namespace("root.extra", &["vendor/extra"])
            .unwrap()
            .add_unit("a", "lib", &["Upper"])
            .unwrap()
            .add_unit("b", "vendor", &["Reverse"])
            .unwrap()
            .add_unit("c", "vendor/extra", &["Length"])
            .unwrap();

        let discovery = run(manifest, "root", &DiscoveryOptions::default()).unwrap();
        assert_eq!(
            names(&discovery),
            vec!["root.a.Upper", "root.b.Reverse", "root.extra.c.Length"]
        );
        assert_eq!(
            discovery.visited_locations,
            vec![
                Location::new("lib"),
                Location::new("vendor"),
                Location::new("vendor/extra"),
            ]
        );
    }
}
