// SPDX-FileCopyrightText: 2026 Plugrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin registry bound to one root namespace.
//!
//! The `PluginRegistry` owns the plugins it discovered and the set of
//! physical locations it walked. Both are discarded and rebuilt on every
//! [`PluginRegistry::reload_plugins`]. Broadcast invocation reads the plugins
//! in discovery order and never mutates them.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use plugrack_core::{Location, NamespacePath, PlugrackError};
use serde_json::Value;
use tracing::debug;

use crate::catalog::TypeCatalog;
use crate::discovery::{DiscoveryOptions, PluginInstance, Walk};
use crate::manifest::{ManifestInspector, ModuleManifest};
use crate::namespace::{NamespaceEnumerator, TypeInspector};
use crate::outcome::{BroadcastReport, InvocationOutcome};
use crate::report::{ReportSink, TracingSink};

/// Registry of discovered plugins.
pub struct PluginRegistry {
    root_namespace: NamespacePath,
    enumerator: Arc<dyn NamespaceEnumerator>,
    inspector: Arc<dyn TypeInspector>,
    options: DiscoveryOptions,
    sink: Arc<dyn ReportSink>,
    plugins: Vec<PluginInstance>,
    visited_locations: Vec<Location>,
}

impl PluginRegistry {
    /// Create a registry and run discovery from `root_namespace`.
    pub fn new(
        root_namespace: NamespacePath,
        enumerator: Arc<dyn NamespaceEnumerator>,
        inspector: Arc<dyn TypeInspector>,
    ) -> Result<Self, PlugrackError> {
        Self::builder(root_namespace)
            .enumerator(enumerator)
            .inspector(inspector)
            .build()
    }

    /// Start building a registry bound to `root_namespace`.
    pub fn builder(root_namespace: NamespacePath) -> PluginRegistryBuilder {
        PluginRegistryBuilder::new(root_namespace)
    }

    /// Discard all plugins and walk the tree again from the same root.
    ///
    /// On error the registry keeps whatever the aborted walk had collected:
    /// `plugins()` may hold a prefix of the full result.
    pub fn reload_plugins(&mut self) -> Result<(), PlugrackError> {
        debug!(namespace = %self.root_namespace, "reloading plugins");
        Walk::new(
            self.enumerator.as_ref(),
            self.inspector.as_ref(),
            &self.options,
            self.sink.as_ref(),
            &mut self.plugins,
            &mut self.visited_locations,
        )
        .run(&self.root_namespace)
    }

    /// Invoke every plugin with `argument` and collect one outcome each.
    ///
    /// A plugin that returns an error or panics produces a failed outcome;
    /// the remaining plugins are still invoked.
    pub fn apply_all(&self, argument: &Value) -> BroadcastReport {
        self.sink.broadcast_started(argument, self.plugins.len());

        let outcomes = self
            .plugins
            .iter()
            .map(|instance| {
                let outcome = InvocationOutcome {
                    plugin: instance.qualified_name().to_string(),
                    description: instance.description().to_string(),
                    argument: argument.clone(),
                    result: invoke_isolated(instance, argument),
                };
                self.sink.invocation_completed(&outcome);
                outcome
            })
            .collect();

        BroadcastReport::new(argument.clone(), outcomes)
    }

    pub fn root_namespace(&self) -> &NamespacePath {
        &self.root_namespace
    }

    /// Discovered plugins in discovery order.
    pub fn plugins(&self) -> &[PluginInstance] {
        &self.plugins
    }

    /// Physical locations walked by the last discovery run.
    pub fn visited_locations(&self) -> &[Location] {
        &self.visited_locations
    }

    pub fn options(&self) -> &DiscoveryOptions {
        &self.options
    }

    /// Returns the number of discovered plugins.
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Returns true if no plugins were discovered.
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

impl fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("root_namespace", &self.root_namespace)
            .field("plugins", &self.plugins)
            .field("visited_locations", &self.visited_locations)
            .finish()
    }
}

fn invoke_isolated(instance: &PluginInstance, argument: &Value) -> Result<Value, PlugrackError> {
    panic::catch_unwind(AssertUnwindSafe(|| {
        instance.plugin().perform_operation(argument)
    }))
    .unwrap_or_else(|payload| {
        Err(PlugrackError::PluginPanicked {
            plugin: instance.qualified_name().to_string(),
            message: panic_message(payload.as_ref()),
        })
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Builder for [`PluginRegistry`].
pub struct PluginRegistryBuilder {
    root_namespace: NamespacePath,
    enumerator: Option<Arc<dyn NamespaceEnumerator>>,
    inspector: Option<Arc<dyn TypeInspector>>,
    options: DiscoveryOptions,
    sink: Arc<dyn ReportSink>,
}

impl PluginRegistryBuilder {
    fn new(root_namespace: NamespacePath) -> Self {
        Self {
            root_namespace,
            enumerator: None,
            inspector: None,
            options: DiscoveryOptions::default(),
            sink: Arc::new(TracingSink),
        }
    }

    pub fn enumerator(mut self, enumerator: Arc<dyn NamespaceEnumerator>) -> Self {
        self.enumerator = Some(enumerator);
        self
    }

    pub fn inspector(mut self, inspector: Arc<dyn TypeInspector>) -> Self {
        self.inspector = Some(inspector);
        self
    }

    /// Use `manifest` as the enumerator, resolving members through `catalog`.
    pub fn manifest(self, manifest: ModuleManifest, catalog: TypeCatalog) -> Self {
        let manifest = Arc::new(manifest);
        let inspector = ManifestInspector::new(manifest.clone(), Arc::new(catalog));
        self.enumerator(manifest).inspector(Arc::new(inspector))
    }

    pub fn options(mut self, options: DiscoveryOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the default [`TracingSink`].
    pub fn sink(mut self, sink: Arc<dyn ReportSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Build the registry and run the first discovery.
    pub fn build(self) -> Result<PluginRegistry, PlugrackError> {
        let enumerator = self.enumerator.ok_or_else(|| {
            PlugrackError::Internal("plugin registry needs a namespace enumerator".to_string())
        })?;
        let inspector = self.inspector.ok_or_else(|| {
            PlugrackError::Internal("plugin registry needs a type inspector".to_string())
        })?;

        let mut registry = PluginRegistry {
            root_namespace: self.root_namespace,
            enumerator,
            inspector,
            options: self.options,
            sink: self.sink,
            plugins: Vec::new(),
            visited_locations: Vec::new(),
        };
        registry.reload_plugins()?;
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin_catalog;
    use crate::manifest::builtin_manifest;
    use crate::report::{CollectingSink, ReportEvent};
    use plugrack_core::{ErrorKind, Plugin};
    use serde_json::json;
    use tracing_test::traced_test;

    fn builtin_registry() -> PluginRegistry {
        PluginRegistry::builder(NamespacePath::parse("plugins").unwrap())
            .manifest(builtin_manifest().unwrap(), builtin_catalog())
            .build()
            .unwrap()
    }

    #[derive(Default)]
    struct Explodes;

    impl Plugin for Explodes {
        fn description(&self) -> &str {
            "explodes"
        }

        fn perform_operation(&self, _argument: &Value) -> Result<Value, PlugrackError> {
            panic!("kaboom");
        }
    }

    #[test]
    fn new_runs_discovery() {
        let registry = builtin_registry();
        assert_eq!(registry.len(), 4);
        assert_eq!(registry.root_namespace().as_str(), "plugins");
        let descriptions: Vec<&str> = registry.plugins().iter().map(|p| p.description()).collect();
        assert_eq!(
            descriptions,
            vec!["uppercases", "doubles", "reverses", "measures length"]
        );
    }

    #[test]
    fn builder_requires_enumerator_and_inspector() {
        let err = PluginRegistry::builder(NamespacePath::parse("plugins").unwrap())
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("namespace enumerator"));
    }

    #[test]
    fn apply_all_reports_every_plugin() {
        let registry = builtin_registry();
        let report = registry.apply_all(&json!("hi"));
        let results: Vec<(&str, Value)> = report
            .outcomes()
            .iter()
            .map(|o| (o.description.as_str(), o.result.as_ref().unwrap().clone()))
            .collect();
        assert_eq!(
            results,
            vec![
                ("uppercases", json!("HI")),
                ("doubles", json!("hihi")),
                ("reverses", json!("ih")),
                ("measures length", json!(2)),
            ]
        );
        assert!(report.all_succeeded());
    }

    #[test]
    fn apply_all_isolates_argument_errors() {
        let registry = builtin_registry();
        let report = registry.apply_all(&json!(4));
        assert_eq!(report.len(), 4);
        let ok: Vec<&str> = report.successes().map(|o| o.description.as_str()).collect();
        assert_eq!(ok, vec!["doubles"]);
        for failure in report.failures() {
            assert_eq!(
                failure.result.as_ref().unwrap_err().kind(),
                ErrorKind::InvocationFailure
            );
        }
    }

    #[test]
    fn panicking_plugin_is_isolated() {
        let mut catalog = builtin_catalog();
        catalog.register_plugin::<Explodes>("Explodes");
        let mut manifest = ModuleManifest::new();
        manifest
            .add_namespace("root", &["lib"])
            .unwrap()
            .add_unit("a", "lib", &["Upper", "Explodes", "Double"])
            .unwrap();
        let registry = PluginRegistry::builder(NamespacePath::parse("root").unwrap())
            .manifest(manifest, catalog)
            .build()
            .unwrap();

        let report = registry.apply_all(&json!("ok"));
        assert_eq!(report.len(), 3);
        let failed: Vec<&InvocationOutcome> = report.failures().collect();
        assert_eq!(failed.len(), 1);
        match failed[0].result.as_ref().unwrap_err() {
            PlugrackError::PluginPanicked { plugin, message } => {
                assert_eq!(plugin, "root.a.Explodes");
                assert_eq!(message, "kaboom");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(report.outcomes()[2].result.as_ref().unwrap(), &json!("okok"));
    }

    #[test]
    fn reload_rebuilds_instead_of_appending() {
        let mut registry = builtin_registry();
        let before: Vec<String> = registry
            .plugins()
            .iter()
            .map(|p| p.qualified_name().to_string())
            .collect();
        registry.reload_plugins().unwrap();
        registry.reload_plugins().unwrap();
        let after: Vec<String> = registry
            .plugins()
            .iter()
            .map(|p| p.qualified_name().to_string())
            .collect();
        assert_eq!(before, after);
        assert_eq!(registry.visited_locations().len(), 2);
    }

    #[test]
    fn sink_receives_discovery_and_invocation_events() {
        let sink = Arc::new(CollectingSink::new());
        let mut manifest = ModuleManifest::new();
        manifest
            .add_namespace("root", &["lib"])
            .unwrap()
            .add_unit("a", "lib", &["BasePlugin", "Upper"])
            .unwrap();
        let registry = PluginRegistry::builder(NamespacePath::parse("root").unwrap())
            .manifest(manifest, builtin_catalog())
            .sink(sink.clone())
            .build()
            .unwrap();
        registry.apply_all(&json!("x"));

        assert_eq!(
            sink.events(),
            vec![
                ReportEvent::DiscoveryStarted {
                    root: "root".into()
                },
                ReportEvent::PluginDiscovered {
                    plugin: "root.a.Upper".into(),
                    description: "uppercases".into(),
                },
                ReportEvent::DiscoveryFinished { count: 1 },
                ReportEvent::BroadcastStarted {
                    argument: json!("x"),
                    count: 1,
                },
                ReportEvent::InvocationCompleted {
                    plugin: "root.a.Upper".into(),
                    description: "uppercases".into(),
                    argument: json!("x"),
                    result: Ok(json!("X")),
                },
            ]
        );
    }

    #[test]
    #[traced_test]
    fn tracing_sink_logs_discovered_plugins() {
        let _registry = builtin_registry();
        assert!(logs_contain("found plugin"));
        assert!(logs_contain("plugins.case.Upper"));
        assert!(logs_contain("plugin discovery complete"));
    }

    #[test]
    #[traced_test]
    fn tracing_sink_logs_failures() {
        let registry = builtin_registry();
        registry.apply_all(&json!(null));
        assert!(logs_contain("plugin failed"));
    }
}
