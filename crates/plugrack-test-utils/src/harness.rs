// SPDX-FileCopyrightText: 2026 Plugrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Manifest builders and enumerator wrappers for tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use plugrack_core::{Location, NamespacePath, PlugrackError};
use plugrack_plugin::{builtin_catalog, ModuleManifest, NamespaceEnumerator, TypeCatalog, UnitEntry};

use crate::fixtures::{Echo, Failing, Panicking, Undescribed};

/// Built-in catalog plus the fixture plugins and an opaque `Helper` type.
pub fn fixture_catalog() -> TypeCatalog {
    let mut catalog = builtin_catalog();
    catalog
        .register_plugin::<Echo>("Echo")
        .register_plugin::<Failing>("Failing")
        .register_plugin::<Panicking>("Panicking")
        .register_plugin::<Undescribed>("Undescribed")
        .register_type("Helper");
    catalog
}

/// Fluent manifest builder that keeps the first error until [`build`](Self::build).
#[derive(Debug, Default)]
pub struct ManifestBuilder {
    manifest: ModuleManifest,
    error: Option<PlugrackError>,
}

impl ManifestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn namespace(mut self, name: &str, locations: &[&str]) -> Self {
        if self.error.is_none()
            && let Err(e) = self.manifest.add_namespace(name, locations)
        {
            self.error = Some(e);
        }
        self
    }

    pub fn unit(mut self, name: &str, location: &str, members: &[&str]) -> Self {
        if self.error.is_none()
            && let Err(e) = self.manifest.add_unit(name, location, members)
        {
            self.error = Some(e);
        }
        self
    }

    pub fn build(self) -> Result<ModuleManifest, PlugrackError> {
        if let Some(e) = self.error {
            return Err(e);
        }
        self.manifest.validate()?;
        Ok(self.manifest)
    }
}

/// The two-level tree from the registry's reference scenario: `root` holds
/// unit `a` exposing `Upper`, and `root.sub` holds unit `b` exposing `Double`.
/// Both units also expose the contract type.
pub fn scenario_manifest() -> Result<ModuleManifest, PlugrackError> {
    ManifestBuilder::new()
        .namespace("root", &["root"])
        .namespace("root.sub", &["root/sub"])
        .unit("a", "root", &["BasePlugin", "Upper"])
        .unit("b", "root/sub", &["BasePlugin", "Double"])
        .build()
}

/// Delegates to an inner enumerator but, while armed, fails when asked for
/// the units of one namespace.
pub struct FailingEnumerator {
    inner: Arc<dyn NamespaceEnumerator>,
    broken: NamespacePath,
    armed: AtomicBool,
}

impl FailingEnumerator {
    /// An enumerator that fails immediately.
    pub fn new(inner: Arc<dyn NamespaceEnumerator>, broken: NamespacePath) -> Self {
        Self {
            inner,
            broken,
            armed: AtomicBool::new(true),
        }
    }

    /// An enumerator that behaves like `inner` until [`arm`](Self::arm) is called.
    pub fn disarmed(inner: Arc<dyn NamespaceEnumerator>, broken: NamespacePath) -> Self {
        Self {
            inner,
            broken,
            armed: AtomicBool::new(false),
        }
    }

    pub fn arm(&self) {
        self.armed.store(true, Ordering::SeqCst);
    }

    pub fn disarm(&self) {
        self.armed.store(false, Ordering::SeqCst);
    }
}

impl NamespaceEnumerator for FailingEnumerator {
    fn units(&self, namespace: &NamespacePath) -> Result<Vec<UnitEntry>, PlugrackError> {
        if self.armed.load(Ordering::SeqCst) && namespace == &self.broken {
            tracing::debug!(namespace = %namespace, "injecting unit listing failure");
            return Err(PlugrackError::MalformedUnit {
                unit: namespace.to_string(),
                reason: "injected failure".to_string(),
            });
        }
        self.inner.units(namespace)
    }

    fn locations(&self, namespace: &NamespacePath) -> Result<Vec<Location>, PlugrackError> {
        self.inner.locations(namespace)
    }

    fn subdirectories(&self, location: &Location) -> Result<Vec<String>, PlugrackError> {
        self.inner.subdirectories(location)
    }
}
