// SPDX-FileCopyrightText: 2026 Plugrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Module manifest parsing from TOML files.
//!
//! A module manifest is the static description of a namespace tree: which
//! namespaces exist, which physical locations back them, and which types each
//! leaf unit exposes. [`ModuleManifest`] answers the [`NamespaceEnumerator`]
//! queries from that description, and [`ManifestInspector`] resolves unit
//! members against a [`TypeCatalog`].

use std::path::Path;
use std::sync::Arc;

use plugrack_core::types::is_identifier;
use plugrack_core::{Location, NamespacePath, PlugrackError};
use serde::Deserialize;

use crate::catalog::{CatalogEntry, TypeCatalog};
use crate::namespace::{NamespaceEnumerator, TypeInspector, TypeMember, UnitEntry, UnitKind};

const BUILTIN_MANIFEST: &str = include_str!("builtin/plugins.toml");

/// A namespace and the locations backing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceDecl {
    pub name: NamespacePath,
    pub locations: Vec<Location>,
}

/// A leaf unit living in one location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitDecl {
    pub name: String,
    pub location: Location,
    /// Exposed type names, in declaration order.
    pub members: Vec<String>,
}

/// Parsed and validated module manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleManifest {
    namespaces: Vec<NamespaceDecl>,
    units: Vec<UnitDecl>,
}

/// Intermediate TOML deserialization struct for a manifest file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestFile {
    #[serde(default)]
    namespace: Vec<NamespaceSection>,
    #[serde(default)]
    unit: Vec<UnitSection>,
}

/// One `[[namespace]]` table.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NamespaceSection {
    name: String,
    locations: Vec<String>,
}

/// One `[[unit]]` table.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct UnitSection {
    name: String,
    location: String,
    #[serde(default)]
    members: Vec<String>,
}

/// Parse a module manifest from TOML content.
///
/// Namespace names must be dotted identifiers whose parent namespace is also
/// declared, every namespace needs at least one location, and every unit must
/// live in a location some namespace owns.
pub fn parse_module_manifest(toml_content: &str) -> Result<ModuleManifest, PlugrackError> {
    let file: ManifestFile = toml::from_str(toml_content)
        .map_err(|e| PlugrackError::Manifest(format!("invalid module manifest: {e}")))?;

    let mut manifest = ModuleManifest::new();
    for section in file.namespace {
        let locations: Vec<&str> = section.locations.iter().map(String::as_str).collect();
        manifest.add_namespace(&section.name, &locations)?;
    }
    for section in file.unit {
        let members: Vec<&str> = section.members.iter().map(String::as_str).collect();
        manifest.add_unit(&section.name, &section.location, &members)?;
    }
    manifest.validate()?;
    Ok(manifest)
}

/// Returns the embedded manifest exposing the built-in plugins under
/// `plugins` and `plugins.text`.
pub fn builtin_manifest() -> Result<ModuleManifest, PlugrackError> {
    parse_module_manifest(BUILTIN_MANIFEST)
}

impl ModuleManifest {
    /// Create an empty manifest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and parse a manifest file.
    pub fn load(path: &Path) -> Result<Self, PlugrackError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PlugrackError::Manifest(format!("cannot read {}: {e}", path.display()))
        })?;
        parse_module_manifest(&content)
    }

    /// Declare a namespace backed by `locations`.
    pub fn add_namespace(&mut self, name: &str, locations: &[&str]) -> Result<&mut Self, PlugrackError> {
        let name = NamespacePath::parse(name)?;
        if locations.is_empty() {
            return Err(PlugrackError::Manifest(format!(
                "namespace `{name}` must declare at least one location"
            )));
        }
        if self.namespace(&name).is_some() {
            return Err(PlugrackError::Manifest(format!(
                "namespace `{name}` is declared more than once"
            )));
        }
        let mut resolved: Vec<Location> = Vec::with_capacity(locations.len());
        for raw in locations {
            let location = Location::new(raw);
            if location.as_str().is_empty() {
                return Err(PlugrackError::Manifest(format!(
                    "namespace `{name}` has an empty location"
                )));
            }
            if !resolved.contains(&location) {
                resolved.push(location);
            }
        }
        self.namespaces.push(NamespaceDecl {
            name,
            locations: resolved,
        });
        Ok(self)
    }

    /// Declare a leaf unit named `name` in `location`.
    pub fn add_unit(
        &mut self,
        name: &str,
        location: &str,
        members: &[&str],
    ) -> Result<&mut Self, PlugrackError> {
        if !is_identifier(name) {
            return Err(PlugrackError::Manifest(format!(
                "unit name `{name}` is not a valid identifier"
            )));
        }
        let location = Location::new(location);
        if self.unit(&location, name).is_some() {
            return Err(PlugrackError::Manifest(format!(
                "unit `{name}` is declared more than once in {location}"
            )));
        }
        if let Some(blank) = members.iter().find(|m| m.trim().is_empty()) {
            return Err(PlugrackError::Manifest(format!(
                "unit `{name}` has a blank member name `{blank}`"
            )));
        }
        self.units.push(UnitDecl {
            name: name.to_string(),
            location,
            members: members.iter().map(|m| (*m).to_string()).collect(),
        });
        Ok(self)
    }

    /// Check cross-references between namespaces and units.
    pub fn validate(&self) -> Result<(), PlugrackError> {
        for decl in &self.namespaces {
            if let Some(parent) = decl.name.parent()
                && self.namespace(&parent).is_none()
            {
                return Err(PlugrackError::Manifest(format!(
                    "namespace `{}` has no declared parent `{parent}`",
                    decl.name
                )));
            }
        }
        for unit in &self.units {
            let owned = self
                .namespaces
                .iter()
                .any(|ns| ns.locations.contains(&unit.location));
            if !owned {
                return Err(PlugrackError::Manifest(format!(
                    "unit `{}` lives in {} which no namespace declares",
                    unit.name, unit.location
                )));
            }
        }
        Ok(())
    }

    pub fn namespaces(&self) -> &[NamespaceDecl] {
        &self.namespaces
    }

    pub fn units_in(&self, location: &Location) -> impl Iterator<Item = &UnitDecl> {
        self.units.iter().filter(move |u| &u.location == location)
    }

    /// Get a namespace declaration by name.
    pub fn namespace(&self, name: &NamespacePath) -> Option<&NamespaceDecl> {
        self.namespaces.iter().find(|ns| &ns.name == name)
    }

    /// Get a unit declaration by location and name.
    pub fn unit(&self, location: &Location, name: &str) -> Option<&UnitDecl> {
        self.units
            .iter()
            .find(|u| &u.location == location && u.name == name)
    }

    /// Declaration backing `name`.
    ///
    /// A name that is not declared itself but whose parent resolves is
    /// looked up physically: it is the child declared under one of the
    /// parent's locations with the same last segment. This is how a walk
    /// that entered a shared location through an alias reaches the
    /// namespaces below it.
    fn resolve(&self, name: &NamespacePath) -> Result<&NamespaceDecl, PlugrackError> {
        if let Some(decl) = self.namespace(name) {
            return Ok(decl);
        }

        let not_found = || PlugrackError::NamespaceNotFound {
            namespace: name.to_string(),
        };
        let parent_name = name.parent().ok_or_else(not_found)?;
        let parent = self.resolve(&parent_name).map_err(|_| not_found())?;
        let segment = name.last_segment();

        self.namespaces
            .iter()
            .filter(|owner| owner.locations.iter().any(|l| parent.locations.contains(l)))
            .flat_map(|owner| {
                self.children(&owner.name).filter(move |child| {
                    child.name.last_segment() == segment
                        && self
                            .owning_location(owner, child)
                            .is_some_and(|l| parent.locations.contains(l))
                })
            })
            .next()
            .ok_or_else(not_found)
    }

    /// Direct child namespaces of `name`, in declaration order.
    fn children<'a>(&'a self, name: &'a NamespacePath) -> impl Iterator<Item = &'a NamespaceDecl> {
        self.namespaces
            .iter()
            .filter(move |ns| ns.name.is_direct_child_of(name))
    }

    /// The parent location a child namespace appears under.
    ///
    /// That is the first parent location which physically contains one of
    /// the child's locations, falling back to the parent's first location.
    fn owning_location<'a>(&self, parent: &'a NamespaceDecl, child: &NamespaceDecl) -> Option<&'a Location> {
        parent
            .locations
            .iter()
            .find(|candidate| {
                child
                    .locations
                    .iter()
                    .any(|loc| loc.parent().as_ref() == Some(*candidate))
            })
            .or_else(|| parent.locations.first())
    }
}

impl NamespaceEnumerator for ModuleManifest {
    fn units(&self, namespace: &NamespacePath) -> Result<Vec<UnitEntry>, PlugrackError> {
        let decl = self.resolve(namespace)?;
        let mut entries = Vec::new();

        for location in &decl.locations {
            for unit in self.units_in(location) {
                entries.push(UnitEntry {
                    name: unit.name.clone(),
                    qualified_name: namespace.child(&unit.name)?,
                    kind: UnitKind::Leaf,
                    location: location.clone(),
                });
            }
        }

        // Listed for completeness; the walk reaches these through
        // `subdirectories` and never loads them.
        for child in self.children(&decl.name) {
            let Some(location) = child.locations.first() else {
                continue;
            };
            let segment = child.name.last_segment();
            entries.push(UnitEntry {
                name: segment.to_string(),
                qualified_name: namespace.child(segment)?,
                kind: UnitKind::Namespace,
                location: location.clone(),
            });
        }

        Ok(entries)
    }

    fn locations(&self, namespace: &NamespacePath) -> Result<Vec<Location>, PlugrackError> {
        Ok(self.resolve(namespace)?.locations.clone())
    }

    fn subdirectories(&self, location: &Location) -> Result<Vec<String>, PlugrackError> {
        let mut names: Vec<String> = Vec::new();
        for parent in self
            .namespaces
            .iter()
            .filter(|ns| ns.locations.contains(location))
        {
            for child in self.children(&parent.name) {
                let name = child.name.last_segment();
                if self.owning_location(parent, child) == Some(location)
                    && !names.iter().any(|n| n == name)
                {
                    names.push(name.to_string());
                }
            }
        }
        Ok(names)
    }
}

/// Resolves manifest unit members through a [`TypeCatalog`].
#[derive(Debug, Clone)]
pub struct ManifestInspector {
    manifest: Arc<ModuleManifest>,
    catalog: Arc<TypeCatalog>,
}

impl ManifestInspector {
    pub fn new(manifest: Arc<ModuleManifest>, catalog: Arc<TypeCatalog>) -> Self {
        Self { manifest, catalog }
    }
}

impl TypeInspector for ManifestInspector {
    fn members(&self, unit: &UnitEntry) -> Result<Vec<TypeMember>, PlugrackError> {
        if unit.kind != UnitKind::Leaf {
            return Err(PlugrackError::MalformedUnit {
                unit: unit.qualified_name.to_string(),
                reason: "namespaces have no type members".to_string(),
            });
        }
        let decl = self
            .manifest
            .unit(&unit.location, &unit.name)
            .ok_or_else(|| PlugrackError::MalformedUnit {
                unit: unit.qualified_name.to_string(),
                reason: format!("no unit `{}` in {}", unit.name, unit.location),
            })?;

        decl.members
            .iter()
            .map(|member| {
                let factory = match self.catalog.get(member) {
                    Some(CatalogEntry::Plugin(factory)) => Some(*factory),
                    Some(CatalogEntry::Opaque) => None,
                    None => {
                        return Err(PlugrackError::UnknownMember {
                            unit: unit.qualified_name.to_string(),
                            member: member.clone(),
                            suggestion: self.catalog.suggest(member),
                        });
                    }
                };
                Ok(TypeMember {
                    name: member.clone(),
                    qualified_name: format!("{}.{member}", unit.qualified_name),
                    factory,
                })
            })
            .collect()
    }
}
