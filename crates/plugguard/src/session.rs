use std::sync::Arc;

use camino::Utf8Path;
use plugguard_resolve::ResolveCtx;
use plugguard_settings::Conventions;
use plugguard_typereg::{RegistryCache, TypeRegistry};
use plugguard_types::{
    CapabilitySet, PluginDescriptor, ResolutionResult, ResourceRoot, VerificationResult,
};

/// One verification session over one or more plugin projects.
///
/// All lookups are cached for the lifetime of the session: resource roots
/// per (project, module), archive indexes per archive path, type
/// registries per project. Files materialized out of dependency archives
/// live in a session-owned temp directory and are removed on drop.
pub struct LintSession {
    resolve: ResolveCtx,
    registries: RegistryCache,
}

impl LintSession {
    pub fn new(conventions: Conventions) -> Self {
        Self {
            resolve: ResolveCtx::new(conventions),
            registries: RegistryCache::new(),
        }
    }

    /// Session with the stock directory conventions.
    pub fn with_defaults() -> Self {
        Self::new(Conventions::default())
    }

    pub fn conventions(&self) -> &Conventions {
        self.resolve.conventions()
    }

    /// Resolve the resource root for `project_dir`, optionally scoped to
    /// one plugin of a multi-plugin project.
    pub fn resolve_root(
        &self,
        project_dir: &Utf8Path,
        plugin: Option<&PluginDescriptor>,
    ) -> ResourceRoot {
        self.resolve.resolve_root(project_dir, plugin)
    }

    /// Locate a declared resource reference relative to a resolved root.
    pub fn locate(&self, reference: &str, root: &ResourceRoot) -> ResolutionResult {
        self.resolve.locate(reference, root)
    }

    /// Type registry for `project_dir`, built on first request.
    pub fn registry_for_project(&self, project_dir: &Utf8Path) -> Arc<TypeRegistry> {
        self.registries
            .registry_for_project(project_dir, self.conventions())
    }

    /// Deep registry variant: also scans nested module build output and
    /// dependency directories recursively.
    pub fn deep_registry_for_project(&self, project_dir: &Utf8Path) -> Arc<TypeRegistry> {
        self.registries
            .deep_registry_for_project(project_dir, self.conventions())
    }

    /// Number of registry constructions this session has performed.
    pub fn registry_construction_count(&self) -> usize {
        self.registries.construction_count()
    }

    /// Check a declared implementation type against a capability set.
    pub fn verify(
        &self,
        type_name: &str,
        capabilities: &CapabilitySet,
        registry: &TypeRegistry,
    ) -> VerificationResult {
        plugguard_typereg::verify(type_name, capabilities, registry)
    }

    /// Check whether a located resource actually defines the element a
    /// reference claims to point at.
    pub fn cross_reference(&self, result: &ResolutionResult, kind: &str, value: &str) -> bool {
        plugguard_resolve::cross_reference(result, kind, value)
    }
}

impl Default for LintSession {
    fn default() -> Self {
        Self::with_defaults()
    }
}
