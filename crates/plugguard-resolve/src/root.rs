//! Resource-root resolution.
//!
//! Two directory conventions are supported transparently: the nested
//! source layout (`<dir>/src/main/resources`) and the flat layout (marker
//! subdirectory directly under the project dir). Probing is side-effect
//! free and memoized per canonical project path; resolution never fails —
//! when no convention matches, the project directory itself becomes a
//! degraded root and downstream checks classify accordingly.

use camino::{Utf8Path, Utf8PathBuf};
use plugguard_settings::Conventions;
use plugguard_types::{PluginDescriptor, ResourceRoot, RootLayout};

use crate::ResolveCtx;

impl ResolveCtx {
    /// Resolve the resource root for `project_dir`, optionally for one
    /// specific plugin of a multi-plugin project.
    pub fn resolve_root(
        &self,
        project_dir: &Utf8Path,
        plugin: Option<&PluginDescriptor>,
    ) -> ResourceRoot {
        let module = plugin.and_then(|p| p.module.clone());
        let key = (Self::canonical_dir(project_dir), module.clone());
        let cell = Self::once_cell(&self.roots, key);
        cell.get_or_init(|| resolve_uncached(self.conventions(), project_dir, module.as_deref()))
            .clone()
    }
}

fn resolve_uncached(
    conventions: &Conventions,
    project_dir: &Utf8Path,
    module: Option<&str>,
) -> ResourceRoot {
    if let Some(module) = module {
        let module_dir = project_dir.join(module);
        if let Some(root) = probe_dir(conventions, &module_dir, &module_dir) {
            return root;
        }
        // No plugin-specific convention: fall back to the shared default's
        // parent (historical upstream behavior, kept for compatibility).
        let shared = resolve_default(conventions, project_dir);
        let dir = shared
            .dir
            .parent()
            .map(Utf8Path::to_owned)
            .unwrap_or_else(|| project_dir.to_owned());
        return ResourceRoot::new(dir, project_dir, RootLayout::Degraded);
    }

    resolve_default(conventions, project_dir)
}

fn resolve_default(conventions: &Conventions, project_dir: &Utf8Path) -> ResourceRoot {
    if let Some(root) = probe_dir(conventions, project_dir, project_dir) {
        return root;
    }

    // First-module-wins: immediate subdirectories in lexicographic order.
    // A heuristic kept for compatibility when several plugins share a
    // project without a disambiguating convention.
    for subdir in immediate_subdirs(project_dir) {
        if let Some(root) = probe_dir(conventions, &subdir, &subdir) {
            return root;
        }
    }

    ResourceRoot::degraded(project_dir)
}

/// Probe one directory for the two layout conventions; nested wins.
fn probe_dir(
    conventions: &Conventions,
    dir: &Utf8Path,
    owning_project: &Utf8Path,
) -> Option<ResourceRoot> {
    let nested = dir.join(&conventions.source_resource_root);
    if nested.is_dir() {
        return Some(ResourceRoot::new(nested, owning_project, RootLayout::Nested));
    }
    let flat = conventions
        .resource_markers
        .iter()
        .any(|marker| dir.join(marker).is_dir());
    if flat {
        return Some(ResourceRoot::new(dir, owning_project, RootLayout::Flat));
    }
    None
}

fn immediate_subdirs(dir: &Utf8Path) -> Vec<Utf8PathBuf> {
    let Ok(read) = std::fs::read_dir(dir.as_std_path()) else {
        return Vec::new();
    };
    let mut out: Vec<Utf8PathBuf> = read
        .filter_map(|e| e.ok())
        .filter_map(|e| Utf8PathBuf::from_path_buf(e.path()).ok())
        .filter(|p| p.is_dir())
        .collect();
    out.sort();
    out
}
