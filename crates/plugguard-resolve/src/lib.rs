//! Resource resolution adapters: reference normalization, resource-root
//! resolution, disk and dependency-archive location, content
//! cross-referencing.
//!
//! This crate is allowed to do filesystem IO. Expected "not found"
//! conditions are data, never errors; a probe failure inside one lookup
//! step contributes nothing and later steps proceed.

#![forbid(unsafe_code)]

mod archive;
mod locate;
mod materialize;
mod normalize;
mod root;
mod xref;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

use camino::{Utf8Path, Utf8PathBuf};
use plugguard_settings::Conventions;
use plugguard_types::ResourceRoot;

pub use normalize::normalize_reference;
pub use xref::{cross_reference, scan_definitions};

pub(crate) use archive::ArchiveIndex;

/// Explicit resolution context threaded through all location calls.
///
/// Owns the only shared mutable state of this crate: per-project
/// memoization of resource roots and archive scans, and the temp directory
/// backing materialized archive entries. Dropping the context removes the
/// materialized files (best-effort).
pub struct ResolveCtx {
    conventions: Conventions,
    roots: Mutex<HashMap<RootKey, Arc<OnceLock<ResourceRoot>>>>,
    archives: Mutex<HashMap<Utf8PathBuf, Arc<OnceLock<Arc<Vec<ArchiveIndex>>>>>>,
    materializer: materialize::Materializer,
}

type RootKey = (Utf8PathBuf, Option<String>);

impl ResolveCtx {
    pub fn new(conventions: Conventions) -> Self {
        Self {
            conventions,
            roots: Mutex::new(HashMap::new()),
            archives: Mutex::new(HashMap::new()),
            materializer: materialize::Materializer::new(),
        }
    }

    pub fn conventions(&self) -> &Conventions {
        &self.conventions
    }

    /// Canonical cache key for a project directory. Falls back to the path
    /// as given when it cannot be canonicalized; the degraded key still
    /// memoizes consistently for that spelling.
    pub(crate) fn canonical_dir(dir: &Utf8Path) -> Utf8PathBuf {
        dir.canonicalize_utf8().unwrap_or_else(|_| dir.to_owned())
    }

    /// Compute-if-absent with a per-key once-cell: the map lock is only
    /// held to fetch or insert the cell, never across the construction
    /// itself, and construction runs at most once per key.
    pub(crate) fn once_cell<K, V>(
        map: &Mutex<HashMap<K, Arc<OnceLock<V>>>>,
        key: K,
    ) -> Arc<OnceLock<V>>
    where
        K: std::hash::Hash + Eq,
    {
        let mut guard = map.lock().unwrap_or_else(|e| e.into_inner());
        guard.entry(key).or_default().clone()
    }
}

impl Default for ResolveCtx {
    fn default() -> Self {
        Self::new(Conventions::default())
    }
}
