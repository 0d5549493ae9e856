//! Per-project type registry with layered lookup and caching.
//!
//! Construction collects an ordered list of lookup locations — the project
//! root itself (exploded layouts), the conventional build-output
//! directories, archives directly in the project root, archives under
//! dependency-output directories — and indexes every class artifact it can
//! read. Any location that cannot be read is skipped with a debug log;
//! construction never fails outright.
//!
//! Name lookup is layered: ambient platform table, then the project index,
//! then a dotted-name file probe against the conventional build-output
//! shapes. The probe is a dependency-free fallback for loose output and
//! never errors on a missing file.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

use anyhow::{Context, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use plugguard_settings::Conventions;
use tracing::debug;
use walkdir::WalkDir;

use crate::ambient;
use crate::classfile::{self, TypeDescriptor, parse_class};

/// Read-only after construction; shared across all verification calls for
/// one project.
pub struct TypeRegistry {
    project_dir: Utf8PathBuf,
    project_types: HashMap<String, TypeDescriptor>,
    probe_dirs: Vec<Utf8PathBuf>,
}

impl TypeRegistry {
    pub(crate) fn build(project_dir: &Utf8Path, conventions: &Conventions, deep: bool) -> Self {
        let project_dir = project_dir.to_owned();
        let mut project_types: HashMap<String, TypeDescriptor> = HashMap::new();

        // Exploded layout: class artifacts directly under the project tree,
        // pruning the conventional build/dependency trees which get scanned
        // through their own locations below.
        let prune = prune_names(conventions);
        index_class_dir(&project_dir, Some(&prune), &mut project_types);

        let probe_dirs: Vec<Utf8PathBuf> = conventions
            .build_output_dirs
            .iter()
            .map(|d| project_dir.join(d))
            .collect();
        for dir in &probe_dirs {
            index_class_dir(dir, None, &mut project_types);
        }

        if deep {
            // Multi-module projects: every nested module subtree gets its
            // conventional build-output directories scanned too.
            for module in nested_module_dirs(&project_dir, &prune) {
                for d in &conventions.build_output_dirs {
                    index_class_dir(&module.join(d), None, &mut project_types);
                }
            }
        }

        for archive in archive_locations(&project_dir, conventions, deep) {
            if let Err(err) = index_archive_classes(&archive, &mut project_types) {
                debug!(archive = %archive, error = %format!("{err:#}"), "skipping unreadable archive");
            }
        }

        Self {
            project_dir,
            project_types,
            probe_dirs,
        }
    }

    pub fn project_dir(&self) -> &Utf8Path {
        &self.project_dir
    }

    /// Layered existence check: ambient -> project index -> file probe.
    pub fn exists(&self, name: &str) -> bool {
        if ambient::lookup(name).is_some() || self.project_types.contains_key(name) {
            return true;
        }
        let rel = classfile::artifact_rel_path(name);
        self.probe_dirs.iter().any(|d| d.join(&rel).is_file())
    }

    /// Structural shape of a type, when one of the first two tiers knows
    /// it. Types visible only through the file probe have no known shape.
    pub fn lookup(&self, name: &str) -> Option<&TypeDescriptor> {
        ambient::lookup(name).or_else(|| self.project_types.get(name))
    }

    /// Direct supertypes (superclass, then interfaces) of a named type.
    pub fn supertypes_of(&self, name: &str) -> Vec<String> {
        self.lookup(name)
            .map(|d| d.direct_supertypes().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Reflexive, transitive subtype check. Supertype links that cannot be
    /// resolved terminate that branch.
    pub fn is_subtype_of(&self, name: &str, of: &str) -> bool {
        name == of || self.is_proper_subtype_of(name, of)
    }

    /// Strict subtype check: `name` never counts as a proper subtype of
    /// itself.
    pub fn is_proper_subtype_of(&self, name: &str, of: &str) -> bool {
        let mut queue: VecDeque<String> = self.supertypes_of(name).into();
        let mut visited: HashSet<String> = HashSet::new();
        while let Some(current) = queue.pop_front() {
            if current == of {
                return true;
            }
            if visited.insert(current.clone()) {
                queue.extend(self.supertypes_of(&current));
            }
        }
        false
    }
}

fn prune_names(conventions: &Conventions) -> HashSet<String> {
    conventions
        .build_output_dirs
        .iter()
        .chain(conventions.dependency_dirs.iter())
        .filter_map(|d| d.split('/').next())
        .map(str::to_string)
        .collect()
}

/// Index every readable class artifact under `dir`. Unreadable or
/// malformed artifacts are skipped; first definition of a name wins
/// (earlier locations take priority).
fn index_class_dir(
    dir: &Utf8Path,
    prune: Option<&HashSet<String>>,
    out: &mut HashMap<String, TypeDescriptor>,
) {
    if !dir.is_dir() {
        return;
    }
    let walker = WalkDir::new(dir.as_std_path())
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            if !e.file_type().is_dir() {
                return true;
            }
            match prune {
                Some(prune) => !e
                    .file_name()
                    .to_str()
                    .is_some_and(|n| prune.contains(n)),
                None => true,
            }
        });
    for entry in walker.filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("class") {
            continue;
        }
        let Ok(bytes) = std::fs::read(path) else {
            continue;
        };
        match parse_class(&bytes) {
            Ok(desc) => {
                out.entry(desc.name.clone()).or_insert(desc);
            }
            Err(err) => {
                debug!(artifact = %path.display(), error = %err, "skipping unparsable class artifact");
            }
        }
    }
}

/// Archives directly in the project root, then under dependency-output
/// directories: shallow for the standard registry, recursive for the deep
/// variant.
fn archive_locations(
    project_dir: &Utf8Path,
    conventions: &Conventions,
    deep: bool,
) -> Vec<Utf8PathBuf> {
    let mut out: Vec<Utf8PathBuf> = Vec::new();
    let mut seen: HashSet<Utf8PathBuf> = HashSet::new();

    let mut push_sorted = |batch: Vec<Utf8PathBuf>, out: &mut Vec<Utf8PathBuf>| {
        let mut batch = batch;
        batch.sort();
        for path in batch {
            if seen.insert(path.clone()) {
                out.push(path);
            }
        }
    };

    push_sorted(shallow_archives(project_dir, conventions), &mut out);
    for dep in &conventions.dependency_dirs {
        let dir = project_dir.join(dep);
        if deep {
            push_sorted(recursive_archives(&dir, conventions), &mut out);
        } else {
            push_sorted(shallow_archives(&dir, conventions), &mut out);
        }
    }
    out
}

fn shallow_archives(dir: &Utf8Path, conventions: &Conventions) -> Vec<Utf8PathBuf> {
    let Ok(read) = std::fs::read_dir(dir.as_std_path()) else {
        return Vec::new();
    };
    read.filter_map(|e| e.ok())
        .filter_map(|e| Utf8PathBuf::from_path_buf(e.path()).ok())
        .filter(|p| p.is_file() && is_archive(p, conventions))
        .collect()
}

fn recursive_archives(dir: &Utf8Path, conventions: &Conventions) -> Vec<Utf8PathBuf> {
    WalkDir::new(dir.as_std_path())
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| Utf8PathBuf::from_path_buf(e.path().to_path_buf()).ok())
        .filter(|p| is_archive(p, conventions))
        .collect()
}

fn is_archive(path: &Utf8Path, conventions: &Conventions) -> bool {
    let ext = path.extension().unwrap_or_default().to_ascii_lowercase();
    conventions.is_archive_extension(&ext)
}

/// Immediate subdirectories that are not build/dependency output; the deep
/// variant treats each as a nested module.
fn nested_module_dirs(project_dir: &Utf8Path, prune: &HashSet<String>) -> Vec<Utf8PathBuf> {
    let Ok(read) = std::fs::read_dir(project_dir.as_std_path()) else {
        return Vec::new();
    };
    let mut out: Vec<Utf8PathBuf> = read
        .filter_map(|e| e.ok())
        .filter_map(|e| Utf8PathBuf::from_path_buf(e.path()).ok())
        .filter(|p| p.is_dir())
        .filter(|p| {
            !p.file_name()
                .is_some_and(|n| prune.contains(n))
        })
        .collect();
    out.sort();
    out
}

fn index_archive_classes(
    path: &Utf8Path,
    out: &mut HashMap<String, TypeDescriptor>,
) -> anyhow::Result<()> {
    let buf = std::fs::read(path.as_std_path()).with_context(|| format!("read {path}"))?;
    let archive =
        rawzip::ZipArchive::from_slice(&buf).map_err(|e| anyhow!("invalid zip archive: {e:?}"))?;

    for entry in archive.entries() {
        let entry = entry.map_err(|e| anyhow!("zip entry error: {e:?}"))?;
        if entry.is_dir() {
            continue;
        }
        let name = entry
            .file_path()
            .try_normalize()
            .map_err(|e| anyhow!("failed to normalize zip path: {e:?}"))?
            .as_ref()
            .to_string();
        if !name.ends_with(".class") {
            continue;
        }

        let wayfinder = entry.wayfinder();
        let slice_entry = archive
            .get_entry(wayfinder)
            .map_err(|e| anyhow!("failed to get entry data: {e:?}"))?;
        let data = slice_entry.data();
        let bytes: Vec<u8> = match entry.compression_method() {
            rawzip::CompressionMethod::Store => data.to_vec(),
            rawzip::CompressionMethod::Deflate => {
                use std::io::Read;
                let mut decoder = flate2::read::DeflateDecoder::new(data);
                let mut inflated = Vec::new();
                decoder
                    .read_to_end(&mut inflated)
                    .with_context(|| format!("inflate {name} from {path}"))?;
                inflated
            }
            method => {
                debug!(archive = %path, entry = %name, ?method, "unsupported compression method");
                continue;
            }
        };

        match parse_class(&bytes) {
            Ok(desc) => {
                out.entry(desc.name.clone()).or_insert(desc);
            }
            Err(err) => {
                debug!(archive = %path, entry = %name, error = %err, "skipping unparsable class artifact");
            }
        }
    }
    Ok(())
}

/// Per-canonical-project-path registry caches. The deep variant is keyed
/// independently. Construction happens at most once per key even under
/// concurrent requests: the map lock only guards the fetch-or-insert of a
/// per-key once-cell, construction runs outside it.
#[derive(Default)]
pub struct RegistryCache {
    standard: Mutex<HashMap<Utf8PathBuf, Arc<OnceLock<Arc<TypeRegistry>>>>>,
    deep: Mutex<HashMap<Utf8PathBuf, Arc<OnceLock<Arc<TypeRegistry>>>>>,
    constructions: AtomicUsize,
}

impl RegistryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry_for_project(
        &self,
        project_dir: &Utf8Path,
        conventions: &Conventions,
    ) -> Arc<TypeRegistry> {
        self.get_or_build(&self.standard, project_dir, conventions, false)
    }

    /// Deep variant for multi-module projects: walks nested module
    /// subtrees and dependency directories recursively.
    pub fn deep_registry_for_project(
        &self,
        project_dir: &Utf8Path,
        conventions: &Conventions,
    ) -> Arc<TypeRegistry> {
        self.get_or_build(&self.deep, project_dir, conventions, true)
    }

    /// Number of registry constructions performed so far. Lets callers
    /// (and tests) observe that caching amortizes construction.
    pub fn construction_count(&self) -> usize {
        self.constructions.load(Ordering::Relaxed)
    }

    fn get_or_build(
        &self,
        map: &Mutex<HashMap<Utf8PathBuf, Arc<OnceLock<Arc<TypeRegistry>>>>>,
        project_dir: &Utf8Path,
        conventions: &Conventions,
        deep: bool,
    ) -> Arc<TypeRegistry> {
        let key = project_dir
            .canonicalize_utf8()
            .unwrap_or_else(|_| project_dir.to_owned());
        let cell = {
            let mut guard = map.lock().unwrap_or_else(|e| e.into_inner());
            guard.entry(key.clone()).or_default().clone()
        };
        cell.get_or_init(|| {
            self.constructions.fetch_add(1, Ordering::Relaxed);
            Arc::new(TypeRegistry::build(&key, conventions, deep))
        })
        .clone()
    }
}
