//! Dependency-archive discovery and reading.
//!
//! Archives are zip-format files bundled alongside the project or staged in
//! conventional dependency-output directories. Entry listings are memoized
//! per project so individual references do not re-open the same archive;
//! extraction happens only on an actual hit. An unreadable archive is
//! skipped with a debug log and contributes nothing.

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::{Context, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use plugguard_settings::Conventions;
use tracing::debug;

use crate::ResolveCtx;

/// Entry listing of one dependency archive.
pub(crate) struct ArchiveIndex {
    pub(crate) path: Utf8PathBuf,
    pub(crate) entries: HashSet<String>,
}

impl ResolveCtx {
    /// Dependency archives visible to `project_dir`, with entry listings.
    /// Memoized per canonical project path.
    pub(crate) fn archives_for(&self, project_dir: &Utf8Path) -> Arc<Vec<ArchiveIndex>> {
        let key = Self::canonical_dir(project_dir);
        let cell = Self::once_cell(&self.archives, key.clone());
        cell.get_or_init(|| Arc::new(scan_archives(self.conventions(), &key)))
            .clone()
    }
}

fn scan_archives(conventions: &Conventions, project_dir: &Utf8Path) -> Vec<ArchiveIndex> {
    let mut out = Vec::new();
    for path in discover_archives(conventions, project_dir) {
        match index_archive(&path) {
            Ok(entries) => out.push(ArchiveIndex { path, entries }),
            Err(err) => {
                debug!(archive = %path, error = %format!("{err:#}"), "skipping unreadable archive");
            }
        }
    }
    out
}

/// Archive files directly in the project root, then under each conventional
/// dependency directory (shallow). Directory order is a priority order;
/// within one directory the listing is sorted for stability.
pub(crate) fn discover_archives(
    conventions: &Conventions,
    project_dir: &Utf8Path,
) -> Vec<Utf8PathBuf> {
    let mut dirs = vec![project_dir.to_owned()];
    for dep in &conventions.dependency_dirs {
        dirs.push(project_dir.join(dep));
    }

    let mut out: Vec<Utf8PathBuf> = Vec::new();
    let mut seen: HashSet<Utf8PathBuf> = HashSet::new();
    for dir in dirs {
        let Ok(read) = std::fs::read_dir(dir.as_std_path()) else {
            continue;
        };
        let mut batch: Vec<Utf8PathBuf> = read
            .filter_map(|e| e.ok())
            .filter_map(|e| Utf8PathBuf::from_path_buf(e.path()).ok())
            .filter(|p| p.is_file())
            .filter(|p| {
                let ext = p.extension().unwrap_or_default().to_ascii_lowercase();
                conventions.is_archive_extension(&ext)
            })
            .collect();
        batch.sort();
        for path in batch {
            if seen.insert(path.clone()) {
                out.push(path);
            }
        }
    }
    out
}

/// List the (file) entry names of a zip archive, with normalized forward
/// slashed paths.
pub(crate) fn index_archive(path: &Utf8Path) -> anyhow::Result<HashSet<String>> {
    let buf = std::fs::read(path.as_std_path()).with_context(|| format!("read {path}"))?;
    let archive =
        rawzip::ZipArchive::from_slice(&buf).map_err(|e| anyhow!("invalid zip archive: {e:?}"))?;

    let mut names = HashSet::new();
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
        names.insert(name);
    }
    Ok(names)
}

/// Decompress one entry of a zip archive into memory.
pub(crate) fn extract_entry(path: &Utf8Path, entry_name: &str) -> anyhow::Result<Vec<u8>> {
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
        if name != entry_name {
            continue;
        }

        let wayfinder = entry.wayfinder();
        let slice_entry = archive
            .get_entry(wayfinder)
            .map_err(|e| anyhow!("failed to get entry data: {e:?}"))?;
        let data = slice_entry.data();
        return match entry.compression_method() {
            rawzip::CompressionMethod::Store => Ok(data.to_vec()),
            rawzip::CompressionMethod::Deflate => {
                use std::io::Read;
                let mut decoder = flate2::read::DeflateDecoder::new(data);
                let mut out = Vec::new();
                decoder
                    .read_to_end(&mut out)
                    .with_context(|| format!("inflate {entry_name} from {path}"))?;
                Ok(out)
            }
            method => Err(anyhow!("unsupported compression method: {method:?}")),
        };
    }
    Err(anyhow!("entry {entry_name} not found in {path}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use plugguard_settings::Conventions;
    use plugguard_test_util::write_store_zip;

    fn utf8(p: &std::path::Path) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(p.to_path_buf()).expect("utf8 path")
    }

    #[test]
    fn index_and_extract_round_trip() {
        let tmp = tempfile::TempDir::new().expect("temp dir");
        let path = utf8(tmp.path()).join("dep.jar");
        write_store_zip(
            path.as_std_path(),
            &[
                ("fhir/ActivityDefinition/x.xml", b"<ActivityDefinition/>"),
                ("readme.txt", b"ignored"),
            ],
        )
        .expect("write fixture archive");

        let names = index_archive(&path).expect("index");
        assert!(names.contains("fhir/ActivityDefinition/x.xml"));
        assert!(names.contains("readme.txt"));

        let data = extract_entry(&path, "fhir/ActivityDefinition/x.xml").expect("extract");
        assert_eq!(data, b"<ActivityDefinition/>");

        let missing = extract_entry(&path, "nope.xml");
        assert!(missing.is_err());
    }

    #[test]
    fn discovery_orders_root_archives_before_dependency_dirs() {
        let tmp = tempfile::TempDir::new().expect("temp dir");
        let project = utf8(tmp.path());
        std::fs::create_dir_all(project.join("target/dependency").as_std_path())
            .expect("create dep dir");
        write_store_zip(project.join("a.jar").as_std_path(), &[("x", b"1")]).expect("a.jar");
        write_store_zip(
            project.join("target/dependency/b.jar").as_std_path(),
            &[("y", b"2")],
        )
        .expect("b.jar");
        std::fs::write(project.join("notes.txt").as_std_path(), "no").expect("txt");

        let found = discover_archives(&Conventions::default(), &project);
        let names: Vec<&str> = found
            .iter()
            .map(|p| p.file_name().unwrap_or_default())
            .collect();
        assert_eq!(names, vec!["a.jar", "b.jar"]);
    }

    #[test]
    fn malformed_archive_is_skipped_by_scan() {
        let tmp = tempfile::TempDir::new().expect("temp dir");
        let project = utf8(tmp.path());
        std::fs::write(project.join("broken.jar").as_std_path(), b"not a zip").expect("broken");

        let ctx = crate::ResolveCtx::default();
        let archives = ctx.archives_for(&project);
        assert!(archives.is_empty());
    }
}
