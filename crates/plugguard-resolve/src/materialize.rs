//! Temp-file materialization for dependency-archive hits.
//!
//! All materialized entries live in one lazily created temp directory owned
//! by the `ResolveCtx`; dropping the context removes the directory
//! recursively. Deletion failures are ignored.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Context;
use camino::Utf8PathBuf;
use plugguard_types::NormalizedPath;
use tempfile::TempDir;

pub(crate) struct Materializer {
    dir: Mutex<Option<TempDir>>,
    counter: AtomicU64,
}

impl Materializer {
    pub(crate) fn new() -> Self {
        Self {
            dir: Mutex::new(None),
            counter: AtomicU64::new(0),
        }
    }

    /// Write `bytes` to a fresh file named after the entry, inside the
    /// tracked temp directory.
    ///
    /// The lock only guards creating/fetching the temp dir; the write
    /// itself runs outside it. The dir outlives the write because it is
    /// only dropped with the materializer, which `&self` keeps alive.
    pub(crate) fn materialize(
        &self,
        entry: &NormalizedPath,
        bytes: &[u8],
    ) -> anyhow::Result<Utf8PathBuf> {
        let base = {
            let mut guard = self.dir.lock().unwrap_or_else(|e| e.into_inner());
            if guard.is_none() {
                let dir = tempfile::Builder::new()
                    .prefix("plugguard-")
                    .tempdir()
                    .context("create materialization temp dir")?;
                *guard = Some(dir);
            }
            guard
                .as_ref()
                .context("materialization temp dir missing")?
                .path()
                .to_path_buf()
        };

        // Keep the original file name so downstream consumers that key off
        // extensions keep working; the counter keeps names unique.
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        let path = base.join(format!("{n}-{}", entry.file_name()));
        std::fs::write(&path, bytes).with_context(|| format!("write {}", path.display()))?;

        Utf8PathBuf::from_path_buf(path).map_err(|p| {
            anyhow::anyhow!("materialized path is not valid UTF-8: {}", p.display())
        })
    }
}
