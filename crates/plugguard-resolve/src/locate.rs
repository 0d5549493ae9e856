//! Priority-ordered resource location.
//!
//! The step order is a contract, not a performance heuristic: disk under
//! the root, well-known subfolders under the root, disk under the owning
//! project (classified outside-root), dependency archives. The first step
//! producing a candidate decides the classification.

use camino::{Utf8Path, Utf8PathBuf};
use plugguard_types::{NormalizedPath, ResolutionResult, ResourceRoot};
use tracing::debug;

use crate::ResolveCtx;
use crate::archive;
use crate::normalize::normalize_reference;

impl ResolveCtx {
    /// Locate a raw declared reference against a resolved resource root.
    pub fn locate(&self, reference: &str, root: &ResourceRoot) -> ResolutionResult {
        let Some(normalized) = normalize_reference(reference, self.conventions()) else {
            return ResolutionResult::NotFound;
        };
        self.locate_normalized(&normalized, root)
    }

    pub(crate) fn locate_normalized(
        &self,
        normalized: &NormalizedPath,
        root: &ResourceRoot,
    ) -> ResolutionResult {
        // Containment is decided on canonical (symlink-resolved) paths on
        // both sides; a root that cannot be canonicalized is compared as
        // spelled.
        let canonical_root = Self::canonical_dir(&root.dir);

        // Step 1+2: direct candidate under the root, then well-known
        // subfolders for references that omit their leading segment.
        for candidate in in_root_candidates(self, normalized, root) {
            if let Some(result) = classify_candidate(&candidate, &canonical_root, root) {
                return result;
            }
        }

        // Step 3: the owning project directory. A hit here that does not
        // canonically land inside the root is the outside-root finding.
        if root.project_dir != root.dir {
            for candidate in project_candidates(self, normalized, root) {
                if let Some(result) = classify_candidate(&candidate, &canonical_root, root) {
                    return result;
                }
            }
        }

        // Step 4: dependency archives visible to the project.
        for index in self.archives_for(&root.project_dir).iter() {
            if !index.entries.contains(normalized.as_str()) {
                continue;
            }
            match archive::extract_entry(&index.path, normalized.as_str())
                .and_then(|bytes| self.materializer.materialize(normalized, &bytes))
            {
                Ok(file) => {
                    return ResolutionResult::InDependency {
                        file,
                        archive: index.path.clone(),
                        expected_root: root.dir.clone(),
                    };
                }
                Err(err) => {
                    debug!(
                        archive = %index.path,
                        entry = %normalized,
                        error = %format!("{err:#}"),
                        "archive hit could not be materialized"
                    );
                }
            }
        }

        ResolutionResult::NotFound
    }
}

fn in_root_candidates(
    ctx: &ResolveCtx,
    normalized: &NormalizedPath,
    root: &ResourceRoot,
) -> Vec<Utf8PathBuf> {
    let mut out = vec![normalized.under(&root.dir)];
    for sub in &ctx.conventions().well_known_subdirs {
        out.push(normalized.under(&root.dir.join(sub)));
    }
    out
}

fn project_candidates(
    ctx: &ResolveCtx,
    normalized: &NormalizedPath,
    root: &ResourceRoot,
) -> Vec<Utf8PathBuf> {
    let mut out = vec![normalized.under(&root.project_dir)];
    for sub in &ctx.conventions().well_known_subdirs {
        out.push(normalized.under(&root.project_dir.join(sub)));
    }
    out
}

/// Classify one on-disk candidate by canonical containment, or `None` when
/// the candidate does not exist (or cannot be canonicalized — that probe
/// then contributes nothing).
fn classify_candidate(
    candidate: &Utf8Path,
    canonical_root: &Utf8Path,
    root: &ResourceRoot,
) -> Option<ResolutionResult> {
    if !candidate.is_file() {
        return None;
    }
    let Ok(file) = candidate.canonicalize_utf8() else {
        return None;
    };
    if file.starts_with(canonical_root) {
        Some(ResolutionResult::InRoot { file })
    } else {
        Some(ResolutionResult::OutsideRoot {
            file,
            expected_root: root.dir.clone(),
        })
    }
}
