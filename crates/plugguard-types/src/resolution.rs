use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

/// How a plugin's resource root was detected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootLayout {
    /// Conventional nested source layout (`src/main/resources`).
    Nested,
    /// Flat layout: resources live directly under the project directory.
    Flat,
    /// No convention matched; the project directory itself is used as a
    /// degraded root so resolution can still classify everything.
    Degraded,
}

/// The directory tree a plugin's own resources are expected to live within.
///
/// Resolved once per plugin per project inspection and never mutated after
/// resolution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRoot {
    /// The authoritative resource directory.
    pub dir: Utf8PathBuf,
    /// The project directory the root belongs to (owns the dependency
    /// archives visible during location).
    pub project_dir: Utf8PathBuf,
    pub layout: RootLayout,
}

impl ResourceRoot {
    pub fn new(
        dir: impl Into<Utf8PathBuf>,
        project_dir: impl Into<Utf8PathBuf>,
        layout: RootLayout,
    ) -> Self {
        Self {
            dir: dir.into(),
            project_dir: project_dir.into(),
            layout,
        }
    }

    /// Degraded root: the project directory stands in for the resource root.
    pub fn degraded(project_dir: impl Into<Utf8PathBuf>) -> Self {
        let project_dir = project_dir.into();
        Self {
            dir: project_dir.clone(),
            project_dir,
            layout: RootLayout::Degraded,
        }
    }
}

/// Outcome of locating a normalized reference against a resource root.
///
/// Exactly one variant per (reference, root) pair; never more than one
/// physical file is treated as authoritative.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolutionResult {
    /// Blank reference, or no candidate anywhere searched.
    NotFound,
    /// Found on disk, canonically contained in the expected root.
    InRoot { file: Utf8PathBuf },
    /// Found on disk, but outside the expected root (including symlink
    /// escapes that only surface after canonicalization).
    OutsideRoot {
        file: Utf8PathBuf,
        expected_root: Utf8PathBuf,
    },
    /// Found inside a dependency archive; `file` is a materialized
    /// temporary copy tracked for cleanup, `archive` the actual location.
    InDependency {
        file: Utf8PathBuf,
        archive: Utf8PathBuf,
        expected_root: Utf8PathBuf,
    },
}

impl ResolutionResult {
    /// The on-disk file for any of the found variants.
    pub fn file(&self) -> Option<&Utf8Path> {
        match self {
            ResolutionResult::NotFound => None,
            ResolutionResult::InRoot { file }
            | ResolutionResult::OutsideRoot { file, .. }
            | ResolutionResult::InDependency { file, .. } => Some(file.as_path()),
        }
    }

    pub fn is_found(&self) -> bool {
        !matches!(self, ResolutionResult::NotFound)
    }
}
