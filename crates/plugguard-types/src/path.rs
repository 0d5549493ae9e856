use camino::{Utf8Path, Utf8PathBuf};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Canonical project-relative resource path used throughout resolution.
///
/// Invariants kept by construction:
/// - always forward slashes (`/`)
/// - never a leading separator
/// - never empty (blank references are represented as the absence of a
///   `NormalizedPath`, not as an empty one)
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct NormalizedPath(String);

impl NormalizedPath {
    /// Build from an already-trimmed, non-empty reference body.
    ///
    /// Returns `None` when the input collapses to nothing (e.g. `"///"`).
    pub fn new<S: AsRef<str>>(s: S) -> Option<Self> {
        let v = s.as_ref().replace('\\', "/");
        let v = v.trim_start_matches('/');
        if v.is_empty() {
            return None;
        }
        Some(Self(v.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_utf8_pathbuf(&self) -> Utf8PathBuf {
        Utf8PathBuf::from(self.0.clone())
    }

    /// Final path segment (the file name).
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// The path re-rooted under `base`.
    pub fn under(&self, base: &Utf8Path) -> Utf8PathBuf {
        base.join(&self.0)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
