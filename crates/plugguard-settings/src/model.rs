use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `plugguard.toml` schema v1.
///
/// This is a *user-facing* config model: it is intentionally permissive so
/// forward-compat is easy. Everything is optional; defaults come from the
/// convention resolver.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PlugguardConfigV1 {
    /// Optional schema string for tooling (`plugguard.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Conventional source-resource root stripped from references and
    /// probed under project directories (default `src/main/resources`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_resource_root: Option<String>,

    /// Marker subdirectories whose presence identifies a flat resource
    /// layout.
    #[serde(default)]
    pub resource_markers: Vec<String>,

    /// Well-known subfolders tried when a reference omits its leading
    /// folder segment.
    #[serde(default)]
    pub well_known_subdirs: Vec<String>,

    /// Compiled-output directory shapes, relative to a project directory.
    #[serde(default)]
    pub build_output_dirs: Vec<String>,

    /// Directories searched for dependency archives, relative to a project
    /// directory.
    #[serde(default)]
    pub dependency_dirs: Vec<String>,

    /// File extensions treated as dependency archives.
    #[serde(default)]
    pub archive_extensions: Vec<String>,
}
