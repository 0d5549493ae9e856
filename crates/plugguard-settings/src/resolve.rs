use crate::model::PlugguardConfigV1;

/// Programmatic overrides applied on top of the config file.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub source_resource_root: Option<String>,
    pub dependency_dirs: Option<Vec<String>>,
}

/// Effective layout conventions threaded through the engine.
///
/// Every list is non-empty after resolution; order is significant wherever
/// the engine documents a priority order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Conventions {
    pub source_resource_root: String,
    pub resource_markers: Vec<String>,
    pub well_known_subdirs: Vec<String>,
    pub build_output_dirs: Vec<String>,
    pub dependency_dirs: Vec<String>,
    pub archive_extensions: Vec<String>,
}

impl Default for Conventions {
    fn default() -> Self {
        Self {
            source_resource_root: "src/main/resources".to_string(),
            resource_markers: vec!["fhir".to_string(), "processes".to_string()],
            well_known_subdirs: vec!["fhir".to_string(), "processes".to_string()],
            build_output_dirs: vec![
                "target/classes".to_string(),
                "build/classes/java/main".to_string(),
            ],
            dependency_dirs: vec!["target/dependency".to_string(), "lib".to_string()],
            archive_extensions: vec!["jar".to_string(), "zip".to_string()],
        }
    }
}

impl Conventions {
    /// True when `ext` (lowercase, no dot) names a dependency archive.
    pub fn is_archive_extension(&self, ext: &str) -> bool {
        self.archive_extensions.iter().any(|e| e == ext)
    }
}

pub fn resolve_conventions(cfg: PlugguardConfigV1, overrides: Overrides) -> Conventions {
    let mut conv = Conventions::default();

    if let Some(root) = cfg.source_resource_root {
        conv.source_resource_root = root;
    }
    if !cfg.resource_markers.is_empty() {
        conv.resource_markers = cfg.resource_markers;
    }
    if !cfg.well_known_subdirs.is_empty() {
        conv.well_known_subdirs = cfg.well_known_subdirs;
    }
    if !cfg.build_output_dirs.is_empty() {
        conv.build_output_dirs = cfg.build_output_dirs;
    }
    if !cfg.dependency_dirs.is_empty() {
        conv.dependency_dirs = cfg.dependency_dirs;
    }
    if !cfg.archive_extensions.is_empty() {
        conv.archive_extensions = cfg
            .archive_extensions
            .into_iter()
            .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
            .collect();
    }

    if let Some(root) = overrides.source_resource_root {
        conv.source_resource_root = root;
    }
    if let Some(dirs) = overrides.dependency_dirs {
        conv.dependency_dirs = dirs;
    }

    conv
}
