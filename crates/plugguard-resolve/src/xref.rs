//! Content cross-referencing over structured definition files.
//!
//! Answers "does this definition file (or any file in these directories)
//! declare an identifier for a given definition kind". Malformed or
//! unparsable files are misses, never errors.

use camino::Utf8Path;
use plugguard_types::ResolutionResult;
use walkdir::WalkDir;

/// Check whether a resolved definition file declares `value` for a
/// definition of kind `kind` (e.g. kind `"ValueSet"`, value an `id` or
/// `url`). `NotFound` results never match.
pub fn cross_reference(result: &ResolutionResult, kind: &str, value: &str) -> bool {
    match result.file() {
        Some(file) => file_declares(file, kind, value),
        None => false,
    }
}

/// Scan candidate directories in order (conventional nested layout first,
/// then flat); the first directory yielding a match wins.
pub fn scan_definitions(dirs: &[impl AsRef<Utf8Path>], kind: &str, value: &str) -> bool {
    for dir in dirs {
        let mut walker = WalkDir::new(dir.as_ref().as_std_path())
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file());
        let matched = walker.any(|e| {
            Utf8Path::from_path(e.path())
                .map(|p| file_declares(p, kind, value))
                .unwrap_or(false)
        });
        if matched {
            return true;
        }
    }
    false
}

fn file_declares(file: &Utf8Path, kind: &str, value: &str) -> bool {
    let ext = file.extension().unwrap_or_default().to_ascii_lowercase();
    let Ok(text) = std::fs::read_to_string(file.as_std_path()) else {
        return false;
    };
    match ext.as_str() {
        "xml" => xml_declares(&text, kind, value),
        "json" => json_declares(&text, kind, value),
        _ => false,
    }
}

/// XML definitions declare identifiers as value-attribute child elements:
/// `<ValueSet><id value="..."/><url value="..."/></ValueSet>`. Collections
/// (bundles) nest definitions, so any descendant of the right kind counts.
fn xml_declares(text: &str, kind: &str, value: &str) -> bool {
    let Ok(doc) = roxmltree::Document::parse(text) else {
        return false;
    };
    doc.descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == kind)
        .any(|n| {
            n.children()
                .filter(|c| c.is_element())
                .filter(|c| matches!(c.tag_name().name(), "id" | "url" | "name"))
                .any(|c| c.attribute("value") == Some(value))
        })
}

/// JSON definitions carry `resourceType` plus `id`/`url`/`name` fields;
/// collections nest them under arbitrary keys, so the scan is recursive.
fn json_declares(text: &str, kind: &str, value: &str) -> bool {
    let Ok(root) = serde_json::from_str::<serde_json::Value>(text) else {
        return false;
    };
    json_node_declares(&root, kind, value)
}

fn json_node_declares(node: &serde_json::Value, kind: &str, value: &str) -> bool {
    match node {
        serde_json::Value::Object(map) => {
            let is_kind = map
                .get("resourceType")
                .and_then(|v| v.as_str())
                .is_some_and(|t| t == kind);
            if is_kind {
                let declared = ["id", "url", "name"].iter().any(|field| {
                    map.get(*field).and_then(|v| v.as_str()) == Some(value)
                });
                if declared {
                    return true;
                }
            }
            map.values().any(|v| json_node_declares(v, kind, value))
        }
        serde_json::Value::Array(items) => {
            items.iter().any(|v| json_node_declares(v, kind, value))
        }
        _ => false,
    }
}
