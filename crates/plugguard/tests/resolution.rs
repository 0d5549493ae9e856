//! End-to-end resource resolution through a `LintSession`.

use camino::{Utf8Path, Utf8PathBuf};
use plugguard::{
    ApiGeneration, LintSession, PluginDescriptor, ResolutionResult, RootLayout,
};

fn utf8(p: &std::path::Path) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(p.to_path_buf()).expect("utf8 path")
}

fn write_file(path: &Utf8Path, contents: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent.as_std_path()).expect("create parent");
    }
    std::fs::write(path.as_std_path(), contents).expect("write file");
}

#[test]
fn nested_layout_resolves_and_locates() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let project = utf8(tmp.path());
    write_file(
        &project.join("src/main/resources/fhir/ActivityDefinition/x.xml"),
        r#"<ActivityDefinition><url value="http://example.org/ad/x"/></ActivityDefinition>"#,
    );

    let session = LintSession::with_defaults();
    let root = session.resolve_root(&project, None);
    assert_eq!(root.layout, RootLayout::Nested);
    assert!(root.dir.as_str().ends_with("src/main/resources"));

    let result = session.locate("fhir/ActivityDefinition/x.xml", &root);
    assert!(matches!(result, ResolutionResult::InRoot { .. }));
}

#[test]
fn spelling_variants_resolve_to_the_same_file() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let project = utf8(tmp.path());
    write_file(
        &project.join("src/main/resources/fhir/ActivityDefinition/x.xml"),
        "<ActivityDefinition/>",
    );

    let session = LintSession::with_defaults();
    let root = session.resolve_root(&project, None);

    let plain = session.locate("fhir/ActivityDefinition/x.xml", &root);
    let with_scheme = session.locate("classpath:/fhir/ActivityDefinition/x.xml", &root);
    let backslashed = session.locate("fhir\\ActivityDefinition\\x.xml", &root);
    let with_source_prefix =
        session.locate("src/main/resources/fhir/ActivityDefinition/x.xml", &root);

    assert!(plain.is_found());
    assert_eq!(plain, with_scheme);
    assert_eq!(plain, backslashed);
    assert_eq!(plain, with_source_prefix);
}

#[test]
fn flat_layout_is_detected_by_marker_directory() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let project = utf8(tmp.path());
    write_file(&project.join("processes/flow.bpmn"), "<definitions/>");

    let session = LintSession::with_defaults();
    let root = session.resolve_root(&project, None);
    assert_eq!(root.layout, RootLayout::Flat);
    assert!(session.locate("processes/flow.bpmn", &root).is_found());
}

#[test]
fn unconventional_project_degrades_but_still_classifies() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let project = utf8(tmp.path());
    write_file(&project.join("data/x.xml"), "<ActivityDefinition/>");

    let session = LintSession::with_defaults();
    let root = session.resolve_root(&project, None);
    assert_eq!(root.layout, RootLayout::Degraded);
    assert!(matches!(
        session.locate("data/x.xml", &root),
        ResolutionResult::InRoot { .. }
    ));
}

#[test]
fn module_descriptor_scopes_the_root() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let project = utf8(tmp.path());
    write_file(
        &project.join("plugin-a/src/main/resources/fhir/a.xml"),
        "<ValueSet/>",
    );
    write_file(
        &project.join("plugin-b/src/main/resources/fhir/b.xml"),
        "<ValueSet/>",
    );

    let session = LintSession::with_defaults();
    let plugin_b =
        PluginDescriptor::new("b", ApiGeneration::V2).with_module("plugin-b");
    let root = session.resolve_root(&project, Some(&plugin_b));
    assert!(root.dir.as_str().contains("plugin-b"));
    assert!(session.locate("fhir/b.xml", &root).is_found());
    assert_eq!(
        session.locate("fhir/a.xml", &root),
        ResolutionResult::NotFound
    );
}

#[test]
fn reference_outside_root_is_flagged_with_the_expected_root() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let project = utf8(tmp.path());
    write_file(
        &project.join("src/main/resources/.keep"),
        "",
    );
    write_file(&project.join("config/x.xml"), "<ActivityDefinition/>");

    let session = LintSession::with_defaults();
    let root = session.resolve_root(&project, None);
    match session.locate("config/x.xml", &root) {
        ResolutionResult::OutsideRoot { expected_root, .. } => {
            assert_eq!(expected_root, root.dir);
        }
        other => panic!("expected OutsideRoot, got {other:?}"),
    }
}

#[test]
fn dependency_archive_hit_is_materialized_and_cleaned_up() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let project = utf8(tmp.path());
    write_file(&project.join("src/main/resources/.keep"), "");
    std::fs::create_dir_all(project.join("target/dependency").as_std_path())
        .expect("create dep dir");
    plugguard_test_util::write_store_zip(
        project.join("target/dependency/upstream.jar").as_std_path(),
        &[(
            "fhir/ActivityDefinition/shared.xml",
            br#"<ActivityDefinition><id value="shared"/></ActivityDefinition>"#,
        )],
    )
    .expect("write fixture archive");

    let session = LintSession::with_defaults();
    let root = session.resolve_root(&project, None);
    let materialized = match session.locate("fhir/ActivityDefinition/shared.xml", &root) {
        ResolutionResult::InDependency { file, archive, .. } => {
            assert!(archive.as_str().ends_with("upstream.jar"));
            assert!(file.is_file());
            file
        }
        other => panic!("expected InDependency, got {other:?}"),
    };

    drop(session);
    assert!(!materialized.as_std_path().exists());
}

#[test]
fn cross_reference_confirms_and_refutes_declared_elements() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let project = utf8(tmp.path());
    write_file(
        &project.join("src/main/resources/fhir/ActivityDefinition/x.xml"),
        r#"<ActivityDefinition xmlns="http://hl7.org/fhir">
             <url value="http://example.org/ad/x"/>
           </ActivityDefinition>"#,
    );

    let session = LintSession::with_defaults();
    let root = session.resolve_root(&project, None);
    let result = session.locate("fhir/ActivityDefinition/x.xml", &root);

    assert!(session.cross_reference(&result, "ActivityDefinition", "http://example.org/ad/x"));
    assert!(!session.cross_reference(&result, "ActivityDefinition", "http://example.org/other"));
    assert!(!session.cross_reference(&result, "ValueSet", "http://example.org/ad/x"));
    assert!(!session.cross_reference(&ResolutionResult::NotFound, "ActivityDefinition", "x"));
}

#[test]
fn roots_are_cached_per_project_and_module() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let project = utf8(tmp.path());
    write_file(&project.join("src/main/resources/.keep"), "");

    let session = LintSession::with_defaults();
    let first = session.resolve_root(&project, None);
    // Removing the marker between calls must not change the cached answer.
    std::fs::remove_file(project.join("src/main/resources/.keep").as_std_path())
        .expect("remove marker");
    let second = session.resolve_root(&project, None);
    assert_eq!(first, second);
}
