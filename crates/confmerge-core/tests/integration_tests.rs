/*
 * integration_tests.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Integration tests for confmerge-core using on-disk fixtures.
 */

use confmerge_core::{
    CachingSource, ConfigLoader, ConfigSource, Element, FileSystemSource, LoadError, LoadOptions,
    load_file,
};
use confmerge_xml::parse;
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};

/// Helper to get the path to test fixtures
fn fixture_path(name: &str) -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    Path::new(manifest_dir).join("test-fixtures").join(name)
}

fn fixture_loader() -> ConfigLoader<FileSystemSource> {
    ConfigLoader::new(FileSystemSource::with_base_dir(fixture_path("")))
}

fn fixture_tree(name: &str) -> Element {
    let content = std::fs::read_to_string(fixture_path(name))
        .unwrap_or_else(|_| panic!("Failed to read fixture: {}", name));
    parse(&content).unwrap()
}

fn names(element: &Element) -> Vec<&str> {
    element.children.iter().map(|c| c.name.as_str()).collect()
}

#[test]
fn test_document_without_includes_is_identical() {
    let loaded = fixture_loader().load("flat/app.xml").unwrap();
    assert_eq!(loaded.root(), &fixture_tree("flat/app.xml"));
    assert!(loaded.diagnostics.is_empty());
}

#[test]
fn test_container_include_is_flattened() {
    let loaded = fixture_loader().load("basic/app.xml").unwrap();
    assert_eq!(
        loaded.root(),
        &parse("<configuration><a/><x/><y/><b/></configuration>").unwrap()
    );
}

#[test]
fn test_chained_includes_resolve_against_each_document() {
    let loaded = fixture_loader().load("nested/conf/app.xml").unwrap();

    let expected = parse(
        r#"<configuration>
  <appSettings>
    <add key="name" value="orders"/>
  </appSettings>
  <logging level="warn"/>
  <database provider="postgres">
    <connection host="db.internal" port="5432"/>
  </database>
</configuration>"#,
    )
    .unwrap();
    assert_eq!(loaded.root(), &expected);
    assert!(!loaded.has_warnings());
}

#[test]
fn test_resolve_walks_up_from_referencing_document() {
    let source = FileSystemSource::new();
    let resolved = source.resolve_location("/a/b/config.xml", "../shared/common.xml");
    assert_eq!(Path::new(&resolved), Path::new("/a/shared/common.xml"));
}

#[test]
fn test_blank_and_missing_includes_degrade() {
    let loaded = fixture_loader().load("degraded/app.xml").unwrap();

    assert_eq!(names(loaded.root()), vec!["first", "last"]);

    let codes: Vec<_> = loaded
        .warnings()
        .map(|d| d.code.clone().unwrap_or_default())
        .collect();
    assert_eq!(codes, vec!["C-2-1", "C-2-2"]);
}

#[test]
fn test_missing_include_warning_text() {
    let loaded = fixture_loader().load("degraded/app.xml").unwrap();
    let warning = loaded
        .warnings()
        .find(|d| d.code.as_deref() == Some("C-2-2"))
        .unwrap();

    let location = Path::new("degraded").join("does-not-exist.xml");
    let text = warning.to_text();
    assert!(text.starts_with("Warning [C-2-2]: Include target not found\n  --> degraded/app.xml\n"));
    assert!(text.contains(&format!("Resolved to `{}`", location.display())));
    assert!(text.contains("ℹ The marker was dropped"));
}

#[test]
fn test_unparseable_include_degrades_like_missing() {
    let loaded = fixture_loader().load("malformed/app.xml").unwrap();

    assert_eq!(names(loaded.root()), vec!["first", "last"]);

    let warnings: Vec<_> = loaded.warnings().collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].code.as_deref(), Some("C-2-2"));
    assert_eq!(warnings[0].location.as_deref(), Some("malformed/app.xml"));
    assert!(
        warnings[0]
            .details
            .iter()
            .any(|d| d.content.starts_with("failed to parse") && d.content.contains("broken.xml")),
        "{:?}",
        warnings[0].details
    );
}

#[test]
fn test_cycle_is_rejected() {
    let err = fixture_loader().load("cycle/a.xml").unwrap_err();
    match err {
        LoadError::IncludeCycle { chain } => {
            assert_eq!(chain.len(), 3);
            assert_eq!(chain.first(), chain.last());
            assert_eq!(chain[0], "cycle/a.xml");
        }
        other => panic!("Expected IncludeCycle, got: {:?}", other),
    }
}

#[test]
fn test_diamond_is_not_a_cycle() {
    let loaded = fixture_loader().load("diamond/app.xml").unwrap();
    assert_eq!(
        loaded.root(),
        &parse(
            r#"<configuration><left><common shared="true"/></left><right><common shared="true"/></right></configuration>"#
        )
        .unwrap()
    );
}

#[test]
fn test_custom_marker_names() {
    let loaded = fixture_loader().load("custom/app.xml").unwrap();
    assert_eq!(loaded.markers.include_tag, "import");

    let features: Vec<_> = loaded
        .root()
        .children_named("feature")
        .filter_map(|f| f.get_attribute("name"))
        .collect();
    assert_eq!(features, vec!["billing", "reports", "search"]);
}

#[test]
fn test_custom_marker_attribute_slots() {
    // With different attribute slots the `root`/`include` attributes are inert,
    // so `<import>` is an ordinary element and nothing is included.
    let loader = fixture_loader().with_options(
        LoadOptions::new()
            .with_root_attribute("data-root")
            .with_include_attribute("data-include"),
    );
    let loaded = loader.load("custom/app.xml").unwrap();
    assert_eq!(names(loaded.root()), vec!["import", "feature"]);
}

#[test]
fn test_root_include_marker() {
    let loaded = fixture_loader().load("root-include/app.xml").unwrap();
    assert_eq!(
        loaded.root(),
        &parse("<configuration><x/><y/></configuration>").unwrap()
    );
}

#[test]
fn test_depth_limit_aborts() {
    let loader = fixture_loader().with_options(LoadOptions::new().with_max_depth(1));
    let err = loader.load("nested/conf/app.xml").unwrap_err();
    assert!(
        matches!(err, LoadError::DepthExceeded { max_depth: 1, .. }),
        "Expected DepthExceeded, got: {:?}",
        err
    );
}

#[test]
fn test_missing_root_document() {
    let err = fixture_loader().load("nowhere/app.xml").unwrap_err();
    assert!(matches!(err, LoadError::NotFound { .. }));
    assert_eq!(err.to_diagnostic().code.as_deref(), Some("C-2-4"));
}

#[test]
fn test_load_file_with_absolute_path() {
    let loaded = load_file(fixture_path("basic/app.xml")).unwrap();
    assert_eq!(names(loaded.root()), vec!["a", "x", "y", "b"]);
}

#[test]
fn test_caching_source_gives_same_result() {
    let source = CachingSource::new(FileSystemSource::with_base_dir(fixture_path("")));
    let loader = ConfigLoader::new(&source);

    let first = loader.load("diamond/app.xml").unwrap();
    let second = loader.load("diamond/app.xml").unwrap();
    assert_eq!(first, second);
    // app, left, right, common
    assert_eq!(source.cached_len(), 4);
}

#[test]
fn test_concurrent_loads_are_independent() {
    let loader = fixture_loader();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| loader.load("nested/conf/app.xml")))
            .collect();
        for handle in handles {
            let loaded = handle.join().unwrap().unwrap();
            assert_eq!(loaded.root().element_count(), 6);
        }
    });
}
