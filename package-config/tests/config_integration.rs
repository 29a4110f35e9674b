//! Integration tests for loading, resolving and writing configurations.
//!
//! These tests read real files from a temporary workspace and exercise the
//! parser, the containment tree and the resolver together.

mod common;

use common::{PackageConfigFixture, Workspace};
use package_config::config::{legacy, parser, writer};
use package_config::error::{ConflictKind, ErrorCollector, ErrorKind};
use package_config::{ConfigLoader, Error, LanguageVersion, Package, PackageConfig};
use serde_json::{json, Map};
use url::Url;

fn file_url(path: &std::path::Path) -> Url {
    Url::from_file_path(path).unwrap()
}

fn dir_url(path: &std::path::Path) -> Url {
    Url::from_directory_path(path).unwrap()
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_structured_file_resolves_relative_roots() {
    let workspace = Workspace::new();
    let file = workspace.write_structured(
        "app",
        &PackageConfigFixture::new()
            .package("app", "../", Some("lib/"))
            .package("util", "../../util/", Some("lib/"))
            .language_version("app", "3.2")
            .extra("generator", json!("pub")),
    );

    let config = ConfigLoader::load_file(&file).unwrap();
    assert_eq!(config.version(), 2);
    assert_eq!(config.len(), 2);
    assert_eq!(config.extra_data()["generator"], json!("pub"));

    let app = config.package("app").unwrap();
    assert_eq!(app.root(), &dir_url(&workspace.path("app")));
    assert_eq!(
        app.package_uri_root(),
        &dir_url(&workspace.path("app/lib"))
    );
    assert_eq!(
        app.language_version(),
        Some(&LanguageVersion::new(3, 2).unwrap())
    );
    assert!(app.relative_root());

    let util = config.package("util").unwrap();
    assert_eq!(util.root(), &dir_url(&workspace.path("util")));
}

#[test]
fn test_legacy_file_resolves_against_its_location() {
    let workspace = Workspace::new();
    let file = workspace.write_legacy("proj", "# comment\n\nfoo:packages/foo/\nbar:file:///abs/bar/lib\n");

    let config = ConfigLoader::load_file(&file).unwrap();
    assert_eq!(config.version(), legacy::LEGACY_VERSION);

    let foo = config.package("foo").unwrap();
    assert_eq!(foo.root(), &dir_url(&workspace.path("proj/packages/foo")));
    assert_eq!(foo.package_uri_root(), foo.root());

    let bar = config.package("bar").unwrap();
    assert_eq!(bar.root().as_str(), "file:///abs/bar/lib/");
}

#[test]
fn test_structured_preferred_over_legacy_beside_it() {
    let workspace = Workspace::new();
    workspace.write_structured(
        "proj",
        &PackageConfigFixture::new().package("modern", "../", None),
    );
    let legacy_file = workspace.write_legacy("proj", "ancient:lib/\n");

    let config = ConfigLoader::load_file(&legacy_file).unwrap();
    assert_eq!(config.version(), 2);
    assert!(config.package("modern").is_some());
    assert!(config.package("ancient").is_none());
}

#[test]
fn test_load_file_returns_first_problem() {
    let workspace = Workspace::new();
    let file = workspace.write_legacy("proj", "no-colon-here\nok:lib/\n");

    let err = ConfigLoader::load_file(&file).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FormatInvalid);

    let mut errors = ErrorCollector::new();
    let config = ConfigLoader::load_file_with(&file, true, &mut errors);
    assert_eq!(errors.errors().len(), 1);
    assert!(config.package("ok").is_some());
}

#[test]
fn test_missing_file_is_io_error() {
    let workspace = Workspace::new();
    let err = ConfigLoader::load_file(&workspace.path("nothing/.packages")).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}

#[test]
fn test_parse_errors_are_accumulated() {
    let base = Url::parse("file:///p/.dart_tool/package_config.json").unwrap();
    let text = json!({
        "configVersion": "two",
        "packages": [
            {"name": "good", "rootUri": "../good/"},
            {"name": "bad name", "rootUri": "../bad/"},
            {"rootUri": "../anonymous/"},
            {"name": "versioned", "rootUri": "../v/", "languageVersion": "1.02"},
        ]
    })
    .to_string();

    let mut errors = ErrorCollector::new();
    let config = parser::parse(text.as_bytes(), &base, &mut errors);

    // version type, bad name, missing name, leading zero in version
    assert_eq!(errors.errors().len(), 4);
    assert!(errors
        .errors()
        .iter()
        .all(|e| e.kind() == ErrorKind::FormatInvalid));

    assert_eq!(config.version(), 2);
    assert!(config.package("good").is_some());
    assert!(config.package("bad name").is_none());
    let versioned = config.package("versioned").unwrap();
    assert_eq!(
        versioned.language_version(),
        Some(&LanguageVersion::Invalid("1.02".to_string()))
    );
}

#[test]
fn test_conflicting_roots_yield_empty_config() {
    let base = Url::parse("file:///p/.dart_tool/package_config.json").unwrap();
    let text = PackageConfigFixture::new()
        .package("outer", "../outer/", Some("lib/"))
        .package("inner", "../outer/lib/inner/", None)
        .to_json_string();

    let mut errors = ErrorCollector::new();
    let config = parser::parse(text.as_bytes(), &base, &mut errors);
    assert!(config.is_empty());
    assert_eq!(errors.errors().len(), 1);
    assert_eq!(errors.errors()[0].kind(), ErrorKind::ValidationConflict);
}

// ============================================================================
// Construction
// ============================================================================

fn package(name: &str, root: &str, package_uri_root: &str) -> Package {
    Package::builder(name, Url::parse(root).unwrap())
        .package_uri_root(Url::parse(package_uri_root).unwrap())
        .build()
        .unwrap()
}

#[test]
fn test_conflicts_name_both_packages() {
    let same_root = PackageConfig::new(
        2,
        vec![
            package("a", "file:///x/", "file:///x/lib/"),
            package("b", "file:///x/", "file:///x/"),
        ],
        Map::new(),
    )
    .unwrap_err();
    match same_root {
        Error::Conflict {
            kind,
            package,
            existing,
        } => {
            assert_eq!(kind, ConflictKind::SameRoot);
            let mut names = [package, existing];
            names.sort();
            assert_eq!(names, ["a".to_string(), "b".to_string()]);
        }
        other => panic!("unexpected error: {other}"),
    }

    let inside = PackageConfig::new(
        2,
        vec![
            package("a", "file:///x/", "file:///x/lib/"),
            package("b", "file:///x/lib/b/", "file:///x/lib/b/"),
        ],
        Map::new(),
    )
    .unwrap_err();
    let message = inside.to_string();
    assert!(message.contains("'a'") && message.contains("'b'"), "{message}");
}

#[test]
fn test_nested_package_outside_uri_root_is_allowed() {
    let config = PackageConfig::new(
        2,
        vec![
            package("a", "file:///x/", "file:///x/lib/"),
            package("b", "file:///x/tool/b/", "file:///x/tool/b/lib/"),
        ],
        Map::new(),
    )
    .unwrap();

    let in_b = Url::parse("file:///x/tool/b/bin/main.dart").unwrap();
    assert_eq!(config.package_of(&in_b).unwrap().name(), "b");
    let in_a = Url::parse("file:///x/tool/other.dart").unwrap();
    assert_eq!(config.package_of(&in_a).unwrap().name(), "a");
}

// ============================================================================
// Resolution
// ============================================================================

#[test]
fn test_resolve_and_reverse() {
    let config = PackageConfig::new(
        2,
        vec![package("foo", "file:///a/foo/", "file:///a/foo/lib/")],
        Map::new(),
    )
    .unwrap();

    let reference = Url::parse("package:foo/bar.dart").unwrap();
    let location = config.resolve(&reference).unwrap();
    assert_eq!(location.as_str(), "file:///a/foo/lib/bar.dart");
    assert_eq!(config.to_package_uri(&location).unwrap(), Some(reference));

    // Inside the root but outside lib/
    let test_file = Url::parse("file:///a/foo/test/x_test.dart").unwrap();
    assert_eq!(config.to_package_uri(&test_file).unwrap(), None);
    assert_eq!(config.package_of(&test_file).unwrap().name(), "foo");
}

#[test]
fn test_resolve_errors() {
    let config = PackageConfig::new(
        2,
        vec![package("foo", "file:///a/foo/", "file:///a/foo/lib/")],
        Map::new(),
    )
    .unwrap();

    let unknown = config
        .resolve(&Url::parse("package:bar/x.dart").unwrap())
        .unwrap_err();
    assert_eq!(unknown.kind(), ErrorKind::UnknownPackage);

    for bad in ["file:///a/foo/lib/x.dart", "package:/x.dart", "package:foo", "package:foo/x.dart?q"] {
        let err = config.resolve(&Url::parse(bad).unwrap()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentInvalid, "{bad}");
    }

    let err = config
        .to_package_uri(&Url::parse("package:foo/x.dart").unwrap())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ArgumentInvalid);
}

// ============================================================================
// Writing
// ============================================================================

#[test]
fn test_written_file_loads_back() {
    let workspace = Workspace::new();
    let source = workspace.write_structured(
        "app",
        &PackageConfigFixture::new()
            .package("app", "../", Some("lib/"))
            .package("dep", "file:///cache/dep/", Some("lib/"))
            .language_version("dep", "2.19")
            .extra("generator", json!({"name": "pub", "version": "3.0.0"})),
    );
    let config = ConfigLoader::load_file(&source).unwrap();

    let copy = workspace.path("moved/.dart_tool/package_config.json");
    let text = writer::to_json_string(&config, Some(&file_url(&copy))).unwrap();
    workspace.write_file("moved/.dart_tool/package_config.json", &text);

    let reloaded = ConfigLoader::load_file(&copy).unwrap();
    // Relative roots are rewritten against the new location.
    assert!(text.contains("\"rootUri\": \"../../app/\""), "{text}");
    assert_eq!(
        reloaded.package("app").unwrap().root(),
        &dir_url(&workspace.path("app"))
    );
    assert_eq!(
        reloaded.package("dep").unwrap(),
        config.package("dep").unwrap()
    );
    assert_eq!(reloaded.extra_data(), config.extra_data());
}

#[test]
fn test_legacy_writer_output_loads_back() {
    let workspace = Workspace::new();
    let source = workspace.write_legacy("proj", "foo:packages/foo/\n");
    let config = ConfigLoader::load_file(&source).unwrap();

    let text = writer::to_legacy_string(&config, Some(&file_url(&source)), Some("regenerated"));
    assert_eq!(text, "# regenerated\nfoo:packages/foo/\n");
}
