//! Common test utilities for integration tests.
//!
//! This module provides a temporary workspace and fixture builders for
//! writing package configuration files.

use std::fs;
use std::path::{Path, PathBuf};

use package_config::path::normalize::normalize;
use serde_json::{json, Value};
use tempfile::TempDir;

/// A temporary directory tree, removed when dropped.
pub struct Workspace {
    _temp_dir: TempDir,
    root: PathBuf,
}

#[allow(dead_code)]
impl Workspace {
    /// Creates an empty workspace.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = normalize(temp_dir.path()).unwrap();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    /// Returns the workspace root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the path of `relative` inside the workspace.
    pub fn path(&self, relative: &str) -> PathBuf {
        if relative.is_empty() {
            self.root.clone()
        } else {
            self.root.join(relative)
        }
    }

    /// Creates the directory `relative` and its parents.
    pub fn mkdir(&self, relative: &str) -> PathBuf {
        let dir = self.path(relative);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Writes `.dart_tool/package_config.json` inside `relative`.
    pub fn write_structured(&self, relative: &str, config: &PackageConfigFixture) -> PathBuf {
        let tool = self.mkdir(relative).join(".dart_tool");
        fs::create_dir_all(&tool).unwrap();
        let file = tool.join("package_config.json");
        fs::write(&file, config.to_json_string()).unwrap();
        file
    }

    /// Writes `.packages` inside `relative`.
    pub fn write_legacy(&self, relative: &str, content: &str) -> PathBuf {
        let file = self.mkdir(relative).join(".packages");
        fs::write(&file, content).unwrap();
        file
    }

    /// Writes an arbitrary file.
    pub fn write_file(&self, relative: &str, content: &str) -> PathBuf {
        let file = self.path(relative);
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&file, content).unwrap();
        file
    }
}

/// Builder for structured configuration documents.
///
/// # Examples
///
/// ```no_run
/// # use common::PackageConfigFixture;
/// let text = PackageConfigFixture::new()
///     .package("app", "../", Some("lib/"))
///     .language_version("app", "3.0")
///     .to_json_string();
/// ```
#[derive(Clone)]
pub struct PackageConfigFixture {
    version: Value,
    packages: Vec<Value>,
    extra: Vec<(String, Value)>,
}

#[allow(dead_code)]
impl PackageConfigFixture {
    /// Creates a version 2 document with no packages.
    pub fn new() -> Self {
        Self {
            version: json!(2),
            packages: Vec::new(),
            extra: Vec::new(),
        }
    }

    /// Sets the `configVersion` value.
    pub fn version(mut self, version: Value) -> Self {
        self.version = version;
        self
    }

    /// Adds a package entry.
    pub fn package(mut self, name: &str, root: &str, package_uri: Option<&str>) -> Self {
        let mut entry = json!({"name": name, "rootUri": root});
        if let Some(package_uri) = package_uri {
            entry["packageUri"] = json!(package_uri);
        }
        self.packages.push(entry);
        self
    }

    /// Sets the language version of the package named `name`.
    pub fn language_version(mut self, name: &str, version: &str) -> Self {
        for entry in &mut self.packages {
            if entry["name"] == json!(name) {
                entry["languageVersion"] = json!(version);
            }
        }
        self
    }

    /// Adds an unrecognized top-level entry.
    pub fn extra(mut self, key: &str, value: Value) -> Self {
        self.extra.push((key.to_string(), value));
        self
    }

    /// Renders the document.
    pub fn to_json_string(&self) -> String {
        let mut document = json!({
            "configVersion": self.version,
            "packages": self.packages,
        });
        for (key, value) in &self.extra {
            document[key] = value.clone();
        }
        serde_json::to_string_pretty(&document).unwrap()
    }
}

impl Default for PackageConfigFixture {
    fn default() -> Self {
        Self::new()
    }
}
