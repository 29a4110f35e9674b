//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing:
//! - Test environment setup with temporary directories
//! - Command builder helpers
//! - Configuration file fixtures

use assert_cmd::Command;
use serde_json::json;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test environment with an isolated project tree.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new, empty test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        Self {
            temp_dir,
            temp_path,
        }
    }

    /// Get a command builder for the binary.
    ///
    /// Environment variables that would change option defaults are cleared.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("package-config").expect("Failed to find binary");
        cmd.env_remove("PACKAGE_CONFIG_FILE")
            .env_remove("PACKAGE_CONFIG_MIN_VERSION")
            .env_remove("PACKAGE_CONFIG_LOG_MODE")
            .current_dir(&self.temp_path);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Create a subdirectory in the test environment.
    pub fn create_dir(&self, name: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::create_dir_all(&path).expect("Failed to create test directory");
        path
    }

    /// Write a file, creating parent directories.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Write `.dart_tool/package_config.json` in `dir`, with the given
    /// `(name, rootUri, packageUri)` entries.
    pub fn write_structured(&self, dir: &str, packages: &[(&str, &str, &str)]) -> PathBuf {
        let entries: Vec<_> = packages
            .iter()
            .map(|(name, root, package_uri)| {
                json!({"name": name, "rootUri": root, "packageUri": package_uri})
            })
            .collect();
        let document = json!({"configVersion": 2, "packages": entries});
        let text = serde_json::to_string_pretty(&document).expect("Failed to render fixture");
        self.write_file(&join(dir, ".dart_tool/package_config.json"), &text)
    }

    /// Write `.packages` in `dir`.
    pub fn write_legacy(&self, dir: &str, content: &str) -> PathBuf {
        self.write_file(&join(dir, ".packages"), content)
    }

    /// A project with an `app` package at `app/` and a `util` package at
    /// `util/`, configured in `app/.dart_tool/package_config.json`.
    pub fn sample_project(&self) -> PathBuf {
        self.create_dir("app/lib/src");
        self.create_dir("util/lib");
        self.write_file("app/lib/app.dart", "");
        self.write_file("app/test/app_test.dart", "");
        self.write_structured(
            "app",
            &[("app", "../", "lib/"), ("util", "../../util/", "lib/")],
        )
    }

    /// Run a command expected to succeed and return its stdout.
    pub fn stdout_of(&self, args: &[&str]) -> String {
        let output = self
            .command()
            .args(args)
            .output()
            .expect("Failed to run command");

        assert!(
            output.status.success(),
            "Command {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        String::from_utf8(output.stdout).expect("Invalid UTF-8 in output")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

fn join(dir: &str, file: &str) -> String {
    if dir.is_empty() {
        file.to_string()
    } else {
        format!("{dir}/{file}")
    }
}
