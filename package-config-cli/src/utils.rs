//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including path resolution and configuration loading.

use crate::error::CliError;
use package_config::discovery::{find_nearest_with, DiscoveryOptions};
use package_config::error::{ErrorCollector, ErrorKind};
use package_config::path::normalize::normalize;
use package_config::{ConfigLoader, PackageConfig};
use std::env;
use std::path::{Path, PathBuf};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
#[allow(dead_code)] // Fields used via pattern matching in main.rs
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Explicit configuration file, bypassing discovery.
    pub config: Option<PathBuf>,

    /// Ignore configurations older than this version.
    pub min_version: u32,

    /// Only look in the starting directory.
    pub no_parent_search: bool,
}

impl GlobalOptions {
    /// Discovery settings derived from the global flags.
    pub fn discovery_options(&self) -> DiscoveryOptions {
        DiscoveryOptions {
            recursive: !self.no_parent_search,
            min_version: self.min_version,
            prefer_newest: true,
        }
    }
}

/// Resolve a path, using CWD if not specified.
///
/// Paths are normalized but NOT canonicalized: they are made absolute and
/// `~` is expanded, but symlinks are not followed.
pub fn resolve_path(path: Option<PathBuf>) -> Result<PathBuf, CliError> {
    let path_to_resolve = match path {
        Some(p) => p,
        None => env::current_dir()?,
    };

    normalize_path(&path_to_resolve)
}

/// Normalize a path (make absolute, expand ~, etc.) without following symlinks.
pub fn normalize_path(path: &Path) -> Result<PathBuf, CliError> {
    normalize(path).map_err(|e| CliError::InvalidArguments(e.to_string()))
}

/// Logs problems that did not stop the command.
pub fn warn_problems(errors: ErrorCollector) {
    for error in errors.into_errors() {
        log::warn!("{error}");
    }
}

/// Load the configuration that applies to `directory`.
///
/// An explicit `--config` file wins and must load cleanly. Otherwise the
/// nearest configuration is discovered; problems in it are logged as
/// warnings.
pub fn load_configuration(
    global: &GlobalOptions,
    directory: &Path,
) -> Result<PackageConfig, CliError> {
    if let Some(ref path) = global.config {
        let path = normalize_path(path)?;
        log::debug!("Using configuration file {}", path.display());
        return ConfigLoader::load_file(&path).map_err(CliError::from);
    }

    let mut errors = ErrorCollector::new();
    let found = find_nearest_with(directory, &global.discovery_options(), &mut errors)
        .map_err(|e| match e.kind() {
            ErrorKind::ArgumentInvalid => CliError::InvalidArguments(e.to_string()),
            _ => CliError::from(e),
        })?;
    warn_problems(errors);

    found.ok_or_else(|| {
        CliError::SemanticFailure(format!(
            "No package configuration found for {}",
            directory.display()
        ))
    })
}
