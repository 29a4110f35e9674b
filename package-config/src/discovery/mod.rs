//! Finding the configurations that apply to directories.
//!
//! A directory defines a configuration when it holds
//! `.dart_tool/package_config.json` or `.packages`. Two ways of finding them
//! are provided:
//!
//! - [`find_nearest`] walks up from a directory to the first one that
//!   defines a configuration.
//! - [`build_context_tree`] walks down from a root and records every
//!   configuration-defining directory, so later lookups need no filesystem
//!   access.
//!
//! # Examples
//!
//! ```no_run
//! use package_config::discovery::find_nearest;
//! use std::path::Path;
//!
//! match find_nearest(Path::new(".")).unwrap() {
//!     Some(config) => println!("{} packages", config.len()),
//!     None => println!("no package configuration"),
//! }
//! ```

mod context;
mod nearest;

use std::path::Path;

use log::debug;
use url::Url;

use crate::config::legacy::LEGACY_VERSION;
use crate::config::{
    parser, ContentLoader, FileLoader, PackageConfig, CONFIG_FILE_NAME, LEGACY_FILE_NAME,
    MAX_VERSION, TOOL_DIRECTORY,
};
use crate::error::{Error, ErrorSink, Result};
use crate::path::normalize::directory_url;

pub use context::{build_context_tree, build_context_tree_with, ContextNode};
pub use nearest::{find_nearest, find_nearest_uri, find_nearest_with};

/// Settings for discovery.
///
/// # Examples
///
/// ```
/// use package_config::discovery::DiscoveryOptions;
///
/// let options = DiscoveryOptions {
///     min_version: 2,
///     ..DiscoveryOptions::default()
/// };
/// assert!(options.recursive);
/// assert!(options.prefer_newest);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscoveryOptions {
    /// Keep looking in parent directories when the start directory defines
    /// no configuration.
    pub recursive: bool,

    /// Ignore configurations with a lower version. Legacy files have
    /// version 1.
    pub min_version: u32,

    /// When a directory holds both files, use the structured one. When
    /// false, the legacy file is used.
    pub prefer_newest: bool,
}

impl DiscoveryOptions {
    /// Checks that the options can select a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `min_version` is outside
    /// `1..=MAX_VERSION`.
    pub fn validate(&self) -> Result<()> {
        if (1..=MAX_VERSION).contains(&self.min_version) {
            Ok(())
        } else {
            Err(Error::invalid_argument(
                "min_version",
                self.min_version,
                format!("must be in the range 1 to {MAX_VERSION}"),
            ))
        }
    }
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            recursive: true,
            min_version: 1,
            prefer_newest: true,
        }
    }
}

/// The directory filter used when none is given: every directory except
/// `.dart_tool`.
///
/// # Examples
///
/// ```
/// use package_config::discovery::default_directory_filter;
/// use std::path::Path;
///
/// assert!(default_directory_filter(Path::new("/p/lib")));
/// assert!(!default_directory_filter(Path::new("/p/.dart_tool")));
/// ```
#[must_use]
pub fn default_directory_filter(directory: &Path) -> bool {
    directory
        .file_name()
        .map_or(true, |name| name != TOOL_DIRECTORY)
}

/// Loads the configuration defined by `directory` itself, if any.
///
/// Parent directories are not searched. Read failures are reported to
/// `sink` and count as no configuration; problems in the content are
/// reported but the configuration still counts.
#[must_use]
pub fn load_local(
    directory: &Path,
    options: &DiscoveryOptions,
    sink: &mut dyn ErrorSink,
) -> Option<PackageConfig> {
    match directory_url(directory) {
        Ok(uri) => load_local_uri(&uri, &FileLoader, options, sink),
        Err(e) => {
            sink.report(e);
            None
        }
    }
}

pub(crate) fn load_local_uri(
    directory: &Url,
    loader: &dyn ContentLoader,
    options: &DiscoveryOptions,
    sink: &mut dyn ErrorSink,
) -> Option<PackageConfig> {
    let structured = directory
        .join(&format!("{TOOL_DIRECTORY}/{CONFIG_FILE_NAME}"))
        .ok();
    let legacy = if options.min_version <= LEGACY_VERSION {
        directory.join(LEGACY_FILE_NAME).ok()
    } else {
        None
    };

    let candidates = if options.prefer_newest {
        [structured, legacy]
    } else {
        [legacy, structured]
    };

    for uri in candidates.into_iter().flatten() {
        let bytes = match loader.load(&uri) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => continue,
            Err(e) => {
                sink.report(e);
                continue;
            }
        };

        let config = parser::parse(&bytes, &uri, sink);
        if config.version() < options.min_version {
            debug!(
                "Skipping {uri}: version {} is below {}",
                config.version(),
                options.min_version
            );
            continue;
        }
        debug!("Found package configuration {uri}");
        return Some(config);
    }
    None
}
