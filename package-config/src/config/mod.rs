//! Package configurations.
//!
//! This module provides the [`PackageConfig`] model along with everything
//! needed to get one from, and back to, text:
//! - Structured (JSON) and legacy (line-based) parsing with
//!   accumulate-and-continue error reporting
//! - Loading from files or through a [`ContentLoader`]
//! - Writing both formats
//! - Resolution of `package:` URIs in both directions
//!
//! # Examples
//!
//! Parsing a structured configuration and resolving a URI:
//!
//! ```
//! use package_config::config::{parser, PackageConfig};
//! use package_config::error::ErrorCollector;
//! use url::Url;
//!
//! let text = br#"{
//!   "configVersion": 2,
//!   "packages": [
//!     { "name": "foo", "rootUri": "../foo/", "packageUri": "lib/" }
//!   ]
//! }"#;
//! let base = Url::parse("file:///a/app/.dart_tool/package_config.json").unwrap();
//! let mut errors = ErrorCollector::new();
//! let config = parser::parse(text, &base, &mut errors);
//! assert!(errors.is_empty());
//!
//! let uri = Url::parse("package:foo/bar.dart").unwrap();
//! assert_eq!(
//!     config.resolve(&uri).unwrap().as_str(),
//!     "file:///a/app/foo/lib/bar.dart"
//! );
//! ```

pub mod legacy;
pub mod loader;
pub mod parser;
mod resolver;
pub mod tree;
pub mod writer;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

use std::collections::HashMap;

use serde_json::{Map, Value};
use url::Url;

use crate::error::{ConflictKind, Error, Result};
use crate::package::Package;

pub use loader::{ConfigLoader, ContentLoader, FileLoader};
pub use tree::PackageTree;

/// Highest configuration version understood.
pub const MAX_VERSION: u32 = 2;

/// Keys of the top-level object that are never kept as extra data.
pub const RESERVED_CONFIG_KEYS: [&str; 2] = ["configVersion", "packages"];

/// Name of the tool directory holding the structured configuration file.
pub const TOOL_DIRECTORY: &str = ".dart_tool";

/// File name of the structured configuration inside [`TOOL_DIRECTORY`].
pub const CONFIG_FILE_NAME: &str = "package_config.json";

/// File name of the legacy configuration at a project root.
pub const LEGACY_FILE_NAME: &str = ".packages";

/// A validated set of packages.
///
/// Package names and roots are unique, and no package root lies inside
/// another package's package URI root. The containment tree used for
/// reverse lookups is built once on construction.
///
/// # Examples
///
/// ```
/// use package_config::{Package, PackageConfig};
/// use serde_json::Map;
/// use url::Url;
///
/// let foo = Package::builder("foo", Url::parse("file:///a/foo/").unwrap())
///     .build()
///     .unwrap();
/// let config = PackageConfig::new(2, vec![foo], Map::new()).unwrap();
///
/// assert_eq!(config.version(), 2);
/// assert!(config.package("foo").is_some());
/// assert!(config.package("bar").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct PackageConfig {
    version: u32,
    packages: Vec<Package>,
    by_name: HashMap<String, usize>,
    tree: PackageTree,
    extra_data: Map<String, Value>,
}

impl PackageConfig {
    /// Creates a configuration from a version, packages and extra data.
    ///
    /// Reserved keys are removed from `extra_data`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for a version outside
    /// `1..=MAX_VERSION`, and [`Error::Conflict`] naming both packages when
    /// two packages share a name or root, or one package root lies inside
    /// another package's package URI root.
    pub fn new(version: u32, packages: Vec<Package>, extra_data: Map<String, Value>) -> Result<Self> {
        if !(1..=MAX_VERSION).contains(&version) {
            return Err(Error::invalid_argument(
                "version",
                version,
                format!("must be in the range 1 to {MAX_VERSION}"),
            ));
        }

        let mut by_name: HashMap<String, usize> = HashMap::with_capacity(packages.len());
        for (index, package) in packages.iter().enumerate() {
            if let Some(&existing) = by_name.get(package.name()) {
                return Err(Error::Conflict {
                    kind: ConflictKind::SameName,
                    package: package.name().to_string(),
                    existing: packages[existing].name().to_string(),
                });
            }
            by_name.insert(package.name().to_string(), index);
        }

        let tree = PackageTree::build(&packages)?;

        let mut extra_data = extra_data;
        for key in RESERVED_CONFIG_KEYS {
            extra_data.remove(key);
        }

        Ok(Self {
            version,
            packages,
            by_name,
            tree,
            extra_data,
        })
    }

    /// Returns the configuration that stands for "no configuration".
    ///
    /// It has version [`MAX_VERSION`] and no packages.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            version: MAX_VERSION,
            packages: Vec::new(),
            by_name: HashMap::new(),
            tree: PackageTree::default(),
            extra_data: Map::new(),
        }
    }

    /// Returns the configuration format version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Returns the packages in the order they were given.
    #[must_use]
    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    /// Returns the package named `name`.
    #[must_use]
    pub fn package(&self, name: &str) -> Option<&Package> {
        self.by_name.get(name).map(|&index| &self.packages[index])
    }

    /// Returns the number of packages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Returns true if the configuration has no packages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Returns unrecognized top-level data.
    #[must_use]
    pub const fn extra_data(&self) -> &Map<String, Value> {
        &self.extra_data
    }

    /// Returns the most specific package whose root contains `uri`.
    ///
    /// # Examples
    ///
    /// ```
    /// use package_config::{Package, PackageConfig};
    /// use serde_json::Map;
    /// use url::Url;
    ///
    /// let foo = Package::builder("foo", Url::parse("file:///a/foo/").unwrap())
    ///     .build()
    ///     .unwrap();
    /// let config = PackageConfig::new(2, vec![foo], Map::new()).unwrap();
    ///
    /// let file = Url::parse("file:///a/foo/test/x_test.dart").unwrap();
    /// assert_eq!(config.package_of(&file).unwrap().name(), "foo");
    ///
    /// let other = Url::parse("file:///a/bar/x.dart").unwrap();
    /// assert!(config.package_of(&other).is_none());
    /// ```
    #[must_use]
    pub fn package_of(&self, uri: &Url) -> Option<&Package> {
        self.tree
            .package_of(&self.packages, uri.as_str())
            .map(|index| &self.packages[index])
    }
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for PackageConfig {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
            && self.packages == other.packages
            && self.extra_data == other.extra_data
    }
}
