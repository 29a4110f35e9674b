//! Package and language version types.
//!
//! A [`Package`] names a directory tree (its root) and the subdirectory from
//! which `package:` URIs for it are resolved (its package URI root).

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use url::Url;

use crate::error::{Error, ErrorSink, Result};
use crate::validation;

/// Keys of a package entry that are never kept as extra data.
pub const RESERVED_PACKAGE_KEYS: [&str; 4] = ["name", "rootUri", "packageUri", "languageVersion"];

/// A language version tag attached to a package.
///
/// A version that failed to parse is kept as [`LanguageVersion::Invalid`]
/// so that the original text survives a read/write cycle.
///
/// # Examples
///
/// ```
/// use package_config::LanguageVersion;
///
/// let version: LanguageVersion = "2.12".parse().unwrap();
/// assert_eq!(version, LanguageVersion::Valid { major: 2, minor: 12 });
/// assert_eq!(version.to_string(), "2.12");
///
/// assert!("2.x".parse::<LanguageVersion>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LanguageVersion {
    /// A well-formed `major.minor` version.
    Valid {
        /// Major version number.
        major: u32,
        /// Minor version number.
        minor: u32,
    },
    /// A version string that is not well-formed, kept verbatim.
    Invalid(String),
}

impl LanguageVersion {
    /// Creates a valid language version.
    ///
    /// # Errors
    ///
    /// Returns an error if either number exceeds
    /// [`validation::MAX_VERSION_NUMERAL`].
    pub fn new(major: u32, minor: u32) -> Result<Self> {
        if major > validation::MAX_VERSION_NUMERAL {
            return Err(Error::invalid_argument("major", major, "too large"));
        }
        if minor > validation::MAX_VERSION_NUMERAL {
            return Err(Error::invalid_argument("minor", minor, "too large"));
        }
        Ok(Self::Valid { major, minor })
    }

    /// Parses a language version, failing on malformed input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] describing the problem.
    pub fn parse(source: &str) -> Result<Self> {
        validation::parse_language_version(source)
            .map(|(major, minor)| Self::Valid { major, minor })
            .map_err(|message| Error::format(format!("invalid language version '{source}': {message}")))
    }

    /// Parses a language version, reporting problems to `sink` and returning
    /// [`LanguageVersion::Invalid`] instead of failing.
    pub fn parse_with(source: &str, sink: &mut dyn ErrorSink) -> Self {
        match Self::parse(source) {
            Ok(version) => version,
            Err(err) => {
                sink.report(err);
                Self::Invalid(source.to_string())
            }
        }
    }

    /// Returns true if this is a well-formed version.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    /// Returns the major number of a valid version.
    #[must_use]
    pub fn major(&self) -> Option<u32> {
        match self {
            Self::Valid { major, .. } => Some(*major),
            Self::Invalid(_) => None,
        }
    }

    /// Returns the minor number of a valid version.
    #[must_use]
    pub fn minor(&self) -> Option<u32> {
        match self {
            Self::Valid { minor, .. } => Some(*minor),
            Self::Invalid(_) => None,
        }
    }
}

/// Valid versions order numerically; an invalid version is only comparable
/// to an equal one.
impl PartialOrd for LanguageVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (
                Self::Valid { major, minor },
                Self::Valid {
                    major: other_major,
                    minor: other_minor,
                },
            ) => Some((major, minor).cmp(&(other_major, other_minor))),
            _ if self == other => Some(Ordering::Equal),
            _ => None,
        }
    }
}

impl fmt::Display for LanguageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid { major, minor } => write!(f, "{major}.{minor}"),
            Self::Invalid(source) => write!(f, "{source}"),
        }
    }
}

impl FromStr for LanguageVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for LanguageVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A single package in a configuration.
///
/// Packages are validated on construction and immutable afterwards.
///
/// # Examples
///
/// ```
/// use package_config::Package;
/// use url::Url;
///
/// let package = Package::builder("foo", Url::parse("file:///a/foo").unwrap())
///     .package_uri_root(Url::parse("file:///a/foo/lib/").unwrap())
///     .build()
///     .unwrap();
///
/// assert_eq!(package.root().as_str(), "file:///a/foo/");
/// assert_eq!(package.package_uri_root().as_str(), "file:///a/foo/lib/");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Package {
    name: String,
    root: Url,
    package_uri_root: Url,
    language_version: Option<LanguageVersion>,
    extra_data: Map<String, Value>,
    relative_root: bool,
}

impl Package {
    /// Creates a new package builder.
    #[must_use]
    pub fn builder(name: impl Into<String>, root: Url) -> PackageBuilder {
        PackageBuilder {
            name: name.into(),
            root,
            package_uri_root: None,
            language_version: None,
            extra_data: Map::new(),
            relative_root: false,
        }
    }

    /// Returns the package name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the root directory of the package. Always ends in `/`.
    #[must_use]
    pub const fn root(&self) -> &Url {
        &self.root
    }

    /// Returns the directory `package:` URIs of this package resolve against.
    ///
    /// Equal to [`Package::root`] or a directory inside it. Always ends in `/`.
    #[must_use]
    pub const fn package_uri_root(&self) -> &Url {
        &self.package_uri_root
    }

    /// Returns the language version, if one was given.
    #[must_use]
    pub const fn language_version(&self) -> Option<&LanguageVersion> {
        self.language_version.as_ref()
    }

    /// Returns unrecognized data attached to the package entry.
    #[must_use]
    pub const fn extra_data(&self) -> &Map<String, Value> {
        &self.extra_data
    }

    /// Returns whether the root was written relative to the configuration file.
    #[must_use]
    pub const fn relative_root(&self) -> bool {
        self.relative_root
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.root)
    }
}

/// Builder for creating `Package` instances.
#[derive(Debug)]
pub struct PackageBuilder {
    name: String,
    root: Url,
    package_uri_root: Option<Url>,
    language_version: Option<LanguageVersion>,
    extra_data: Map<String, Value>,
    relative_root: bool,
}

impl PackageBuilder {
    /// Sets the package URI root. Defaults to the root.
    #[must_use]
    pub fn package_uri_root(mut self, package_uri_root: Url) -> Self {
        self.package_uri_root = Some(package_uri_root);
        self
    }

    /// Sets the language version.
    #[must_use]
    pub fn language_version(mut self, language_version: Option<LanguageVersion>) -> Self {
        self.language_version = language_version;
        self
    }

    /// Sets the extra data. Reserved keys are dropped.
    #[must_use]
    pub fn extra_data(mut self, extra_data: Map<String, Value>) -> Self {
        self.extra_data = extra_data;
        self
    }

    /// Records that the root was given relative to the configuration file.
    #[must_use]
    pub const fn relative_root(mut self, relative_root: bool) -> Self {
        self.relative_root = relative_root;
        self
    }

    /// Builds the package.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if:
    /// - The name is not a valid package name
    /// - The root or package URI root is a `package:` URI, is not
    ///   hierarchical, or has a query or fragment
    /// - The package URI root is not inside the root
    ///
    /// # Examples
    ///
    /// ```
    /// use package_config::Package;
    /// use url::Url;
    ///
    /// // Package URI root outside the root
    /// let result = Package::builder("foo", Url::parse("file:///a/foo/").unwrap())
    ///     .package_uri_root(Url::parse("file:///a/bar/").unwrap())
    ///     .build();
    /// assert!(result.is_err());
    ///
    /// // Invalid name
    /// let result = Package::builder("foo/bar", Url::parse("file:///a/").unwrap()).build();
    /// assert!(result.is_err());
    /// ```
    pub fn build(self) -> Result<Package> {
        validation::check_package_name("name", &self.name)?;

        validation::check_directory_uri("root", &self.root)?;
        let root = validation::ensure_trailing_slash(self.root);

        let package_uri_root = match self.package_uri_root {
            Some(uri) => {
                validation::check_directory_uri("package URI root", &uri)?;
                let uri = validation::ensure_trailing_slash(uri);
                if !uri.as_str().starts_with(root.as_str()) {
                    return Err(Error::invalid_argument(
                        "package URI root",
                        &uri,
                        format!("must be inside the package root {root}"),
                    ));
                }
                uri
            }
            None => root.clone(),
        };

        let mut extra_data = self.extra_data;
        for key in RESERVED_PACKAGE_KEYS {
            extra_data.remove(key);
        }

        Ok(Package {
            name: self.name,
            root,
            package_uri_root,
            language_version: self.language_version,
            extra_data,
            relative_root: self.relative_root,
        })
    }
}
