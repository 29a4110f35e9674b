//! Resolution between `package:` URIs and file locations.

use std::borrow::Cow;

use url::Url;

use super::PackageConfig;
use crate::error::{Error, Result};
use crate::validation;

impl PackageConfig {
    /// Resolves a `package:` URI to the location it refers to.
    ///
    /// The path after the package name is resolved against the package's
    /// package URI root.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `package_uri` is not a valid
    /// `package:` URI, and [`Error::UnknownPackage`] if the configuration has
    /// no package of that name.
    ///
    /// # Examples
    ///
    /// ```
    /// use package_config::{Package, PackageConfig};
    /// use serde_json::Map;
    /// use url::Url;
    ///
    /// let foo = Package::builder("foo", Url::parse("file:///a/foo/").unwrap())
    ///     .package_uri_root(Url::parse("file:///a/foo/lib/").unwrap())
    ///     .build()
    ///     .unwrap();
    /// let config = PackageConfig::new(2, vec![foo], Map::new()).unwrap();
    ///
    /// let uri = Url::parse("package:foo/bar.dart").unwrap();
    /// assert_eq!(config.resolve(&uri).unwrap().as_str(), "file:///a/foo/lib/bar.dart");
    ///
    /// let unknown = Url::parse("package:baz/bar.dart").unwrap();
    /// assert!(config.resolve(&unknown).is_err());
    /// ```
    pub fn resolve(&self, package_uri: &Url) -> Result<Url> {
        let (name, rest) = validation::check_package_uri(package_uri)?;
        let package = self.package(name).ok_or_else(|| Error::UnknownPackage {
            name: name.to_string(),
        })?;
        // A leading segment with a ':' would otherwise parse as a scheme.
        let first_segment = rest.split('/').next().unwrap_or_default();
        let reference = if first_segment.contains(':') || rest.starts_with('/') {
            Cow::Owned(format!("./{rest}"))
        } else {
            Cow::Borrowed(rest)
        };
        package
            .package_uri_root()
            .join(&reference)
            .map_err(|e| Error::invalid_argument("package URI", package_uri, e.to_string()))
    }

    /// Finds the `package:` URI that resolves to `uri`.
    ///
    /// Returns `Ok(None)` if no package contains `uri`, or if the owning
    /// package's root contains it but its package URI root does not.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `uri` is itself a `package:` URI
    /// or has a query or fragment.
    ///
    /// # Examples
    ///
    /// ```
    /// use package_config::{Package, PackageConfig};
    /// use serde_json::Map;
    /// use url::Url;
    ///
    /// let foo = Package::builder("foo", Url::parse("file:///a/foo/").unwrap())
    ///     .package_uri_root(Url::parse("file:///a/foo/lib/").unwrap())
    ///     .build()
    ///     .unwrap();
    /// let config = PackageConfig::new(2, vec![foo], Map::new()).unwrap();
    ///
    /// let file = Url::parse("file:///a/foo/lib/src/bar.dart").unwrap();
    /// let package_uri = config.to_package_uri(&file).unwrap().unwrap();
    /// assert_eq!(package_uri.as_str(), "package:foo/src/bar.dart");
    ///
    /// // Inside the package, but not importable.
    /// let test = Url::parse("file:///a/foo/test/bar_test.dart").unwrap();
    /// assert!(config.to_package_uri(&test).unwrap().is_none());
    /// ```
    pub fn to_package_uri(&self, uri: &Url) -> Result<Option<Url>> {
        if uri.scheme() == "package" {
            return Err(Error::invalid_argument(
                "URI",
                uri,
                "must not be a package: URI",
            ));
        }
        if uri.query().is_some() || uri.fragment().is_some() {
            return Err(Error::invalid_argument(
                "URI",
                uri,
                "must not have a query or fragment part",
            ));
        }

        let Some(package) = self.package_of(uri) else {
            return Ok(None);
        };
        let Some(relative) = uri
            .as_str()
            .strip_prefix(package.package_uri_root().as_str())
            .filter(|rest| !rest.is_empty())
        else {
            return Ok(None);
        };

        let text = format!("package:{}/{relative}", package.name());
        Url::parse(&text)
            .map(Some)
            .map_err(|e| Error::invalid_argument("URI", uri, e.to_string()))
    }
}
