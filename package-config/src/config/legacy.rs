//! Parser for the legacy line-based format.
//!
//! Each non-empty line that does not start with `#` maps a package name to
//! the location of its root:
//!
//! ```text
//! # Generated by a package manager.
//! foo:../foo/lib/
//! bar:file:///home/me/.cache/bar-1.0.0/lib/
//! ```
//!
//! Relative locations are resolved against the location of the file itself.
//! The legacy format has no separate package URI root: it always equals the
//! root.

use std::collections::HashSet;

use serde_json::Map;
use url::Url;

use super::PackageConfig;
use crate::error::{Error, ErrorSink};
use crate::package::Package;
use crate::path::relationship::resolve_reference;
use crate::validation;

/// Configuration version produced by the legacy format.
pub const LEGACY_VERSION: u32 = 1;

/// Parses legacy-format `bytes` read from `base`.
///
/// Malformed lines are reported to `sink` and skipped. If the remaining
/// packages conflict with one another, the conflict is reported and the
/// empty configuration is returned.
///
/// # Examples
///
/// ```
/// use package_config::config::legacy;
/// use package_config::error::ErrorCollector;
/// use url::Url;
///
/// let base = Url::parse("file:///proj/.packages").unwrap();
/// let mut errors = ErrorCollector::new();
/// let config = legacy::parse(b"# comment\nfoo:packages/foo/\n", &base, &mut errors);
///
/// assert!(errors.is_empty());
/// assert_eq!(config.version(), 1);
/// let foo = config.package("foo").unwrap();
/// assert_eq!(foo.root().as_str(), "file:///proj/packages/foo/");
/// ```
pub fn parse(bytes: &[u8], base: &Url, sink: &mut dyn ErrorSink) -> PackageConfig {
    let text = match std::str::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            sink.report(Error::format_at(
                "configuration is not valid UTF-8",
                base,
                Some(e.valid_up_to()),
            ));
            return PackageConfig::empty();
        }
    };

    let mut packages = Vec::new();
    let mut seen = HashSet::new();
    let mut offset = 0;

    for raw_line in text.split_inclusive('\n') {
        let start = offset;
        offset += raw_line.len();

        let line = raw_line.trim_end_matches(['\n', '\r']);
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some(colon) = line.find(':') else {
            sink.report(Error::format_at("no ':' on line", base, Some(start)));
            continue;
        };

        let name = &line[..colon];
        if validation::check_package_name("package name", name).is_err() {
            sink.report(Error::format_at(
                format!("not a valid package name '{name}'"),
                base,
                Some(start),
            ));
            continue;
        }

        let location = match &line[colon + 1..] {
            "" => "./",
            location => location,
        };
        let (root, relative) = match resolve_reference(base, location) {
            Ok(resolved) => resolved,
            Err(e) => {
                sink.report(Error::format_at(
                    format!("invalid location for package '{name}': {e}"),
                    base,
                    Some(start + colon + 1),
                ));
                continue;
            }
        };

        if root.scheme() == "package" {
            sink.report(Error::format_at(
                format!("package URI as location for package '{name}'"),
                base,
                Some(start + colon + 1),
            ));
            continue;
        }
        if root.query().is_some() || root.fragment().is_some() {
            sink.report(Error::format_at(
                format!("location for package '{name}' must not have a query or fragment"),
                base,
                Some(start + colon + 1),
            ));
            continue;
        }
        if !seen.insert(name) {
            sink.report(Error::format_at(
                format!("package '{name}' occurs more than once"),
                base,
                Some(start),
            ));
            continue;
        }

        let root = validation::ensure_trailing_slash(root);
        match Package::builder(name, root).relative_root(relative).build() {
            Ok(package) => packages.push(package),
            Err(e) => sink.report(e.in_content(base, Some(start))),
        }
    }

    match PackageConfig::new(LEGACY_VERSION, packages, Map::new()) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("discarding legacy configuration {base}: {e}");
            sink.report(e);
            PackageConfig::empty()
        }
    }
}
