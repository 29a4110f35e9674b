//! Writing configurations back to text.
//!
//! Both formats can be produced. Locations are written relative to `base`
//! (the location the text will be stored at) where the package was read
//! with a relative root, so a written file can be moved along with the
//! packages it describes.

use std::fmt::Write as _;

use serde_json::{Map, Value};
use url::Url;

use super::{PackageConfig, MAX_VERSION};
use crate::package::Package;
use crate::path::relationship::relativize;

/// Builds the structured-format JSON document for `config`.
///
/// # Examples
///
/// ```
/// use package_config::config::writer::to_json_value;
/// use package_config::{Package, PackageConfig};
/// use serde_json::{json, Map};
/// use url::Url;
///
/// let foo = Package::builder("foo", Url::parse("file:///a/foo/").unwrap())
///     .package_uri_root(Url::parse("file:///a/foo/lib/").unwrap())
///     .build()
///     .unwrap();
/// let config = PackageConfig::new(2, vec![foo], Map::new()).unwrap();
///
/// assert_eq!(
///     to_json_value(&config, None),
///     json!({
///         "configVersion": 2,
///         "packages": [
///             {"name": "foo", "rootUri": "file:///a/foo/", "packageUri": "lib/"}
///         ]
///     })
/// );
/// ```
#[must_use]
pub fn to_json_value(config: &PackageConfig, base: Option<&Url>) -> Value {
    let packages: Vec<Value> = config
        .packages()
        .iter()
        .map(|package| package_entry(package, base))
        .collect();

    let mut object = Map::new();
    object.insert("configVersion".into(), Value::from(MAX_VERSION));
    object.insert("packages".into(), Value::Array(packages));
    for (key, value) in config.extra_data() {
        object.insert(key.clone(), value.clone());
    }
    Value::Object(object)
}

fn package_entry(package: &Package, base: Option<&Url>) -> Value {
    let root = match base {
        Some(base) if package.relative_root() => relativize(package.root(), base),
        _ => package.root().to_string(),
    };

    let mut entry = Map::new();
    entry.insert("name".into(), Value::from(package.name()));
    entry.insert("rootUri".into(), Value::from(root));
    if package.package_uri_root() != package.root() {
        entry.insert(
            "packageUri".into(),
            Value::from(relativize(package.package_uri_root(), package.root())),
        );
    }
    if let Some(version) = package.language_version() {
        entry.insert("languageVersion".into(), Value::from(version.to_string()));
    }
    for (key, value) in package.extra_data() {
        entry.insert(key.clone(), value.clone());
    }
    Value::Object(entry)
}

/// Writes `config` in the structured format, pretty-printed.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_string(config: &PackageConfig, base: Option<&Url>) -> serde_json::Result<String> {
    let mut text = serde_json::to_string_pretty(&to_json_value(config, base))?;
    text.push('\n');
    Ok(text)
}

/// Writes `config` in the legacy format.
///
/// Each line maps a package name to its package URI root, relative to
/// `base` when given. Language versions and extra data cannot be expressed
/// and are left out. An optional `comment` is written as leading `#` lines.
///
/// # Examples
///
/// ```
/// use package_config::config::writer::to_legacy_string;
/// use package_config::{Package, PackageConfig};
/// use serde_json::Map;
/// use url::Url;
///
/// let foo = Package::builder("foo", Url::parse("file:///a/foo/").unwrap())
///     .package_uri_root(Url::parse("file:///a/foo/lib/").unwrap())
///     .build()
///     .unwrap();
/// let config = PackageConfig::new(2, vec![foo], Map::new()).unwrap();
/// let base = Url::parse("file:///a/app/.packages").unwrap();
///
/// assert_eq!(
///     to_legacy_string(&config, Some(&base), Some("generated")),
///     "# generated\nfoo:../foo/lib/\n"
/// );
/// ```
#[must_use]
pub fn to_legacy_string(config: &PackageConfig, base: Option<&Url>, comment: Option<&str>) -> String {
    let mut text = String::new();
    if let Some(comment) = comment {
        for line in comment.lines() {
            let _ = writeln!(text, "# {line}");
        }
    }
    for package in config.packages() {
        let location = match base {
            Some(base) => relativize(package.package_uri_root(), base),
            None => package.package_uri_root().to_string(),
        };
        let _ = writeln!(text, "{}:{location}", package.name());
    }
    text
}
