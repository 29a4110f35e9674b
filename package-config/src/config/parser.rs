//! Parsing configuration text into a [`PackageConfig`].
//!
//! Two formats are supported and told apart by their first non-whitespace
//! byte: `{` starts the structured JSON format, anything else is the legacy
//! line-based format (see [`super::legacy`]).
//!
//! Parsing never stops at the first problem. Every missing or ill-typed
//! field is reported to the caller's [`ErrorSink`] and treated as absent, so
//! a single bad package entry does not hide the rest of the document.

use serde_json::{Map, Value};
use url::Url;

use super::{legacy, PackageConfig, MAX_VERSION};
use crate::error::{Error, ErrorSink};
use crate::package::{LanguageVersion, Package};
use crate::path::relationship::resolve_reference;

/// The two on-disk encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON object with `configVersion` and `packages`.
    Structured,
    /// One `name:location` line per package.
    Legacy,
}

impl ConfigFormat {
    /// Detects the format of `bytes` from the first non-whitespace byte.
    ///
    /// # Examples
    ///
    /// ```
    /// use package_config::config::parser::ConfigFormat;
    ///
    /// assert_eq!(ConfigFormat::detect(b"  \n{}"), ConfigFormat::Structured);
    /// assert_eq!(ConfigFormat::detect(b"foo:lib/"), ConfigFormat::Legacy);
    /// assert_eq!(ConfigFormat::detect(b""), ConfigFormat::Legacy);
    /// ```
    #[must_use]
    pub fn detect(bytes: &[u8]) -> Self {
        match bytes.iter().find(|b| !b.is_ascii_whitespace()) {
            Some(b'{') => Self::Structured,
            _ => Self::Legacy,
        }
    }
}

/// Parses `bytes` in whichever format they are in.
///
/// `base` is the location the bytes were read from; relative locations in
/// the content are resolved against it.
pub fn parse(bytes: &[u8], base: &Url, sink: &mut dyn ErrorSink) -> PackageConfig {
    match ConfigFormat::detect(bytes) {
        ConfigFormat::Structured => parse_json(bytes, base, sink),
        ConfigFormat::Legacy => legacy::parse(bytes, base, sink),
    }
}

/// Parses structured-format `bytes`.
///
/// Invalid JSON is reported and yields the empty configuration.
///
/// # Examples
///
/// ```
/// use package_config::config::parser::parse_json;
/// use package_config::error::ErrorCollector;
/// use url::Url;
///
/// let base = Url::parse("file:///p/.dart_tool/package_config.json").unwrap();
/// let mut errors = ErrorCollector::new();
/// let config = parse_json(
///     br#"{"configVersion": 2, "packages": [{"name": "p", "rootUri": "../"}]}"#,
///     &base,
///     &mut errors,
/// );
/// assert!(errors.is_empty());
/// assert_eq!(config.package("p").unwrap().root().as_str(), "file:///p/");
/// ```
pub fn parse_json(bytes: &[u8], base: &Url, sink: &mut dyn ErrorSink) -> PackageConfig {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(document) => parse_json_value(document, base, sink),
        Err(e) => {
            sink.report(Error::format_at(format!("invalid JSON: {e}"), base, None));
            PackageConfig::empty()
        }
    }
}

/// Builds a configuration from an already decoded JSON document.
pub fn parse_json_value(document: Value, base: &Url, sink: &mut dyn ErrorSink) -> PackageConfig {
    let Value::Object(mut object) = document else {
        sink.report(Error::format_at(
            format!("not a JSON object, found {}", json_type(&document)),
            base,
            None,
        ));
        return PackageConfig::empty();
    };

    let version = parse_version(object.remove("configVersion"), base, sink);

    let mut packages = Vec::new();
    match object.remove("packages") {
        Some(Value::Array(entries)) => {
            for (index, entry) in entries.into_iter().enumerate() {
                match entry {
                    Value::Object(entry) => {
                        if let Some(package) = parse_package(entry, index, base, sink) {
                            packages.push(package);
                        }
                    }
                    other => sink.report(Error::format_at(
                        format!("package entry {index} is not a JSON object, found {}", json_type(&other)),
                        base,
                        None,
                    )),
                }
            }
        }
        Some(other) => sink.report(Error::format_at(
            format!("packages must be a JSON array, found {}", json_type(&other)),
            base,
            None,
        )),
        None => sink.report(Error::format_at("missing packages list", base, None)),
    }

    match PackageConfig::new(version, packages, object) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("discarding configuration {base}: {e}");
            sink.report(e);
            PackageConfig::empty()
        }
    }
}

fn parse_version(value: Option<Value>, base: &Url, sink: &mut dyn ErrorSink) -> u32 {
    let Some(value) = value else {
        sink.report(Error::format_at("missing configVersion entry", base, None));
        return MAX_VERSION;
    };
    let Some(number) = value.as_i64() else {
        sink.report(Error::format_at(
            format!("configVersion must be an integer, found {}", json_type(&value)),
            base,
            None,
        ));
        return MAX_VERSION;
    };
    match u32::try_from(number) {
        Ok(version) if (1..=MAX_VERSION).contains(&version) => version,
        _ => {
            sink.report(Error::format_at(
                format!("unsupported configVersion {number}"),
                base,
                None,
            ));
            MAX_VERSION
        }
    }
}

fn parse_package(
    mut entry: Map<String, Value>,
    index: usize,
    base: &Url,
    sink: &mut dyn ErrorSink,
) -> Option<Package> {
    let name = take_string(&mut entry, "name", index, base, sink);
    let root_text = take_string(&mut entry, "rootUri", index, base, sink);
    let package_uri_text = take_string(&mut entry, "packageUri", index, base, sink);
    let language_text = take_string(&mut entry, "languageVersion", index, base, sink);

    let Some(name) = name else {
        sink.report(Error::format_at(
            format!("missing name entry in package {index}"),
            base,
            None,
        ));
        return None;
    };
    let Some(mut root_text) = root_text else {
        sink.report(Error::format_at(
            format!("missing rootUri entry in package '{name}'"),
            base,
            None,
        ));
        return None;
    };

    if !root_text.ends_with('/') {
        root_text.push('/');
    }
    let (root, relative_root) = match resolve_reference(base, &root_text) {
        Ok(resolved) => resolved,
        Err(e) => {
            sink.report(Error::format_at(
                format!("invalid rootUri '{root_text}' in package '{name}': {e}"),
                base,
                None,
            ));
            return None;
        }
    };

    let mut builder = Package::builder(name.clone(), root.clone()).relative_root(relative_root);

    if let Some(mut package_uri_text) = package_uri_text {
        if !package_uri_text.ends_with('/') {
            package_uri_text.push('/');
        }
        match resolve_reference(&root, &package_uri_text) {
            Ok((package_uri_root, _)) => builder = builder.package_uri_root(package_uri_root),
            Err(e) => {
                sink.report(Error::format_at(
                    format!("invalid packageUri '{package_uri_text}' in package '{name}': {e}"),
                    base,
                    None,
                ));
                return None;
            }
        }
    }

    let language_version = language_text.map(|text| LanguageVersion::parse_with(&text, sink));

    match builder
        .language_version(language_version)
        .extra_data(entry)
        .build()
    {
        Ok(package) => Some(package),
        Err(e) => {
            sink.report(e.in_content(base, None));
            None
        }
    }
}

/// Removes `key` from `entry`, reporting it if present but not a string.
fn take_string(
    entry: &mut Map<String, Value>,
    key: &str,
    index: usize,
    base: &Url,
    sink: &mut dyn ErrorSink,
) -> Option<String> {
    match entry.remove(key)? {
        Value::String(value) => Some(value),
        other => {
            sink.report(Error::format_at(
                format!("{key} in package {index} must be a string, found {}", json_type(&other)),
                base,
                None,
            ));
            None
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
