//! Well-formedness checks for package names, URIs and language versions.
//!
//! All functions here are pure: they inspect their input and either accept
//! it or describe precisely what is wrong with it.

use url::Url;

use crate::error::{Error, Result};

/// Characters allowed in a package name.
const VALID_NAME_CHARACTERS: &[u8] =
    b"!$&'()*+,-.0123456789;=@ABCDEFGHIJKLMNOPQRSTUVWXYZ_abcdefghijklmnopqrstuvwxyz~";

/// Largest value accepted for either numeral of a language version.
pub const MAX_VERSION_NUMERAL: u32 = 0x7FFF_FFFF;

/// Returns the byte index of the first problem in `name`, or `None` if the
/// name is valid.
///
/// A name consisting solely of `.` characters (including the empty name)
/// reports `name.len()`.
///
/// # Examples
///
/// ```
/// use package_config::validation::invalid_name_index;
///
/// assert_eq!(invalid_name_index("foo_bar"), None);
/// assert_eq!(invalid_name_index("foo/bar"), Some(3));
/// assert_eq!(invalid_name_index(".."), Some(2));
/// assert_eq!(invalid_name_index(""), Some(0));
/// ```
#[must_use]
pub fn invalid_name_index(name: &str) -> Option<usize> {
    let mut has_non_dot = false;
    for (index, byte) in name.bytes().enumerate() {
        if !VALID_NAME_CHARACTERS.contains(&byte) {
            return Some(index);
        }
        has_non_dot |= byte != b'.';
    }
    if has_non_dot {
        None
    } else {
        Some(name.len())
    }
}

/// Returns true if `name` is a valid package name.
///
/// # Examples
///
/// ```
/// use package_config::validation::is_valid_package_name;
///
/// assert!(is_valid_package_name("foo"));
/// assert!(is_valid_package_name(".foo."));
/// assert!(!is_valid_package_name("..."));
/// assert!(!is_valid_package_name("f o o"));
/// ```
#[must_use]
pub fn is_valid_package_name(name: &str) -> bool {
    invalid_name_index(name).is_none()
}

/// Validates a package name.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] naming the offending character, or
/// explaining that the name is empty or all dots.
pub fn check_package_name(field: &str, name: &str) -> Result<()> {
    match invalid_name_index(name) {
        None => Ok(()),
        Some(_) if name.is_empty() => Err(Error::invalid_argument(
            field,
            name,
            "package names must not be empty",
        )),
        Some(index) if index == name.len() => Err(Error::invalid_argument(
            field,
            name,
            "package names must contain at least one non-'.' character",
        )),
        Some(index) => Err(Error::invalid_argument(
            field,
            name,
            format!("not a valid package name, invalid character at index {index}"),
        )),
    }
}

/// Validates a `package:` URI and splits it into package name and path.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if the URI is not a `package:` URI,
/// has a host, query or fragment, lacks a `name/` prefix, or the name is
/// not a valid package name.
///
/// # Examples
///
/// ```
/// use package_config::validation::check_package_uri;
/// use url::Url;
///
/// let uri = Url::parse("package:foo/src/bar.dart").unwrap();
/// assert_eq!(check_package_uri(&uri).unwrap(), ("foo", "src/bar.dart"));
///
/// let bad = Url::parse("package:foo").unwrap();
/// assert!(check_package_uri(&bad).is_err());
/// ```
pub fn check_package_uri(uri: &Url) -> Result<(&str, &str)> {
    const FIELD: &str = "package URI";
    if uri.scheme() != "package" {
        return Err(Error::invalid_argument(FIELD, uri, "not a package: URI"));
    }
    if uri.has_host() {
        return Err(Error::invalid_argument(
            FIELD,
            uri,
            "package URIs must not have a host part",
        ));
    }
    if uri.query().is_some() {
        return Err(Error::invalid_argument(
            FIELD,
            uri,
            "package URIs must not have a query part",
        ));
    }
    if uri.fragment().is_some() {
        return Err(Error::invalid_argument(
            FIELD,
            uri,
            "package URIs must not have a fragment part",
        ));
    }

    let path = uri.path();
    if path.starts_with('/') {
        return Err(Error::invalid_argument(
            FIELD,
            uri,
            "package URIs must not start with a '/'",
        ));
    }
    let Some(slash) = path.find('/') else {
        return Err(Error::invalid_argument(
            FIELD,
            uri,
            "package URIs must start with the package name followed by a '/'",
        ));
    };

    let name = &path[..slash];
    check_package_name(FIELD, name)?;
    Ok((name, &path[slash + 1..]))
}

/// Validates a URI used as a package directory (root or package URI root).
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if the URI is a `package:` URI, is not
/// hierarchical, or has a query or fragment.
pub fn check_directory_uri(field: &str, uri: &Url) -> Result<()> {
    if uri.scheme() == "package" {
        return Err(Error::invalid_argument(
            field,
            uri,
            "must not be a package: URI",
        ));
    }
    if uri.cannot_be_a_base() {
        return Err(Error::invalid_argument(
            field,
            uri,
            "must be a hierarchical URI",
        ));
    }
    if uri.query().is_some() || uri.fragment().is_some() {
        return Err(Error::invalid_argument(
            field,
            uri,
            "must not have a query or fragment",
        ));
    }
    Ok(())
}

/// Returns `uri` with a trailing `/` appended to its path if missing.
///
/// # Examples
///
/// ```
/// use package_config::validation::ensure_trailing_slash;
/// use url::Url;
///
/// let uri = ensure_trailing_slash(Url::parse("file:///a/foo").unwrap());
/// assert_eq!(uri.as_str(), "file:///a/foo/");
/// ```
#[must_use]
pub fn ensure_trailing_slash(mut uri: Url) -> Url {
    if !uri.path().ends_with('/') {
        let path = format!("{}/", uri.path());
        uri.set_path(&path);
    }
    uri
}

/// Parses a `major.minor` language version.
///
/// Each numeral is `0` or a non-zero digit followed by digits, with a value
/// of at most [`MAX_VERSION_NUMERAL`].
///
/// # Errors
///
/// Returns a description of the first problem found.
///
/// # Examples
///
/// ```
/// use package_config::validation::parse_language_version;
///
/// assert_eq!(parse_language_version("2.12"), Ok((2, 12)));
/// assert!(parse_language_version("2.012").is_err());
/// assert!(parse_language_version("2").is_err());
/// assert!(parse_language_version("2.12.0").is_err());
/// ```
pub fn parse_language_version(source: &str) -> std::result::Result<(u32, u32), String> {
    let bytes = source.as_bytes();
    let mut index = 0;

    let major = read_numeral(bytes, &mut index)?;
    match bytes.get(index) {
        None => return Err("missing '.minor' in language version".to_string()),
        Some(b'.') => index += 1,
        Some(_) => return Err(format!("unexpected character at index {index}")),
    }
    let minor = read_numeral(bytes, &mut index)?;
    if index != bytes.len() {
        return Err(format!("unexpected trailing character at index {index}"));
    }
    Ok((major, minor))
}

fn read_numeral(bytes: &[u8], index: &mut usize) -> std::result::Result<u32, String> {
    let start = *index;
    let mut value: u32 = 0;
    while let Some(&byte) = bytes.get(*index) {
        if !byte.is_ascii_digit() {
            break;
        }
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u32::from(byte - b'0')))
            .filter(|v| *v <= MAX_VERSION_NUMERAL)
            .ok_or_else(|| "language version number too large".to_string())?;
        *index += 1;
    }
    if *index == start {
        return Err(format!("missing number at index {start}"));
    }
    if bytes[start] == b'0' && *index > start + 1 {
        return Err(format!("leading zero not allowed at index {start}"));
    }
    Ok(value)
}
