//! Relationships between paths and between URIs.
//!
//! Directory containment for the filesystem side is component-wise, so
//! `/a/foo` never contains `/a/foobar`. On the URI side every directory URI
//! ends in `/`, so a string prefix is already segment-aligned.

use std::path::{Path, PathBuf};

use url::{ParseError, Url};

/// Relationship between two paths.
///
/// # Examples
///
/// ```
/// use package_config::path::PathRelationship;
/// use std::path::Path;
///
/// let parent = Path::new("/home/user");
/// let child = Path::new("/home/user/project");
///
/// assert_eq!(
///     PathRelationship::between(parent, child),
///     PathRelationship::Ancestor
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathRelationship {
    /// The first path is an ancestor of the second.
    Ancestor,

    /// The first path is a descendant of the second.
    Descendant,

    /// The paths are the same.
    Same,

    /// Neither path contains the other.
    Unrelated,
}

impl PathRelationship {
    /// Determine the relationship between two paths.
    ///
    /// Trailing separators are ignored; components are compared one by one.
    ///
    /// # Examples
    ///
    /// ```
    /// use package_config::path::PathRelationship;
    /// use std::path::Path;
    ///
    /// assert_eq!(
    ///     PathRelationship::between(Path::new("/a/b"), Path::new("/a")),
    ///     PathRelationship::Descendant
    /// );
    /// assert_eq!(
    ///     PathRelationship::between(Path::new("/a/"), Path::new("/a")),
    ///     PathRelationship::Same
    /// );
    /// assert_eq!(
    ///     PathRelationship::between(Path::new("/a/foo"), Path::new("/a/foobar")),
    ///     PathRelationship::Unrelated
    /// );
    /// ```
    #[must_use]
    pub fn between(path1: &Path, path2: &Path) -> Self {
        let p1 = normalize_for_comparison(path1);
        let p2 = normalize_for_comparison(path2);

        if p1 == p2 {
            return Self::Same;
        }
        if p2.starts_with(&p1) {
            return Self::Ancestor;
        }
        if p1.starts_with(&p2) {
            return Self::Descendant;
        }
        Self::Unrelated
    }

    /// Check if a path is within a directory (descendant or same).
    ///
    /// # Examples
    ///
    /// ```
    /// use package_config::path::PathRelationship;
    /// use std::path::Path;
    ///
    /// let dir = Path::new("/home/user");
    /// assert!(PathRelationship::is_within(Path::new("/home/user/a.txt"), dir));
    /// assert!(PathRelationship::is_within(dir, dir));
    /// assert!(!PathRelationship::is_within(Path::new("/home"), dir));
    /// ```
    #[must_use]
    pub fn is_within(path: &Path, directory: &Path) -> bool {
        matches!(
            Self::between(path, directory),
            Self::Descendant | Self::Same
        )
    }
}

/// Strips a trailing separator so `/a/` and `/a` compare equal.
fn normalize_for_comparison(path: &Path) -> PathBuf {
    let mut p = path.to_path_buf();

    if let Some(s) = p.to_str() {
        if s.len() > 1 && (s.ends_with('/') || s.ends_with('\\')) {
            p = PathBuf::from(&s[..s.len() - 1]);
        }
    }

    p
}

/// Resolves `reference` against `base`.
///
/// Returns the resolved URI and whether `reference` was relative.
///
/// # Errors
///
/// Returns the parse error if `reference` is not a valid URI reference.
///
/// # Examples
///
/// ```
/// use package_config::path::relationship::resolve_reference;
/// use url::Url;
///
/// let base = Url::parse("file:///proj/.dart_tool/package_config.json").unwrap();
///
/// let (uri, relative) = resolve_reference(&base, "../foo/").unwrap();
/// assert_eq!(uri.as_str(), "file:///proj/foo/");
/// assert!(relative);
///
/// let (uri, relative) = resolve_reference(&base, "file:///cache/bar/").unwrap();
/// assert_eq!(uri.as_str(), "file:///cache/bar/");
/// assert!(!relative);
/// ```
pub fn resolve_reference(base: &Url, reference: &str) -> Result<(Url, bool), ParseError> {
    match Url::parse(reference) {
        Ok(uri) => Ok((uri, false)),
        Err(ParseError::RelativeUrlWithoutBase) => Ok((base.join(reference)?, true)),
        Err(e) => Err(e),
    }
}

/// Writes `uri` relative to `base` where possible.
///
/// Falls back to the absolute form when no relative form exists, such as
/// for URIs with a different scheme or host.
///
/// # Examples
///
/// ```
/// use package_config::path::relationship::relativize;
/// use url::Url;
///
/// let base = Url::parse("file:///proj/.dart_tool/package_config.json").unwrap();
/// let uri = Url::parse("file:///proj/foo/").unwrap();
/// assert_eq!(relativize(&uri, &base), "../foo/");
///
/// let remote = Url::parse("http://example.com/foo/").unwrap();
/// assert_eq!(relativize(&remote, &base), "http://example.com/foo/");
/// ```
#[must_use]
pub fn relativize(uri: &Url, base: &Url) -> String {
    if base.join("./").is_ok_and(|directory| directory == *uri) {
        return "./".to_string();
    }
    match base.make_relative(uri) {
        Some(relative) if relative.is_empty() || relative.starts_with('/') => uri.to_string(),
        Some(relative) => {
            // A leading segment with a ':' would otherwise parse as a scheme.
            let first_segment = relative.split('/').next().unwrap_or_default();
            if first_segment.contains(':') {
                format!("./{relative}")
            } else {
                relative
            }
        }
        None => uri.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relationship_ancestor() {
        assert_eq!(
            PathRelationship::between(Path::new("/a"), Path::new("/a/b")),
            PathRelationship::Ancestor
        );
        assert_eq!(
            PathRelationship::between(Path::new("/a/b"), Path::new("/a/b/c/d")),
            PathRelationship::Ancestor
        );
    }

    #[test]
    fn test_relationship_descendant() {
        assert_eq!(
            PathRelationship::between(Path::new("/a/b/c/d"), Path::new("/a/b")),
            PathRelationship::Descendant
        );
    }

    #[test]
    fn test_relationship_same_ignores_trailing_separator() {
        assert_eq!(
            PathRelationship::between(Path::new("/a/b/"), Path::new("/a/b")),
            PathRelationship::Same
        );
    }

    #[test]
    fn test_relationship_unrelated_sibling_prefix() {
        assert_eq!(
            PathRelationship::between(Path::new("/a/sub"), Path::new("/a/subdir")),
            PathRelationship::Unrelated
        );
        assert!(!PathRelationship::is_within(
            Path::new("/a/subdir/x"),
            Path::new("/a/sub")
        ));
    }

    #[test]
    fn test_resolve_reference_rejects_garbage() {
        let base = Url::parse("file:///proj/").unwrap();
        assert!(resolve_reference(&base, "http://[bad/").is_err());
    }

    #[test]
    fn test_relativize_same_directory() {
        let base = Url::parse("file:///proj/.packages").unwrap();
        let uri = Url::parse("file:///proj/lib/").unwrap();
        assert_eq!(relativize(&uri, &base), "lib/");
    }

    #[test]
    fn test_relativize_base_directory_itself() {
        let base = Url::parse("file:///proj/.packages").unwrap();
        let uri = Url::parse("file:///proj/").unwrap();
        let relative = relativize(&uri, &base);
        let (resolved, _) = resolve_reference(&base, &relative).unwrap();
        assert_eq!(relative, "./");
        assert_eq!(resolved, uri);
    }

    #[test]
    fn test_relativize_never_starts_with_slash() {
        let base = Url::parse("file:///proj/.dart_tool/package_config.json").unwrap();
        for target in ["file:///proj/.dart_tool/", "file:///proj/", "file:///", "file:///other/lib/"] {
            let uri = Url::parse(target).unwrap();
            let relative = relativize(&uri, &base);
            assert!(!relative.starts_with('/'), "{target} -> {relative}");
            let (resolved, _) = resolve_reference(&base, &relative).unwrap();
            assert_eq!(resolved, uri, "{target} -> {relative}");
        }
    }

    #[test]
    fn test_relativize_colon_in_first_segment() {
        let base = Url::parse("file:///proj/.packages").unwrap();
        let uri = Url::parse("file:///proj/c:lib/").unwrap();
        let relative = relativize(&uri, &base);
        assert_eq!(relative, "./c:lib/");
        let (resolved, _) = resolve_reference(&base, &relative).unwrap();
        assert_eq!(resolved, uri);
    }
}
