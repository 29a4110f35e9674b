//! Path normalization and conversion to URIs.
//!
//! Discovery works on absolute, lexically normalized directories. This
//! module provides functionality to:
//! - Expand tilde (~) to the home directory
//! - Convert relative paths to absolute paths
//! - Resolve `.` and `..` components
//! - Turn the result into `file:` URIs

use std::env;
use std::path::{Component, Path, PathBuf};

use url::Url;

use crate::error::{Error, Result};

/// Expand tilde (~) to the home directory.
///
/// This function handles `~` and `~/path` but does not support `~user` syntax.
///
/// # Errors
///
/// Returns an error if:
/// - The path contains invalid UTF-8
/// - The home directory cannot be determined
/// - The path uses `~user` syntax (not supported)
///
/// # Examples
///
/// ```
/// use package_config::path::normalize::expand_tilde;
/// use std::path::Path;
///
/// let expanded = expand_tilde(Path::new("~/project")).unwrap();
/// assert!(expanded.is_absolute());
/// assert!(expanded.ends_with("project"));
///
/// let expanded = expand_tilde(Path::new("/absolute")).unwrap();
/// assert_eq!(expanded, Path::new("/absolute"));
/// ```
pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    let path_str = path
        .to_str()
        .ok_or_else(|| Error::invalid_argument("path", path.display(), "contains invalid UTF-8"))?;

    if !path_str.starts_with('~') {
        return Ok(path.to_path_buf());
    }

    let home = home::home_dir().ok_or_else(|| {
        Error::invalid_argument("path", path_str, "cannot determine home directory")
    })?;

    if path_str == "~" {
        Ok(home)
    } else if path_str.starts_with("~/") || path_str.starts_with("~\\") {
        Ok(home.join(&path_str[2..]))
    } else {
        Err(Error::invalid_argument(
            "path",
            path_str,
            "~user syntax is not supported; use ~ or ~/path",
        ))
    }
}

/// Resolve `.` and `..` components in an absolute path.
///
/// # Errors
///
/// Returns an error if the path contains too many `..` components that would
/// escape the root directory.
///
/// # Examples
///
/// ```
/// use package_config::path::normalize::resolve_components;
/// use std::path::{Path, PathBuf};
///
/// let resolved = resolve_components(Path::new("/a/./b/../c")).unwrap();
/// assert_eq!(resolved, PathBuf::from("/a/c"));
/// ```
pub fn resolve_components(path: &Path) -> Result<PathBuf> {
    let mut result = PathBuf::new();
    let mut has_root = false;

    for component in path.components() {
        match component {
            Component::RootDir => {
                result.push(component);
                has_root = true;
            }
            Component::Prefix(prefix) => {
                result.push(prefix.as_os_str());
                has_root = true;
            }
            Component::Normal(c) => result.push(c),
            Component::CurDir => {}
            Component::ParentDir => {
                if !result.pop() {
                    return Err(Error::invalid_argument(
                        "path",
                        path.display(),
                        "too many '..' components (escapes root)",
                    ));
                }
            }
        }
    }

    if has_root && result.as_os_str().is_empty() {
        result.push(Component::RootDir);
    }

    Ok(result)
}

/// Normalize a path to absolute form.
///
/// Expands a leading tilde, makes the path absolute against the current
/// directory, then resolves `.` and `..`. Symlinks are not followed.
///
/// # Errors
///
/// Returns an error if tilde expansion fails, the current directory cannot
/// be determined, or the path escapes the root.
///
/// # Examples
///
/// ```no_run
/// use package_config::path::normalize::normalize;
/// use std::path::Path;
///
/// let normalized = normalize(Path::new("./src")).unwrap();
/// assert!(normalized.is_absolute());
/// ```
pub fn normalize(path: &Path) -> Result<PathBuf> {
    let expanded = expand_tilde(path)?;

    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        let cwd = env::current_dir().map_err(|e| Error::Io {
            location: ".".to_string(),
            source: e,
        })?;
        cwd.join(expanded)
    };

    resolve_components(&absolute)
}

/// Converts an absolute directory path to a `file:` URI ending in `/`.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if the path is not absolute.
///
/// # Examples
///
/// ```
/// # #[cfg(unix)] {
/// use package_config::path::normalize::directory_url;
/// use std::path::Path;
///
/// let uri = directory_url(Path::new("/proj/app")).unwrap();
/// assert_eq!(uri.as_str(), "file:///proj/app/");
/// # }
/// ```
pub fn directory_url(path: &Path) -> Result<Url> {
    Url::from_directory_path(path)
        .map_err(|()| Error::invalid_argument("directory", path.display(), "must be absolute"))
}

/// Converts an absolute file path to a `file:` URI.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if the path is not absolute.
pub fn file_url(path: &Path) -> Result<Url> {
    Url::from_file_path(path)
        .map_err(|()| Error::invalid_argument("file", path.display(), "must be absolute"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_tilde_home() {
        let home = home::home_dir().unwrap();
        assert_eq!(expand_tilde(Path::new("~")).unwrap(), home);
        assert_eq!(expand_tilde(Path::new("~/test")).unwrap(), home.join("test"));
    }

    #[test]
    fn test_expand_tilde_user_syntax_not_supported() {
        assert!(expand_tilde(Path::new("~user/path")).is_err());
    }

    #[test]
    fn test_resolve_components_multiple_parent() {
        let resolved = resolve_components(Path::new("/a/b/../../c")).unwrap();
        assert_eq!(resolved, PathBuf::from("/c"));
    }

    #[test]
    fn test_resolve_components_root_only() {
        let resolved = resolve_components(Path::new("/")).unwrap();
        assert_eq!(resolved, PathBuf::from("/"));
    }

    #[test]
    fn test_resolve_components_too_many_parent() {
        assert!(resolve_components(Path::new("/a/../..")).is_err());
    }

    #[test]
    fn test_normalize_relative() {
        let cwd = env::current_dir().unwrap();
        let normalized = normalize(Path::new("relative/./path")).unwrap();
        assert!(normalized.is_absolute());
        assert!(normalized.starts_with(&cwd));
        assert!(normalized.ends_with("relative/path"));
    }

    #[test]
    #[cfg(unix)]
    fn test_directory_and_file_urls() {
        assert_eq!(
            directory_url(Path::new("/a/b")).unwrap().as_str(),
            "file:///a/b/"
        );
        assert_eq!(
            file_url(Path::new("/a/b.dart")).unwrap().as_str(),
            "file:///a/b.dart"
        );
        assert!(directory_url(Path::new("relative")).is_err());
    }
}
