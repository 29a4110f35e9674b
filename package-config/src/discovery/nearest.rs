//! Walking up to the nearest configuration.

use std::path::Path;

use log::debug;
use url::Url;

use super::{load_local, load_local_uri, DiscoveryOptions};
use crate::config::{ContentLoader, PackageConfig};
use crate::error::{ErrorCollector, ErrorSink, Result};
use crate::path::normalize::normalize;
use crate::validation::ensure_trailing_slash;

/// Finds the configuration that applies to `directory`.
///
/// Uses the default [`DiscoveryOptions`].
///
/// # Errors
///
/// Returns an error if `directory` cannot be normalized, or the first
/// problem reported while reading the configuration that was found.
///
/// # Examples
///
/// ```no_run
/// use package_config::discovery::find_nearest;
/// use std::path::Path;
///
/// if let Some(config) = find_nearest(Path::new("/work/app/lib")).unwrap() {
///     println!("{} packages", config.len());
/// }
/// ```
pub fn find_nearest(directory: &Path) -> Result<Option<PackageConfig>> {
    let mut errors = ErrorCollector::new();
    let config = find_nearest_with(directory, &DiscoveryOptions::default(), &mut errors)?;
    errors.into_result(config)
}

/// Finds the configuration that applies to `directory`.
///
/// The directory itself is checked first, then each parent up to the
/// filesystem root unless `options.recursive` is off. A directory that does
/// not exist has no configuration.
///
/// # Errors
///
/// Returns an error if the options are invalid or `directory` cannot be
/// normalized. Problems reading configurations go to `sink`.
pub fn find_nearest_with(
    directory: &Path,
    options: &DiscoveryOptions,
    sink: &mut dyn ErrorSink,
) -> Result<Option<PackageConfig>> {
    options.validate()?;
    let start = normalize(directory)?;
    if !start.is_dir() {
        debug!("{} is not a directory", start.display());
        return Ok(None);
    }

    let mut current = start.as_path();
    loop {
        debug!("Looking for package configuration in {}", current.display());
        if let Some(config) = load_local(current, options, sink) {
            return Ok(Some(config));
        }
        if !options.recursive {
            return Ok(None);
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => return Ok(None),
        }
    }
}

/// Finds the configuration that applies to the directory `location`,
/// reading through `loader`.
///
/// Works like [`find_nearest_with`] on URIs: the parent of `a/b/` is `a/`,
/// and the search ends at the path root. Loader failures are reported to
/// `sink` and treated as absent files.
///
/// # Errors
///
/// Returns an error if the options are invalid.
///
/// # Examples
///
/// ```
/// use package_config::config::ContentLoader;
/// use package_config::discovery::{find_nearest_uri, DiscoveryOptions};
/// use package_config::error::ErrorCollector;
/// use package_config::Result;
/// use url::Url;
///
/// let loader = |uri: &Url| -> Result<Option<Vec<u8>>> {
///     Ok((uri.as_str() == "https://host/app/.packages").then(|| b"app:lib/\n".to_vec()))
/// };
/// let start = Url::parse("https://host/app/lib/src/").unwrap();
///
/// let mut errors = ErrorCollector::new();
/// let config = find_nearest_uri(&start, &loader, &DiscoveryOptions::default(), &mut errors)
///     .unwrap()
///     .unwrap();
/// assert_eq!(
///     config.package("app").unwrap().root().as_str(),
///     "https://host/app/lib/"
/// );
/// ```
pub fn find_nearest_uri(
    location: &Url,
    loader: &dyn ContentLoader,
    options: &DiscoveryOptions,
    sink: &mut dyn ErrorSink,
) -> Result<Option<PackageConfig>> {
    options.validate()?;
    let mut current = ensure_trailing_slash(location.clone());
    loop {
        debug!("Looking for package configuration in {current}");
        if let Some(config) = load_local_uri(&current, loader, options, sink) {
            return Ok(Some(config));
        }
        if !options.recursive {
            return Ok(None);
        }
        match current.join("..") {
            Ok(parent) if parent != current => current = parent,
            _ => return Ok(None),
        }
    }
}
