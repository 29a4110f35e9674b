//! Loading configuration files.
//!
//! Files can be read straight from the filesystem through [`ConfigLoader`],
//! or from any URI through a caller-supplied [`ContentLoader`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use url::Url;

use super::{parser, PackageConfig, CONFIG_FILE_NAME, LEGACY_FILE_NAME, TOOL_DIRECTORY};
use crate::error::{Error, ErrorCollector, ErrorSink, Result};
use crate::path::normalize::{file_url, normalize};

/// Fetches the content at a URI.
///
/// `Ok(None)` means there is nothing at `uri`. Any other failure to read is
/// an error. Closures of type `Fn(&Url) -> Result<Option<Vec<u8>>>` are
/// loaders too.
///
/// # Examples
///
/// ```
/// use package_config::config::ContentLoader;
/// use package_config::Result;
/// use url::Url;
///
/// let loader = |uri: &Url| -> Result<Option<Vec<u8>>> {
///     Ok((uri.path() == "/p/.packages").then(|| b"p:lib/\n".to_vec()))
/// };
/// let hit = Url::parse("file:///p/.packages").unwrap();
/// let miss = Url::parse("file:///q/.packages").unwrap();
/// assert!(loader.load(&hit).unwrap().is_some());
/// assert!(loader.load(&miss).unwrap().is_none());
/// ```
pub trait ContentLoader {
    /// Returns the bytes at `uri`, or `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the content exists but cannot be read.
    fn load(&self, uri: &Url) -> Result<Option<Vec<u8>>>;
}

impl<F> ContentLoader for F
where
    F: Fn(&Url) -> Result<Option<Vec<u8>>>,
{
    fn load(&self, uri: &Url) -> Result<Option<Vec<u8>>> {
        self(uri)
    }
}

/// A [`ContentLoader`] for `file:` URIs.
///
/// URIs with any other scheme are treated as not existing.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileLoader;

impl ContentLoader for FileLoader {
    fn load(&self, uri: &Url) -> Result<Option<Vec<u8>>> {
        if uri.scheme() != "file" {
            return Ok(None);
        }
        let Ok(path) = uri.to_file_path() else {
            return Ok(None);
        };
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(Error::Io {
                location: uri.to_string(),
                source,
            }),
        }
    }
}

/// Loads configuration files.
///
/// # Examples
///
/// ```no_run
/// use package_config::config::ConfigLoader;
/// use std::path::Path;
///
/// let config = ConfigLoader::load_file(Path::new(".dart_tool/package_config.json")).unwrap();
/// println!("Found {} packages", config.len());
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads the configuration file at `path`.
    ///
    /// A `.packages` file is replaced by the structured file beside it when
    /// one exists.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, or the first
    /// problem found in its content.
    pub fn load_file(path: &Path) -> Result<PackageConfig> {
        let mut errors = ErrorCollector::new();
        let config = Self::load_file_with(path, true, &mut errors);
        errors.into_result(config)
    }

    /// Loads the configuration file at `path`, reporting problems to `sink`.
    ///
    /// With `prefer_newest`, a file named `.packages` is replaced by
    /// `.dart_tool/package_config.json` in the same directory when that
    /// exists. A read failure is reported and yields the empty
    /// configuration.
    pub fn load_file_with(
        path: &Path,
        prefer_newest: bool,
        sink: &mut dyn ErrorSink,
    ) -> PackageConfig {
        let path = if prefer_newest {
            Self::upgrade_legacy_path(path)
        } else {
            path.to_path_buf()
        };
        Self::try_load_file(&path, sink).unwrap_or_else(PackageConfig::empty)
    }

    /// Loads the configuration file at `path` as is.
    ///
    /// Returns `None`, after reporting to `sink`, when the file cannot be
    /// read. Problems in the content are reported and the configuration
    /// built from what remains is returned.
    pub fn try_load_file(path: &Path, sink: &mut dyn ErrorSink) -> Option<PackageConfig> {
        let absolute = match normalize(path) {
            Ok(absolute) => absolute,
            Err(e) => {
                sink.report(e);
                return None;
            }
        };
        let base = match file_url(&absolute) {
            Ok(base) => base,
            Err(e) => {
                sink.report(e);
                return None;
            }
        };

        let bytes = match fs::read(&absolute) {
            Ok(bytes) => bytes,
            Err(source) => {
                sink.report(Error::Io {
                    location: absolute.display().to_string(),
                    source,
                });
                return None;
            }
        };

        debug!("Loading package configuration from {}", absolute.display());
        Some(parser::parse(&bytes, &base, sink))
    }

    /// Loads the configuration at `uri` through `loader`.
    ///
    /// With `prefer_newest`, a URI whose last segment is `.packages` is
    /// replaced by `.dart_tool/package_config.json` beside it when the
    /// loader finds content there. Missing content is reported as
    /// [`Error::Io`] and yields the empty configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use package_config::config::ConfigLoader;
    /// use package_config::error::ErrorCollector;
    /// use package_config::Result;
    /// use url::Url;
    ///
    /// let loader = |uri: &Url| -> Result<Option<Vec<u8>>> {
    ///     Ok(match uri.path() {
    ///         "/p/.packages" => Some(b"old:lib/\n".to_vec()),
    ///         "/p/.dart_tool/package_config.json" => Some(
    ///             br#"{"configVersion":2,"packages":[{"name":"new","rootUri":"../"}]}"#.to_vec(),
    ///         ),
    ///         _ => None,
    ///     })
    /// };
    /// let uri = Url::parse("file:///p/.packages").unwrap();
    ///
    /// let mut errors = ErrorCollector::new();
    /// let config = ConfigLoader::load_uri(&uri, &loader, true, &mut errors);
    /// assert!(errors.is_empty());
    /// assert!(config.package("new").is_some());
    ///
    /// let config = ConfigLoader::load_uri(&uri, &loader, false, &mut errors);
    /// assert!(config.package("old").is_some());
    /// ```
    pub fn load_uri(
        uri: &Url,
        loader: &dyn ContentLoader,
        prefer_newest: bool,
        sink: &mut dyn ErrorSink,
    ) -> PackageConfig {
        if prefer_newest && is_legacy_uri(uri) {
            if let Ok(structured) = uri.join(&format!("{TOOL_DIRECTORY}/{CONFIG_FILE_NAME}")) {
                match loader.load(&structured) {
                    Ok(Some(bytes)) => {
                        debug!("Preferring {structured} over {uri}");
                        return parser::parse(&bytes, &structured, sink);
                    }
                    Ok(None) => {}
                    Err(e) => sink.report(e),
                }
            }
        }

        match loader.load(uri) {
            Ok(Some(bytes)) => parser::parse(&bytes, uri, sink),
            Ok(None) => {
                sink.report(Error::not_found(uri));
                PackageConfig::empty()
            }
            Err(e) => {
                sink.report(e);
                PackageConfig::empty()
            }
        }
    }

    fn upgrade_legacy_path(path: &Path) -> PathBuf {
        if path.file_name().is_some_and(|name| name == LEGACY_FILE_NAME) {
            let structured = path
                .with_file_name(TOOL_DIRECTORY)
                .join(CONFIG_FILE_NAME);
            if structured.is_file() {
                debug!(
                    "Preferring {} over {}",
                    structured.display(),
                    path.display()
                );
                return structured;
            }
        }
        path.to_path_buf()
    }
}

fn is_legacy_uri(uri: &Url) -> bool {
    uri.path_segments()
        .and_then(|mut segments| segments.next_back())
        .is_some_and(|last| last == LEGACY_FILE_NAME)
}
