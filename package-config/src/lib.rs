#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # package-config
//!
//! A library for resolving `package:` URIs through package configuration
//! files.
//!
//! A package configuration maps package names to directories. It is read
//! from `.dart_tool/package_config.json` (structured JSON) or `.packages`
//! (legacy line format), and used to turn `package:name/path` references
//! into locations and back.
//!
//! ## Core Types
//!
//! - [`PackageConfig`] and [`Package`]: Validated configurations
//! - [`ConfigLoader`]: Reading configuration files
//! - [`find_nearest`] and [`build_context_tree`]: Discovery on the filesystem
//! - [`Error`], [`Result`] and [`ErrorSink`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use package_config::{Package, PackageConfig};
//! use serde_json::Map;
//! use url::Url;
//!
//! let foo = Package::builder("foo", Url::parse("file:///a/foo/").unwrap())
//!     .package_uri_root(Url::parse("file:///a/foo/lib/").unwrap())
//!     .build()
//!     .unwrap();
//! let config = PackageConfig::new(2, vec![foo], Map::new()).unwrap();
//!
//! let reference = Url::parse("package:foo/bar.dart").unwrap();
//! let location = config.resolve(&reference).unwrap();
//! assert_eq!(location.as_str(), "file:///a/foo/lib/bar.dart");
//! assert_eq!(config.to_package_uri(&location).unwrap(), Some(reference));
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod logging;
pub mod package;
pub mod path;
pub mod validation;

// Re-export key types at crate root for convenience
pub use config::{ConfigLoader, PackageConfig};
pub use discovery::{build_context_tree, find_nearest, ContextNode, DiscoveryOptions};
pub use error::{Error, ErrorCollector, ErrorSink, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use package::{LanguageVersion, Package};
pub use path::PathRelationship;
