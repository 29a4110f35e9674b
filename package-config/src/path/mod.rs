//! Path and URI helpers shared by parsing and discovery.
//!
//! # Key Concepts
//!
//! ## Normalization
//!
//! Discovery needs absolute directories. [`normalize::normalize`] expands a
//! leading `~`, makes the path absolute against the current directory and
//! resolves `.` and `..` lexically, without following symlinks.
//!
//! ## Relationships
//!
//! [`PathRelationship`] compares directories component by component, which
//! is what the context tree uses to decide which node a directory belongs
//! to. The URI helpers in [`relationship`] resolve references from
//! configuration files and write them back relative to a base.
//!
//! # Examples
//!
//! ```
//! use package_config::path::PathRelationship;
//! use std::path::Path;
//!
//! let root = Path::new("/work/app");
//! let nested = Path::new("/work/app/packages/util");
//!
//! assert_eq!(PathRelationship::between(root, nested), PathRelationship::Ancestor);
//! assert!(PathRelationship::is_within(nested, root));
//! ```

pub mod normalize;
pub mod relationship;

pub use relationship::PathRelationship;
