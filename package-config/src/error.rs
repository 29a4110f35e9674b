//! Error types for the package-config library.
//!
//! This module provides the error hierarchy for all operations in the
//! library, using `thiserror` for ergonomic error handling, together with
//! the [`ErrorSink`] capability used by the parser and discovery layers to
//! report problems without aborting.

use std::fmt;

use thiserror::Error;

/// Result type alias for operations that may fail with a package-config error.
///
/// # Examples
///
/// ```
/// use package_config::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(2)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the package-config library.
#[derive(Debug, Error)]
pub enum Error {
    /// A caller supplied an invalid argument.
    ///
    /// Raised for malformed package names, non-absolute roots, malformed
    /// package URIs and directories outside a context tree.
    #[error("invalid {name} '{value}': {message}")]
    InvalidArgument {
        /// The name of the argument or field.
        name: String,
        /// The offending value.
        value: String,
        /// A description of the problem.
        message: String,
    },

    /// Configuration content is malformed.
    #[error("{message}{}", format_location(.location.as_deref(), *.offset))]
    Format {
        /// A description of the problem.
        message: String,
        /// The file or URI the content came from, if known.
        location: Option<String>,
        /// Byte offset of the problem within the content, if known.
        offset: Option<usize>,
    },

    /// Configuration content could not be read.
    #[error("cannot read {location}: {source}")]
    Io {
        /// The file or URI that could not be read.
        location: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Two packages cannot coexist in one configuration.
    #[error("{}", describe_conflict(*.kind, .package, .existing))]
    Conflict {
        /// The kind of conflict.
        kind: ConflictKind,
        /// The package being added.
        package: String,
        /// The package already present.
        existing: String,
    },

    /// A package URI named a package that the configuration does not contain.
    #[error("unknown package '{name}'")]
    UnknownPackage {
        /// The package name from the URI.
        name: String,
    },
}

/// The way two packages conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConflictKind {
    /// Both packages have the same name.
    SameName,
    /// Both packages have the same root directory.
    SameRoot,
    /// The new package's root lies inside the existing package's URI root.
    InsideResolutionRoot,
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SameName => write!(f, "same name"),
            Self::SameRoot => write!(f, "same root"),
            Self::InsideResolutionRoot => write!(f, "inside package URI root"),
        }
    }
}

/// Broad classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad caller input.
    ArgumentInvalid,
    /// Malformed configuration content.
    FormatInvalid,
    /// Content missing or unreadable.
    Io,
    /// Duplicate or overlapping packages.
    ValidationConflict,
    /// Reference to a package that does not exist.
    UnknownPackage,
}

fn format_location(location: Option<&str>, offset: Option<usize>) -> String {
    match (location, offset) {
        (Some(location), Some(offset)) => format!(" ({location} at offset {offset})"),
        (Some(location), None) => format!(" ({location})"),
        (None, Some(offset)) => format!(" (at offset {offset})"),
        (None, None) => String::new(),
    }
}

fn describe_conflict(kind: ConflictKind, package: &str, existing: &str) -> String {
    match kind {
        ConflictKind::SameName => {
            format!("packages '{package}' and '{existing}' have the same name")
        }
        ConflictKind::SameRoot => {
            format!("packages '{package}' and '{existing}' have the same root directory")
        }
        ConflictKind::InsideResolutionRoot => {
            format!("package '{package}' is inside the package URI root of package '{existing}'")
        }
    }
}

impl Error {
    /// Creates an [`Error::InvalidArgument`].
    pub fn invalid_argument(
        name: impl Into<String>,
        value: impl fmt::Display,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            value: value.to_string(),
            message: message.into(),
        }
    }

    /// Creates an [`Error::Format`] without position information.
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
            location: None,
            offset: None,
        }
    }

    /// Creates an [`Error::Format`] tied to a location and optional offset.
    pub fn format_at(
        message: impl Into<String>,
        location: impl fmt::Display,
        offset: Option<usize>,
    ) -> Self {
        Self::Format {
            message: message.into(),
            location: Some(location.to_string()),
            offset,
        }
    }

    /// Restates a problem found in file content as an [`Error::Format`] at
    /// `location`.
    ///
    /// Only [`Error::InvalidArgument`] is converted; other errors are
    /// returned unchanged.
    #[must_use]
    pub fn in_content(self, location: impl fmt::Display, offset: Option<usize>) -> Self {
        match self {
            Self::InvalidArgument { .. } => Self::format_at(self.to_string(), location, offset),
            other => other,
        }
    }

    /// Creates an [`Error::Io`] for a missing file.
    pub fn not_found(location: impl fmt::Display) -> Self {
        Self::Io {
            location: location.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        }
    }

    /// Returns the broad classification of this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use package_config::error::{Error, ErrorKind};
    ///
    /// let err = Error::format("not a JSON object");
    /// assert_eq!(err.kind(), ErrorKind::FormatInvalid);
    /// ```
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument { .. } => ErrorKind::ArgumentInvalid,
            Self::Format { .. } => ErrorKind::FormatInvalid,
            Self::Io { .. } => ErrorKind::Io,
            Self::Conflict { .. } => ErrorKind::ValidationConflict,
            Self::UnknownPackage { .. } => ErrorKind::UnknownPackage,
        }
    }

    /// Check if error indicates the content does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use package_config::Error;
    ///
    /// let err = Error::not_found("file:///nonexistent/.packages");
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

/// Receiver for problems found while parsing or discovering configurations.
///
/// Parsing and discovery never decide whether a problem is fatal; they
/// report it here and continue. Any `FnMut(Error)` closure is a sink, and
/// [`ErrorCollector`] accumulates errors for later inspection.
///
/// # Examples
///
/// ```
/// use package_config::error::{Error, ErrorSink};
///
/// let mut count = 0;
/// let mut sink = |_: Error| count += 1;
/// sink.report(Error::format("bad"));
/// assert_eq!(count, 1);
/// ```
pub trait ErrorSink {
    /// Reports a single problem.
    fn report(&mut self, error: Error);
}

impl<F: FnMut(Error)> ErrorSink for F {
    fn report(&mut self, error: Error) {
        self(error);
    }
}

/// An [`ErrorSink`] that keeps every reported error.
#[derive(Debug, Default)]
pub struct ErrorCollector {
    errors: Vec<Error>,
}

impl ErrorCollector {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the errors collected so far.
    #[must_use]
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// Returns true if nothing was reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Consumes the collector, returning all collected errors.
    #[must_use]
    pub fn into_errors(self) -> Vec<Error> {
        self.errors
    }

    /// Returns `value` if nothing was reported, or the first reported error.
    ///
    /// # Errors
    ///
    /// Returns the first error collected, if any.
    pub fn into_result<T>(self, value: T) -> Result<T> {
        match self.errors.into_iter().next() {
            Some(first) => Err(first),
            None => Ok(value),
        }
    }
}

impl ErrorSink for ErrorCollector {
    fn report(&mut self, error: Error) {
        self.errors.push(error);
    }
}
