//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `resolve`: Resolve a `package:` URI to a location
//! - `reverse`: Find the `package:` URI of a file
//! - `find`: Show the configuration that applies to a directory
//! - `validate`: Check a configuration file for problems
//! - `contexts`: List every configuration below a directory
//! - `write`: Convert a configuration file to either format

pub mod contexts;
pub mod find;
pub mod resolve;
pub mod reverse;
pub mod validate;
pub mod write;

pub use contexts::ContextsCommand;
pub use find::FindCommand;
pub use resolve::ResolveCommand;
pub use reverse::ReverseCommand;
pub use validate::ValidateCommand;
pub use write::WriteCommand;

use clap::ValueEnum;

/// Output format for commands that print configurations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-separated table format (human-readable)
    Table,
    /// JSON format
    Json,
}
