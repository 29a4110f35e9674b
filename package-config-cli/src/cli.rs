//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    ContextsCommand, FindCommand, ResolveCommand, ReverseCommand, ValidateCommand, WriteCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for inspecting package configurations.
#[derive(Parser)]
#[command(name = "package-config")]
#[command(version, about = "Resolve package: URIs and inspect package configurations", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Use this configuration file instead of discovering one
    #[arg(long, value_name = "PATH", global = true, env = "PACKAGE_CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Ignore configurations older than this format version
    #[arg(
        long,
        value_name = "VERSION",
        global = true,
        default_value_t = 1,
        env = "PACKAGE_CONFIG_MIN_VERSION"
    )]
    pub min_version: u32,

    /// Only look for a configuration in the starting directory
    #[arg(long, global = true)]
    pub no_parent_search: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Resolve a package: URI to a location
    Resolve(ResolveCommand),

    /// Find the package: URI of a file
    Reverse(ReverseCommand),

    /// Show the configuration that applies to a directory
    Find(FindCommand),

    /// Check a configuration file for problems
    Validate(ValidateCommand),

    /// List every configuration below a directory
    Contexts(ContextsCommand),

    /// Convert a configuration file to either format
    Write(WriteCommand),
}
