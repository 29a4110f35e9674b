//! Main entry point for the package-config CLI.
//!
//! This is the command-line interface for package configuration files.
//! It provides commands for:
//! - `resolve`: Resolve a `package:` URI to a location
//! - `reverse`: Find the `package:` URI of a file
//! - `find`: Show the configuration that applies to a directory
//! - `validate`: Check a configuration file for problems
//! - `contexts`: List every configuration below a directory
//! - `write`: Convert a configuration file to either format

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let _level = package_config::init_logger(cli.verbose, cli.quiet);

    // Convert CLI args to GlobalOptions
    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        config: cli.config,
        min_version: cli.min_version,
        no_parent_search: cli.no_parent_search,
    };

    // Execute the command
    let result = match cli.command {
        cli::Command::Resolve(cmd) => cmd.execute(&global),
        cli::Command::Reverse(cmd) => cmd.execute(&global),
        cli::Command::Find(cmd) => cmd.execute(&global),
        cli::Command::Validate(cmd) => cmd.execute(&global),
        cli::Command::Contexts(cmd) => cmd.execute(&global),
        cli::Command::Write(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
