//! Command to list every configuration below a directory.

use crate::commands::OutputFormat;
use crate::error::CliError;
use crate::utils::{resolve_path, warn_problems, GlobalOptions};
use clap::Args;
use package_config::config::writer;
use package_config::discovery::{build_context_tree_with, default_directory_filter};
use package_config::error::{ErrorCollector, ErrorKind};
use package_config::{ContextNode, PackageConfig};
use serde_json::{Map, Value};
use std::io::Write;
use std::path::PathBuf;

/// List every directory below a root that defines a package configuration.
#[derive(Args)]
pub struct ContextsCommand {
    /// Root directory to scan (defaults to the current directory)
    #[arg(value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "table", ignore_case = true)]
    pub format: OutputFormat,
}

impl ContextsCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let root = resolve_path(self.directory)?;

        let mut errors = ErrorCollector::new();
        let tree = build_context_tree_with(
            &root,
            &default_directory_filter,
            PackageConfig::empty(),
            &global.discovery_options(),
            &mut errors,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::ArgumentInvalid => CliError::InvalidArguments(e.to_string()),
            _ => CliError::from(e),
        })?;
        warn_problems(errors);

        match self.format {
            OutputFormat::Table => format_as_table(&tree),
            OutputFormat::Json => format_as_json(&tree),
        }
    }
}

/// Format contexts as a human-readable table.
fn format_as_table(tree: &ContextNode) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    writeln!(handle, "DIRECTORY\tVERSION\tPACKAGES")?;
    for (directory, config) in tree.to_map() {
        writeln!(
            handle,
            "{}\t{}\t{}",
            directory.display(),
            config.version(),
            config.len()
        )?;
    }

    Ok(())
}

/// Format contexts as a JSON object keyed by directory.
fn format_as_json(tree: &ContextNode) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let contexts: Map<String, Value> = tree
        .to_map()
        .into_iter()
        .map(|(directory, config)| {
            (
                directory.display().to_string(),
                writer::to_json_value(config, None),
            )
        })
        .collect();

    serde_json::to_writer_pretty(&mut handle, &contexts)?;
    writeln!(handle)?;
    Ok(())
}
