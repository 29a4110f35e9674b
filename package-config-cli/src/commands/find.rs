//! Command to show the configuration that applies to a directory.

use crate::commands::OutputFormat;
use crate::error::CliError;
use crate::utils::{load_configuration, resolve_path, GlobalOptions};
use clap::Args;
use package_config::config::writer;
use package_config::PackageConfig;
use std::io::Write;
use std::path::PathBuf;

/// Column headers for table output.
const COLUMN_HEADERS: [&str; 4] = ["name", "root", "package_uri_root", "language_version"];

/// Show the packages of the configuration that applies to a directory.
#[derive(Args)]
pub struct FindCommand {
    /// Directory to start from (defaults to the current directory)
    #[arg(value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "table", ignore_case = true)]
    pub format: OutputFormat,
}

impl FindCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let directory = resolve_path(self.directory)?;
        let config = load_configuration(global, &directory)?;

        match self.format {
            OutputFormat::Table => format_as_table(&config),
            OutputFormat::Json => format_as_json(&config),
        }
    }
}

/// Format packages as a human-readable table.
fn format_as_table(config: &PackageConfig) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let header_line = COLUMN_HEADERS
        .iter()
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(handle, "{header_line}")?;

    for package in config.packages() {
        writeln!(
            handle,
            "{}\t{}\t{}\t{}",
            package.name(),
            package.root(),
            package.package_uri_root(),
            package
                .language_version()
                .map_or_else(|| "-".to_string(), ToString::to_string),
        )?;
    }

    Ok(())
}

/// Format the configuration as a structured-format document.
fn format_as_json(config: &PackageConfig) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, &writer::to_json_value(config, None))?;
    writeln!(handle)?;
    Ok(())
}
