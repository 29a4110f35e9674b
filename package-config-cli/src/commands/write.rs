//! Command to convert a configuration file to either format.

use crate::error::CliError;
use crate::utils::{normalize_path, GlobalOptions};
use clap::{Args, ValueEnum};
use package_config::config::writer;
use package_config::ConfigLoader;
use std::fs;
use std::path::PathBuf;
use url::Url;

/// Target format for the write command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum WriteFormat {
    /// Structured JSON (`.dart_tool/package_config.json`)
    Json,
    /// Legacy line format (`.packages`)
    Legacy,
}

/// Read a configuration file and write it out in the requested format.
#[derive(Args)]
pub struct WriteCommand {
    /// Configuration file to read
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output format
    #[arg(long, value_enum, ignore_case = true)]
    pub format: WriteFormat,

    /// Write to this file instead of stdout; relative locations are written
    /// against it
    #[arg(long, short, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

impl WriteCommand {
    pub fn execute(self, _global: &GlobalOptions) -> Result<(), CliError> {
        let input = normalize_path(&self.file)?;
        let config = ConfigLoader::load_file(&input)?;

        let output = self.output.as_deref().map(normalize_path).transpose()?;
        let target = output.as_ref().unwrap_or(&input);
        let base = Url::from_file_path(target).map_err(|()| {
            CliError::InvalidArguments(format!("cannot convert {} to a URI", target.display()))
        })?;

        let text = match self.format {
            WriteFormat::Json => writer::to_json_string(&config, Some(&base))?,
            WriteFormat::Legacy => writer::to_legacy_string(
                &config,
                Some(&base),
                Some(&format!("Generated by package-config {}", env!("CARGO_PKG_VERSION"))),
            ),
        };

        match output {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(&path, text)?;
                log::info!("Wrote {}", path.display());
            }
            None => print!("{text}"),
        }
        Ok(())
    }
}
