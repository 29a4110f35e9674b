//! Command to validate a package configuration file.

use crate::error::CliError;
use crate::utils::{normalize_path, GlobalOptions};
use clap::Args;
use package_config::error::ErrorCollector;
use package_config::ConfigLoader;
use std::path::PathBuf;

/// Validate a package configuration file.
#[derive(Args)]
pub struct ValidateCommand {
    /// Configuration file to validate
    #[arg(value_name = "CONFIG_PATH")]
    pub config_path: PathBuf,
}

impl ValidateCommand {
    pub fn execute(self, _global: &GlobalOptions) -> Result<(), CliError> {
        let path = normalize_path(&self.config_path)?;
        if !path.exists() {
            return Err(CliError::InvalidArguments(format!(
                "File not found: {}",
                path.display()
            )));
        }

        let mut errors = ErrorCollector::new();
        let Some(config) = ConfigLoader::try_load_file(&path, &mut errors) else {
            return match errors.into_errors().into_iter().next() {
                Some(error) => Err(CliError::from(error)),
                None => Err(CliError::SemanticFailure(format!(
                    "Could not read {}",
                    path.display()
                ))),
            };
        };

        if errors.is_empty() {
            println!(
                "Configuration is valid (version {}, {} packages)",
                config.version(),
                config.len()
            );
            return Ok(());
        }

        let problems = errors.into_errors();
        for error in &problems {
            eprintln!("Validation error: {error}");
        }
        Err(CliError::Config(format!(
            "{} problem(s) found in {}",
            problems.len(),
            path.display()
        )))
    }
}
