//! Command to find the `package:` URI of a file.

use crate::error::CliError;
use crate::utils::{load_configuration, normalize_path, GlobalOptions};
use clap::Args;
use std::path::PathBuf;
use url::Url;

/// Print the `package:` URI that refers to a file.
#[derive(Args)]
pub struct ReverseCommand {
    /// The file to look up
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

impl ReverseCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let file = normalize_path(&self.file)?;
        let location = Url::from_file_path(&file).map_err(|()| {
            CliError::InvalidArguments(format!("cannot convert {} to a URI", file.display()))
        })?;

        // Discovery starts from the closest existing directory.
        let directory = file
            .ancestors()
            .skip(1)
            .find(|dir| dir.is_dir())
            .unwrap_or(file.as_path())
            .to_path_buf();
        let config = load_configuration(global, &directory)?;

        match config.to_package_uri(&location)? {
            Some(package_uri) => {
                println!("{package_uri}");
                Ok(())
            }
            None => {
                let owner = config
                    .package_of(&location)
                    .map(|package| {
                        format!(
                            " (inside package '{}' but outside its package URI root)",
                            package.name()
                        )
                    })
                    .unwrap_or_default();
                Err(CliError::SemanticFailure(format!(
                    "{} has no package URI{owner}",
                    file.display()
                )))
            }
        }
    }
}
