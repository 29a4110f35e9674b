//! Command to resolve a `package:` URI.

use crate::error::CliError;
use crate::utils::{load_configuration, resolve_path, GlobalOptions};
use clap::Args;
use std::path::PathBuf;
use url::Url;

/// Resolve a `package:` URI to the location it refers to.
#[derive(Args)]
pub struct ResolveCommand {
    /// The URI to resolve, such as package:foo/foo.dart
    #[arg(value_name = "URI")]
    pub uri: String,

    /// Directory whose configuration applies (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub from: Option<PathBuf>,

    /// Print a filesystem path instead of a URI for file: locations
    #[arg(long)]
    pub path: bool,
}

impl ResolveCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let uri = Url::parse(&self.uri)
            .map_err(|e| CliError::InvalidArguments(format!("'{}' is not a URI: {e}", self.uri)))?;

        let directory = resolve_path(self.from)?;
        let config = load_configuration(global, &directory)?;

        let location = config.resolve(&uri)?;
        log::debug!("{uri} resolves to {location}");

        match location.to_file_path() {
            Ok(path) if self.path => println!("{}", path.display()),
            _ => println!("{location}"),
        }
        Ok(())
    }
}
