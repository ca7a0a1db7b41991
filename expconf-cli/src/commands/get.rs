//! The `get` command.

use crate::error::CliError;
use crate::utils::{load_configuration, render_plain, GlobalOptions};
use clap::Args;
use expconf::OutputFormat;

/// Print a single value by dotted key path
#[derive(Args)]
pub struct GetCommand {
    /// Dotted key path, e.g. `model.layers.0`
    #[arg(value_name = "KEY")]
    pub key: String,

    /// Render containers in this format instead of plain YAML
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,
}

impl GetCommand {
    /// Execute the get command.
    ///
    /// A missing key is a semantic failure (exit code 1).
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let value = config
            .pointer(&self.key)
            .ok_or_else(|| CliError::SemanticFailure(format!("key not found: {}", self.key)))?;

        let rendered = match self.format {
            Some(format) => format.render(value)?,
            None => render_plain(value)?,
        };
        print!("{rendered}");
        Ok(())
    }
}
