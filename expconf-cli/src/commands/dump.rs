//! The `dump` command.

use crate::error::CliError;
use crate::utils::{load_configuration, GlobalOptions};
use clap::Args;
use expconf::OutputFormat;

/// Print the resolved configuration
#[derive(Args)]
pub struct DumpCommand {
    /// Output format (yaml, json or toml)
    #[arg(short, long, value_name = "FORMAT", default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,
}

impl DumpCommand {
    /// Execute the dump command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let rendered = self.format.render(&config)?;
        print!("{rendered}");
        Ok(())
    }
}
