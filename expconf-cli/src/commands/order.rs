//! The `order` command.
//!
//! Prints every file taking part in the merge, ancestors first, one per
//! line. With `--edges` the declared inheritance relationships are printed
//! instead.

use crate::error::CliError;
use crate::utils::{require_configs, GlobalOptions};
use clap::Args;

/// Print the order in which files are merged
#[derive(Args)]
pub struct OrderCommand {
    /// Print the inheritance edges as `child -> parent` instead
    #[arg(long)]
    pub edges: bool,
}

impl OrderCommand {
    /// Execute the order command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let configs = require_configs(global)?;
        let order = global.loader().load_order(configs)?;

        if self.edges {
            for edge in order.edges() {
                println!("{} -> {}", edge.child.display(), edge.parent.display());
            }
        } else {
            for path in &order {
                println!("{}", path.display());
            }
        }
        Ok(())
    }
}
