//! Main entry point for the expconf CLI.
//!
//! This is the command-line interface for resolving layered experiment
//! configurations:
//! - `dump`: Print the resolved configuration
//! - `order`: Print the merge order
//! - `get`: Print a single value
//! - `completions`: Generate shell completion scripts

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

/// Exit code for malformed command lines.
const INVALID_ARGUMENTS: i32 = 4;

fn main() {
    // Parse CLI arguments; usage errors share the invalid-arguments code
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            std::process::exit(INVALID_ARGUMENTS);
        }
        Err(e) => e.exit(),
    };

    expconf::init_logger(cli.verbose, cli.quiet).install();

    let global = GlobalOptions {
        quiet: cli.quiet,
        configs: cli.configs,
        max_merge_depth: cli.max_merge_depth,
        strict_depth: cli.strict_depth,
        keep_variables: cli.keep_variables,
    };

    let result = match cli.command {
        cli::Command::Dump(cmd) => cmd.execute(&global),
        cli::Command::Order(cmd) => cmd.execute(&global),
        cli::Command::Get(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
