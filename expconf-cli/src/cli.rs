//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{CompletionsCommand, DumpCommand, GetCommand, OrderCommand};
use clap::{ArgAction, Parser, Subcommand};
use expconf::DEFAULT_MAX_DEPTH;
use std::path::PathBuf;

/// Command-line tool for resolving layered experiment configurations.
#[derive(Parser)]
#[command(name = "expconf")]
#[command(version, about = "Resolve layered experiment configuration files", long_about = None)]
pub struct Cli {
    /// Configuration file to load (repeatable; later files take precedence)
    #[arg(
        short = 'c',
        long = "config",
        visible_alias = "cfg",
        value_name = "FILE",
        global = true,
        action = ArgAction::Append
    )]
    pub configs: Vec<PathBuf>,

    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Mapping depth after which nested values are no longer merged
    #[arg(
        long,
        value_name = "DEPTH",
        global = true,
        env = "EXPCONF_MAX_MERGE_DEPTH",
        default_value_t = DEFAULT_MAX_DEPTH
    )]
    pub max_merge_depth: usize,

    /// Fail instead of warning when the merge depth limit is reached
    #[arg(long, global = true)]
    pub strict_depth: bool,

    /// Keep the __variables__ block in the resolved configuration
    #[arg(long, global = true)]
    pub keep_variables: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Print the resolved configuration
    Dump(DumpCommand),

    /// Print the order in which files are merged
    Order(OrderCommand),

    /// Print a single value by dotted key path
    Get(GetCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
