//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `dump`: Print the resolved configuration
//! - `order`: Print the merge order of the configuration files
//! - `get`: Print a single value by dotted key path
//! - `completions`: Generate shell completion scripts

pub mod completions;
pub mod dump;
pub mod get;
pub mod order;

pub use completions::CompletionsCommand;
pub use dump::DumpCommand;
pub use get::GetCommand;
pub use order::OrderCommand;
