//! Utility functions for CLI operations.
//!
//! This module provides the global options shared by every command and the
//! helpers that turn them into a configured loader.

use crate::error::CliError;
use expconf::{ConfigLoader, LoaderOptions, Value};
use std::path::PathBuf;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Suppress non-essential output.
    pub quiet: bool,

    /// Configuration files in the order given.
    pub configs: Vec<PathBuf>,

    /// Maximum merge depth.
    pub max_merge_depth: usize,

    /// Fail when the merge depth limit is reached.
    pub strict_depth: bool,

    /// Keep the variables block in the output.
    pub keep_variables: bool,
}

impl GlobalOptions {
    /// Build a loader honoring these options.
    pub fn loader(&self) -> ConfigLoader {
        ConfigLoader::new().with_options(LoaderOptions {
            max_merge_depth: self.max_merge_depth,
            strict_depth: self.strict_depth,
            keep_variables: self.keep_variables,
        })
    }
}

/// Return the configuration files, failing if none were given.
pub fn require_configs(global: &GlobalOptions) -> Result<&[PathBuf], CliError> {
    if global.configs.is_empty() {
        return Err(CliError::InvalidArguments(
            "at least one configuration file is required (-c/--config)".to_string(),
        ));
    }
    Ok(&global.configs)
}

/// Load and resolve the configuration files named on the command line.
pub fn load_configuration(global: &GlobalOptions) -> Result<Value, CliError> {
    let configs = require_configs(global)?;
    Ok(global.loader().load(configs)?)
}

/// Render a value for plain printing: scalars as bare text, containers as YAML.
pub fn render_plain(value: &Value) -> Result<String, CliError> {
    match value {
        Value::Sequence(_) | Value::Mapping(_) => {
            Ok(expconf::OutputFormat::Yaml.render(value)?)
        }
        scalar => Ok(format!("{}\n", scalar.to_template_string())),
    }
}
