#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # expconf
//!
//! A library for loading layered experiment configurations.
//!
//! Configuration files (YAML, JSON or TOML) can inherit from other files
//! through the reserved `__inherit__` key. The whole inheritance graph is
//! merged into one document, ancestors first, with these rules:
//!
//! - nested mappings merge key by key
//! - sequences concatenate
//! - everything else is replaced
//! - a key ending in `!` replaces the inherited value outright
//!
//! After merging, `${name}` tokens are substituted from the reserved
//! `__variables__` block.
//!
//! ## Core Types
//!
//! - [`ConfigLoader`] and [`load_configs`]: The full loading pipeline
//! - [`Value`] and [`Mapping`]: The format-neutral document model
//! - [`DecoderRegistry`]: Extension-based file decoding
//! - [`InheritanceResolver`] and [`LoadOrder`]: Inheritance linearization
//! - [`ConfigMerger`]: The merge rules
//! - [`VariableSubstitutor`]: `${name}` substitution
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use expconf::{ConfigMerger, Mapping, Value};
//! use serde_json::json;
//!
//! let base = match Value::from(json!({"lr": 0.1, "tags": ["a"]})) {
//!     Value::Mapping(map) => map,
//!     _ => unreachable!(),
//! };
//! let update = match Value::from(json!({"lr": 0.5, "tags": ["b"]})) {
//!     Value::Mapping(map) => map,
//!     _ => unreachable!(),
//! };
//!
//! let merged: Mapping = ConfigMerger::new().merge(base, update).unwrap();
//! assert_eq!(merged["lr"], Value::Float(0.5));
//! assert_eq!(merged["tags"], Value::Sequence(vec!["a".into(), "b".into()]));
//! ```

pub mod decoder;
pub mod error;
pub mod loader;
pub mod logging;
pub mod merge;
pub mod normalize;
pub mod output;
pub mod path;
pub mod resolver;
pub mod substitute;
pub mod value;

#[cfg(test)]
mod proptests;

// Re-export key types at crate root for convenience
pub use decoder::{Decoder, DecoderRegistry, JsonDecoder, TomlDecoder, YamlDecoder};
pub use error::{Error, Result};
pub use loader::{load_configs, ConfigLoader, LoaderOptions, EXPERIMENT_NAME_KEY};
pub use logging::{init_logger, LogLevel, Logger};
pub use merge::{ConfigMerger, MergeAction, DEFAULT_MAX_DEPTH, ENFORCE_MARKER};
pub use output::{OutputFormat, OutputFormatter};
pub use resolver::{InheritanceEdge, InheritanceResolver, LoadOrder, INHERIT_KEY};
pub use substitute::{VariableSubstitutor, VARIABLES_KEY};
pub use value::{Mapping, Value, ValueKind};
