//! The configuration loading pipeline.
//!
//! [`ConfigLoader`] ties the stages together: it resolves the inheritance
//! graph, folds the documents in load order, removes the reserved keys,
//! strips enforce markers and finally substitutes variables.

use std::path::{Path, PathBuf};

use crate::decoder::DecoderRegistry;
use crate::error::{Error, Result};
use crate::merge::{ConfigMerger, DEFAULT_MAX_DEPTH};
use crate::normalize::strip_mapping;
use crate::path::file_stem_name;
use crate::resolver::{InheritanceResolver, LoadOrder, INHERIT_KEY};
use crate::substitute::{VariableSubstitutor, VARIABLES_KEY};
use crate::value::{Mapping, Value};

/// Key defaulted to the stem of the first input file.
pub const EXPERIMENT_NAME_KEY: &str = "experiment_name";

/// Tuning knobs for [`ConfigLoader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderOptions {
    /// Mapping nesting depth after which merging stops descending.
    pub max_merge_depth: usize,
    /// Fail instead of warning when the depth limit is hit.
    pub strict_depth: bool,
    /// Keep the variables block in the resolved document.
    pub keep_variables: bool,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            max_merge_depth: DEFAULT_MAX_DEPTH,
            strict_depth: false,
            keep_variables: false,
        }
    }
}

impl LoaderOptions {
    fn merger(&self) -> ConfigMerger {
        ConfigMerger::new()
            .with_max_depth(self.max_merge_depth)
            .strict(self.strict_depth)
    }
}

/// Loads one or more configuration files into a single resolved document.
///
/// # Examples
///
/// ```no_run
/// use expconf::ConfigLoader;
///
/// let config = ConfigLoader::new().load(&["configs/run.yaml"]).unwrap();
/// println!("{:?}", config.pointer("experiment_name"));
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    registry: DecoderRegistry,
    options: LoaderOptions,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a loader with the default decoders and options.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: DecoderRegistry::with_defaults(),
            options: LoaderOptions::default(),
        }
    }

    /// Replace the decoder registry.
    #[must_use]
    pub fn with_registry(mut self, registry: DecoderRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Replace the loader options.
    #[must_use]
    pub fn with_options(mut self, options: LoaderOptions) -> Self {
        self.options = options;
        self
    }

    /// The decoder registry in use.
    #[must_use]
    pub fn registry(&self) -> &DecoderRegistry {
        &self.registry
    }

    /// The options in use.
    #[must_use]
    pub fn options(&self) -> &LoaderOptions {
        &self.options
    }

    /// Compute the order in which `paths` and their ancestors are merged.
    ///
    /// # Errors
    ///
    /// Returns `NoInputFiles` for an empty input, otherwise any error from
    /// [`InheritanceResolver::resolve`].
    pub fn load_order<P: AsRef<Path>>(&self, paths: &[P]) -> Result<LoadOrder> {
        if paths.is_empty() {
            return Err(Error::NoInputFiles);
        }
        InheritanceResolver::new(&self.registry).resolve(paths)
    }

    /// Load `paths` into one resolved document.
    ///
    /// The returned value is always a mapping. Its `experiment_name` defaults
    /// to the file stem of the first path when no file sets one.
    ///
    /// # Errors
    ///
    /// - `NoInputFiles` if `paths` is empty
    /// - Any resolution or decoding error
    /// - `RecursionLimitExceeded` in strict depth mode
    /// - `InvalidVariables` if the variables block is not a mapping
    pub fn load<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Value> {
        let order = self.load_order(paths)?;
        log::info!("Load order: {}", display_paths(order.paths()));

        let merger = self.options.merger();
        let mut merged = Mapping::new();
        for (index, path) in order.iter().enumerate() {
            let document = self.registry.decode_mapping(path)?;
            if index == 0 {
                merged = document;
            } else {
                merger.merge_into(&mut merged, document)?;
            }
            log::debug!("Merged {}", path.display());
        }

        self.finish(merged, paths[0].as_ref())
    }

    fn finish(&self, mut document: Mapping, first_input: &Path) -> Result<Value> {
        document.shift_remove(INHERIT_KEY);
        strip_mapping(&mut document);

        let substitutor = VariableSubstitutor::from_document(&document)?;
        if !self.options.keep_variables {
            document.shift_remove(VARIABLES_KEY);
        }

        let mut resolved = Value::Mapping(document);
        substitutor.apply(&mut resolved);

        if let Value::Mapping(map) = &mut resolved {
            if !map.contains_key(EXPERIMENT_NAME_KEY) {
                map.insert(
                    EXPERIMENT_NAME_KEY.to_string(),
                    Value::String(file_stem_name(first_input)),
                );
            }
        }
        Ok(resolved)
    }
}

/// Load `paths` with the default decoders and options.
///
/// # Errors
///
/// See [`ConfigLoader::load`].
pub fn load_configs<P: AsRef<Path>>(paths: &[P]) -> Result<Value> {
    ConfigLoader::new().load(paths)
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}
