//! File-format decoders keyed by file extension.
//!
//! The registry maps an extension (without its dot, case-sensitive) to a
//! [`Decoder`]. The defaults cover YAML, JSON and TOML; callers may register
//! additional formats before loading.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::value::{Mapping, Value};

/// Decodes the text of one configuration file into a [`Value`].
pub trait Decoder: Send + Sync {
    /// Short format name used in error messages.
    fn format_name(&self) -> &'static str;

    /// Decode `source` into a document.
    ///
    /// # Errors
    ///
    /// Returns the parser's message when `source` is malformed.
    fn decode(&self, source: &str) -> std::result::Result<Value, String>;
}

/// YAML decoder backed by `serde_yaml`.
pub struct YamlDecoder;

impl Decoder for YamlDecoder {
    fn format_name(&self) -> &'static str {
        "yaml"
    }

    fn decode(&self, source: &str) -> std::result::Result<Value, String> {
        let raw: serde_yaml::Value = serde_yaml::from_str(source).map_err(|e| e.to_string())?;
        Value::try_from(raw)
    }
}

/// JSON decoder backed by `serde_json`.
pub struct JsonDecoder;

impl Decoder for JsonDecoder {
    fn format_name(&self) -> &'static str {
        "json"
    }

    fn decode(&self, source: &str) -> std::result::Result<Value, String> {
        serde_json::from_str::<serde_json::Value>(source)
            .map(Value::from)
            .map_err(|e| e.to_string())
    }
}

/// TOML decoder backed by `toml`.
pub struct TomlDecoder;

impl Decoder for TomlDecoder {
    fn format_name(&self) -> &'static str {
        "toml"
    }

    fn decode(&self, source: &str) -> std::result::Result<Value, String> {
        toml::from_str::<toml::Table>(source)
            .map(|table| Value::from(toml::Value::Table(table)))
            .map_err(|e| e.to_string())
    }
}

/// Registry of decoders keyed by file extension.
///
/// # Examples
///
/// ```
/// use expconf::DecoderRegistry;
///
/// let registry = DecoderRegistry::with_defaults();
/// assert_eq!(registry.extensions(), vec!["json", "toml", "yaml", "yml"]);
/// ```
#[derive(Clone, Default)]
pub struct DecoderRegistry {
    decoders: BTreeMap<String, Arc<dyn Decoder>>,
}

impl fmt::Debug for DecoderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecoderRegistry")
            .field("extensions", &self.extensions())
            .finish()
    }
}

impl DecoderRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the YAML, JSON and TOML decoders.
    #[must_use]
    pub fn with_defaults() -> Self {
        let yaml: Arc<dyn Decoder> = Arc::new(YamlDecoder);
        let mut registry = Self::new();
        registry.register_shared("yaml", Arc::clone(&yaml));
        registry.register_shared("yml", yaml);
        registry.register("json", JsonDecoder);
        registry.register("toml", TomlDecoder);
        registry
    }

    /// Register `decoder` for `extension`, replacing any previous one.
    ///
    /// A leading dot on `extension` is ignored.
    pub fn register<D: Decoder + 'static>(&mut self, extension: &str, decoder: D) -> &mut Self {
        self.register_shared(extension, Arc::new(decoder))
    }

    /// Register an already shared decoder for `extension`.
    pub fn register_shared(&mut self, extension: &str, decoder: Arc<dyn Decoder>) -> &mut Self {
        let extension = extension.trim_start_matches('.').to_string();
        self.decoders.insert(extension, decoder);
        self
    }

    /// Registered extensions, sorted.
    #[must_use]
    pub fn extensions(&self) -> Vec<&str> {
        self.decoders.keys().map(String::as_str).collect()
    }

    /// Returns the decoder for `path`'s extension, if registered.
    #[must_use]
    pub fn decoder_for(&self, path: &Path) -> Option<&dyn Decoder> {
        let extension = path.extension()?.to_str()?;
        self.decoders.get(extension).map(|decoder| &**decoder)
    }

    /// Returns true if a decoder is registered for `path`'s extension.
    #[must_use]
    pub fn supports(&self, path: &Path) -> bool {
        self.decoder_for(path).is_some()
    }

    /// Read and decode one file.
    ///
    /// Every call reads the file again; nothing is cached.
    ///
    /// # Errors
    ///
    /// - `FileNotFound` when `path` does not exist
    /// - `UnsupportedFormat` when its extension has no decoder
    /// - `Decode` when the content is malformed for the format
    /// - `Io` for any other read failure
    pub fn decode_file(&self, path: &Path) -> Result<Value> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let decoder = self
            .decoder_for(path)
            .ok_or_else(|| Error::UnsupportedFormat {
                path: path.to_path_buf(),
                extension: path
                    .extension()
                    .map(|e| e.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            })?;

        let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => Error::Io(e),
        })?;

        decoder.decode(&contents).map_err(|message| Error::Decode {
            path: path.to_path_buf(),
            format: decoder.format_name().to_string(),
            message,
        })
    }

    /// Read and decode one file whose top level must be a mapping.
    ///
    /// An empty document decodes to an empty mapping.
    ///
    /// # Errors
    ///
    /// Everything [`decode_file`](Self::decode_file) returns, plus
    /// `InvalidDocument` when the top level is not a mapping.
    pub fn decode_mapping(&self, path: &Path) -> Result<Mapping> {
        match self.decode_file(path)? {
            Value::Mapping(map) => Ok(map),
            Value::Null => Ok(Mapping::new()),
            other => Err(Error::InvalidDocument {
                path: path.to_path_buf(),
                reason: format!("top level must be a mapping, found {}", other.kind()),
            }),
        }
    }
}
