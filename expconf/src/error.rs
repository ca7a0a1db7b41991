//! Error types for the expconf library.
//!
//! This module provides the error hierarchy for every stage of configuration
//! resolution, using `thiserror` for ergonomic error handling.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with an expconf error.
///
/// # Examples
///
/// ```
/// use expconf::{Error, Result};
///
/// fn example_operation() -> Result<usize> {
///     Ok(3)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the expconf library.
#[derive(Debug, Error)]
pub enum Error {
    /// A configuration file does not exist.
    #[error("configuration file not found: {}", path.display())]
    FileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// No decoder is registered for the file's extension.
    #[error("unsupported configuration format '{extension}' for {}", path.display())]
    UnsupportedFormat {
        /// The offending file.
        path: PathBuf,
        /// The extension without its dot (empty when the file has none).
        extension: String,
    },

    /// A file could not be decoded by the decoder selected for it.
    #[error("failed to decode {} as {format}: {message}", path.display())]
    Decode {
        /// The file that failed to decode.
        path: PathBuf,
        /// Name of the decoder that rejected the content.
        format: String,
        /// The underlying parser message.
        message: String,
    },

    /// A decoded file is not usable as a configuration document.
    #[error("invalid configuration document {}: {reason}", path.display())]
    InvalidDocument {
        /// The offending file.
        path: PathBuf,
        /// Why the document was rejected.
        reason: String,
    },

    /// The inheritance list of a file is malformed.
    #[error("invalid inheritance list in {}: {reason}", path.display())]
    InvalidInheritance {
        /// The declaring file.
        path: PathBuf,
        /// Why the list was rejected.
        reason: String,
    },

    /// The variables block is not a mapping.
    #[error("invalid variables block: {reason}")]
    InvalidVariables {
        /// Why the block was rejected.
        reason: String,
    },

    /// Inheritance declarations form a cycle.
    #[error("cyclic inheritance: {}", format_chain(chain))]
    CyclicInheritance {
        /// The files forming the cycle, ending with the repeated file.
        chain: Vec<PathBuf>,
    },

    /// The merge depth guard tripped.
    #[error("maximum merge depth {depth} exceeded at key '{key}'")]
    RecursionLimitExceeded {
        /// The configured maximum depth.
        depth: usize,
        /// Dotted path of the subtree that was left unmerged.
        key: String,
    },

    /// The loader was called without any file.
    #[error("no configuration files given")]
    NoInputFiles,

    /// An invalid filesystem path was provided.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A resolved document could not be rendered in the requested format.
    #[error("failed to render configuration as {format}: {message}")]
    Serialize {
        /// The output format.
        format: String,
        /// The underlying serializer message.
        message: String,
    },
}

fn format_chain(chain: &[PathBuf]) -> String {
    chain
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

impl Error {
    /// Check if error indicates a configuration file does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use expconf::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::FileNotFound { path: PathBuf::from("/nonexistent.yaml") };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::FileNotFound { .. })
    }

    /// Check if error is an inheritance cycle.
    #[must_use]
    pub fn is_cycle(&self) -> bool {
        matches!(self, Self::CyclicInheritance { .. })
    }

    /// Check if error comes from reading or decoding a file's content.
    #[must_use]
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedFormat { .. } | Self::Decode { .. } | Self::InvalidDocument { .. }
        )
    }
}
