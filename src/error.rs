//! Error types for language identification

use thiserror::Error;

/// Main error type
#[derive(Error, Debug)]
pub enum Error {
    /// A model resource is missing, unreadable or malformed.
    #[error("Model loading error: {0}")]
    ModelLoad(String),

    /// Model parameters disagree with each other or with the expected layout.
    #[error("Shape mismatch for {what}: expected {expected}, got {actual}")]
    ShapeMismatch {
        /// The table, layer or vector that is inconsistent.
        what: String,
        /// Expected size.
        expected: usize,
        /// Actual size.
        actual: usize,
    },

    /// An n-gram extractor was requested with an (n, dimension) pair the model has no table for.
    #[error("Unsupported n-gram feature: size {ngram_size} with dimension {dimension}")]
    UnsupportedFeature {
        /// Requested n-gram length.
        ngram_size: usize,
        /// Requested bucket count.
        dimension: u32,
    },

    /// The source field of a document is missing.
    #[error("Field [{0}] not present in document")]
    MissingField(String),

    #[error("Configuration error: {0}")]
    /// Invalid configuration value.
    Config(String),

    #[error("Invalid input: {0}")]
    /// Input of the wrong type or shape.
    InvalidInput(String),

    #[error("IO error: {0}")]
    /// Underlying IO failure.
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    /// JSON (de)serialization failure.
    Serialization(#[from] serde_json::Error),

    #[error("TOML deserialization error: {0}")]
    /// TOML parse failure.
    TomlDe(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    /// TOML rendering failure.
    TomlSer(#[from] toml::ser::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn shape(what: impl Into<String>, expected: usize, actual: usize) -> Self {
        Error::ShapeMismatch {
            what: what.into(),
            expected,
            actual,
        }
    }
}
