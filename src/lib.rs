//! Compact Neural Language Identification
//!
//! Identifies the language of short texts with a small feed-forward network
//! over quantized character n-gram and script embeddings. Inference is
//! CPU-only, allocation-light and safe to share across threads.
//!
//! ```no_run
//! use langident::{LangIdentConfig, LanguageIdentifier};
//!
//! # fn main() -> langident::Result<()> {
//! let config = LangIdentConfig::default();
//! let identifier = LanguageIdentifier::from_config(&config)?;
//! let result = identifier.find_language("This text is written in English.")?;
//! println!("{} ({:.2})", result.language, result.probability);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod features;
pub mod language_detection;
pub mod logging;
pub mod models;
pub mod processor;
pub mod tokenization;
pub mod types;

pub use config::{LangIdentConfig, ProcessorConfig};
pub use error::{Error, Result};
pub use features::{FeatureType, FeatureValue, FeatureVector};
pub use language_detection::LanguageIdentifier;
pub use models::{EmbeddingNetwork, ModelParameters};
pub use processor::{Document, LangIdentProcessor};
pub use types::{LanguageDetection, LanguageProbability};
