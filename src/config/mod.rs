//! Configuration management for language identification

use crate::{logging::LogConfig, Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub mod processor;

pub use processor::ProcessorConfig;

/// Environment variable overriding the default model directory.
pub const MODEL_DIR_ENV: &str = "LANG_IDENT_MODEL_DIR";

/// Language identifier configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LangIdentConfig {
    /// Directory holding the model resource files
    #[serde(default = "default_model_dir")]
    pub model_dir: PathBuf,

    /// Inputs are cut to this many bytes before normalization
    #[serde(default = "default_max_input_bytes")]
    pub max_input_bytes: usize,

    /// Number of alternatives reported with each result
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Probability a prediction needs to be reported reliable
    #[serde(default = "default_reliability_threshold")]
    pub reliability_threshold: f32,

    /// Lower threshold for Croatian and Bosnian, which the model confuses
    #[serde(default = "default_close_language_threshold")]
    pub close_language_threshold: f32,

    /// Logging settings
    #[serde(default)]
    pub logging: LogConfig,
}

fn default_model_dir() -> PathBuf {
    std::env::var_os(MODEL_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("models/lang_ident"))
}

fn default_max_input_bytes() -> usize {
    crate::tokenization::DEFAULT_MAX_INPUT_BYTES
}

fn default_top_n() -> usize {
    5
}

fn default_reliability_threshold() -> f32 {
    0.7
}

fn default_close_language_threshold() -> f32 {
    0.5
}

impl Default for LangIdentConfig {
    fn default() -> Self {
        Self {
            model_dir: default_model_dir(),
            max_input_bytes: default_max_input_bytes(),
            top_n: default_top_n(),
            reliability_threshold: default_reliability_threshold(),
            close_language_threshold: default_close_language_threshold(),
            logging: LogConfig::default(),
        }
    }
}

impl LangIdentConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: LangIdentConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `path` if it exists, defaults otherwise
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            tracing::debug!(
                "No config at {}, using defaults",
                path.as_ref().display()
            );
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path.as_ref(), content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_input_bytes == 0 {
            return Err(Error::Config(
                "max_input_bytes must be greater than 0".to_string(),
            ));
        }
        if self.top_n == 0 {
            return Err(Error::Config("top_n must be greater than 0".to_string()));
        }
        for (name, value) in [
            ("reliability_threshold", self.reliability_threshold),
            ("close_language_threshold", self.close_language_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::Config(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Install the global tracing subscriber described by `logging`.
    ///
    /// Fails with [`Error::Config`] if a subscriber is already installed.
    pub fn init_logging(&self) -> Result<()> {
        crate::logging::init_logging(&self.logging)
    }
}
