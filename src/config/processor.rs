//! Document processor configuration

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Where a [`LangIdentProcessor`](crate::processor::LangIdentProcessor) reads and writes.
///
/// Field names are dotted paths into a JSON document (`"body.text"`).
/// Unset target fields are not written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProcessorConfig {
    /// Source text field
    pub field: String,

    /// Receives the language code
    #[serde(default)]
    pub target_language_field: Option<String>,

    /// Receives the probability of the language
    #[serde(default)]
    pub target_probability_field: Option<String>,

    /// Receives the top languages with their probabilities
    #[serde(default)]
    pub target_top_languages_field: Option<String>,

    /// Receives the reliability flag
    #[serde(default)]
    pub target_is_reliable_field: Option<String>,

    /// Leave documents without the source field untouched instead of failing
    #[serde(default)]
    pub ignore_missing: bool,
}

impl ProcessorConfig {
    /// Config reading `field` and writing every result part under `target_prefix`.
    pub fn with_target_prefix(field: impl Into<String>, target_prefix: &str) -> Self {
        Self {
            field: field.into(),
            target_language_field: Some(format!("{target_prefix}.language")),
            target_probability_field: Some(format!("{target_prefix}.probability")),
            target_top_languages_field: Some(format!("{target_prefix}.top_languages")),
            target_is_reliable_field: Some(format!("{target_prefix}.is_reliable")),
            ignore_missing: false,
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.field.trim().is_empty() {
            return Err(Error::Config("[field] required property is missing".to_string()));
        }
        let targets = [
            &self.target_language_field,
            &self.target_probability_field,
            &self.target_top_languages_field,
            &self.target_is_reliable_field,
        ];
        for target in targets.into_iter().flatten() {
            if target.split('.').any(str::is_empty) {
                return Err(Error::Config(format!("invalid target field [{target}]")));
            }
        }
        Ok(())
    }
}
