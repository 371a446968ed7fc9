//! Core types and data structures

use serde::{Deserialize, Serialize};
use std::fmt;

/// A language code with its probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageProbability {
    /// Language code from the model vocabulary
    pub language: String,

    /// Softmax probability (0.0 to 1.0)
    pub probability: f32,
}

impl LanguageProbability {
    /// Create a new entry
    pub fn new(language: impl Into<String>, probability: f32) -> Self {
        Self {
            language: language.into(),
            probability,
        }
    }
}

impl fmt::Display for LanguageProbability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.language, self.probability)
    }
}

/// Language identification result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageDetection {
    /// Most probable language code
    pub language: String,

    /// Probability of `language` (0.0 to 1.0)
    pub probability: f32,

    /// Most probable languages, highest first
    pub top_languages: Vec<LanguageProbability>,

    /// Whether `probability` clears the reliability threshold for `language`
    pub is_reliable: bool,
}

impl fmt::Display for LanguageDetection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LanguageDetection{{language='{}', probability={}, top_languages=[",
            self.language, self.probability
        )?;
        for (i, entry) in self.top_languages.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{entry}")?;
        }
        write!(f, "], is_reliable={}}}", self.is_reliable)
    }
}
