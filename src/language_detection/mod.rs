//! Neural language identification
//!
//! [`LanguageIdentifier`] runs the whole pipeline for one input: byte-budget
//! truncation, normalization, feature extraction, the embedding network and a
//! numerically stable softmax over its scores.

use crate::{
    config::LangIdentConfig,
    features::{self, dump_features, FeatureVector},
    models::{EmbeddingNetwork, ModelParameters},
    tokenization::{clean_and_lower_text, truncate_to_valid_byte_length},
    types::{LanguageDetection, LanguageProbability},
    Error, Result,
};
use std::sync::Arc;
use tracing::{debug, info, trace};

pub mod languages;

pub use languages::{language_index, language_name, LANGUAGE_NAMES, NUM_LANGUAGES};

/// Language identifier over a shared, immutable model.
///
/// Cloning is cheap and every call only allocates call-local buffers, so one
/// instance can serve any number of threads.
#[derive(Debug, Clone)]
pub struct LanguageIdentifier {
    network: EmbeddingNetwork,
    max_input_bytes: usize,
    top_n: usize,
    reliability_threshold: f32,
    close_language_threshold: f32,
}

impl LanguageIdentifier {
    /// Create an identifier, checking that the model predicts the known language set.
    pub fn new(params: Arc<ModelParameters>, config: &LangIdentConfig) -> Result<Self> {
        config.validate()?;
        if params.num_classes() != NUM_LANGUAGES {
            return Err(Error::shape(
                "softmax outputs",
                NUM_LANGUAGES,
                params.num_classes(),
            ));
        }

        info!(
            "Language identifier ready: {} languages, {} feature spaces",
            NUM_LANGUAGES,
            params.spaces().len()
        );

        Ok(Self {
            network: EmbeddingNetwork::new(params),
            max_input_bytes: config.max_input_bytes,
            top_n: config.top_n,
            reliability_threshold: config.reliability_threshold,
            close_language_threshold: config.close_language_threshold,
        })
    }

    /// Load the model named by `config.model_dir` and build an identifier over it.
    pub fn from_config(config: &LangIdentConfig) -> Result<Self> {
        let params = ModelParameters::load(&config.model_dir)?;
        Self::new(Arc::new(params), config)
    }

    /// Shared model parameters.
    pub fn params(&self) -> &ModelParameters {
        self.network.params()
    }

    /// Identify the language of raw text.
    pub fn find_language(&self, text: &str) -> Result<LanguageDetection> {
        let normalized = self.normalize(text);
        self.find_language_of_normalized(&normalized)
    }

    /// Identify the language of text already passed through [`clean_and_lower_text`].
    pub fn find_language_of_normalized(&self, text: &str) -> Result<LanguageDetection> {
        let probabilities = self.probabilities_of_normalized(text)?;
        Ok(self.detection_from(&probabilities))
    }

    /// Probability of every language for raw text, in model output order.
    pub fn probabilities(&self, text: &str) -> Result<Vec<LanguageProbability>> {
        let normalized = self.normalize(text);
        let probabilities = self.probabilities_of_normalized(&normalized)?;
        Ok(LANGUAGE_NAMES
            .iter()
            .zip(probabilities)
            .map(|(&name, p)| LanguageProbability::new(name, p))
            .collect())
    }

    /// Features of normalized text, one vector per embedding space in layout order.
    pub fn extract_features(&self, text: &str) -> Result<Vec<FeatureVector>> {
        let layout = self.params().layout();
        features::extract_features(text, &layout)
    }

    /// Whether `probability` is high enough to trust a prediction of `language`.
    pub fn is_reliable(&self, language: &str, probability: f32) -> bool {
        let threshold = if languages::CLOSE_LANGUAGES.contains(&language) {
            self.close_language_threshold
        } else {
            self.reliability_threshold
        };
        probability >= threshold
    }

    fn normalize(&self, text: &str) -> String {
        let truncated = truncate_to_valid_byte_length(text, self.max_input_bytes);
        if truncated.len() < text.len() {
            debug!(
                "Input truncated from {} to {} bytes",
                text.len(),
                truncated.len()
            );
        }
        clean_and_lower_text(truncated)
    }

    fn probabilities_of_normalized(&self, text: &str) -> Result<Vec<f32>> {
        let features = self.extract_features(text)?;
        trace!("features:\n{}", dump_features(&features));
        let scores = self.network.compute_scores(&features);
        Ok(softmax(&scores))
    }

    fn detection_from(&self, probabilities: &[f32]) -> LanguageDetection {
        let best = argmax(probabilities);
        let language = LANGUAGE_NAMES[best];
        let probability = probabilities[best];

        LanguageDetection {
            language: language.to_string(),
            probability,
            top_languages: top_n(probabilities, self.top_n),
            is_reliable: self.is_reliable(language, probability),
        }
    }
}

/// Index of the first maximum.
fn argmax(values: &[f32]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] {
            best = i;
        }
    }
    best
}

/// Softmax computed through log-sum-exp in double precision.
pub fn softmax(scores: &[f32]) -> Vec<f32> {
    if scores.is_empty() {
        return Vec::new();
    }
    let max = f64::from(scores[argmax(scores)]);
    let diff_sum: f64 = scores.iter().map(|&s| (f64::from(s) - max).exp()).sum();
    let log_sum_exp = max + diff_sum.ln();
    scores
        .iter()
        .map(|&s| (f64::from(s) - log_sum_exp).exp() as f32)
        .collect()
}

/// The `n` most probable languages, highest first; ties keep output order.
fn top_n(probabilities: &[f32], n: usize) -> Vec<LanguageProbability> {
    let mut order: Vec<usize> = (0..probabilities.len()).collect();
    order.sort_by(|&a, &b| probabilities[b].total_cmp(&probabilities[a]));
    order
        .into_iter()
        .take(n)
        .map(|i| LanguageProbability::new(LANGUAGE_NAMES[i], probabilities[i]))
        .collect()
}
