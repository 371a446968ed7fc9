//! Shared fixtures for integration tests
#![allow(dead_code)]

use langident::models::{shape, DenseLayer, EmbeddingSpace, ModelParameters, QuantizedEmbedding};
use langident::language_detection::language_index;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Scale bits for 1.0
pub const UNIT_SCALE: u16 = 0x3F80;

/// Index of a feature type in the bundled layout
pub const SCRIPT_SPACE: usize = 3;

/// Model with the bundled shape whose weights are all neutral until set.
///
/// Embedding values are stored centered (0 means the quantized byte 128).
pub struct SyntheticModel {
    embeddings: Vec<Vec<u8>>,
    hidden_weights: Vec<f32>,
    hidden_bias: Vec<f32>,
    softmax_weights: Vec<f32>,
    softmax_bias: Vec<f32>,
}

impl SyntheticModel {
    pub fn new() -> Self {
        Self {
            embeddings: (0..6)
                .map(|i| vec![128u8; shape::EMBEDDING_ROWS[i] * shape::EMBEDDING_DIMS[i]])
                .collect(),
            hidden_weights: vec![0.0; shape::CONCAT_SIZE * shape::HIDDEN_SIZE],
            hidden_bias: vec![0.0; shape::HIDDEN_SIZE],
            softmax_weights: vec![0.0; shape::HIDDEN_SIZE * shape::NUM_CLASSES],
            softmax_bias: vec![0.0; shape::NUM_CLASSES],
        }
    }

    pub fn embedding(mut self, space: usize, row: usize, col: usize, value: i8) -> Self {
        let cols = shape::EMBEDDING_DIMS[space];
        self.embeddings[space][row * cols + col] = (i32::from(value) + 128) as u8;
        self
    }

    pub fn hidden(mut self, input: usize, output: usize, weight: f32) -> Self {
        self.hidden_weights[input * shape::HIDDEN_SIZE + output] = weight;
        self
    }

    pub fn softmax(mut self, input: usize, language: &str, weight: f32) -> Self {
        let class = language_index(language).expect("known language");
        self.softmax_weights[input * shape::NUM_CLASSES + class] = weight;
        self
    }

    pub fn softmax_bias(mut self, bias: Vec<f32>) -> Self {
        assert_eq!(bias.len(), shape::NUM_CLASSES);
        self.softmax_bias = bias;
        self
    }

    /// Routes the dominant-script embedding of `script` to `language`.
    ///
    /// Uses hidden unit `unit` and script column `unit % 8`.
    pub fn route_script(self, script: usize, unit: usize, language: &str, strength: i8) -> Self {
        let col = unit % shape::EMBEDDING_DIMS[SCRIPT_SPACE];
        let concat_slot = shape::CONCAT_OFFSETS[SCRIPT_SPACE] + col;
        self.embedding(SCRIPT_SPACE, script, col, strength)
            .hidden(concat_slot, unit, 1.0)
            .softmax(unit, language, 1.0)
    }

    pub fn build(self) -> ModelParameters {
        let spaces = self
            .embeddings
            .into_iter()
            .enumerate()
            .map(|(i, data)| EmbeddingSpace {
                feature_type: shape::LAYOUT[i],
                offset: shape::CONCAT_OFFSETS[i],
                table: QuantizedEmbedding::new(
                    shape::EMBEDDING_ROWS[i],
                    shape::EMBEDDING_DIMS[i],
                    data,
                    vec![UNIT_SCALE; shape::EMBEDDING_ROWS[i]],
                )
                .unwrap(),
            })
            .collect();
        let hidden = DenseLayer::new(
            shape::CONCAT_SIZE,
            shape::HIDDEN_SIZE,
            self.hidden_weights,
            self.hidden_bias,
        )
        .unwrap();
        let softmax = DenseLayer::new(
            shape::HIDDEN_SIZE,
            shape::NUM_CLASSES,
            self.softmax_weights,
            self.softmax_bias,
        )
        .unwrap();
        ModelParameters::new(spaces, hidden, softmax).unwrap()
    }

    pub fn build_arc(self) -> Arc<ModelParameters> {
        Arc::new(self.build())
    }

    /// Write the model as flat resource files under `dir`.
    pub fn write_resources(&self, dir: &Path) {
        fn write_all<T: std::fmt::Display>(dir: &Path, name: &str, values: &[T]) {
            let mut body = values.len().to_string();
            for v in values {
                write!(body, " {v}").unwrap();
            }
            std::fs::write(dir.join(name), body).unwrap();
        }
        for (i, data) in self.embeddings.iter().enumerate() {
            write_all(
                dir,
                &format!("kEmbeddingsQuantScales{i}"),
                &vec![UNIT_SCALE; shape::EMBEDDING_ROWS[i]],
            );
            write_all(dir, &format!("kEmbeddingsWeights{i}"), data);
        }
        write_all(dir, "kHiddenWeights0", &self.hidden_weights);
        write_all(dir, "kHiddenBiasWeights0", &self.hidden_bias);
        write_all(dir, "kSoftmaxWeights0", &self.softmax_weights);
        write_all(dir, "kSoftmaxBiasWeights0", &self.softmax_bias);
    }
}

/// Model that tells Latin (en), Han (zh) and Hangul (ko) apart by dominant script.
pub fn script_routing_model() -> SyntheticModel {
    SyntheticModel::new()
        .route_script(1, 0, "en", 10)
        .route_script(24, 1, "zh", 10)
        .route_script(102, 2, "ko", 10)
}

/// Softmax bias giving equal mass to `languages` and none to the rest.
pub fn split_bias(languages: &[&str]) -> Vec<f32> {
    let mut bias = vec![f32::NEG_INFINITY; shape::NUM_CLASSES];
    for lang in languages {
        bias[language_index(lang).expect("known language")] = 0.0;
    }
    bias
}

/// Directory holding the real model resources, if they are installed.
pub fn real_model_dir() -> Option<PathBuf> {
    let dir = std::env::var_os(langident::config::MODEL_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("models/lang_ident"));
    dir.join("kEmbeddingsWeights0").exists().then_some(dir)
}

/// Assert approximately equal for floating point comparisons
pub fn assert_approx_eq(a: f32, b: f32, epsilon: f32) {
    assert!(
        (a - b).abs() < epsilon,
        "Values not approximately equal: {} != {} (epsilon: {})",
        a,
        b,
        epsilon
    );
}
