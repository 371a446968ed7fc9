//! Sparse features extracted from normalized text
//!
//! Each [`FeatureType`] owns one embedding table in the model. Extraction
//! produces one [`FeatureVector`] per type, holding either weighted
//! ([`FeatureValue::Continuous`]) or plain ([`FeatureValue::Discrete`]) row ids.

use crate::{tokenization::UlScript, Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod ngrams;
pub mod relevant_script;
pub mod script;

pub use ngrams::ngram_features;
pub use relevant_script::relevant_script_features;
pub use script::script_features;

use crate::tokenization::RelevantScript;

/// The feature families understood by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureType {
    /// Character unigrams hashed into 100 buckets.
    Unigrams,
    /// Character bigrams hashed into 1000 buckets.
    Bigrams,
    /// Character trigrams hashed into 5000 buckets.
    Trigrams,
    /// Character quadgrams hashed into 5000 buckets.
    Quadgrams,
    /// Distribution over the twelve relevant scripts.
    RelevantScripts,
    /// Dominant ULScript of the text.
    Script,
}

impl FeatureType {
    /// All feature types in the order the bundled model concatenates them.
    pub const MODEL_LAYOUT: [FeatureType; 6] = [
        FeatureType::Bigrams,
        FeatureType::Quadgrams,
        FeatureType::RelevantScripts,
        FeatureType::Script,
        FeatureType::Trigrams,
        FeatureType::Unigrams,
    ];

    /// The n-gram type for a supported (n, dimension) pair.
    pub fn for_ngram(ngram_size: usize, dimension: u32) -> Result<Self> {
        match (ngram_size, dimension) {
            (1, 100) => Ok(FeatureType::Unigrams),
            (2, 1000) => Ok(FeatureType::Bigrams),
            (3, 5000) => Ok(FeatureType::Trigrams),
            (4, 5000) => Ok(FeatureType::Quadgrams),
            _ => Err(Error::UnsupportedFeature {
                ngram_size,
                dimension,
            }),
        }
    }

    /// N-gram length, for n-gram types.
    pub fn ngram_size(self) -> Option<usize> {
        match self {
            FeatureType::Unigrams => Some(1),
            FeatureType::Bigrams => Some(2),
            FeatureType::Trigrams => Some(3),
            FeatureType::Quadgrams => Some(4),
            FeatureType::RelevantScripts | FeatureType::Script => None,
        }
    }

    /// Number of distinct ids, i.e. rows of the matching embedding table.
    pub fn vocabulary_size(self) -> usize {
        match self {
            FeatureType::Unigrams => 100,
            FeatureType::Bigrams => 1000,
            FeatureType::Trigrams | FeatureType::Quadgrams => 5000,
            FeatureType::RelevantScripts => RelevantScript::COUNT,
            FeatureType::Script => UlScript::TABLE_ROWS,
        }
    }

    /// Short name used in logs and feature dumps.
    pub fn name(self) -> &'static str {
        match self {
            FeatureType::Unigrams => "unigrams",
            FeatureType::Bigrams => "bigrams",
            FeatureType::Trigrams => "trigrams",
            FeatureType::Quadgrams => "quadgrams",
            FeatureType::RelevantScripts => "relevant_scripts",
            FeatureType::Script => "script",
        }
    }

    /// Run the extractor for this type over already normalized text.
    pub fn extract(self, text: &str) -> Result<FeatureVector> {
        match self {
            FeatureType::RelevantScripts => Ok(relevant_script_features(text)),
            FeatureType::Script => Ok(script_features(text)),
            ngram => {
                let n = ngram.ngram_size().unwrap_or_default();
                ngram_features(text, n, ngram.vocabulary_size() as u32)
            }
        }
    }
}

impl fmt::Display for FeatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One sparse feature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FeatureValue {
    /// A row id with implicit weight 1.0.
    Discrete(u32),
    /// A row id scaled by `weight`.
    Continuous {
        /// Embedding row.
        id: u32,
        /// Multiplier applied to the row.
        weight: f32,
    },
}

impl FeatureValue {
    /// Embedding row id.
    pub fn id(&self) -> u32 {
        match *self {
            FeatureValue::Discrete(id) | FeatureValue::Continuous { id, .. } => id,
        }
    }

    /// Row multiplier; discrete features weigh 1.0.
    pub fn weight(&self) -> f32 {
        match *self {
            FeatureValue::Discrete(_) => 1.0,
            FeatureValue::Continuous { weight, .. } => weight,
        }
    }

    /// 64-bit wire form: id in the low half, weight bits in the high half.
    pub fn pack(&self) -> u64 {
        match *self {
            FeatureValue::Discrete(id) => u64::from(id),
            FeatureValue::Continuous { id, weight } => {
                (u64::from(weight.to_bits()) << 32) | u64::from(id)
            }
        }
    }

    /// Decode a packed continuous value.
    pub fn unpack_continuous(packed: u64) -> Self {
        FeatureValue::Continuous {
            id: packed as u32,
            weight: f32::from_bits((packed >> 32) as u32),
        }
    }

    /// Decode a packed discrete value; the high half is ignored.
    pub fn unpack_discrete(packed: u64) -> Self {
        FeatureValue::Discrete(packed as u32)
    }
}

/// All features of one type extracted from a text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    feature_type: FeatureType,
    values: Vec<FeatureValue>,
}

impl FeatureVector {
    /// Empty vector for `feature_type`.
    pub fn new(feature_type: FeatureType) -> Self {
        Self {
            feature_type,
            values: Vec::new(),
        }
    }

    /// Vector with preallocated space.
    pub fn with_capacity(feature_type: FeatureType, capacity: usize) -> Self {
        Self {
            feature_type,
            values: Vec::with_capacity(capacity),
        }
    }

    /// Append a value.
    pub fn push(&mut self, value: FeatureValue) {
        self.values.push(value);
    }

    /// The feature family of every value in this vector.
    pub fn feature_type(&self) -> FeatureType {
        self.feature_type
    }

    /// Values in extraction order.
    pub fn values(&self) -> &[FeatureValue] {
        &self.values
    }

    /// Iterate over values.
    pub fn iter(&self) -> std::slice::Iter<'_, FeatureValue> {
        self.values.iter()
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no value was extracted.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values in their 64-bit wire form.
    pub fn packed_values(&self) -> Vec<u64> {
        self.values.iter().map(FeatureValue::pack).collect()
    }
}

impl<'a> IntoIterator for &'a FeatureVector {
    type Item = &'a FeatureValue;
    type IntoIter = std::slice::Iter<'a, FeatureValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl fmt::Display for FeatureVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[", self.feature_type)?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match value {
                FeatureValue::Discrete(id) => write!(f, "{id}")?,
                FeatureValue::Continuous { id, weight } => write!(f, "{id}={weight}")?,
            }
        }
        f.write_str("]")
    }
}

/// Run the extractors for `layout`, in order, over normalized text.
pub fn extract_features(text: &str, layout: &[FeatureType]) -> Result<Vec<FeatureVector>> {
    layout.iter().map(|ty| ty.extract(text)).collect()
}

/// Human-readable rendering of a full feature set, one type per line.
pub fn dump_features(features: &[FeatureVector]) -> String {
    features
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
