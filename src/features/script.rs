//! Dominant script feature.

use super::{FeatureType, FeatureValue, FeatureVector};
use crate::tokenization::dominant_script;

/// A single discrete feature holding the dominant ULScript id of `text`.
pub fn script_features(text: &str) -> FeatureVector {
    let mut features = FeatureVector::with_capacity(FeatureType::Script, 1);
    features.push(FeatureValue::Discrete(dominant_script(text).id()));
    features
}
