//! Distribution of characters over the relevant scripts.

use super::{FeatureType, FeatureValue, FeatureVector};
use crate::tokenization::RelevantScript;

/// Share of each relevant script among the counted characters of `text`.
///
/// One-byte characters count only when they are ASCII letters. Scripts are
/// reported in ascending id order; text with nothing to count yields an empty
/// vector.
pub fn relevant_script_features(text: &str) -> FeatureVector {
    let mut counts = [0u32; RelevantScript::COUNT];
    let mut total = 0u32;
    for c in text.chars() {
        if c.is_ascii() && !c.is_ascii_alphabetic() {
            continue;
        }
        counts[RelevantScript::of(c).id() as usize] += 1;
        total += 1;
    }

    let mut features = FeatureVector::new(FeatureType::RelevantScripts);
    if total == 0 {
        return features;
    }
    let norm = total as f32;
    for (id, &count) in counts.iter().enumerate() {
        if count > 0 {
            features.push(FeatureValue::Continuous {
                id: id as u32,
                weight: count as f32 / norm,
            });
        }
    }
    features
}
