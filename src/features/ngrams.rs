//! Continuous bag of hashed character n-grams.

use super::{FeatureType, FeatureValue, FeatureVector};
use crate::{tokenization::bucket, Result};
use std::collections::BTreeMap;

/// Marks the start of a word.
const WORD_START: char = '^';
/// Marks the end of a word.
const WORD_END: char = '$';

/// Frame every word of `text` with start and end markers.
///
/// `" ab c "` becomes `"^$ ^ab$ ^c$ ^$"`.
fn frame(text: &str) -> Vec<char> {
    let mut framed = Vec::with_capacity(text.len() * 3 + 2);
    framed.push(WORD_START);
    for c in text.chars() {
        if c == ' ' {
            framed.extend([WORD_END, ' ', WORD_START]);
        } else {
            framed.push(c);
        }
    }
    framed.push(WORD_END);
    framed
}

/// Relative frequency of each distinct n-gram, bucketed into `dimension` rows.
///
/// Windows that cross a word boundary are skipped. Distinct n-grams that land
/// in the same bucket are reported as separate values.
pub fn ngram_features(text: &str, ngram_size: usize, dimension: u32) -> Result<FeatureVector> {
    let feature_type = FeatureType::for_ngram(ngram_size, dimension)?;

    let framed = frame(text);
    let mut counts: BTreeMap<String, u32> = BTreeMap::new();
    let mut total = 0u32;
    for window in framed.windows(ngram_size) {
        if window.contains(&' ') {
            continue;
        }
        *counts.entry(window.iter().collect()).or_insert(0) += 1;
        total += 1;
    }

    let mut features = FeatureVector::with_capacity(feature_type, counts.len());
    if total == 0 {
        return Ok(features);
    }

    let norm = total as f32;
    for (ngram, count) in &counts {
        features.push(FeatureValue::Continuous {
            id: bucket(ngram, dimension),
            weight: *count as f32 / norm,
        });
    }
    Ok(features)
}
