//! Forward pass of the embedding network.

use super::params::{DenseLayer, ModelParameters};
use crate::features::FeatureVector;
use std::sync::Arc;
use tracing::trace;

/// `y = bias + Σ_i x[i] * W[i]`, skipping non-positive inputs when `apply_relu` is set.
pub fn sparse_relu_product_plus_bias(apply_relu: bool, layer: &DenseLayer, x: &[f32]) -> Vec<f32> {
    debug_assert_eq!(x.len(), layer.inputs());
    let mut y = layer.bias().to_vec();
    for (i, &scale) in x.iter().enumerate() {
        if apply_relu && scale <= 0.0 {
            continue;
        }
        for (out, &w) in y.iter_mut().zip(layer.weights_from(i)) {
            *out += w * scale;
        }
    }
    y
}

/// Scores feature sets with a shared, read-only parameter set.
#[derive(Debug, Clone)]
pub struct EmbeddingNetwork {
    params: Arc<ModelParameters>,
}

impl EmbeddingNetwork {
    /// Wrap loaded parameters.
    pub fn new(params: Arc<ModelParameters>) -> Self {
        Self { params }
    }

    /// Underlying parameters.
    pub fn params(&self) -> &ModelParameters {
        &self.params
    }

    /// Sum the weighted embedding rows of every feature into the concatenation layer.
    ///
    /// `features` must hold one vector per embedding space, in layout order.
    pub fn concat_embeddings(&self, features: &[FeatureVector]) -> Vec<f32> {
        let spaces = self.params.spaces();
        assert_eq!(
            features.len(),
            spaces.len(),
            "one feature vector per embedding space"
        );

        let mut concat = vec![0.0f32; self.params.concat_size()];
        for (space, vector) in spaces.iter().zip(features) {
            assert_eq!(
                vector.feature_type(),
                space.feature_type,
                "feature vector out of layout order"
            );
            let cols = space.table.cols();
            let block = &mut concat[space.offset..space.offset + cols];
            for value in vector {
                space
                    .table
                    .row(value.id() as usize)
                    .accumulate_into(block, value.weight());
            }
        }
        concat
    }

    /// Unnormalized class scores for one feature set.
    pub fn compute_scores(&self, features: &[FeatureVector]) -> Vec<f32> {
        let concat = self.concat_embeddings(features);
        let hidden = sparse_relu_product_plus_bias(false, self.params.hidden(), &concat);
        let scores = sparse_relu_product_plus_bias(true, self.params.softmax(), &hidden);
        trace!(classes = scores.len(), "computed scores");
        scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{FeatureType, FeatureValue};
    use crate::models::params::{EmbeddingSpace, QuantizedEmbedding};

    fn layer(inputs: usize, outputs: usize, weights: Vec<f32>, bias: Vec<f32>) -> DenseLayer {
        DenseLayer::new(inputs, outputs, weights, bias).unwrap()
    }

    #[test]
    fn test_product_without_relu() {
        let l = layer(2, 2, vec![1.0, 2.0, 3.0, 4.0], vec![0.5, -0.5]);
        let y = sparse_relu_product_plus_bias(false, &l, &[2.0, -1.0]);
        // [0.5 + 2 - 3, -0.5 + 4 - 4]
        assert_eq!(y, vec![-0.5, -0.5]);
    }

    #[test]
    fn test_product_with_relu_skips_non_positive() {
        let l = layer(3, 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![0.0, 0.0]);
        let y = sparse_relu_product_plus_bias(true, &l, &[2.0, -1.0, 0.0]);
        assert_eq!(y, vec![2.0, 4.0]);
    }

    #[test]
    fn test_product_empty_input_is_bias() {
        let l = layer(2, 3, vec![9.0; 6], vec![1.0, 2.0, 3.0]);
        assert_eq!(
            sparse_relu_product_plus_bias(true, &l, &[0.0, -2.0]),
            vec![1.0, 2.0, 3.0]
        );
    }

    fn two_space_network() -> EmbeddingNetwork {
        // Script: 103 rows x 2 cols; row 1 = (+2, -1) at scale 1.0.
        let mut script_data = vec![128u8; 103 * 2];
        script_data[2] = 130;
        script_data[3] = 127;
        let script = QuantizedEmbedding::new(103, 2, script_data, vec![0x3F80; 103]).unwrap();

        // Relevant scripts: 12 rows x 1 col; row 11 = +4 at scale 0.5.
        let mut rs_data = vec![128u8; 12];
        rs_data[11] = 132;
        let relevant = QuantizedEmbedding::new(12, 1, rs_data, vec![0x3F00; 12]).unwrap();

        let spaces = vec![
            EmbeddingSpace {
                feature_type: FeatureType::Script,
                offset: 0,
                table: script,
            },
            EmbeddingSpace {
                feature_type: FeatureType::RelevantScripts,
                offset: 2,
                table: relevant,
            },
        ];
        // Hidden: identity 3x3, softmax: sums inputs into class 0, negated into class 1.
        let hidden = layer(
            3,
            3,
            vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
            vec![0.0; 3],
        );
        let softmax = layer(3, 2, vec![1.0, -1.0, 1.0, -1.0, 1.0, -1.0], vec![0.0, 0.0]);
        let params = ModelParameters::new(spaces, hidden, softmax).unwrap();
        EmbeddingNetwork::new(Arc::new(params))
    }

    fn features(script: u32, relevant: &[(u32, f32)]) -> Vec<FeatureVector> {
        let mut s = FeatureVector::new(FeatureType::Script);
        s.push(FeatureValue::Discrete(script));
        let mut r = FeatureVector::new(FeatureType::RelevantScripts);
        for &(id, weight) in relevant {
            r.push(FeatureValue::Continuous { id, weight });
        }
        vec![s, r]
    }

    #[test]
    fn test_concat_embeddings() {
        let net = two_space_network();
        let concat = net.concat_embeddings(&features(1, &[(11, 0.5), (0, 0.5)]));
        // Row 11 contributes 4 * 0.5 * 0.5.
        assert_eq!(concat, vec![2.0, -1.0, 1.0]);
    }

    #[test]
    fn test_compute_scores_applies_relu_on_hidden_activations() {
        let net = two_space_network();
        let scores = net.compute_scores(&features(1, &[(11, 1.0)]));
        // Hidden = (2, -1, 2); the negative unit is dropped before the softmax layer.
        assert_eq!(scores, vec![4.0, -4.0]);
    }

    #[test]
    #[should_panic(expected = "one feature vector per embedding space")]
    fn test_feature_count_mismatch_panics() {
        let net = two_space_network();
        let mut only = features(1, &[]);
        only.pop();
        net.compute_scores(&only);
    }

    #[test]
    #[should_panic(expected = "feature vector out of layout order")]
    fn test_feature_order_mismatch_panics() {
        let net = two_space_network();
        let mut swapped = features(1, &[]);
        swapped.reverse();
        net.compute_scores(&swapped);
    }
}
