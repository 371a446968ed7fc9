//! Immutable parameters of the embedding network.
//!
//! A model is a list of embedding spaces (one per feature type, each with a
//! quantized table and an offset into the concatenation layer), a hidden
//! layer and a softmax layer. [`ModelParameters::new`] checks every shape once
//! so inference can index without further validation.

use crate::{features::FeatureType, Error, Result};

/// Offset subtracted from every stored `u8` weight.
pub const QUANTIZATION_BIAS: i32 = 128;

/// Decode a stored row scale: the value is the upper half of an IEEE-754 `f32`.
#[inline]
pub fn decode_scale(bits: u16) -> f32 {
    f32::from_bits(u32::from(bits) << 16)
}

/// One row of a quantized embedding table.
#[derive(Debug, Clone, Copy)]
pub struct QuantizedRow<'a> {
    data: &'a [u8],
    scale: f32,
}

impl<'a> QuantizedRow<'a> {
    /// Raw quantized values.
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Decoded row scale.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Dequantized value of column `col`, before scaling.
    #[inline]
    pub fn centered(&self, col: usize) -> f32 {
        (i32::from(self.data[col]) - QUANTIZATION_BIAS) as f32
    }

    /// Add this row, scaled by `weight`, into `out`.
    #[inline]
    pub fn accumulate_into(&self, out: &mut [f32], weight: f32) {
        let multiplier = self.scale * weight;
        for (slot, &q) in out.iter_mut().zip(self.data) {
            *slot += (i32::from(q) - QUANTIZATION_BIAS) as f32 * multiplier;
        }
    }

    /// Fully dequantized row.
    pub fn dequantize(&self) -> Vec<f32> {
        let mut out = vec![0.0; self.data.len()];
        self.accumulate_into(&mut out, 1.0);
        out
    }
}

/// Row-major `u8` embedding table with one scale per row.
#[derive(Debug, Clone)]
pub struct QuantizedEmbedding {
    rows: usize,
    cols: usize,
    data: Vec<u8>,
    scales: Vec<u16>,
}

impl QuantizedEmbedding {
    /// Build a table, checking that `data` holds `rows * cols` values and `scales` one per row.
    pub fn new(rows: usize, cols: usize, data: Vec<u8>, scales: Vec<u16>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(Error::shape("embedding weights", rows * cols, data.len()));
        }
        if scales.len() != rows {
            return Err(Error::shape("embedding scales", rows, scales.len()));
        }
        Ok(Self {
            rows,
            cols,
            data,
            scales,
        })
    }

    /// Vocabulary size.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Embedding dimension.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Row `id`. Panics if `id` is out of range.
    pub fn row(&self, id: usize) -> QuantizedRow<'_> {
        let start = id * self.cols;
        QuantizedRow {
            data: &self.data[start..start + self.cols],
            scale: decode_scale(self.scales[id]),
        }
    }
}

/// Dense float layer stored input-major: `weights[i * outputs + j]` links input `i` to output `j`.
#[derive(Debug, Clone)]
pub struct DenseLayer {
    inputs: usize,
    outputs: usize,
    weights: Vec<f32>,
    bias: Vec<f32>,
}

impl DenseLayer {
    /// Build a layer, checking weight and bias lengths.
    pub fn new(inputs: usize, outputs: usize, weights: Vec<f32>, bias: Vec<f32>) -> Result<Self> {
        if weights.len() != inputs * outputs {
            return Err(Error::shape("layer weights", inputs * outputs, weights.len()));
        }
        if bias.len() != outputs {
            return Err(Error::shape("layer bias", outputs, bias.len()));
        }
        Ok(Self {
            inputs,
            outputs,
            weights,
            bias,
        })
    }

    /// Input width.
    pub fn inputs(&self) -> usize {
        self.inputs
    }

    /// Output width.
    pub fn outputs(&self) -> usize {
        self.outputs
    }

    /// Outgoing weights of input `i`.
    #[inline]
    pub fn weights_from(&self, i: usize) -> &[f32] {
        &self.weights[i * self.outputs..(i + 1) * self.outputs]
    }

    /// Bias vector.
    pub fn bias(&self) -> &[f32] {
        &self.bias
    }
}

/// A feature type, its table, and where its block starts in the concatenation layer.
#[derive(Debug, Clone)]
pub struct EmbeddingSpace {
    /// Features that index this table.
    pub feature_type: FeatureType,
    /// First concat slot written by this space.
    pub offset: usize,
    /// Quantized embedding table.
    pub table: QuantizedEmbedding,
}

/// Shape of the bundled model.
pub mod shape {
    use crate::features::FeatureType;

    /// Feature order of the concatenation layer.
    pub const LAYOUT: [FeatureType; 6] = FeatureType::MODEL_LAYOUT;
    /// Rows per embedding table.
    pub const EMBEDDING_ROWS: [usize; 6] = [1000, 5000, 12, 103, 5000, 100];
    /// Columns per embedding table.
    pub const EMBEDDING_DIMS: [usize; 6] = [16, 16, 8, 8, 16, 16];
    /// First concat slot per table.
    pub const CONCAT_OFFSETS: [usize; 6] = [0, 16, 32, 40, 48, 64];
    /// Width of the concatenation layer.
    pub const CONCAT_SIZE: usize = 80;
    /// Width of the hidden layer.
    pub const HIDDEN_SIZE: usize = 208;
    /// Number of output classes.
    pub const NUM_CLASSES: usize = 109;
}

/// Complete, validated network parameters.
#[derive(Debug, Clone)]
pub struct ModelParameters {
    spaces: Vec<EmbeddingSpace>,
    concat_size: usize,
    hidden: DenseLayer,
    softmax: DenseLayer,
}

impl ModelParameters {
    /// Assemble parameters, checking that the spaces tile the concatenation
    /// layer without gaps and that the layers chain.
    pub fn new(spaces: Vec<EmbeddingSpace>, hidden: DenseLayer, softmax: DenseLayer) -> Result<Self> {
        if spaces.is_empty() {
            return Err(Error::ModelLoad("model has no embedding spaces".to_string()));
        }

        let mut concat_size = 0;
        for space in &spaces {
            if space.offset != concat_size {
                return Err(Error::shape(
                    format!("{} concat offset", space.feature_type),
                    concat_size,
                    space.offset,
                ));
            }
            let vocabulary = space.feature_type.vocabulary_size();
            if space.table.rows() != vocabulary {
                return Err(Error::shape(
                    format!("{} embedding rows", space.feature_type),
                    vocabulary,
                    space.table.rows(),
                ));
            }
            concat_size += space.table.cols();
        }

        if hidden.inputs() != concat_size {
            return Err(Error::shape("hidden layer inputs", concat_size, hidden.inputs()));
        }
        if softmax.inputs() != hidden.outputs() {
            return Err(Error::shape(
                "softmax layer inputs",
                hidden.outputs(),
                softmax.inputs(),
            ));
        }

        Ok(Self {
            spaces,
            concat_size,
            hidden,
            softmax,
        })
    }

    /// Embedding spaces in concatenation order.
    pub fn spaces(&self) -> &[EmbeddingSpace] {
        &self.spaces
    }

    /// Feature types in concatenation order.
    pub fn layout(&self) -> Vec<FeatureType> {
        self.spaces.iter().map(|s| s.feature_type).collect()
    }

    /// Width of the concatenation layer.
    pub fn concat_size(&self) -> usize {
        self.concat_size
    }

    /// Hidden layer.
    pub fn hidden(&self) -> &DenseLayer {
        &self.hidden
    }

    /// Softmax layer.
    pub fn softmax(&self) -> &DenseLayer {
        &self.softmax
    }

    /// Number of output classes.
    pub fn num_classes(&self) -> usize {
        self.softmax.outputs()
    }
}
