//! Embedding network model: parameters, resource loading and inference

pub mod loader;
pub mod network;
pub mod params;

pub use loader::{load_model, parse_resource, read_resource};
pub use network::{sparse_relu_product_plus_bias, EmbeddingNetwork};
pub use params::{
    decode_scale, shape, DenseLayer, EmbeddingSpace, ModelParameters, QuantizedEmbedding,
    QuantizedRow,
};
