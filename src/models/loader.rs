//! Flat-file model resources.
//!
//! Every resource is a whitespace separated list of numbers whose first
//! token is the element count. The bundled model ships sixteen of them:
//! a scale and a weight file per embedding table plus weights and bias for
//! the hidden and softmax layers.

use super::params::{shape, DenseLayer, EmbeddingSpace, ModelParameters, QuantizedEmbedding};
use crate::{Error, Result};
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Element types a resource may hold.
pub trait ResourceValue: Sized {
    /// Parse one token.
    fn parse_token(token: &str) -> Option<Self>;
}

impl ResourceValue for u8 {
    fn parse_token(token: &str) -> Option<Self> {
        token.parse().ok()
    }
}

impl ResourceValue for u16 {
    // Scales may be written as signed shorts; keep the bit pattern.
    fn parse_token(token: &str) -> Option<Self> {
        let value: i32 = token.parse().ok()?;
        (i32::from(i16::MIN)..=i32::from(u16::MAX))
            .contains(&value)
            .then_some(value as u16)
    }
}

impl ResourceValue for f32 {
    fn parse_token(token: &str) -> Option<Self> {
        token.parse().ok()
    }
}

/// Parse resource text named `name`.
pub fn parse_resource<T: ResourceValue>(name: &str, contents: &str) -> Result<Vec<T>> {
    let mut tokens = contents.split_whitespace();
    let header = tokens
        .next()
        .ok_or_else(|| Error::ModelLoad(format!("{name}: empty resource")))?;
    let count: usize = header
        .parse()
        .map_err(|_| Error::ModelLoad(format!("{name}: invalid element count {header:?}")))?;

    let mut values = Vec::with_capacity(count);
    for index in 0..count {
        let token = tokens.next().ok_or_else(|| {
            Error::ModelLoad(format!("{name}: expected {count} values, found {index}"))
        })?;
        let value = T::parse_token(token).ok_or_else(|| {
            Error::ModelLoad(format!("{name}: malformed value {token:?} at index {index}"))
        })?;
        values.push(value);
    }

    let extra = tokens.count();
    if extra > 0 {
        warn!("{}: ignoring {} trailing values", name, extra);
    }
    Ok(values)
}

/// Read and parse the resource `name` under `dir`, checking its length.
pub fn read_resource<T: ResourceValue>(dir: &Path, name: &str, expected: usize) -> Result<Vec<T>> {
    let path = dir.join(name);
    let contents = fs::read_to_string(&path)
        .map_err(|e| Error::ModelLoad(format!("cannot read {}: {}", path.display(), e)))?;
    let values = parse_resource(name, &contents)?;
    if values.len() != expected {
        return Err(Error::ModelLoad(format!(
            "{name}: expected {expected} values, resource declares {}",
            values.len()
        )));
    }
    debug!("Loaded {} ({} values)", name, values.len());
    Ok(values)
}

/// Load the bundled model layout from `dir`.
pub fn load_model(dir: &Path) -> Result<ModelParameters> {
    let start = Instant::now();
    info!("Loading language identification model from {}", dir.display());

    let mut spaces = Vec::with_capacity(shape::LAYOUT.len());
    for (i, &feature_type) in shape::LAYOUT.iter().enumerate() {
        let rows = shape::EMBEDDING_ROWS[i];
        let cols = shape::EMBEDDING_DIMS[i];
        let scales = read_resource::<u16>(dir, &format!("kEmbeddingsQuantScales{i}"), rows)?;
        let data = read_resource::<u8>(dir, &format!("kEmbeddingsWeights{i}"), rows * cols)?;
        spaces.push(EmbeddingSpace {
            feature_type,
            offset: shape::CONCAT_OFFSETS[i],
            table: QuantizedEmbedding::new(rows, cols, data, scales)?,
        });
    }

    let hidden = DenseLayer::new(
        shape::CONCAT_SIZE,
        shape::HIDDEN_SIZE,
        read_resource(dir, "kHiddenWeights0", shape::CONCAT_SIZE * shape::HIDDEN_SIZE)?,
        read_resource(dir, "kHiddenBiasWeights0", shape::HIDDEN_SIZE)?,
    )?;
    let softmax = DenseLayer::new(
        shape::HIDDEN_SIZE,
        shape::NUM_CLASSES,
        read_resource(dir, "kSoftmaxWeights0", shape::HIDDEN_SIZE * shape::NUM_CLASSES)?,
        read_resource(dir, "kSoftmaxBiasWeights0", shape::NUM_CLASSES)?,
    )?;

    let params = ModelParameters::new(spaces, hidden, softmax)?;
    info!(
        "Language identification model loaded in {:?} ({} classes)",
        start.elapsed(),
        params.num_classes()
    );
    Ok(params)
}

impl ModelParameters {
    /// Load the bundled model layout from a resource directory.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        load_model(dir.as_ref())
    }
}
