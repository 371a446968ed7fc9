//! Language identification over JSON documents
//!
//! Reads a text field, runs the identifier and writes the parts of the result
//! into the configured target fields.

use crate::{
    config::ProcessorConfig, language_detection::LanguageIdentifier, types::LanguageDetection,
    Error, Result,
};
use serde_json::{Map, Value};
use tracing::warn;

/// A JSON object document.
pub type Document = Map<String, Value>;

/// Applies a [`LanguageIdentifier`] to documents.
#[derive(Debug, Clone)]
pub struct LangIdentProcessor {
    identifier: LanguageIdentifier,
    config: ProcessorConfig,
}

impl LangIdentProcessor {
    /// Create a processor; the configuration is validated first.
    pub fn new(identifier: LanguageIdentifier, config: ProcessorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { identifier, config })
    }

    /// Processor configuration.
    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Identify `text`, handling a missing value according to `ignore_missing`.
    pub fn identify(&self, text: Option<&str>) -> Result<Option<LanguageDetection>> {
        match text {
            Some(text) => self.identifier.find_language(text).map(Some),
            None if self.config.ignore_missing => Ok(None),
            None => Err(Error::MissingField(self.config.field.clone())),
        }
    }

    /// Identify the source field of `doc` and write the result into it.
    ///
    /// Returns the detection, or `None` when the source field is absent and
    /// `ignore_missing` is set. On error `doc` is left unchanged.
    pub fn infer(&self, doc: &mut Document) -> Result<Option<LanguageDetection>> {
        let text = match get_path(doc, &self.config.field) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                return Err(Error::InvalidInput(format!(
                    "field [{}] of type {} cannot be converted to a string",
                    self.config.field,
                    json_type(other)
                )))
            }
        };

        let Some(detection) = self.identify(text.as_deref())? else {
            return Ok(None);
        };

        // Writes go to a copy so a failing target leaves `doc` untouched.
        let mut staged = doc.clone();
        if let Some(target) = &self.config.target_language_field {
            set_path(&mut staged, target, Value::from(detection.language.clone()))?;
        }
        if let Some(target) = &self.config.target_probability_field {
            set_path(&mut staged, target, Value::from(f64::from(detection.probability)))?;
        }
        if let Some(target) = &self.config.target_top_languages_field {
            set_path(&mut staged, target, serde_json::to_value(&detection.top_languages)?)?;
        }
        if let Some(target) = &self.config.target_is_reliable_field {
            set_path(&mut staged, target, Value::from(detection.is_reliable))?;
        }
        *doc = staged;
        Ok(Some(detection))
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Value at a dotted path.
pub fn get_path<'a>(doc: &'a Document, path: &str) -> Option<&'a Value> {
    let mut parts = path.split('.');
    let mut current = doc.get(parts.next()?)?;
    for part in parts {
        current = current.as_object()?.get(part)?;
    }
    Some(current)
}

/// Set the value at a dotted path, creating intermediate objects.
pub fn set_path(doc: &mut Document, path: &str, value: Value) -> Result<()> {
    let (parents, leaf) = match path.rsplit_once('.') {
        Some((parents, leaf)) => (Some(parents), leaf),
        None => (None, path),
    };

    let mut current = doc;
    for part in parents.into_iter().flat_map(|p| p.split('.')) {
        let entry = current
            .entry(part.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        current = match entry {
            Value::Object(map) => map,
            other => {
                warn!("Cannot descend into [{}] of type {}", part, json_type(other));
                return Err(Error::InvalidInput(format!(
                    "cannot set [{path}]: [{part}] is a {}",
                    json_type(other)
                )));
            }
        };
    }
    current.insert(leaf.to_string(), value);
    Ok(())
}
