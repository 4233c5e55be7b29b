//! Per-sector schema: model column order, categorical vocabularies, metadata.
//!
//! A [`SectorSchema`] is built once when a sector's artifacts are loaded and
//! never mutated afterwards. Construction enforces the invariants the
//! validator and encoder rely on, so a schema that exists is always usable.

use std::collections::{HashMap, HashSet};

use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("feature list is empty")]
    EmptyFeatures,

    #[error("duplicate feature name: {0}")]
    DuplicateFeature(String),

    #[error("vocabulary for '{0}' does not match any feature")]
    UnknownVocabularyField(String),

    #[error("vocabulary for '{0}' is empty")]
    EmptyVocabulary(String),

    #[error("vocabulary for '{field}' lists '{value}' more than once")]
    DuplicateClass { field: String, value: String },
}

/// Closed set of accepted strings for one categorical feature.
///
/// Classes keep their load order; a class's integer code is its position.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    classes: Vec<String>,
    codes: HashMap<String, usize>,
}

impl Vocabulary {
    /// Build a vocabulary for `field`, rejecting empty or repeated classes.
    pub fn new(field: &str, classes: Vec<String>) -> Result<Self, SchemaError> {
        if classes.is_empty() {
            return Err(SchemaError::EmptyVocabulary(field.to_string()));
        }
        let mut codes = HashMap::with_capacity(classes.len());
        for (code, class) in classes.iter().enumerate() {
            if codes.insert(class.clone(), code).is_some() {
                return Err(SchemaError::DuplicateClass {
                    field: field.to_string(),
                    value: class.clone(),
                });
            }
        }
        Ok(Self { classes, codes })
    }

    /// Integer code for a class, or `None` if it is not a member.
    pub fn code(&self, value: &str) -> Option<usize> {
        self.codes.get(value).copied()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.codes.contains_key(value)
    }

    /// Classes in code order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// Everything the pipeline needs to know about one sector's model inputs.
#[derive(Debug, Clone)]
pub struct SectorSchema {
    feature_order: Vec<String>,
    vocabularies: HashMap<String, Vocabulary>,
    metadata: Map<String, Value>,
}

impl SectorSchema {
    /// Assemble a schema, checking that the feature order is non-empty and
    /// duplicate-free and that every vocabulary belongs to a feature.
    pub fn new(
        feature_order: Vec<String>,
        vocabularies: HashMap<String, Vocabulary>,
        metadata: Map<String, Value>,
    ) -> Result<Self, SchemaError> {
        if feature_order.is_empty() {
            return Err(SchemaError::EmptyFeatures);
        }

        let mut seen = HashSet::with_capacity(feature_order.len());
        for name in &feature_order {
            if !seen.insert(name.as_str()) {
                return Err(SchemaError::DuplicateFeature(name.clone()));
            }
        }

        // Sorted so the reported field is stable across runs.
        let mut fields: Vec<&String> = vocabularies.keys().collect();
        fields.sort();
        if let Some(stray) = fields.into_iter().find(|f| !seen.contains(f.as_str())) {
            return Err(SchemaError::UnknownVocabularyField(stray.clone()));
        }

        Ok(Self {
            feature_order,
            vocabularies,
            metadata,
        })
    }

    /// Convenience constructor from raw class lists (as stored on disk).
    pub fn from_classes(
        feature_order: Vec<String>,
        classes: impl IntoIterator<Item = (String, Vec<String>)>,
        metadata: Map<String, Value>,
    ) -> Result<Self, SchemaError> {
        let mut vocabularies = HashMap::new();
        for (field, values) in classes {
            let vocab = Vocabulary::new(&field, values)?;
            vocabularies.insert(field, vocab);
        }
        Self::new(feature_order, vocabularies, metadata)
    }

    /// Column order the prediction capability expects.
    pub fn feature_order(&self) -> &[String] {
        &self.feature_order
    }

    pub fn feature_count(&self) -> usize {
        self.feature_order.len()
    }

    pub fn vocabulary(&self, field: &str) -> Option<&Vocabulary> {
        self.vocabularies.get(field)
    }

    /// Vocabulary-bearing features, in feature order.
    pub fn categorical_fields(&self) -> impl Iterator<Item = &str> {
        self.feature_order
            .iter()
            .map(String::as_str)
            .filter(|name| self.vocabularies.contains_key(*name))
    }

    /// Opaque descriptive data, passed through unmodified.
    pub fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }
}
