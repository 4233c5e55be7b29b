//! Schema conformance checks for submitted worker records.
//!
//! Checks run in a fixed order: sector availability, required-field
//! presence, then categorical membership. Extra fields are tolerated and
//! carried through. Numeric fields are checked for presence only.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;
use wagecast_core::{FeatureValue, InputData, Sector, SectorRegistry, SectorSchema};

use crate::error::ValidationError;

/// Outcome of [`validate`]: the typed record, or the reason it was rejected.
pub type ValidationOutcome = Result<ValidatedInput, ValidationError>;

/// A worker record that conforms to its sector's schema.
///
/// Categorical values are trimmed vocabulary members; every other value has
/// been typed by [`FeatureValue::from_raw`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedInput {
    sector: Sector,
    values: HashMap<String, FeatureValue>,
}

impl ValidatedInput {
    pub fn sector(&self) -> Sector {
        self.sector
    }

    pub fn get(&self, field: &str) -> Option<&FeatureValue> {
        self.values.get(field)
    }

    /// All submitted fields, including ones the schema does not use.
    pub fn values(&self) -> &HashMap<String, FeatureValue> {
        &self.values
    }
}

/// Validate `input` for the sector named `sector` against the registry.
pub fn validate(registry: &SectorRegistry, sector: &str, input: &InputData) -> ValidationOutcome {
    let Some((parsed, schema)) =
        Sector::parse(sector).and_then(|s| registry.schema_of(s).map(|schema| (s, schema)))
    else {
        return Err(ValidationError::SectorUnavailable {
            sector: sector.to_string(),
            available: registry
                .available_sectors()
                .iter()
                .map(|s| s.as_str().to_string())
                .collect(),
        });
    };

    validate_against(parsed, schema, input)
}

/// Validate `input` against an explicit schema.
pub fn validate_against(
    sector: Sector,
    schema: &SectorSchema,
    input: &InputData,
) -> ValidationOutcome {
    let missing: Vec<String> = schema
        .feature_order()
        .iter()
        .filter(|name| !input.contains_key(name.as_str()))
        .cloned()
        .collect();
    if !missing.is_empty() {
        debug!(%sector, ?missing, "rejecting record with missing fields");
        return Err(ValidationError::MissingFields { missing });
    }

    let mut values = HashMap::with_capacity(input.len());

    for field in schema.categorical_fields() {
        let Some(vocab) = schema.vocabulary(field) else {
            continue;
        };
        let Some(raw) = input.get(field) else {
            continue;
        };
        let candidate = match raw {
            Value::String(s) => s.trim().to_string(),
            // Non-text can never match a vocabulary of strings.
            other => other.to_string(),
        };
        if !raw.is_string() || !vocab.contains(&candidate) {
            debug!(%sector, field, value = %candidate, "rejecting value outside vocabulary");
            return Err(ValidationError::InvalidValue {
                field: field.to_string(),
                value: candidate,
                allowed: vocab.classes().to_vec(),
            });
        }
        values.insert(field.to_string(), FeatureValue::Categorical(candidate));
    }

    for (field, raw) in input {
        if !values.contains_key(field) {
            values.insert(field.clone(), FeatureValue::from_raw(raw));
        }
    }

    Ok(ValidatedInput { sector, values })
}
