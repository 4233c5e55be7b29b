//! Raw and typed worker attribute values.

use serde_json::{Map, Value};

/// Field → value mapping exactly as submitted by a client.
pub type InputData = Map<String, Value>;

/// One prediction call: a sector identifier plus the worker's attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRequest {
    pub sector: String,
    pub data: InputData,
}

/// A worker attribute after the validation boundary has assigned it a type.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    /// A JSON number destined for a numeric model column.
    Numeric(f64),
    /// A trimmed string that is a member of the field's vocabulary.
    Categorical(String),
    /// Anything else (text, booleans, null, containers) in a non-vocabulary field.
    ///
    /// Presence-only validation lets these through; the encoder refuses them.
    Unrecognised(Value),
}

impl FeatureValue {
    /// Type a raw value for a field without a vocabulary.
    pub fn from_raw(value: &Value) -> Self {
        match value {
            Value::Number(n) => match n.as_f64() {
                Some(x) => Self::Numeric(x),
                None => Self::Unrecognised(value.clone()),
            },
            Value::String(s) => Self::Unrecognised(Value::String(s.trim().to_string())),
            other => Self::Unrecognised(other.clone()),
        }
    }
}
