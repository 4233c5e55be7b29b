//! Map a validated record onto the model's ordered numeric columns.

use wagecast_core::{FeatureValue, SectorSchema};

use crate::error::EncodingError;
use crate::validate::ValidatedInput;

/// Encode `input` into a vector ordered exactly as `schema.feature_order()`.
///
/// Categorical features become their vocabulary code; numeric features pass
/// through. Vocabulary membership is re-checked here even though the
/// validator already did, so the encoder is safe to call on its own.
pub fn encode(schema: &SectorSchema, input: &ValidatedInput) -> Result<Vec<f64>, EncodingError> {
    schema
        .feature_order()
        .iter()
        .map(|field| {
            let value = input
                .get(field)
                .ok_or_else(|| EncodingError::MissingValue {
                    field: field.clone(),
                })?;
            encode_value(schema, field, value)
        })
        .collect()
}

fn encode_value(
    schema: &SectorSchema,
    field: &str,
    value: &FeatureValue,
) -> Result<f64, EncodingError> {
    if let Some(vocab) = schema.vocabulary(field) {
        let text = match value {
            FeatureValue::Categorical(s) => s.trim().to_string(),
            FeatureValue::Numeric(x) => x.to_string(),
            FeatureValue::Unrecognised(v) => v.to_string(),
        };
        return vocab
            .code(&text)
            .map(|code| code as f64)
            .ok_or(EncodingError::UnknownCategory {
                field: field.to_string(),
                value: text,
            });
    }

    match value {
        FeatureValue::Numeric(x) => Ok(*x),
        FeatureValue::Categorical(s) => Err(EncodingError::NotNumeric {
            field: field.to_string(),
            value: format!("'{s}'"),
        }),
        FeatureValue::Unrecognised(v) => Err(EncodingError::NotNumeric {
            field: field.to_string(),
            value: v.to_string(),
        }),
    }
}
