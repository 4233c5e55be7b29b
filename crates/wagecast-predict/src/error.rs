use thiserror::Error;

/// Why a worker record was rejected before encoding.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Sector '{sector}' model not loaded. Available: {available:?}")]
    SectorUnavailable {
        sector: String,
        available: Vec<String>,
    },

    #[error("Missing required fields: {missing:?}")]
    MissingFields { missing: Vec<String> },

    #[error("Invalid value '{value}' for field '{field}'. Valid options: {allowed:?}")]
    InvalidValue {
        field: String,
        value: String,
        allowed: Vec<String>,
    },
}

/// A validated record that still cannot be mapped onto model columns.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EncodingError {
    #[error("Encoding error for {field}: '{value}' is not a known category")]
    UnknownCategory { field: String, value: String },

    #[error("Encoding error for {field}: expected a number, got {value}")]
    NotNumeric { field: String, value: String },

    #[error("Encoding error for {field}: no value supplied")]
    MissingValue { field: String },
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum PredictError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error("inference failed: {0}")]
    Inference(String),
}

impl PredictError {
    /// Whether the caller's input caused the failure (as opposed to the model).
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Encoding(_))
    }
}
