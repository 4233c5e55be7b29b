//! Prediction pipeline: validate a worker record against its sector schema,
//! encode it into the model's column order, run the sector's model, and
//! post-process the output.

mod encode;
mod error;
pub mod model;
mod service;
mod validate;

pub use encode::encode;
pub use error::{EncodingError, PredictError, ValidationError};
pub use model::ModelSpec;
pub use service::PredictionService;
pub use validate::{ValidatedInput, ValidationOutcome, validate, validate_against};
