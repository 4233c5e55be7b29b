//! Prediction orchestration: validate → encode → infer → post-process.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use tracing::{debug, error};
use wagecast_core::{InputData, PredictionResult, Predictor, SectorRegistry};

use crate::encode::encode;
use crate::error::PredictError;
use crate::validate::validate;

/// Runs wage predictions against an immutable registry snapshot.
///
/// Holds no per-request state; a single instance is shared by every
/// concurrent request.
#[derive(Debug, Clone)]
pub struct PredictionService {
    registry: Arc<SectorRegistry>,
}

impl PredictionService {
    pub fn new(registry: Arc<SectorRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &SectorRegistry {
        &self.registry
    }

    /// Predict the daily wage for one worker record.
    ///
    /// Validation and encoding failures are returned verbatim. Failures of
    /// the model itself, including panics and non-finite outputs, become
    /// [`PredictError::Inference`].
    pub fn predict(
        &self,
        sector: &str,
        input: &InputData,
    ) -> Result<PredictionResult, PredictError> {
        let validated = validate(&self.registry, sector, input)?;
        let loaded = self
            .registry
            .loaded(validated.sector())
            .ok_or_else(|| PredictError::Inference(format!("sector '{sector}' was unloaded")))?;

        let features = encode(&loaded.schema, &validated)?;
        debug!(sector = %validated.sector(), ?features, "encoded feature vector");

        let raw = run_predictor(loaded.predictor.as_ref(), &features).map_err(|e| {
            error!(sector = %validated.sector(), error = %e, "model inference failed");
            PredictError::Inference(e)
        })?;

        let result = PredictionResult::from_raw(validated.sector(), raw, input.clone());
        if !result.is_finite() {
            let msg = format!("model returned unusable value {raw}: estimates overflow");
            error!(sector = %validated.sector(), error = %msg, "model inference failed");
            return Err(PredictError::Inference(msg));
        }
        Ok(result)
    }
}

fn run_predictor(predictor: &dyn Predictor, features: &[f64]) -> Result<f64, String> {
    let outcome = catch_unwind(AssertUnwindSafe(|| predictor.predict(features)));
    match outcome {
        Ok(Ok(raw)) if raw.is_finite() => Ok(raw),
        Ok(Ok(raw)) => Err(format!("model returned unusable value {raw}")),
        Ok(Err(e)) => Err(format!("{e:#}")),
        Err(payload) => {
            let msg = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            Err(format!("model panicked: {msg}"))
        }
    }
}
