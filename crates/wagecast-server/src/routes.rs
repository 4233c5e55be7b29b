//! Route handlers and their response bodies.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{error, info, warn};
use wagecast_core::{PredictionRequest, PredictionResult, Sector};
use wagecast_predict::PredictionService;

use crate::error::ApiError;

pub(crate) type AppState = Arc<PredictionService>;

/// Numeric inputs shared by every sector's form.
const NUMERICAL_FIELDS: [&str; 4] = ["age", "experience_years", "skill_level", "working_hours"];

#[derive(Debug, Serialize)]
pub(crate) struct HealthResponse {
    status: &'static str,
    models_loaded: BTreeMap<&'static str, bool>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SectorsResponse {
    sectors: Vec<Sector>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SectorConfig {
    name: &'static str,
    icon: &'static str,
    metadata: Map<String, Value>,
    categorical_fields: Vec<String>,
    numerical_fields: [&'static str; 4],
    valid_values: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct PredictResponse {
    success: bool,
    #[serde(flatten)]
    result: PredictionResult,
}

pub(crate) async fn health(State(service): State<AppState>) -> Json<HealthResponse> {
    let registry = service.registry();
    let models_loaded = Sector::ALL
        .into_iter()
        .map(|s| (s.as_str(), registry.is_loaded(s)))
        .collect();
    Json(HealthResponse {
        status: "healthy",
        models_loaded,
    })
}

pub(crate) async fn sectors(State(service): State<AppState>) -> Json<SectorsResponse> {
    Json(SectorsResponse {
        sectors: service.registry().available_sectors(),
    })
}

pub(crate) async fn config(
    State(service): State<AppState>,
) -> Json<BTreeMap<&'static str, SectorConfig>> {
    let registry = service.registry();
    let config = registry
        .available_sectors()
        .into_iter()
        .filter_map(|sector| {
            let schema = registry.schema_of(sector)?;
            let categorical_fields: Vec<String> =
                schema.categorical_fields().map(str::to_string).collect();
            let valid_values = categorical_fields
                .iter()
                .filter_map(|field| {
                    let vocab = schema.vocabulary(field)?;
                    Some((field.clone(), vocab.classes().to_vec()))
                })
                .collect();
            Some((
                sector.as_str(),
                SectorConfig {
                    name: sector.display_name(),
                    icon: sector.icon(),
                    metadata: schema.metadata().clone(),
                    categorical_fields,
                    numerical_fields: NUMERICAL_FIELDS,
                    valid_values,
                },
            ))
        })
        .collect();
    Json(config)
}

pub(crate) async fn predict(
    State(service): State<AppState>,
    body: Bytes,
) -> Result<Json<PredictResponse>, ApiError> {
    let request = parse_request(&body)?;
    run_prediction(service, request).await
}

/// Predict against the sector's built-in sample record.
pub(crate) async fn test_sector(
    State(service): State<AppState>,
    Path(sector): Path<String>,
) -> Result<Json<PredictResponse>, ApiError> {
    let sector = sector.trim().to_lowercase();
    // Unknown sectors get an empty record; validation then reports them unavailable.
    let data = Sector::parse(&sector)
        .map(|s| s.sample_input())
        .unwrap_or_default();
    run_prediction(service, PredictionRequest { sector, data }).await
}

pub(crate) async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Extract `{sector, data}` from a raw body.
///
/// The sector is trimmed and lowercased; an absent or empty sector or data
/// object is a malformed request.
fn parse_request(body: &[u8]) -> Result<PredictionRequest, ApiError> {
    let payload: Value = serde_json::from_slice(body).map_err(|_| ApiError::NoData)?;
    let mut payload = match payload {
        Value::Object(map) if !map.is_empty() => map,
        _ => return Err(ApiError::NoData),
    };

    let sector = payload
        .get("sector")
        .and_then(Value::as_str)
        .map(|s| s.trim().to_lowercase())
        .unwrap_or_default();
    let data = match payload.remove("data") {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    };

    if sector.is_empty() || data.is_empty() {
        return Err(ApiError::MissingSectorOrData);
    }
    Ok(PredictionRequest { sector, data })
}

/// Reject sectors that are unknown or failed to load before any record checks.
fn check_sector(service: &PredictionService, sector: &str) -> Result<(), ApiError> {
    let registry = service.registry();
    if Sector::parse(sector).is_some_and(|s| registry.is_loaded(s)) {
        return Ok(());
    }
    let available = registry
        .available_sectors()
        .iter()
        .map(|s| s.as_str().to_string())
        .collect();
    warn!(%sector, "sector not available");
    Err(ApiError::SectorNotAvailable {
        sector: sector.to_string(),
        available,
    })
}

async fn run_prediction(
    service: AppState,
    request: PredictionRequest,
) -> Result<Json<PredictResponse>, ApiError> {
    check_sector(&service, &request.sector)?;
    let sector = request.sector.clone();
    let task = tokio::task::spawn_blocking(move || service.predict(&request.sector, &request.data));
    let outcome = task.await.map_err(|e| {
        error!(%sector, error = %e, "prediction task did not complete");
        ApiError::Internal
    })?;

    match outcome {
        Ok(result) => {
            info!(%sector, predicted_wage = result.predicted_wage, "prediction served");
            Ok(Json(PredictResponse {
                success: true,
                result,
            }))
        }
        Err(e) => {
            if e.is_client_error() {
                warn!(%sector, error = %e, "prediction rejected");
            }
            Err(e.into())
        }
    }
}
