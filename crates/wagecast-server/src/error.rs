use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use wagecast_predict::PredictError;

/// Every non-success outcome of the API, rendered as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No data provided")]
    NoData,

    #[error("Missing sector or data in request")]
    MissingSectorOrData,

    #[error("Sector '{sector}' not available. Available: {available:?}")]
    SectorNotAvailable {
        sector: String,
        available: Vec<String>,
    },

    /// Validation or encoding rejected the record.
    #[error("{0}")]
    Rejected(String),

    /// The model failed; details stay in the logs.
    #[error("Prediction failed")]
    Prediction,

    #[error("Endpoint not found")]
    NotFound,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Request timed out")]
    Timeout,

    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NoData
            | Self::MissingSectorOrData
            | Self::SectorNotAvailable { .. }
            | Self::Rejected(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Timeout => StatusCode::REQUEST_TIMEOUT,
            Self::Prediction | Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<PredictError> for ApiError {
    fn from(err: PredictError) -> Self {
        if err.is_client_error() {
            Self::Rejected(err.to_string())
        } else {
            Self::Prediction
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wagecast_predict::ValidationError;

    #[test]
    fn client_prediction_errors_are_bad_requests() {
        let err: ApiError = PredictError::from(ValidationError::MissingFields {
            missing: vec!["age".into()],
        })
        .into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), r#"Missing required fields: ["age"]"#);
    }

    #[test]
    fn unavailable_sector_lists_what_is_loaded() {
        let err = ApiError::SectorNotAvailable {
            sector: "mining".into(),
            available: vec!["agriculture".into()],
        };
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.to_string(),
            r#"Sector 'mining' not available. Available: ["agriculture"]"#
        );
    }

    #[test]
    fn inference_errors_hide_details() {
        let err: ApiError = PredictError::Inference("tree 7 corrupted".into()).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Prediction failed");
    }
}
