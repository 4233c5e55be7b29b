//! HTTP API: health, sector discovery, configuration, and wage prediction.
//!
//! Routes:
//! - `GET  /health`
//! - `GET  /api/sectors`
//! - `GET  /api/config`
//! - `POST /api/predict`
//! - `GET  /api/test/{sector}`
//!
//! Every error, including unmatched routes, wrong methods, timeouts and
//! handler panics, is returned as `{"error": "..."}`.

mod error;
mod routes;

use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::Router;
use axum::http::{StatusCode, header};
use axum::middleware::map_response;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use wagecast_predict::PredictionService;

pub use error::ApiError;

/// Build the application router around a shared prediction service.
pub fn router(service: Arc<PredictionService>, timeout: Duration) -> Router {
    let app = Router::new()
        .route("/health", get(routes::health))
        .route("/api/sectors", get(routes::sectors))
        .route("/api/config", get(routes::config))
        .route("/api/predict", post(routes::predict))
        .route("/api/test/{sector}", get(routes::test_sector))
        .fallback(routes::not_found)
        .with_state(service);
    with_layers(app, timeout)
}

/// Wrap routes in the timeout, JSON error, panic, tracing and CORS layers.
fn with_layers(app: Router, timeout: Duration) -> Router {
    app.layer(TimeoutLayer::with_status_code(
        StatusCode::REQUEST_TIMEOUT,
        timeout,
    ))
    .layer(map_response(json_status_errors))
    .layer(CatchPanicLayer::custom(panic_response))
    .layer(TraceLayer::new_for_http())
    .layer(CorsLayer::permissive())
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(addr: SocketAddr, app: Router) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

/// Give framework-generated 405 and 408 responses the JSON error body.
///
/// Headers of the replaced response (such as `Allow`) are kept, except the
/// body framing ones.
async fn json_status_errors(response: Response) -> Response {
    let error = match response.status() {
        StatusCode::METHOD_NOT_ALLOWED => ApiError::MethodNotAllowed,
        StatusCode::REQUEST_TIMEOUT => ApiError::Timeout,
        _ => return response,
    };
    let mut replacement = error.into_response();
    let headers = replacement.headers_mut();
    for (name, value) in response.headers() {
        if name == header::CONTENT_LENGTH || name == header::CONTENT_TYPE {
            continue;
        }
        headers.insert(name.clone(), value.clone());
    }
    replacement
}

fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_default();
    error!(panic = %detail, "handler panicked");
    ApiError::Internal.into_response()
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;

    async fn call(app: Router, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn handler_panic_is_generic_500() {
        async fn explode() -> &'static str {
            panic!("handler bug")
        }
        let app = with_layers(
            Router::new().route("/explode", get(explode)),
            Duration::from_secs(5),
        );

        let (status, body) = call(app, "/explode").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Internal server error"}));
    }

    #[tokio::test]
    async fn slow_handler_times_out_as_json_408() {
        async fn slow() -> &'static str {
            tokio::time::sleep(Duration::from_secs(5)).await;
            "done"
        }
        let app = with_layers(
            Router::new().route("/slow", get(slow)),
            Duration::from_millis(20),
        );

        let (status, body) = call(app, "/slow").await;
        assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
        assert_eq!(body, json!({"error": "Request timed out"}));
    }

    #[tokio::test]
    async fn method_not_allowed_keeps_allow_header() {
        let app = with_layers(
            Router::new().route("/only-post", post(|| async { "ok" })),
            Duration::from_secs(5),
        );
        let request = Request::builder()
            .method("GET")
            .uri("/only-post")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let allow = response.headers()[header::ALLOW].to_str().unwrap();
        assert!(allow.contains("POST"), "allow: {allow}");
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    }
}
