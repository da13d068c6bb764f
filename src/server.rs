//! HTTP surface: router, shared state, and handlers.
//!
//! One POST route does the work; everything else is plumbing. The handler
//! returns [`ApiError`] for every failure so the wire contract (status code,
//! JSON body, `fallback` flag) lives in exactly one place, `error.rs`.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::config::ExtractionConfig;
use crate::error::{ApiError, ExtractError};
use crate::extract::Extractor;
use crate::request::ExtractionRequest;

/// Default request body cap: 32 MiB covers multi-page PDF scans at
/// base64 overhead while bounding memory per request.
pub const DEFAULT_MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Extraction engine; one HTTP connection pool for all requests.
    pub extractor: Arc<Extractor>,
    /// Configured model, reported by `/health`.
    pub model: String,
    /// Service start time for uptime reporting.
    pub started: Instant,
}

impl AppState {
    pub fn new(config: &ExtractionConfig) -> Result<Self, ExtractError> {
        Ok(Self {
            extractor: Arc::new(Extractor::new(config)?),
            model: config.model.clone(),
            started: Instant::now(),
        })
    }
}

/// Build the application router.
///
/// `POST /` runs an extraction; any other method on `/` gets a JSON 405.
/// `GET /health` reports liveness without touching the model API.
pub fn build_router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/", post(extract_handler).fallback(method_not_allowed))
        .route("/health", get(health_check))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// POST /
///
/// Body: `{"fileData": ..., "fileType": "text"|"image"|"pdf", "fileName": ...}`.
/// Success: `{"success": true, "schemaVersion": N, "metadata": {...}}`.
async fn extract_handler(
    State(state): State<AppState>,
    payload: Result<Json<ExtractionRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        ApiError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
    })?;

    let output = state.extractor.extract(&request).await?;
    Ok(Json(output.envelope()))
}

/// Catches every non-POST method on the extraction route.
async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Not found" })),
    )
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status, always "ok" when the process is serving.
    pub status: String,
    /// Service name ("creditsift").
    pub service: String,
    /// Crate version from Cargo.toml.
    pub version: String,
    /// Seconds since service started.
    pub uptime_seconds: u64,
    /// Model extractions are sent to.
    pub model: String,
}

/// GET /health
///
/// Liveness for monitoring. Deliberately does not call the model API, so it
/// stays green even when the credential is missing or the upstream is down.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: "creditsift".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started.elapsed().as_secs(),
        model: state.model.clone(),
    })
}
