//! Error types for the creditsift library and HTTP surface.
//!
//! Two distinct error types reflect two distinct layers:
//!
//! * [`ExtractError`] — failures inside the extraction engine itself
//!   (missing input, missing credential, upstream call failure, unparsable
//!   model reply). Returned by [`crate::extract`] and
//!   [`crate::Extractor::extract`].
//!
//! * [`ApiError`] — the HTTP-facing taxonomy. Adds the transport-only cases
//!   (wrong method, malformed body) and maps every variant onto the wire
//!   contract: status code, client-safe message, and the `fallback` flag
//!   telling callers to degrade to manual entry rather than treat the
//!   failure as fatal.
//!
//! Raw diagnostic context (upstream error bodies, unparsable model output)
//! is logged at the failure site and never echoed to the caller: 500-class
//! response bodies carry fixed generic messages only.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// All errors returned by the extraction engine.
///
/// `MissingFileData` is the one caller-error variant (the request carried no
/// file content); everything else is a service-side failure that the HTTP
/// layer surfaces with `fallback: true`.
#[derive(Debug, Error)]
pub enum ExtractError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The request carried no file content.
    #[error("fileData is required")]
    MissingFileData,

    // ── Config errors ─────────────────────────────────────────────────────
    /// No API credential was available at invocation time.
    #[error("Model API credential is not configured (set ANTHROPIC_API_KEY)")]
    MissingApiKey,

    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Model errors ──────────────────────────────────────────────────────
    /// The model API returned a non-success status, or the call failed in
    /// transport. The raw upstream error body is logged, not carried here.
    #[error("Model API call failed: {detail}")]
    UpstreamCall { detail: String },

    /// The model reply was not valid JSON after code-fence stripping.
    /// `detail` is the JSON parser's message; the raw reply is logged only.
    #[error("Model reply is not valid JSON: {detail}")]
    InvalidFormat { detail: String },

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// HTTP-facing error for the extraction service.
///
/// Every variant renders as a JSON body. `fallback: true` accompanies every
/// 500 and never a 400/405: a missing field is the caller's mistake to fix,
/// while a failed extraction means the caller should offer manual entry.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Anything but POST on the extraction route.
    #[error("method not allowed")]
    MethodNotAllowed,

    /// Malformed or incomplete request body.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Extraction engine failure.
    #[error(transparent)]
    Extract(#[from] ExtractError),
}

impl ApiError {
    /// Status code, client-safe message, and fallback flag for this error.
    ///
    /// 500-class messages are fixed strings: the interesting detail
    /// (upstream error body, raw model output) was already logged
    /// server-side and must not leak to the caller.
    pub(crate) fn wire_parts(&self) -> (StatusCode, String, bool) {
        match self {
            ApiError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "Method not allowed. Use POST.".to_string(),
                false,
            ),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone(), false),
            ApiError::Extract(ExtractError::MissingFileData) => (
                StatusCode::BAD_REQUEST,
                "fileData is required".to_string(),
                false,
            ),
            ApiError::Extract(ExtractError::MissingApiKey)
            | ApiError::Extract(ExtractError::InvalidConfig(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Extraction service is not configured".to_string(),
                true,
            ),
            ApiError::Extract(ExtractError::UpstreamCall { .. }) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Metadata extraction failed".to_string(),
                true,
            ),
            ApiError::Extract(ExtractError::InvalidFormat { .. }) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Model returned an unexpected format".to_string(),
                true,
            ),
            ApiError::Extract(ExtractError::Internal(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
                true,
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, fallback) = self.wire_parts();

        // Every failure is logged before the (possibly generic) response
        // goes out. Upstream bodies and raw model replies were already
        // logged at their failure sites with full detail.
        if status.is_server_error() {
            tracing::error!("Extraction request failed: {}", self);
        } else {
            tracing::warn!("Rejected extraction request: {}", self);
        }

        let body = if fallback {
            json!({ "error": message, "fallback": true })
        } else {
            json!({ "error": message })
        };

        (status, Json(body)).into_response()
    }
}
