//! Model interaction: one call to the Anthropic messages API.
//!
//! This module is intentionally thin — all prompt engineering lives in
//! [`crate::prompts`] and all packaging in [`crate::pipeline::content`], so
//! the wire protocol can be inspected and tested without either.
//!
//! ## Exactly One Call
//!
//! Each extraction makes at most one API request, with no retry or backoff.
//! The caller is an interactive client that already handles failure by
//! offering manual entry; silently retrying would multiply cost and latency
//! for a request the user may have abandoned.

use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error};

use crate::config::ExtractionConfig;
use crate::error::ExtractError;
use crate::pipeline::content::ContentBlock;

/// Messages API version header value.
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// What the model said, plus accounting metadata.
#[derive(Debug, Clone)]
pub struct ModelReply {
    /// All text segments of the reply, concatenated in order.
    pub text: String,
    /// Model that actually served the request.
    pub model: String,
    pub stop_reason: Option<String>,
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// Client for the Anthropic messages API.
///
/// Built once at startup and shared across requests. The credential is
/// optional so the service can start without one; its absence surfaces as
/// [`ExtractError::MissingApiKey`] on the first call instead.
pub struct AnthropicClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    max_tokens: u32,
}

impl AnthropicClient {
    pub fn new(config: &ExtractionConfig) -> Result<Self, ExtractError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.api_timeout_secs {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| ExtractError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        })
    }

    /// Send one user message built from `blocks` and return the reply.
    ///
    /// Network and upstream-status failures come back as
    /// [`ExtractError::UpstreamCall`]; the raw upstream error body is logged
    /// here and never carried in the error.
    pub async fn complete(&self, blocks: &[ContentBlock]) -> Result<ModelReply, ExtractError> {
        let api_key = self.api_key.as_deref().ok_or(ExtractError::MissingApiKey)?;

        let body = json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "messages": [{ "role": "user", "content": blocks }],
        });

        let url = format!("{}/v1/messages", self.base_url);
        let response = self
            .http
            .post(&url)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("Model API request failed: {}", e);
                ExtractError::UpstreamCall {
                    detail: e.to_string(),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!("Model API error (HTTP {}): {}", status, error_body);
            return Err(ExtractError::UpstreamCall {
                detail: format!("HTTP {status}"),
            });
        }

        let reply: MessagesResponse = response.json().await.map_err(|e| {
            error!("Model API returned an unreadable body: {}", e);
            ExtractError::UpstreamCall {
                detail: format!("malformed API response: {e}"),
            }
        })?;

        debug!(
            "Model call complete: {} input tokens, {} output tokens, stop_reason {:?}",
            reply.usage.input_tokens, reply.usage.output_tokens, reply.stop_reason
        );

        Ok(ModelReply {
            text: reply_text(&reply),
            model: reply.model,
            stop_reason: reply.stop_reason,
            input_tokens: reply.usage.input_tokens,
            output_tokens: reply.usage.output_tokens,
        })
    }
}

// ── Wire types ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ReplyBlock>,
    #[serde(default)]
    model: String,
    #[serde(default)]
    stop_reason: Option<String>,
    #[serde(default)]
    usage: Usage,
}

/// Reply blocks we care about. Anything that is not text (tool use,
/// thinking, future block types) is tolerated and skipped.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ReplyBlock {
    Text { text: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Default, Deserialize)]
struct Usage {
    #[serde(default)]
    input_tokens: u64,
    #[serde(default)]
    output_tokens: u64,
}

/// Concatenate the text segments of a reply, in order.
fn reply_text(reply: &MessagesResponse) -> String {
    reply
        .content
        .iter()
        .filter_map(|block| match block {
            ReplyBlock::Text { text } => Some(text.as_str()),
            ReplyBlock::Other => None,
        })
        .collect()
}
