//! Extraction entry points.
//!
//! [`Extractor`] is the library's core: it owns the API client and the
//! extraction instruction, and turns one [`ExtractionRequest`] into one
//! [`ExtractionOutput`]. The HTTP server wraps it in shared state; the
//! free-function [`extract`] wraps it for one-shot callers.

use std::time::Instant;

use tracing::{error, info};

use crate::config::ExtractionConfig;
use crate::error::ExtractError;
use crate::output::ExtractionOutput;
use crate::pipeline::{content, model::AnthropicClient, sanitize};
use crate::prompts::DEFAULT_EXTRACTION_PROMPT;
use crate::request::ExtractionRequest;

/// Reusable extraction engine.
///
/// Build once from an [`ExtractionConfig`] and share across requests; the
/// underlying HTTP client pools connections. Construction succeeds without
/// an API credential so a service can come up before the key is provisioned;
/// each extraction then checks the credential before touching the network.
pub struct Extractor {
    client: AnthropicClient,
    instruction: String,
}

impl Extractor {
    pub fn new(config: &ExtractionConfig) -> Result<Self, ExtractError> {
        Ok(Self {
            client: AnthropicClient::new(config)?,
            instruction: config
                .system_prompt
                .clone()
                .unwrap_or_else(|| DEFAULT_EXTRACTION_PROMPT.to_string()),
        })
    }

    /// Run one extraction.
    ///
    /// Exactly one model call happens per invocation, with no retry. Input
    /// validation runs first, so a request with no file content fails
    /// before any network activity.
    ///
    /// # Errors
    /// - [`ExtractError::MissingFileData`] — no file content in the request
    /// - [`ExtractError::MissingApiKey`] — no credential configured
    /// - [`ExtractError::UpstreamCall`] — the model API call failed
    /// - [`ExtractError::InvalidFormat`] — the reply was not valid JSON
    pub async fn extract(
        &self,
        request: &ExtractionRequest,
    ) -> Result<ExtractionOutput, ExtractError> {
        let start = Instant::now();
        info!(
            "Starting extraction: {:?} submission ({})",
            request.file_type,
            request.file_name.as_deref().unwrap_or("unnamed")
        );

        // ── Step 1: Package the document as content blocks ───────────────
        let blocks = content::build_content_blocks(request, &self.instruction)?;

        // ── Step 2: One model call ────────────────────────────────────────
        let reply = self.client.complete(&blocks).await?;

        // ── Step 3: Sanitise and parse the reply ──────────────────────────
        let metadata = sanitize::parse_metadata(&reply.text).map_err(|e| {
            // The raw reply stays in the log; the caller sees a generic 500.
            error!("Model reply did not parse as JSON. Raw reply: {}", reply.text);
            e
        })?;

        let duration_ms = start.elapsed().as_millis() as u64;
        info!(
            "Extraction complete: {} input tokens, {} output tokens, {}ms",
            reply.input_tokens, reply.output_tokens, duration_ms
        );

        Ok(ExtractionOutput {
            metadata,
            model: reply.model,
            stop_reason: reply.stop_reason,
            input_tokens: reply.input_tokens,
            output_tokens: reply.output_tokens,
            duration_ms,
        })
    }
}

/// Extract metadata from a single request.
///
/// One-shot convenience wrapper around [`Extractor`]; prefer building an
/// `Extractor` once when serving many requests.
///
/// # Example
/// ```rust,no_run
/// use creditsift::{extract, ExtractionConfig, ExtractionRequest};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ExtractionConfig::from_env();
/// let request = ExtractionRequest::text("Summer EP, released 2024 on Nightjar Records.");
/// let output = extract(&request, &config).await?;
/// println!("{}", serde_json::to_string_pretty(&output.metadata)?);
/// # Ok(())
/// # }
/// ```
pub async fn extract(
    request: &ExtractionRequest,
    config: &ExtractionConfig,
) -> Result<ExtractionOutput, ExtractError> {
    Extractor::new(config)?.extract(request).await
}
