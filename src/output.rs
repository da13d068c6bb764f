//! Output types: what an extraction returns to the caller.
//!
//! The metadata document is kept as a raw [`serde_json::Value`] and relayed
//! verbatim — the service never reshapes, filters, or "fixes" what the model
//! produced, so a well-formed reply reaches the client byte-for-byte in
//! content. Callers who want structure call [`ExtractionOutput::typed`].

use serde::Serialize;
use serde_json::{json, Value};

use crate::error::ExtractError;
use crate::schema::{CreditsMetadata, SCHEMA_VERSION};

/// Result of a successful extraction.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionOutput {
    /// The metadata document exactly as the model produced it (after
    /// code-fence stripping and JSON parsing, with no other changes).
    pub metadata: Value,

    /// Model that served the request, as reported by the API.
    pub model: String,

    /// Why the model stopped (`end_turn`, `max_tokens`, ...).
    pub stop_reason: Option<String>,

    /// Prompt tokens consumed.
    pub input_tokens: u64,

    /// Completion tokens produced.
    pub output_tokens: u64,

    /// Wall-clock duration of the extraction, including the API call.
    pub duration_ms: u64,
}

impl ExtractionOutput {
    /// The JSON envelope the HTTP service returns on success.
    ///
    /// `schemaVersion` sits beside the metadata, not inside it, so the
    /// document itself stays exactly what the model wrote.
    pub fn envelope(&self) -> Value {
        json!({
            "success": true,
            "schemaVersion": SCHEMA_VERSION,
            "metadata": self.metadata,
        })
    }

    /// Deserialise the metadata into the typed schema.
    ///
    /// Fails only if the model produced a shape the schema cannot absorb
    /// (e.g. a string where a number belongs); unknown enum values and
    /// missing fields are tolerated by the schema itself.
    pub fn typed(&self) -> Result<CreditsMetadata, ExtractError> {
        serde_json::from_value(self.metadata.clone()).map_err(|e| {
            ExtractError::InvalidFormat {
                detail: e.to_string(),
            }
        })
    }
}
