//! Content packaging: an [`ExtractionRequest`] → model-API content blocks.
//!
//! The messages API takes the user turn as an ordered list of typed blocks.
//! Text submissions are passed inline; images and PDFs travel as base64
//! sources with an explicit media type. The extraction instruction is always
//! the LAST block, after the document, so the model reads the material
//! before the task.
//!
//! No base64 validation happens here: the payload is forwarded as received
//! and a malformed payload surfaces as an upstream API error.

use serde::Serialize;

use crate::error::ExtractError;
use crate::request::{ExtractionRequest, FileKind};

/// One block of the user message, in the messages-API wire shape.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Inline text: the wrapped document, or the extraction instruction.
    Text { text: String },
    /// A base64 image with its media type.
    Image { source: MediaSource },
    /// A base64 PDF document.
    Document { source: MediaSource },
}

/// Base64 payload wrapper, `{"type": "base64", "media_type": ..., "data": ...}`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MediaSource {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub media_type: String,
    pub data: String,
}

impl MediaSource {
    fn base64(media_type: &str, data: &str) -> Self {
        Self {
            kind: "base64",
            media_type: media_type.to_string(),
            data: data.to_string(),
        }
    }
}

/// Package a request as the content blocks of a single user message.
///
/// Validates that file content is present before anything else; nothing
/// here or downstream runs for an empty submission.
pub fn build_content_blocks(
    request: &ExtractionRequest,
    instruction: &str,
) -> Result<Vec<ContentBlock>, ExtractError> {
    let data = request.file_data()?;

    let document_block = match request.file_type {
        FileKind::Text => ContentBlock::Text {
            text: crate::prompts::text_document_message(data),
        },
        FileKind::Image => ContentBlock::Image {
            // upstream_media_type is always Some for images
            source: MediaSource::base64(
                request.upstream_media_type().unwrap_or("image/jpeg"),
                data,
            ),
        },
        FileKind::Pdf => ContentBlock::Document {
            source: MediaSource::base64("application/pdf", data),
        },
    };

    Ok(vec![
        document_block,
        ContentBlock::Text {
            text: instruction.to_string(),
        },
    ])
}
