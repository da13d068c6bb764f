//! Inbound request type: what callers POST to the extraction service.
//!
//! The body is JSON with camelCase keys:
//!
//! ```json
//! {
//!   "fileData": "<file content: raw text, or base64 for images and PDFs>",
//!   "fileType": "text" | "image" | "pdf",
//!   "fileName": "credits.pdf"
//! }
//! ```
//!
//! `fileType` is mandatory and drives how the content is packaged for the
//! model API; `fileName` is optional and only consulted to pick between PNG
//! and JPEG media types for images. `fileData` is declared optional here so
//! that its absence surfaces as [`ExtractError::MissingFileData`] (a clean
//! 400) instead of a generic body-deserialisation failure.

use serde::{Deserialize, Serialize};

use crate::error::ExtractError;

/// The kind of file the caller submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// Plain text. Sent to the model inline, no base64.
    Text,
    /// An image (base64). JPEG unless the file name ends in `.png`.
    Image,
    /// A PDF document (base64).
    Pdf,
}

/// A single extraction request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionRequest {
    /// File content. Raw text for [`FileKind::Text`], standard base64 for
    /// images and PDFs. `None` or empty is rejected before any model call.
    #[serde(default)]
    pub file_data: Option<String>,

    /// What `file_data` contains.
    pub file_type: FileKind,

    /// Original file name, if the caller knows it.
    #[serde(default)]
    pub file_name: Option<String>,
}

impl ExtractionRequest {
    /// Request for a plain-text document.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            file_data: Some(content.into()),
            file_type: FileKind::Text,
            file_name: None,
        }
    }

    /// Request for a base64-encoded image.
    pub fn image(base64_data: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            file_data: Some(base64_data.into()),
            file_type: FileKind::Image,
            file_name: Some(file_name.into()),
        }
    }

    /// Request for a base64-encoded PDF.
    pub fn pdf(base64_data: impl Into<String>) -> Self {
        Self {
            file_data: Some(base64_data.into()),
            file_type: FileKind::Pdf,
            file_name: None,
        }
    }

    /// The file content, or [`ExtractError::MissingFileData`] if absent or
    /// blank. Called before anything touches the network.
    pub fn file_data(&self) -> Result<&str, ExtractError> {
        match self.file_data.as_deref() {
            Some(data) if !data.trim().is_empty() => Ok(data),
            _ => Err(ExtractError::MissingFileData),
        }
    }

    /// Media type to declare to the model API, or `None` for plain text
    /// (text is passed inline and needs no media type).
    ///
    /// Images are assumed JPEG unless the file name says otherwise; PDFs
    /// are always `application/pdf` regardless of file name.
    pub fn upstream_media_type(&self) -> Option<&'static str> {
        match self.file_type {
            FileKind::Text => None,
            FileKind::Pdf => Some("application/pdf"),
            FileKind::Image => {
                let is_png = self
                    .file_name
                    .as_deref()
                    .is_some_and(|name| name.to_lowercase().ends_with(".png"));
                Some(if is_png { "image/png" } else { "image/jpeg" })
            }
        }
    }
}
