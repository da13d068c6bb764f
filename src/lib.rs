//! # creditsift
//!
//! Extract structured music-release metadata from credits documents using
//! Vision Language Models.
//!
//! ## Why this crate?
//!
//! Artists submit what they have: liner-note photos, split-sheet PDFs,
//! pasted bios, distribution-agreement scans. Hand-written parsers fail on
//! that variety. Instead this crate forwards the document to a multimodal
//! model with a fixed extraction instruction and relays the model's JSON
//! verbatim, so the catalogue system receives one schema no matter what
//! shape the submission arrived in.
//!
//! ## Pipeline Overview
//!
//! ```text
//! request
//!  │
//!  ├─ 1. Content   package text / image / PDF as messages-API blocks
//!  ├─ 2. Model     one call to the messages API (no retry)
//!  ├─ 3. Sanitize  strip stray ```json fences, parse as JSON
//!  └─ 4. Relay     {"success": true, "schemaVersion": 3, "metadata": ...}
//! ```
//!
//! ## Quick Start (library)
//!
//! ```rust,no_run
//! use creditsift::{extract, ExtractionConfig, ExtractionRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Credential read from ANTHROPIC_API_KEY
//!     let config = ExtractionConfig::from_env();
//!     let request = ExtractionRequest::text(
//!         "Summer EP, released 2024 on Nightjar Records. All masters owned by the artist.",
//!     );
//!     let output = extract(&request, &config).await?;
//!     println!("{}", serde_json::to_string_pretty(&output.metadata)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Quick Start (service)
//!
//! ```rust,no_run
//! use creditsift::{build_router, AppState, ExtractionConfig, DEFAULT_MAX_BODY_BYTES};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ExtractionConfig::from_env();
//!     let state = AppState::new(&config)?;
//!     let app = build_router(state, DEFAULT_MAX_BODY_BYTES);
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `creditsift` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when embedding only the library or router:
//! ```toml
//! creditsift = { version = "0.3", default-features = false }
//! ```
//!
//! ## Configuration
//!
//! | Variable | Default | Purpose |
//! |----------|---------|---------|
//! | `ANTHROPIC_API_KEY` | unset | Messages API credential (required per extraction, not at startup) |
//! | `ANTHROPIC_BASE_URL` | `https://api.anthropic.com` | API endpoint override |
//! | `CREDITSIFT_MODEL` | `claude-sonnet-4-20250514` | Model identifier |
//! | `CREDITSIFT_MAX_TOKENS` | `4096` | Reply token cap |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod extract;
pub mod output;
pub mod pipeline;
pub mod prompts;
pub mod request;
pub mod schema;
pub mod server;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ExtractionConfig, ExtractionConfigBuilder, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use error::{ApiError, ExtractError};
pub use extract::{extract, Extractor};
pub use output::ExtractionOutput;
pub use request::{ExtractionRequest, FileKind};
pub use schema::{
    ArtistProfile, Clarification, CreditsMetadata, OwnershipStatus, Release, ReleaseType, Rights,
    SampleStatus, Track, SCHEMA_VERSION,
};
pub use server::{build_router, AppState, DEFAULT_MAX_BODY_BYTES};
