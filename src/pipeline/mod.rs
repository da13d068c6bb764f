//! Pipeline stages for credits-to-metadata extraction.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and lets us
//! swap implementations (e.g. point at a different model API) without
//! touching other stages.
//!
//! ## Data Flow
//!
//! ```text
//! request ──▶ content ──▶ model ──▶ sanitize
//! (JSON body)  (blocks)   (API)     (JSON)
//! ```
//!
//! 1. [`content`]  — package the submitted file as model-API content blocks,
//!    with the extraction instruction appended last
//! 2. [`model`]    — one call to the messages API; the only stage with
//!    network I/O
//! 3. [`sanitize`] — strip stray code fences from the reply and parse it as
//!    JSON

pub mod content;
pub mod model;
pub mod sanitize;
