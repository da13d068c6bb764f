//! Typed view of the metadata document the model is asked to produce.
//!
//! The HTTP envelope relays the model's JSON verbatim (any well-formed shape
//! passes through), so these types are NOT on the serving path. They exist
//! for library callers who want a structured result instead of a raw
//! [`serde_json::Value`], and they double as the reference for what the
//! extraction prompt asks for.
//!
//! Every field is optional or defaults to empty: the model is instructed to
//! omit what the document does not state, and a sparse reply must still
//! deserialise. Enum fields accept any unrecognised wire value as `Unknown`
//! rather than failing the whole document.

use serde::{Deserialize, Serialize};

/// Version of the metadata document shape described by this module.
///
/// Reported in the response envelope as `schemaVersion` so clients can
/// detect shape changes without sniffing fields.
pub const SCHEMA_VERSION: u32 = 3;

/// Complete extraction result: the document the model returns.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreditsMetadata {
    /// The artist or act the document is about.
    #[serde(default)]
    pub artist: ArtistProfile,

    /// Releases mentioned in the document, in document order.
    #[serde(default)]
    pub releases: Vec<Release>,

    /// Ownership and rights information.
    #[serde(default)]
    pub rights: Rights,

    /// Questions a human should answer where the document was ambiguous
    /// or contradictory. Preferred over guessing.
    #[serde(default)]
    pub clarifications_needed: Vec<Clarification>,

    /// Passages the model could not interpret, verbatim or paraphrased.
    #[serde(default)]
    pub parsing_errors: Vec<String>,
}

/// Who the document is about.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ArtistProfile {
    #[serde(default)]
    pub name: Option<String>,

    /// Stage names, aliases, previous act names.
    #[serde(default)]
    pub aka_names: Vec<String>,

    /// Band members or principal collaborators.
    #[serde(default)]
    pub members: Vec<String>,

    /// Where the artist is based, as stated. Never inferred.
    #[serde(default)]
    pub location: Option<String>,

    #[serde(default)]
    pub notes: Option<String>,
}

/// One release (album, EP, single, ...) mentioned in the document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Release {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(rename = "type", default)]
    pub release_type: ReleaseType,

    /// Release year, only when the document states it as a release date.
    #[serde(default)]
    pub year: Option<i32>,

    #[serde(default)]
    pub label: Option<String>,

    #[serde(default)]
    pub catalog_number: Option<String>,

    #[serde(default)]
    pub tracks: Vec<Track>,

    #[serde(default)]
    pub notes: Option<String>,
}

/// Release format classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReleaseType {
    Album,
    Ep,
    Single,
    Compilation,
    Mixtape,
    Other,
    #[default]
    #[serde(other)]
    Unknown,
}

/// One track on a release.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    #[serde(default)]
    pub title: Option<String>,

    /// 1-based position on the release, when stated.
    #[serde(default)]
    pub position: Option<u32>,

    #[serde(default)]
    pub writers: Vec<String>,

    #[serde(default)]
    pub producers: Vec<String>,

    #[serde(default)]
    pub featured_artists: Vec<String>,
}

/// Rights and ownership information.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Rights {
    #[serde(default)]
    pub master_ownership: OwnershipStatus,

    #[serde(default)]
    pub publishing_ownership: OwnershipStatus,

    #[serde(default)]
    pub samples: SampleStatus,

    #[serde(default)]
    pub distributors: Vec<String>,

    #[serde(default)]
    pub publishers: Vec<String>,

    /// Performing-rights organisation (ASCAP, BMI, SABAM, ...), as stated.
    #[serde(default)]
    pub pro_affiliation: Option<String>,

    #[serde(default)]
    pub notes: Option<String>,
}

/// Who owns masters or publishing, per the document.
///
/// `Conflicted` means the document contradicts itself; the model is told to
/// report the conflict and raise a clarification rather than pick a side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OwnershipStatus {
    Owns,
    DoesNotOwn,
    Partial,
    Conflicted,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Sample clearance status, per the document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SampleStatus {
    NoSamples,
    Cleared,
    Uncleared,
    #[default]
    #[serde(other)]
    Unknown,
}

/// A question for a human reviewer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Clarification {
    /// What the question is about ("Summer EP", "publishing split"), if
    /// narrower than the whole document.
    #[serde(default)]
    pub subject: Option<String>,

    #[serde(default)]
    pub question: String,
}
