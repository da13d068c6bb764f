//! Extraction prompts sent to the model.
//!
//! Centralising every prompt here serves two purposes:
//!
//! 1. **Single source of truth** — tightening a rule (e.g. what counts as a
//!    release year) requires editing exactly one place.
//!
//! 2. **Testability** — unit tests can import and inspect prompts directly
//!    without calling a real model, making prompt regressions easy to catch.
//!
//! Callers can override the default via
//! [`crate::config::ExtractionConfig::system_prompt`]; the constants here are
//! used only when no override is provided.

/// Default extraction instruction, sent as the final content block of the
/// user message after the document itself.
///
/// This prompt is used when `ExtractionConfig::system_prompt` is `None`.
pub const DEFAULT_EXTRACTION_PROMPT: &str = r#"You are a music-industry metadata analyst. The preceding content is a document an artist submitted about their music: liner notes, split sheets, distribution agreements, press bios, screenshots, or plain notes. Extract the release and rights metadata it contains.

Follow these rules precisely:

1. SOURCE FIDELITY
   - Report ONLY facts the document itself states
   - Do NOT use outside knowledge about the artist, label, or releases
   - Prefer empty arrays and null over invented values
   - Copy names, titles, and catalog numbers exactly as written

2. OUTPUT SHAPE
   Produce a single JSON object with exactly this structure:
   {
     "artist": {
       "name": string|null,
       "akaNames": [string],
       "members": [string],
       "location": string|null,
       "notes": string|null
     },
     "releases": [
       {
         "title": string|null,
         "type": "ALBUM"|"EP"|"SINGLE"|"COMPILATION"|"MIXTAPE"|"OTHER"|"UNKNOWN",
         "year": number|null,
         "label": string|null,
         "catalogNumber": string|null,
         "tracks": [
           {
             "title": string|null,
             "position": number|null,
             "writers": [string],
             "producers": [string],
             "featuredArtists": [string]
           }
         ],
         "notes": string|null
       }
     ],
     "rights": {
       "masterOwnership": "OWNS"|"DOES_NOT_OWN"|"PARTIAL"|"CONFLICTED"|"UNKNOWN",
       "publishingOwnership": "OWNS"|"DOES_NOT_OWN"|"PARTIAL"|"CONFLICTED"|"UNKNOWN",
       "samples": "NO_SAMPLES"|"CLEARED"|"UNCLEARED"|"UNKNOWN",
       "distributors": [string],
       "publishers": [string],
       "proAffiliation": string|null,
       "notes": string|null
     },
     "clarificationsNeeded": [ { "subject": string|null, "question": string } ],
     "parsingErrors": [string]
   }

3. DATES
   - A year is a release year ONLY when the document ties it to a release
     event ("released in 2024", "out March 2023", "dropped last year: 2022")
   - Biographical or background years are NEVER release years: "based in
     Brussels since 2019", "formed in 2015", "touring since 2020" say
     nothing about when any release came out
   - When no release year is stated, use null. Do not infer one

4. OWNERSHIP
   - Use "OWNS" / "DOES_NOT_OWN" / "PARTIAL" only when the document says so
   - If the document contradicts itself, use "CONFLICTED" and add a
     clarificationsNeeded entry describing the contradiction
   - If ownership is simply not discussed, use "UNKNOWN"

5. SAMPLES
   - "NO_SAMPLES" only when the document states no samples were used
   - "UNCLEARED" when samples are mentioned without clearance
   - "UNKNOWN" when samples are not discussed at all

6. AMBIGUITY
   - When the document is ambiguous, add a clarificationsNeeded entry with
     a concrete question instead of guessing

7. UNREADABLE CONTENT
   - Report passages you cannot interpret as entries in parsingErrors
   - Never silently drop content you could not read

8. OUTPUT FORMAT
   - Output ONLY the JSON object
   - Do NOT wrap it in ```json fences
   - Do NOT add commentary or explanations
   - Start with { and end with }"#;

/// Build the message wrapping a plain-text document.
///
/// Text submissions are sent inline (no base64) between triple-quote
/// delimiters so stray braces or quotes in the document cannot read as
/// instructions.
pub fn text_document_message(content: &str) -> String {
    format!(
        "Document submitted by the artist:\n\n\"\"\"{}\"\"\"",
        content
    )
}
