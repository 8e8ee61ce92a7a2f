//! Parsed response model.
//!
//! [`Response`] is the immutable result of one API call (or of one synthetic
//! streaming chunk): the extracted text, the ordered content parts, the raw
//! payload kept verbatim for diagnostics, and derived structured output.
//!
//! The same parser handles real API payloads and the synthetic envelopes the
//! stream accumulator builds, so both paths produce identical models.

use serde::{Deserialize, Serialize};

use super::content::Part;
use super::generation::{GenerateContentResponse, UsageMetadata};
use super::safety::SafetyRating;
use crate::error::GeminiResult;

/// Function-call names recognized as carriers of structured output. A
/// function-call part with one of these names has its arguments promoted to
/// [`Response::structured_output`].
pub const STRUCTURED_OUTPUT_FUNCTIONS: &[&str] =
    &["structured_output", "json_output", "emit_json"];

/// Parsed result of one content-generation call or one streaming chunk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Response {
    /// Concatenation of all textual parts; `None` when no part carries text.
    pub text: Option<String>,
    /// Ordered content parts of the selected candidate.
    pub parts: Vec<Part>,
    /// The original untouched response payload.
    pub raw: serde_json::Value,
    /// Structured output derived from a recognized function call or from
    /// JSON embedded in the text. Never set directly by callers.
    pub structured_output: Option<serde_json::Value>,
    /// Token usage metadata, passed through opaquely.
    pub usage: Option<UsageMetadata>,
    /// Index of the selected candidate.
    pub candidate_index: i32,
    /// Finish reason wire name, e.g. `"STOP"`.
    pub finish_reason: Option<String>,
    /// Safety ratings of the selected candidate.
    pub safety_ratings: Option<Vec<SafetyRating>>,
}

impl Response {
    /// Parse a raw response payload into a [`Response`].
    ///
    /// Accepts both real API payloads and the synthetic envelopes built by
    /// the stream accumulator.
    pub fn from_value(raw: serde_json::Value) -> GeminiResult<Self> {
        let api: GenerateContentResponse = serde_json::from_value(raw.clone())?;
        Ok(Self::from_api(api, raw))
    }

    /// Build a [`Response`] from an already-decoded API response and its raw
    /// payload.
    pub fn from_api(api: GenerateContentResponse, raw: serde_json::Value) -> Self {
        let candidate = api
            .candidates
            .into_iter()
            .flatten()
            .next();

        let (parts, finish_reason, safety_ratings, candidate_index) = match candidate {
            Some(candidate) => (
                candidate.content.map(|c| c.parts).unwrap_or_default(),
                candidate.finish_reason.map(|r| r.as_str().to_string()),
                candidate.safety_ratings,
                candidate.index.unwrap_or(0),
            ),
            None => (Vec::new(), None, None, 0),
        };

        let text = join_text_parts(&parts);
        let structured_output = derive_structured_output(&parts, text.as_deref());

        Self {
            text,
            parts,
            raw,
            structured_output,
            usage: api.usage_metadata,
            candidate_index,
            finish_reason,
            safety_ratings,
        }
    }
}

/// Concatenate the text of every text part, in order. `None` when no part
/// carries text.
fn join_text_parts(parts: &[Part]) -> Option<String> {
    let mut text: Option<String> = None;
    for part in parts {
        if let Some(fragment) = part.as_text() {
            text.get_or_insert_with(String::new).push_str(fragment);
        }
    }
    text
}

/// Derive structured output from a recognized function-call part, falling
/// back to JSON embedded in the text.
fn derive_structured_output(parts: &[Part], text: Option<&str>) -> Option<serde_json::Value> {
    for part in parts {
        if let Some(call) = part.as_function_call() {
            if STRUCTURED_OUTPUT_FUNCTIONS.contains(&call.name.as_str()) {
                return Some(call.args.clone());
            }
        }
    }
    text.and_then(extract_embedded_json)
}

/// Extract a JSON value from fenced or plain text.
fn extract_embedded_json(text: &str) -> Option<serde_json::Value> {
    let candidate = match text.find("```") {
        Some(open) => {
            let rest = &text[open + 3..];
            let rest = rest.strip_prefix("json").unwrap_or(rest);
            let close = rest.find("```")?;
            rest[..close].trim()
        }
        None => text.trim(),
    };

    if candidate.starts_with('{') || candidate.starts_with('[') {
        serde_json::from_str(candidate).ok()
    } else {
        None
    }
}
