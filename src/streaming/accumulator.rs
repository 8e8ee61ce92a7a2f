//! Stream accumulator for combining response chunks.
//!
//! Folds a sequence of partial [`Response`] chunks into one running
//! aggregate: concatenated text, flattened parts, and the raw payload of
//! every chunk in arrival order.

use serde_json::json;

use crate::types::{Candidate, Content, FinishReason, GenerateContentResponse, Part, Response};

/// Accumulator for combining streaming response chunks.
///
/// Folding is a pure data merge and never fails. Invariants maintained:
/// `raw_chunks().len()` equals the number of chunks folded, and `text()`
/// equals the concatenation of every chunk's non-empty text in arrival
/// order.
#[derive(Debug, Default)]
pub struct StreamAccumulator {
    text: String,
    parts: Vec<Part>,
    raw_chunks: Vec<serde_json::Value>,
}

impl StreamAccumulator {
    /// Create a new, empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one chunk into the aggregate.
    pub fn fold(&mut self, chunk: &Response) {
        if let Some(text) = &chunk.text {
            self.text.push_str(text);
        }
        self.parts.extend(chunk.parts.iter().cloned());
        self.raw_chunks.push(chunk.raw.clone());
    }

    /// The accumulated text so far.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The accumulated parts so far, in arrival order.
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// The raw payload of every folded chunk, in arrival order.
    pub fn raw_chunks(&self) -> &[serde_json::Value] {
        &self.raw_chunks
    }

    /// Number of chunks folded so far.
    pub fn chunk_count(&self) -> usize {
        self.raw_chunks.len()
    }

    /// Finalize into a synthetic [`Response`].
    ///
    /// The synthetic raw envelope has the same shape as a real completed
    /// payload, so the response parser treats synthetic and real payloads
    /// alike.
    pub fn finalize(self) -> Response {
        let parts_value = serde_json::to_value(&self.parts).unwrap_or_default();
        let raw = json!({
            "candidates": [{
                "content": {"parts": parts_value},
                "finishReason": "STOP",
                "index": 0
            }]
        });

        let api = GenerateContentResponse {
            candidates: Some(vec![Candidate {
                content: Some(Content {
                    role: None,
                    parts: self.parts,
                }),
                finish_reason: Some(FinishReason::Stop),
                safety_ratings: None,
                index: Some(0),
            }]),
            usage_metadata: None,
        };

        Response::from_api(api, raw)
    }
}
