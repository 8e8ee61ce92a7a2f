//! Content client for the Gemini API.
//!
//! [`ContentClient`] is the boundary the streaming core depends on: one
//! blocking round trip per call, all-or-nothing. [`GeminiContentClient`] is
//! the HTTP implementation; tests substitute a mock.

mod gemini;
pub mod prepare;

use async_trait::async_trait;

use crate::error::GeminiError;
use crate::types::{GenerateContentRequest, Response};

pub use gemini::GeminiContentClient;
pub use prepare::{content_from_text, prepare_request, GenerateOptions};

/// One synchronous content-generation round trip.
#[async_trait]
pub trait ContentClient: Send + Sync {
    /// Generate content with the given model. Returns a full parsed response
    /// or a failure; never partial data.
    async fn generate(
        &self,
        model: &str,
        request: GenerateContentRequest,
    ) -> Result<Response, GeminiError>;
}
