//! Core types for the Gemini API.
//!
//! Wire types mirror the upstream API's JSON shape; [`response::Response`]
//! is the parsed model this client hands back to callers.

// Module declarations
pub mod content;
pub mod generation;
pub mod response;
pub mod safety;

// Re-exports for content types
pub use content::{Blob, Content, FileData, FunctionCall, FunctionResponse, Part, Role};

// Re-exports for generation types
pub use generation::{
    Candidate, FinishReason, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    UsageMetadata,
};

// Re-exports for the parsed response model
pub use response::{Response, STRUCTURED_OUTPUT_FUNCTIONS};

// Re-exports for safety types
pub use safety::{
    default_safety_settings, HarmBlockThreshold, HarmCategory, HarmProbability, SafetyRating,
    SafetySetting,
};
