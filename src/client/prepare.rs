//! Request preparation.
//!
//! Pure functions turning a prompt and keyword-style options into the wire
//! request. No side effects; called by the stream controller before a
//! session starts.

use crate::types::{Content, GenerateContentRequest, GenerationConfig, SafetySetting};

/// Options for one generation call. All fields are optional; unset fields
/// are omitted from the request body.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Model override; falls back to the configured default.
    pub model: Option<String>,
    /// Sampling temperature.
    pub temperature: Option<f32>,
    /// Nucleus sampling probability.
    pub top_p: Option<f32>,
    /// Top-k sampling parameter.
    pub top_k: Option<i32>,
    /// Maximum tokens to generate.
    pub max_output_tokens: Option<i32>,
    /// Schema for structured JSON output. Setting this also forces the
    /// response MIME type to `application/json`.
    pub response_schema: Option<serde_json::Value>,
    /// System instruction text.
    pub system_instruction: Option<String>,
    /// Safety settings for this call.
    pub safety_settings: Option<Vec<SafetySetting>>,
}

/// Build a single-user-turn content from plain text.
pub fn content_from_text(text: impl Into<String>) -> Content {
    Content::user_text(text)
}

/// Build the wire request for a prompt and options.
pub fn prepare_request(prompt: &str, options: &GenerateOptions) -> GenerateContentRequest {
    let generation_config = build_generation_config(options);

    GenerateContentRequest {
        contents: vec![content_from_text(prompt)],
        system_instruction: options
            .system_instruction
            .as_ref()
            .map(Content::system_text),
        safety_settings: options.safety_settings.clone(),
        generation_config,
    }
}

fn build_generation_config(options: &GenerateOptions) -> Option<GenerationConfig> {
    let has_any = options.temperature.is_some()
        || options.top_p.is_some()
        || options.top_k.is_some()
        || options.max_output_tokens.is_some()
        || options.response_schema.is_some();

    if !has_any {
        return None;
    }

    Some(GenerationConfig {
        temperature: options.temperature,
        top_p: options.top_p,
        top_k: options.top_k,
        max_output_tokens: options.max_output_tokens,
        response_mime_type: options
            .response_schema
            .as_ref()
            .map(|_| "application/json".to_string()),
        response_schema: options.response_schema.clone(),
        ..Default::default()
    })
}
