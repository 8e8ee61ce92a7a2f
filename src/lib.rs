//! # Google Gemini API Client
//!
//! Rust client for the Google Gemini (Generative AI) API, built around
//! simulated streaming: one non-streaming generation call whose completed
//! text is delivered to the caller in fixed-size chunks.
//!
//! ## Features
//!
//! - Content generation with sampling options, system instructions, safety
//!   settings, and structured JSON output
//! - Simulated streaming: per-chunk callbacks over a single request, with a
//!   poll-based completion contract and wall-clock timeout
//! - Stream accumulator folding chunks into a final response
//! - Structured logging with secret redaction
//! - Secure credential handling with `SecretString`
//! - Mock transport and mock content client for testing in isolation
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use gemini_client::{
//!     GeminiConfig, GeminiContentClient, GenerateOptions, StreamController,
//! };
//! use secrecy::SecretString;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = GeminiConfig::builder()
//!         .api_key(SecretString::new("your-api-key".into()))
//!         .build()?;
//!
//!     let stream = config.stream.clone();
//!     let model = config.default_model.clone();
//!     let client = Arc::new(GeminiContentClient::new(&config)?);
//!     let controller = StreamController::new(client, model, stream);
//!
//!     let response = controller
//!         .stream_content(
//!             "Tell me a story.",
//!             |chunk| {
//!                 if let Some(text) = &chunk.text {
//!                     print!("{text}");
//!                 }
//!             },
//!             GenerateOptions::default(),
//!         )
//!         .await?;
//!
//!     println!("\nfinished: {:?}", response.finish_reason);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - `config` - Configuration types and builder
//! - `auth` - API key credentials
//! - `transport` - HTTP transport layer
//! - `client` - Content generation client and request preparation
//! - `streaming` - Accumulator, sessions, supervisor, and stream controller
//! - `error` - Error taxonomy
//! - `types` - Wire types and the parsed response model
//! - `observability` - Structured logging with secret redaction
//! - `mocks` - Test doubles for the transport and client seams

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod mocks;
pub mod observability;
pub mod streaming;
pub mod transport;
pub mod types;

pub use auth::{ApiKeyCredentials, Credentials};
pub use client::{
    content_from_text, prepare_request, ContentClient, GeminiContentClient, GenerateOptions,
};
pub use config::{
    AuthMethod, GeminiConfig, GeminiConfigBuilder, LogLevel, StreamConfig, DEFAULT_API_VERSION,
    DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_STREAM_CHUNK_DELAY, DEFAULT_STREAM_CHUNK_SIZE,
    DEFAULT_STREAM_POLL_INTERVAL, DEFAULT_STREAM_TIMEOUT, DEFAULT_TIMEOUT_SECS,
};
pub use error::{ConfigurationError, GeminiError, GeminiResult, ResponseError};
pub use observability::{Logger, NoopLogger, StructuredLogger};
pub use streaming::{
    SessionId, SessionState, StreamAccumulator, StreamController, StreamEvent, StreamQuery,
    StreamSession, StreamSupervisor,
};
pub use transport::{
    HttpMethod, HttpRequest, HttpResponse, HttpTransport, RequestBuilder, ResponseParser,
    TransportError,
};
pub use types::{
    default_safety_settings, Blob, Candidate, Content, FinishReason, GenerateContentRequest,
    GenerateContentResponse, GenerationConfig, HarmBlockThreshold, HarmCategory, HarmProbability,
    Part, Response, Role, SafetyRating, SafetySetting, UsageMetadata,
};
