//! Observability for the Gemini client.
//!
//! Structured logging with secret redaction. Log calls carry a JSON fields
//! object; sensitive keys are masked before anything reaches the backend.

mod logging;

pub use logging::{Logger, NoopLogger, StructuredLogger};
