//! Core HTTP transport abstractions for the Gemini client.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use thiserror::Error;

use crate::error::GeminiError;

/// HTTP request for the transport layer.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Request URL.
    pub url: String,
    /// Request headers.
    pub headers: HashMap<String, String>,
    /// Request body.
    pub body: Option<Bytes>,
}

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET request.
    Get,
    /// POST request.
    Post,
}

/// HTTP response from the transport layer.
#[derive(Debug)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Response body.
    pub body: Bytes,
}

/// Failures below the API layer: the request never produced an upstream
/// status.
#[derive(Error, Debug, Clone)]
pub enum TransportError {
    /// Connection-level failure.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// The HTTP client timed out.
    #[error("Request timed out")]
    Timeout,

    /// The request could not be sent or its body could not be read.
    #[error("Request failed: {0}")]
    Request(String),
}

impl From<TransportError> for GeminiError {
    fn from(err: TransportError) -> Self {
        GeminiError::transport(err.to_string())
    }
}

/// HTTP transport abstraction for testability.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send an HTTP request and receive a response.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}
