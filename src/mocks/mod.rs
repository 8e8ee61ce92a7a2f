//! Mock implementations for testing.
//!
//! Test doubles for the two seams of the crate: [`MockHttpTransport`] below
//! the client, and [`MockContentClient`] below the streaming controller.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::json;

use crate::client::ContentClient;
use crate::error::GeminiError;
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, TransportError};
use crate::types::{
    Candidate, Content, FinishReason, GenerateContentRequest, GenerateContentResponse, Part,
    Response,
};

/// Build a completed [`Response`] carrying the given text, as tests and mock
/// clients need it.
pub fn text_response(text: &str) -> Response {
    let raw = json!({
        "candidates": [{
            "content": {"parts": [{"text": text}]},
            "finishReason": "STOP",
            "index": 0
        }]
    });

    let api = GenerateContentResponse {
        candidates: Some(vec![Candidate {
            content: Some(Content {
                role: None,
                parts: vec![Part::text(text)],
            }),
            finish_reason: Some(FinishReason::Stop),
            safety_ratings: None,
            index: Some(0),
        }]),
        usage_metadata: None,
    };

    Response::from_api(api, raw)
}

/// Mock HTTP transport: tests enqueue responses and inspect recorded
/// requests.
#[derive(Default)]
pub struct MockHttpTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockHttpTransport {
    /// Create a mock with no queued responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue the result of the next `send`.
    pub fn enqueue(&self, response: Result<HttpResponse, TransportError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    /// Enqueue a JSON response with the given status and body.
    pub fn enqueue_json(&self, status: u16, body: &str) {
        let mut headers = std::collections::HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        self.enqueue(Ok(HttpResponse {
            status,
            headers,
            body: Bytes::from(body.to_string()),
        }));
    }

    /// Enqueue a transport-level failure.
    pub fn enqueue_error(&self, error: TransportError) {
        self.enqueue(Err(error));
    }

    /// Every request sent so far, in order.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// The most recent request, if any.
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl HttpTransport for MockHttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(TransportError::Connection(
                    "no response queued in MockHttpTransport".to_string(),
                ))
            })
    }
}

/// Mock content client for exercising the streaming controller without HTTP.
///
/// Results are served in queue order. An empty queue either fails fast or,
/// with [`MockContentClient::pending`], never resolves, which lets timeout
/// paths be driven deterministically under a paused clock.
#[derive(Default)]
pub struct MockContentClient {
    results: Mutex<VecDeque<Result<Response, GeminiError>>>,
    calls: Mutex<Vec<(String, GenerateContentRequest)>>,
    hang_when_empty: bool,
}

impl MockContentClient {
    /// Create a mock with no queued results.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock whose calls never resolve.
    pub fn pending() -> Self {
        Self {
            hang_when_empty: true,
            ..Self::default()
        }
    }

    /// Create a mock that answers one call with a completed text response.
    pub fn with_text(text: &str) -> Arc<Self> {
        let mock = Self::new();
        mock.enqueue(Ok(text_response(text)));
        Arc::new(mock)
    }

    /// Create a mock that answers one call with the given failure.
    pub fn with_failure(failure: GeminiError) -> Arc<Self> {
        let mock = Self::new();
        mock.enqueue(Err(failure));
        Arc::new(mock)
    }

    /// Enqueue the result of the next `generate` call.
    pub fn enqueue(&self, result: Result<Response, GeminiError>) {
        self.results.lock().unwrap().push_back(result);
    }

    /// Every call made so far as `(model, request)` pairs.
    pub fn calls(&self) -> Vec<(String, GenerateContentRequest)> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ContentClient for MockContentClient {
    async fn generate(
        &self,
        model: &str,
        request: GenerateContentRequest,
    ) -> Result<Response, GeminiError> {
        self.calls
            .lock()
            .unwrap()
            .push((model.to_string(), request));

        let next = self.results.lock().unwrap().pop_front();
        match next {
            Some(result) => result,
            None if self.hang_when_empty => {
                std::future::pending::<()>().await;
                unreachable!("pending future resolved")
            }
            None => Err(GeminiError::transport(
                "no result queued in MockContentClient",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{prepare_request, GenerateOptions};
    use crate::transport::HttpMethod;

    fn request() -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            url: "https://example.com".to_string(),
            headers: std::collections::HashMap::new(),
            body: None,
        }
    }

    #[tokio::test]
    async fn test_mock_transport_serves_queue_in_order() {
        let transport = MockHttpTransport::new();
        transport.enqueue_json(200, r#"{"id": 1}"#);
        transport.enqueue_json(429, r#"{"id": 2}"#);

        assert_eq!(transport.send(request()).await.unwrap().status, 200);
        assert_eq!(transport.send(request()).await.unwrap().status, 429);
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_mock_transport_empty_queue_fails() {
        let transport = MockHttpTransport::new();
        let result = transport.send(request()).await;
        assert!(matches!(result, Err(TransportError::Connection(_))));
    }

    #[tokio::test]
    async fn test_mock_client_records_calls() {
        let client = MockContentClient::with_text("hi");
        let wire = prepare_request("prompt", &GenerateOptions::default());

        let response = client.generate("gemini-1.5-pro", wire).await.unwrap();
        assert_eq!(response.text.as_deref(), Some("hi"));
        assert_eq!(client.call_count(), 1);
        assert_eq!(client.calls()[0].0, "gemini-1.5-pro");
    }

    #[tokio::test]
    async fn test_mock_client_failure_passthrough() {
        let client = MockContentClient::with_failure(GeminiError::Upstream {
            code: 429,
            message: "rate limited".to_string(),
            body: None,
        });
        let wire = prepare_request("prompt", &GenerateOptions::default());

        let failure = client.generate("m", wire).await.unwrap_err();
        assert_eq!(failure.code(), 429);
    }

    #[test]
    fn test_text_response_shape() {
        let response = text_response("done");
        assert_eq!(response.text.as_deref(), Some("done"));
        assert_eq!(response.finish_reason.as_deref(), Some("STOP"));
    }
}
