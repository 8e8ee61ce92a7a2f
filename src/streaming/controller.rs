//! Streaming facade: one synchronous call over a simulated stream.
//!
//! The controller does not open a streaming connection. It issues one
//! non-streaming generation call on a background task, slices the completed
//! text into fixed-size chunks, and delivers them as chunk events with a
//! fixed delay before a completion event carrying the original response.
//! Callers get deterministic chunking over a single real request; swapping
//! in true incremental delivery would replace only this background task,
//! not the accumulator/session/supervisor contracts.
//!
//! Completion is observed by polling the supervisor at a fixed interval
//! under a wall-clock budget owned entirely by the controller.

use std::sync::Arc;

use serde_json::json;
use tokio::time::Instant;

use super::session::StreamQuery;
use super::supervisor::{StreamEvent, StreamSupervisor};
use crate::client::{prepare_request, ContentClient, GenerateOptions};
use crate::config::StreamConfig;
use crate::error::{GeminiError, GeminiResult};
use crate::observability::{Logger, StructuredLogger};
use crate::types::{Candidate, Content, GenerateContentResponse, Part, Response};

/// Split text into chunks of at most `chunk_size` code points.
///
/// Empty text yields no chunks: the callback is never invoked and the
/// session completes without entering the streaming state.
fn split_text_chunks(text: &str, chunk_size: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(chunk_size.max(1))
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// Build a chunk-shaped [`Response`] carrying one slice of text.
fn chunk_response(text: &str) -> Response {
    let raw = json!({
        "candidates": [{
            "content": {"parts": [{"text": text}]},
            "index": 0
        }]
    });

    let api = GenerateContentResponse {
        candidates: Some(vec![Candidate {
            content: Some(Content {
                role: None,
                parts: vec![Part::text(text)],
            }),
            finish_reason: None,
            safety_ratings: None,
            index: Some(0),
        }]),
        usage_metadata: None,
    };

    Response::from_api(api, raw)
}

/// Facade turning a streaming session into a single synchronous call.
pub struct StreamController {
    client: Arc<dyn ContentClient>,
    supervisor: Arc<StreamSupervisor>,
    config: StreamConfig,
    default_model: String,
    logger: Box<dyn Logger>,
}

impl StreamController {
    /// Create a controller over a content client.
    pub fn new(client: Arc<dyn ContentClient>, default_model: String, config: StreamConfig) -> Self {
        Self {
            client,
            supervisor: Arc::new(StreamSupervisor::new()),
            config,
            default_model,
            logger: Box::new(StructuredLogger::new("gemini.streaming")),
        }
    }

    /// The supervisor owning this controller's sessions.
    pub fn supervisor(&self) -> &Arc<StreamSupervisor> {
        &self.supervisor
    }

    /// Stream a prompt: deliver the response text to `callback` in fixed-size
    /// chunks, then return the final response.
    ///
    /// The callback is invoked once per chunk, in order; the concatenation of
    /// all delivered chunk texts equals the response text. The final response
    /// returned here is the original completed response, not the
    /// accumulator's synthesized form. On timeout the session is stopped and
    /// a code-408 failure is returned; collaborator failures pass through
    /// unchanged.
    pub async fn stream_content<F>(
        &self,
        prompt: &str,
        callback: F,
        options: GenerateOptions,
    ) -> GeminiResult<Response>
    where
        F: FnMut(&Response) + Send + 'static,
    {
        let model = options
            .model
            .clone()
            .unwrap_or_else(|| self.default_model.clone());
        let request = prepare_request(prompt, &options);

        let session_id = self.supervisor.start(Box::new(callback)).await;
        self.logger.debug(
            "Streaming call started",
            json!({"session_id": session_id.to_string(), "model": model}),
        );

        let client = self.client.clone();
        let supervisor = self.supervisor.clone();
        let chunk_size = self.config.chunk_size;
        let chunk_delay = self.config.chunk_delay;

        tokio::spawn(async move {
            match client.generate(&model, request).await {
                Ok(response) => {
                    let text = response.text.clone().unwrap_or_default();
                    for chunk_text in split_text_chunks(&text, chunk_size) {
                        supervisor
                            .dispatch(session_id, StreamEvent::Chunk(chunk_response(&chunk_text)))
                            .await;
                        tokio::time::sleep(chunk_delay).await;
                    }
                    supervisor
                        .dispatch(session_id, StreamEvent::Complete(response))
                        .await;
                }
                Err(failure) => {
                    supervisor
                        .dispatch(session_id, StreamEvent::Error(failure))
                        .await;
                }
            }
        });

        let start = Instant::now();
        loop {
            tokio::time::sleep(self.config.poll_interval).await;

            match self.supervisor.query(session_id).await {
                StreamQuery::Completed(response) => {
                    self.supervisor.stop(session_id).await;
                    self.logger.info(
                        "Streaming call completed",
                        json!({
                            "session_id": session_id.to_string(),
                            "duration_ms": start.elapsed().as_millis() as u64,
                        }),
                    );
                    return Ok(response);
                }
                StreamQuery::Failed(failure) => {
                    self.supervisor.stop(session_id).await;
                    self.logger.warn(
                        "Streaming call failed",
                        json!({
                            "session_id": session_id.to_string(),
                            "error": failure.to_string(),
                            "code": failure.code(),
                        }),
                    );
                    return Err(failure);
                }
                StreamQuery::InProgress(_) | StreamQuery::NotFound => {
                    if start.elapsed() >= self.config.timeout {
                        self.supervisor.stop(session_id).await;
                        let elapsed = start.elapsed();
                        self.logger.warn(
                            "Streaming call timed out",
                            json!({
                                "session_id": session_id.to_string(),
                                "timeout_ms": self.config.timeout.as_millis() as u64,
                            }),
                        );
                        return Err(GeminiError::Timeout { elapsed });
                    }
                }
            }
        }
    }
}
