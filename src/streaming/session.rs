//! One logical streaming request and its state machine.

use uuid::Uuid;

use super::accumulator::StreamAccumulator;
use crate::error::GeminiError;
use crate::types::Response;

/// Opaque handle of one stream session. Created at session start, never
/// reused.
pub type SessionId = Uuid;

/// Caller-supplied per-chunk callback, invoked synchronously from the
/// session's delivery path. A slow callback delays delivery of subsequent
/// chunks for that session only.
pub type ChunkCallback = Box<dyn FnMut(&Response) + Send>;

/// Lifecycle state of a stream session.
///
/// `Starting -> Streaming -> {Completed | Error}`. `Starting` is the state
/// before the first chunk or terminal event; a session that completes with
/// zero chunks goes `Starting -> Completed` directly. Terminal states absorb
/// all further events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Created, no event received yet.
    Starting,
    /// At least one chunk delivered.
    Streaming,
    /// Terminal: final response available.
    Completed,
    /// Terminal: failure recorded.
    Error,
}

impl SessionState {
    /// Whether this state absorbs further events.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Completed | SessionState::Error)
    }
}

/// Point-in-time answer to a session status query.
#[derive(Debug)]
pub enum StreamQuery {
    /// The session completed; the final response.
    Completed(Response),
    /// The session failed; the terminal failure.
    Failed(GeminiError),
    /// Not terminal yet; retry later.
    InProgress(SessionState),
    /// The session id is unknown or was removed.
    NotFound,
}

/// One logical streaming request: owns its accumulator, tracks terminal
/// state, and drives the caller's chunk callback.
pub struct StreamSession {
    id: SessionId,
    state: SessionState,
    accumulator: StreamAccumulator,
    final_response: Option<Response>,
    failure: Option<GeminiError>,
    callback: ChunkCallback,
}

impl StreamSession {
    /// Create a session in the `Starting` state.
    pub fn new(id: SessionId, callback: ChunkCallback) -> Self {
        Self {
            id,
            state: SessionState::Starting,
            accumulator: StreamAccumulator::new(),
            final_response: None,
            failure: None,
            callback,
        }
    }

    /// This session's id.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The accumulator owned by this session.
    pub fn accumulator(&self) -> &StreamAccumulator {
        &self.accumulator
    }

    /// Apply one chunk: invoke the callback, fold into the accumulator, move
    /// to `Streaming`. Dropped without side effects when already terminal.
    pub fn on_chunk(&mut self, chunk: &Response) {
        if self.state.is_terminal() {
            tracing::trace!(session_id = %self.id, "chunk dropped on terminal session");
            return;
        }
        (self.callback)(chunk);
        self.accumulator.fold(chunk);
        self.state = SessionState::Streaming;
    }

    /// Record completion. Dropped when already terminal.
    pub fn on_complete(&mut self, response: Response) {
        if self.state.is_terminal() {
            tracing::trace!(session_id = %self.id, "completion dropped on terminal session");
            return;
        }
        self.state = SessionState::Completed;
        self.final_response = Some(response);
    }

    /// Record failure. Dropped when already terminal.
    pub fn on_error(&mut self, failure: GeminiError) {
        if self.state.is_terminal() {
            tracing::trace!(session_id = %self.id, "error dropped on terminal session");
            return;
        }
        self.state = SessionState::Error;
        self.failure = Some(failure);
    }

    /// Point-in-time status snapshot.
    pub fn query(&self) -> StreamQuery {
        match self.state {
            SessionState::Completed => match &self.final_response {
                Some(response) => StreamQuery::Completed(response.clone()),
                None => StreamQuery::InProgress(self.state),
            },
            SessionState::Error => match &self.failure {
                Some(failure) => StreamQuery::Failed(failure.clone()),
                None => StreamQuery::InProgress(self.state),
            },
            state => StreamQuery::InProgress(state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn chunk(text: &str) -> Response {
        Response::from_value(json!({
            "candidates": [{"content": {"parts": [{"text": text}]}, "index": 0}]
        }))
        .expect("chunk parses")
    }

    fn final_response(text: &str) -> Response {
        Response::from_value(json!({
            "candidates": [{
                "content": {"parts": [{"text": text}]},
                "finishReason": "STOP",
                "index": 0
            }]
        }))
        .expect("response parses")
    }

    fn counting_session(counter: Arc<AtomicUsize>) -> StreamSession {
        StreamSession::new(
            Uuid::new_v4(),
            Box::new(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        )
    }

    #[test]
    fn test_starts_in_starting_state() {
        let session = counting_session(Arc::new(AtomicUsize::new(0)));
        assert_eq!(session.state(), SessionState::Starting);
        assert!(!session.state().is_terminal());
        assert!(matches!(
            session.query(),
            StreamQuery::InProgress(SessionState::Starting)
        ));
    }

    #[test]
    fn test_chunk_moves_to_streaming_and_invokes_callback() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut session = counting_session(counter.clone());

        session.on_chunk(&chunk("Hello"));
        session.on_chunk(&chunk(" World"));

        assert_eq!(session.state(), SessionState::Streaming);
        assert_eq!(counter.load(Ordering::SeqCst), 2);
        assert_eq!(session.accumulator().text(), "Hello World");
    }

    #[test]
    fn test_complete_without_chunks() {
        let mut session = counting_session(Arc::new(AtomicUsize::new(0)));
        session.on_complete(final_response("done"));

        assert_eq!(session.state(), SessionState::Completed);
        match session.query() {
            StreamQuery::Completed(response) => assert_eq!(response.text.as_deref(), Some("done")),
            other => panic!("expected completion, got {other:?}"),
        }
    }

    #[test]
    fn test_terminal_state_absorbs_events() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut session = counting_session(counter.clone());

        session.on_complete(final_response("first"));
        session.on_chunk(&chunk("late"));
        session.on_complete(final_response("second"));
        session.on_error(GeminiError::transport("late failure"));

        assert_eq!(session.state(), SessionState::Completed);
        assert_eq!(counter.load(Ordering::SeqCst), 0);
        match session.query() {
            StreamQuery::Completed(response) => assert_eq!(response.text.as_deref(), Some("first")),
            other => panic!("expected completion, got {other:?}"),
        }
        assert_eq!(session.accumulator().chunk_count(), 0);
    }

    #[test]
    fn test_error_is_terminal() {
        let mut session = counting_session(Arc::new(AtomicUsize::new(0)));
        session.on_error(GeminiError::Upstream {
            code: 429,
            message: "rate limited".to_string(),
            body: None,
        });
        session.on_complete(final_response("too late"));

        assert_eq!(session.state(), SessionState::Error);
        match session.query() {
            StreamQuery::Failed(failure) => assert_eq!(failure.code(), 429),
            other => panic!("expected failure, got {other:?}"),
        }
    }
}
