//! Supervisor owning the session table.
//!
//! The table is the single shared mutable resource of the streaming
//! subsystem. The outer lock is held only to look up, insert, or remove an
//! entry; each session has its own lock held across exactly one event, so
//! events for one session apply in arrival order while sessions stay
//! independent of each other.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::session::{ChunkCallback, SessionId, StreamQuery, StreamSession};
use crate::error::{GeminiError, GeminiResult};
use crate::types::Response;

/// An asynchronous notification for one session.
#[derive(Debug)]
pub enum StreamEvent {
    /// One partial response chunk.
    Chunk(Response),
    /// The stream finished; carries the final response.
    Complete(Response),
    /// The stream failed; carries the terminal failure.
    Error(GeminiError),
}

/// Creates and destroys stream sessions and routes events to them by id.
#[derive(Default)]
pub struct StreamSupervisor {
    sessions: Mutex<HashMap<SessionId, Arc<Mutex<StreamSession>>>>,
}

impl StreamSupervisor {
    /// Create an empty supervisor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new session and return its id. Ids are fresh UUIDs, so at
    /// most one session ever exists per id.
    pub async fn start(&self, callback: ChunkCallback) -> SessionId {
        let id = Uuid::new_v4();
        let session = Arc::new(Mutex::new(StreamSession::new(id, callback)));
        self.sessions.lock().await.insert(id, session);
        tracing::debug!(session_id = %id, "stream session started");
        id
    }

    /// Look up a session, holding the table lock only for the clone. A miss
    /// is the internal [`GeminiError::SessionNotFound`]; callers translate
    /// it, so it never reaches a terminal result.
    async fn lookup(&self, id: SessionId) -> GeminiResult<Arc<Mutex<StreamSession>>> {
        self.sessions
            .lock()
            .await
            .get(&id)
            .cloned()
            .ok_or(GeminiError::SessionNotFound { id })
    }

    /// Route one event to the session with the given id. Events for unknown
    /// or removed ids are dropped: a background task finishing after `stop`
    /// must detect the missing entry and no-op.
    pub async fn dispatch(&self, id: SessionId, event: StreamEvent) {
        let session = match self.lookup(id).await {
            Ok(session) => session,
            Err(missed) => {
                tracing::debug!(error = %missed, "event dropped for unknown session");
                return;
            }
        };

        let mut session = session.lock().await;
        match event {
            StreamEvent::Chunk(chunk) => session.on_chunk(&chunk),
            StreamEvent::Complete(response) => session.on_complete(response),
            StreamEvent::Error(failure) => session.on_error(failure),
        }
    }

    /// Point-in-time status of the session with the given id.
    pub async fn query(&self, id: SessionId) -> StreamQuery {
        match self.lookup(id).await {
            Ok(session) => session.lock().await.query(),
            Err(_) => StreamQuery::NotFound,
        }
    }

    /// Remove the session with the given id. Returns whether an entry was
    /// removed. Deletion is advisory: it does not cancel an in-flight
    /// background task, it only makes future events and queries miss.
    pub async fn stop(&self, id: SessionId) -> bool {
        let removed = self.sessions.lock().await.remove(&id).is_some();
        if removed {
            tracing::debug!(session_id = %id, "stream session stopped");
        }
        removed
    }

    /// Number of live sessions.
    pub async fn session_count(&self) -> usize {
        self.sessions.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::streaming::session::SessionState;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

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

    #[tokio::test]
    async fn test_start_and_query() {
        let supervisor = StreamSupervisor::new();
        let id = supervisor.start(Box::new(|_| {})).await;

        assert_eq!(supervisor.session_count().await, 1);
        assert!(matches!(
            supervisor.query(id).await,
            StreamQuery::InProgress(SessionState::Starting)
        ));
    }

    #[tokio::test]
    async fn test_dispatch_routes_by_id() {
        let supervisor = StreamSupervisor::new();
        let first = supervisor.start(Box::new(|_| {})).await;
        let second = supervisor.start(Box::new(|_| {})).await;

        supervisor.dispatch(first, StreamEvent::Chunk(chunk("a"))).await;
        supervisor
            .dispatch(second, StreamEvent::Complete(final_response("done")))
            .await;

        assert!(matches!(
            supervisor.query(first).await,
            StreamQuery::InProgress(SessionState::Streaming)
        ));
        assert!(matches!(
            supervisor.query(second).await,
            StreamQuery::Completed(_)
        ));
    }

    #[tokio::test]
    async fn test_stop_removes_session() {
        let supervisor = StreamSupervisor::new();
        let id = supervisor.start(Box::new(|_| {})).await;

        assert!(supervisor.stop(id).await);
        assert!(!supervisor.stop(id).await);
        assert!(matches!(supervisor.query(id).await, StreamQuery::NotFound));
        assert_eq!(supervisor.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_events_after_stop_are_dropped() {
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_in_callback = counter.clone();

        let supervisor = StreamSupervisor::new();
        let id = supervisor
            .start(Box::new(move |_| {
                counter_in_callback.fetch_add(1, Ordering::SeqCst);
            }))
            .await;
        supervisor.stop(id).await;

        supervisor.dispatch(id, StreamEvent::Chunk(chunk("late"))).await;
        supervisor
            .dispatch(id, StreamEvent::Complete(final_response("late")))
            .await;

        assert_eq!(counter.load(Ordering::SeqCst), 0);
        assert!(matches!(supervisor.query(id).await, StreamQuery::NotFound));
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let supervisor = StreamSupervisor::new();
        let failing = supervisor.start(Box::new(|_| {})).await;
        let healthy = supervisor.start(Box::new(|_| {})).await;

        supervisor
            .dispatch(failing, StreamEvent::Error(GeminiError::transport("boom")))
            .await;

        assert!(matches!(supervisor.query(failing).await, StreamQuery::Failed(_)));
        assert!(matches!(
            supervisor.query(healthy).await,
            StreamQuery::InProgress(SessionState::Starting)
        ));
    }
}
