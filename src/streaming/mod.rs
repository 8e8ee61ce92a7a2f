//! Simulated streaming over a single generation call.
//!
//! The subsystem is split along ownership lines:
//!
//! - [`StreamAccumulator`] folds response chunks into a running aggregate.
//! - [`StreamSession`] is one logical request: state machine, accumulator,
//!   and the caller's chunk callback.
//! - [`StreamSupervisor`] owns the session table and routes events by id.
//! - [`StreamController`] is the synchronous facade: it makes the real
//!   request, chunks the completed text, and polls for the terminal state.

mod accumulator;
mod controller;
mod session;
mod supervisor;

pub use accumulator::StreamAccumulator;
pub use controller::StreamController;
pub use session::{ChunkCallback, SessionId, SessionState, StreamQuery, StreamSession};
pub use supervisor::{StreamEvent, StreamSupervisor};
