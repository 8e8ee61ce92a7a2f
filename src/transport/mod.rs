//! HTTP transport layer for the Gemini client.
//!
//! One synchronous request/response round trip per call. The streaming
//! subsystem never opens a streaming connection; it re-delivers a completed
//! response in chunks, so the transport surface is a single `send`.

mod http;
mod request;
mod response;
mod reqwest;

pub use http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError};
pub use request::{generate_content_path, RequestBuilder};
pub use response::ResponseParser;
pub use self::reqwest::ReqwestTransport;
