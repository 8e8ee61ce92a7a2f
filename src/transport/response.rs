//! HTTP response parsing for the Gemini API.
//!
//! Success bodies decode into the raw JSON payload; non-success statuses
//! become upstream failures carrying the status code and the untouched error
//! body.

use super::http::HttpResponse;
use crate::error::GeminiError;

/// Parser for HTTP responses from the Gemini API.
pub struct ResponseParser;

impl ResponseParser {
    /// Parse a response body into its raw JSON value, or map a non-success
    /// status into an upstream failure.
    pub fn parse_json(response: HttpResponse) -> Result<serde_json::Value, GeminiError> {
        if (200..300).contains(&response.status) {
            Ok(serde_json::from_slice(&response.body)?)
        } else {
            Err(Self::upstream_failure(response))
        }
    }

    /// Build an upstream failure from a non-success response. The error body
    /// is passed through untouched; the message comes from the standard
    /// `error.message` field when present.
    fn upstream_failure(response: HttpResponse) -> GeminiError {
        let body: Option<serde_json::Value> = serde_json::from_slice(&response.body).ok();

        let message = body
            .as_ref()
            .and_then(|b| b.get("error"))
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", response.status));

        tracing::debug!(
            status = response.status,
            message = %message,
            "API request failed"
        );

        GeminiError::Upstream {
            code: response.status,
            message,
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use serde_json::json;
    use std::collections::HashMap;

    fn create_response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: HashMap::new(),
            body: Bytes::from(body.to_string()),
        }
    }

    #[test]
    fn test_parse_successful_response() {
        let response = create_response(200, r#"{"candidates":[]}"#);
        let value = ResponseParser::parse_json(response).unwrap();
        assert_eq!(value, json!({"candidates": []}));
    }

    #[test]
    fn test_parse_malformed_success_body() {
        let response = create_response(200, "not json");
        let result = ResponseParser::parse_json(response);
        assert!(matches!(result, Err(GeminiError::Response(_))));
    }

    #[test]
    fn test_parse_429_upstream_failure() {
        let response = create_response(429, r#"{"error":{"message":"rate limited","status":"RESOURCE_EXHAUSTED"}}"#);
        let error = ResponseParser::parse_json(response).unwrap_err();

        match error {
            GeminiError::Upstream { code, message, body } => {
                assert_eq!(code, 429);
                assert_eq!(message, "rate limited");
                assert_eq!(body.unwrap()["error"]["status"], "RESOURCE_EXHAUSTED");
            }
            other => panic!("expected upstream failure, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_error_without_json_body() {
        let response = create_response(502, "Bad Gateway");
        let error = ResponseParser::parse_json(response).unwrap_err();

        match error {
            GeminiError::Upstream { code, message, body } => {
                assert_eq!(code, 502);
                assert_eq!(message, "HTTP 502");
                assert!(body.is_none());
            }
            other => panic!("expected upstream failure, got {other:?}"),
        }
    }
}
