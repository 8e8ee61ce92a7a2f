//! HTTP request builder for the Gemini API.

use bytes::Bytes;
use serde::Serialize;
use std::collections::HashMap;
use url::Url;

use super::http::{HttpMethod, HttpRequest};
use crate::auth::Credentials;
use crate::error::GeminiError;

/// Endpoint path for a non-streaming content-generation call.
pub fn generate_content_path(model: &str) -> String {
    format!("models/{model}:generateContent")
}

/// Builds authenticated HTTP requests against the configured base URL and
/// API version.
pub struct RequestBuilder {
    base_url: Url,
    api_version: String,
    credentials: Box<dyn Credentials>,
}

impl RequestBuilder {
    /// Creates a new request builder.
    pub fn new(base_url: Url, api_version: String, credentials: Box<dyn Credentials>) -> Self {
        Self {
            base_url,
            api_version,
            credentials,
        }
    }

    /// Builds a complete URL for the given endpoint path, prefixing the API
    /// version and appending the auth query parameter when configured.
    pub fn build_url(&self, path: &str) -> Result<Url, GeminiError> {
        let path = path.trim_start_matches('/');
        let full_path = format!("{}/{}", self.api_version, path);

        let mut url = self.base_url.join(&full_path)?;

        if let Some((key, value)) = self.credentials.auth_query_param() {
            url.query_pairs_mut().append_pair(&key, &value);
        }

        Ok(url)
    }

    /// Builds an HTTP request: URL, auth header, Content-Type for JSON
    /// bodies, serialized body.
    pub fn build_request<T: Serialize>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&T>,
    ) -> Result<HttpRequest, GeminiError> {
        let url = self.build_url(path)?;

        let mut headers = HashMap::new();
        if body.is_some() {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }
        if let Some((key, value)) = self.credentials.auth_header() {
            headers.insert(key, value);
        }

        let body_bytes = match body {
            Some(body) => Some(Bytes::from(serde_json::to_vec(body)?)),
            None => None,
        };

        Ok(HttpRequest {
            method,
            url: url.to_string(),
            headers,
            body: body_bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::ApiKeyCredentials;
    use crate::config::{AuthMethod, GeminiConfig};
    use secrecy::SecretString;
    use serde::Serialize;

    #[derive(Serialize)]
    struct TestBody {
        message: String,
    }

    fn create_test_builder(auth_method: AuthMethod) -> RequestBuilder {
        let config = GeminiConfig::builder()
            .api_key(SecretString::new("test-api-key".into()))
            .auth_method(auth_method)
            .build()
            .unwrap();

        let credentials = ApiKeyCredentials::from_config(&config);
        RequestBuilder::new(config.base_url, config.api_version, Box::new(credentials))
    }

    #[test]
    fn test_generate_content_path() {
        assert_eq!(
            generate_content_path("gemini-1.5-pro"),
            "models/gemini-1.5-pro:generateContent"
        );
    }

    #[test]
    fn test_build_url_with_version() {
        let builder = create_test_builder(AuthMethod::Header);
        let url = builder
            .build_url("models/gemini-1.5-pro:generateContent")
            .unwrap();

        assert!(url
            .as_str()
            .contains("/v1beta/models/gemini-1.5-pro:generateContent"));
        assert!(url.query().is_none());
    }

    #[test]
    fn test_build_url_with_query_param_auth() {
        let builder = create_test_builder(AuthMethod::QueryParam);
        let url = builder.build_url("models").unwrap();

        assert!(url.query().unwrap().contains("key=test-api-key"));
    }

    #[test]
    fn test_build_request_with_body() {
        let builder = create_test_builder(AuthMethod::Header);
        let body = TestBody {
            message: "test".to_string(),
        };

        let request = builder
            .build_request(HttpMethod::Post, "models/gemini-1.5-pro:generateContent", Some(&body))
            .unwrap();

        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.headers.get("Content-Type").unwrap(), "application/json");
        assert_eq!(request.headers.get("x-goog-api-key").unwrap(), "test-api-key");
        assert!(request.body.is_some());
    }

    #[test]
    fn test_build_request_without_body() {
        let builder = create_test_builder(AuthMethod::Header);
        let request = builder
            .build_request::<TestBody>(HttpMethod::Get, "models", None)
            .unwrap();

        assert!(!request.headers.contains_key("Content-Type"));
        assert!(request.body.is_none());
    }
}
