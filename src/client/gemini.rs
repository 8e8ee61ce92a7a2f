//! HTTP-backed content client implementation.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use serde_json::json;

use super::ContentClient;
use crate::auth::{ApiKeyCredentials, Credentials};
use crate::config::GeminiConfig;
use crate::error::GeminiError;
use crate::observability::{Logger, StructuredLogger};
use crate::transport::{
    generate_content_path, HttpMethod, HttpTransport, RequestBuilder, ReqwestTransport,
    ResponseParser,
};
use crate::types::{GenerateContentRequest, Response};

/// Content client backed by an [`HttpTransport`].
pub struct GeminiContentClient {
    transport: Arc<dyn HttpTransport>,
    request_builder: RequestBuilder,
    logger: Box<dyn Logger>,
}

impl GeminiContentClient {
    /// Create a client from configuration, using the reqwest transport.
    pub fn new(config: &GeminiConfig) -> Result<Self, GeminiError> {
        let transport = ReqwestTransport::new(config.timeout, config.connect_timeout)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client over an existing transport. Used by tests to inject
    /// a mock.
    pub fn with_transport(config: &GeminiConfig, transport: Arc<dyn HttpTransport>) -> Self {
        let credentials: Box<dyn Credentials> = Box::new(ApiKeyCredentials::from_config(config));
        let request_builder = RequestBuilder::new(
            config.base_url.clone(),
            config.api_version.clone(),
            credentials,
        );

        Self {
            transport,
            request_builder,
            logger: Box::new(StructuredLogger::new("gemini.content").with_level(config.log_level)),
        }
    }
}

#[async_trait]
impl ContentClient for GeminiContentClient {
    async fn generate(
        &self,
        model: &str,
        request: GenerateContentRequest,
    ) -> Result<Response, GeminiError> {
        let start = Instant::now();

        self.logger.debug(
            "Starting content generation",
            json!({
                "model": model,
                "contents_count": request.contents.len(),
                "has_generation_config": request.generation_config.is_some(),
                "has_safety_settings": request.safety_settings.is_some(),
            }),
        );

        let path = generate_content_path(model);
        let http_request =
            self.request_builder
                .build_request(HttpMethod::Post, &path, Some(&request))?;

        let http_response = self.transport.send(http_request).await.map_err(|e| {
            let error = GeminiError::from(e);
            self.logger.error(
                "Network error during content generation",
                json!({"error": error.to_string(), "model": model}),
            );
            error
        })?;

        let raw = ResponseParser::parse_json(http_response).map_err(|e| {
            self.logger.warn(
                "Content generation failed",
                json!({"error": e.to_string(), "code": e.code(), "model": model}),
            );
            e
        })?;

        let response = Response::from_value(raw)?;
        let duration = start.elapsed();

        if let Some(usage) = &response.usage {
            self.logger.info(
                "Content generation completed",
                json!({
                    "model": model,
                    "duration_ms": duration.as_millis() as u64,
                    "prompt_tokens": usage.prompt_token_count,
                    "completion_tokens": usage.candidates_token_count.unwrap_or(0),
                    "total_tokens": usage.total_token_count,
                }),
            );
        } else {
            self.logger.info(
                "Content generation completed",
                json!({
                    "model": model,
                    "duration_ms": duration.as_millis() as u64,
                }),
            );
        }

        Ok(response)
    }
}
