//! Configuration types for the Gemini client.

use secrecy::SecretString;
use std::time::Duration;
use url::Url;
use crate::error::{ConfigurationError, GeminiError};

/// Default Gemini API base URL.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default API version.
pub const DEFAULT_API_VERSION: &str = "v1beta";

/// Default model.
pub const DEFAULT_MODEL: &str = "gemini-1.5-pro";

/// Default request timeout (120 seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default connect timeout (30 seconds).
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Chunk size, in code points, for simulated stream delivery.
pub const DEFAULT_STREAM_CHUNK_SIZE: usize = 20;

/// Delay between simulated stream chunks.
pub const DEFAULT_STREAM_CHUNK_DELAY: Duration = Duration::from_millis(50);

/// Interval between completion polls in the stream controller.
pub const DEFAULT_STREAM_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Wall-clock budget for one streaming call.
pub const DEFAULT_STREAM_TIMEOUT: Duration = Duration::from_secs(30);

/// Authentication method for API key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AuthMethod {
    /// Use x-goog-api-key header (recommended).
    #[default]
    Header,
    /// Use ?key= query parameter.
    QueryParam,
}

/// Log level for the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Error level - only errors.
    Error,
    /// Warning level - errors and warnings.
    Warn,
    /// Info level - general information.
    #[default]
    Info,
    /// Debug level - detailed information.
    Debug,
    /// Trace level - very detailed information.
    Trace,
}

/// Tuning knobs for the simulated streaming subsystem.
#[derive(Clone, Debug)]
pub struct StreamConfig {
    /// Code points per simulated chunk.
    pub chunk_size: usize,
    /// Delay between chunk deliveries.
    pub chunk_delay: Duration,
    /// Interval between completion polls.
    pub poll_interval: Duration,
    /// Wall-clock budget for one streaming call.
    pub timeout: Duration,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_STREAM_CHUNK_SIZE,
            chunk_delay: DEFAULT_STREAM_CHUNK_DELAY,
            poll_interval: DEFAULT_STREAM_POLL_INTERVAL,
            timeout: DEFAULT_STREAM_TIMEOUT,
        }
    }
}

/// Configuration for the Gemini client.
#[derive(Clone)]
pub struct GeminiConfig {
    /// API key (required).
    pub api_key: SecretString,
    /// Base URL for the API.
    pub base_url: Url,
    /// API version.
    pub api_version: String,
    /// Default model for generation calls.
    pub default_model: String,
    /// Default timeout for requests.
    pub timeout: Duration,
    /// Connect timeout.
    pub connect_timeout: Duration,
    /// Streaming subsystem tuning.
    pub stream: StreamConfig,
    /// Log level.
    pub log_level: LogLevel,
    /// Authentication method.
    pub auth_method: AuthMethod,
}

impl GeminiConfig {
    /// Create a new configuration builder.
    pub fn builder() -> GeminiConfigBuilder {
        GeminiConfigBuilder::default()
    }

    /// Create configuration from environment variables.
    pub fn from_env() -> Result<Self, GeminiError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("GOOGLE_API_KEY"))
            .map_err(|_| ConfigurationError::MissingApiKey)?;

        let base_url = std::env::var("GEMINI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let api_version = std::env::var("GEMINI_API_VERSION")
            .unwrap_or_else(|_| DEFAULT_API_VERSION.to_string());

        let default_model = std::env::var("GEMINI_DEFAULT_MODEL")
            .unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let timeout_secs: u64 = std::env::var("GEMINI_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self::builder()
            .api_key(SecretString::new(api_key.into()))
            .base_url(&base_url)?
            .api_version(&api_version)
            .default_model(&default_model)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
    }
}

/// Builder for GeminiConfig.
#[derive(Default)]
pub struct GeminiConfigBuilder {
    api_key: Option<SecretString>,
    base_url: Option<Url>,
    api_version: Option<String>,
    default_model: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    stream: Option<StreamConfig>,
    log_level: Option<LogLevel>,
    auth_method: Option<AuthMethod>,
}

impl GeminiConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, api_key: SecretString) -> Self {
        self.api_key = Some(api_key);
        self
    }

    /// Set the base URL.
    pub fn base_url(mut self, base_url: &str) -> Result<Self, GeminiError> {
        self.base_url = Some(Url::parse(base_url)?);
        Ok(self)
    }

    /// Set the API version.
    pub fn api_version(mut self, version: &str) -> Self {
        self.api_version = Some(version.to_string());
        self
    }

    /// Set the default model.
    pub fn default_model(mut self, model: &str) -> Self {
        self.default_model = Some(model.to_string());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the streaming configuration.
    pub fn stream(mut self, stream: StreamConfig) -> Self {
        self.stream = Some(stream);
        self
    }

    /// Set the log level.
    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.log_level = Some(level);
        self
    }

    /// Set the authentication method.
    pub fn auth_method(mut self, method: AuthMethod) -> Self {
        self.auth_method = Some(method);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> Result<GeminiConfig, GeminiError> {
        let api_key = self.api_key
            .ok_or(ConfigurationError::MissingApiKey)?;

        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL)?,
        };

        let stream = self.stream.unwrap_or_default();
        if stream.chunk_size == 0 {
            return Err(ConfigurationError::InvalidConfiguration {
                message: "stream chunk_size must be at least 1".to_string(),
            }
            .into());
        }

        Ok(GeminiConfig {
            api_key,
            base_url,
            api_version: self.api_version.unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            default_model: self.default_model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            timeout: self.timeout.unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            connect_timeout: self
                .connect_timeout
                .unwrap_or(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS)),
            stream,
            log_level: self.log_level.unwrap_or_default(),
            auth_method: self.auth_method.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeminiConfig::builder()
            .api_key(SecretString::new("test-key".into()))
            .build()
            .unwrap();

        assert_eq!(config.base_url.as_str(), "https://generativelanguage.googleapis.com/");
        assert_eq!(config.api_version, "v1beta");
        assert_eq!(config.default_model, "gemini-1.5-pro");
        assert_eq!(config.stream.chunk_size, 20);
        assert_eq!(config.stream.poll_interval, Duration::from_millis(100));
        assert_eq!(config.stream.timeout, Duration::from_secs(30));
        assert_eq!(config.auth_method, AuthMethod::Header);
    }

    #[test]
    fn test_custom_config() {
        let config = GeminiConfig::builder()
            .api_key(SecretString::new("test-key".into()))
            .api_version("v1")
            .default_model("gemini-1.5-flash")
            .stream(StreamConfig {
                chunk_size: 8,
                chunk_delay: Duration::from_millis(10),
                poll_interval: Duration::from_millis(25),
                timeout: Duration::from_secs(5),
            })
            .auth_method(AuthMethod::QueryParam)
            .build()
            .unwrap();

        assert_eq!(config.api_version, "v1");
        assert_eq!(config.default_model, "gemini-1.5-flash");
        assert_eq!(config.stream.chunk_size, 8);
        assert_eq!(config.auth_method, AuthMethod::QueryParam);
    }

    #[test]
    fn test_missing_api_key() {
        let result = GeminiConfig::builder().build();
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let result = GeminiConfig::builder()
            .api_key(SecretString::new("test-key".into()))
            .stream(StreamConfig {
                chunk_size: 0,
                ..StreamConfig::default()
            })
            .build();
        assert!(result.is_err());
    }
}
