//! Authentication for the Gemini API.
//!
//! The API accepts the key either as an `x-goog-api-key` header or as a
//! `?key=` query parameter; [`Credentials`] decides which at request-build
//! time so the transport never sees the raw secret outside that call.

use crate::config::{AuthMethod, GeminiConfig};
use secrecy::{ExposeSecret, SecretString};

/// Supplies the credential pair attached to each outgoing request.
pub trait Credentials: Send + Sync {
    /// Header name/value pair, when header auth is in effect.
    fn auth_header(&self) -> Option<(String, String)>;

    /// Query parameter name/value pair, when query auth is in effect.
    fn auth_query_param(&self) -> Option<(String, String)>;

    /// Clone into a boxed trait object.
    fn clone_box(&self) -> Box<dyn Credentials>;
}

/// API-key credentials with a configurable delivery method.
pub struct ApiKeyCredentials {
    api_key: SecretString,
    auth_method: AuthMethod,
}

impl ApiKeyCredentials {
    /// Create credentials from a key and delivery method.
    pub fn new(api_key: SecretString, auth_method: AuthMethod) -> Self {
        Self { api_key, auth_method }
    }

    /// Create credentials from client configuration.
    pub fn from_config(config: &GeminiConfig) -> Self {
        Self::new(config.api_key.clone(), config.auth_method)
    }
}

impl Credentials for ApiKeyCredentials {
    fn auth_header(&self) -> Option<(String, String)> {
        match self.auth_method {
            AuthMethod::Header => Some((
                "x-goog-api-key".to_string(),
                self.api_key.expose_secret().to_string(),
            )),
            AuthMethod::QueryParam => None,
        }
    }

    fn auth_query_param(&self) -> Option<(String, String)> {
        match self.auth_method {
            AuthMethod::QueryParam => Some((
                "key".to_string(),
                self.api_key.expose_secret().to_string(),
            )),
            AuthMethod::Header => None,
        }
    }

    fn clone_box(&self) -> Box<dyn Credentials> {
        Box::new(Self {
            api_key: self.api_key.clone(),
            auth_method: self.auth_method,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_auth() {
        let creds = ApiKeyCredentials::new(
            SecretString::new("test-key".into()),
            AuthMethod::Header,
        );

        let (name, value) = creds.auth_header().expect("header pair");
        assert_eq!(name, "x-goog-api-key");
        assert_eq!(value, "test-key");
        assert!(creds.auth_query_param().is_none());
    }

    #[test]
    fn test_query_param_auth() {
        let creds = ApiKeyCredentials::new(
            SecretString::new("test-key".into()),
            AuthMethod::QueryParam,
        );

        assert!(creds.auth_header().is_none());
        let (name, value) = creds.auth_query_param().expect("query pair");
        assert_eq!(name, "key");
        assert_eq!(value, "test-key");
    }
}
