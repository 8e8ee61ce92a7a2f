//! Structured logging with secret redaction.

use crate::config::LogLevel;
use serde_json::Value;

/// Logger trait for structured logging.
///
/// Implementations can integrate with various logging backends; the client
/// only depends on this trait so tests can substitute a no-op.
pub trait Logger: Send + Sync {
    /// Log a debug message with structured context.
    fn debug(&self, message: &str, fields: Value);

    /// Log an info message with structured context.
    fn info(&self, message: &str, fields: Value);

    /// Log a warning message with structured context.
    fn warn(&self, message: &str, fields: Value);

    /// Log an error message with structured context.
    fn error(&self, message: &str, fields: Value);
}

/// Field names masked before emission. Covers the common spellings of
/// credentials that could leak through request/response context objects.
const SENSITIVE_KEYS: &[&str] = &[
    "api_key",
    "apiKey",
    "key",
    "token",
    "access_token",
    "accessToken",
    "secret",
    "password",
    "credential",
    "authorization",
    "auth",
];

fn level_rank(level: LogLevel) -> u8 {
    match level {
        LogLevel::Error => 0,
        LogLevel::Warn => 1,
        LogLevel::Info => 2,
        LogLevel::Debug => 3,
        LogLevel::Trace => 4,
    }
}

/// Mask sensitive keys in a fields object, recursing into nested objects.
fn redact_sensitive_fields(mut fields: Value) -> Value {
    if let Some(obj) = fields.as_object_mut() {
        for key in SENSITIVE_KEYS {
            if obj.contains_key(*key) {
                obj.insert((*key).to_string(), Value::String("***REDACTED***".to_string()));
            }
        }
        for (_, value) in obj.iter_mut() {
            if value.is_object() {
                *value = redact_sensitive_fields(value.clone());
            }
        }
    }
    fields
}

/// Structured logger backed by the `tracing` crate.
pub struct StructuredLogger {
    name: String,
    level: LogLevel,
}

impl StructuredLogger {
    /// Create a new structured logger with the given name (typically the
    /// service or module name).
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            level: LogLevel::Info,
        }
    }

    /// Set the minimum log level for this logger.
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    fn should_log(&self, level: LogLevel) -> bool {
        level_rank(level) <= level_rank(self.level)
    }
}

impl Logger for StructuredLogger {
    fn debug(&self, message: &str, fields: Value) {
        if !self.should_log(LogLevel::Debug) {
            return;
        }
        let fields = redact_sensitive_fields(fields);
        tracing::debug!(target: "gemini_client", logger = %self.name, message, fields = %fields);
    }

    fn info(&self, message: &str, fields: Value) {
        if !self.should_log(LogLevel::Info) {
            return;
        }
        let fields = redact_sensitive_fields(fields);
        tracing::info!(target: "gemini_client", logger = %self.name, message, fields = %fields);
    }

    fn warn(&self, message: &str, fields: Value) {
        if !self.should_log(LogLevel::Warn) {
            return;
        }
        let fields = redact_sensitive_fields(fields);
        tracing::warn!(target: "gemini_client", logger = %self.name, message, fields = %fields);
    }

    fn error(&self, message: &str, fields: Value) {
        if !self.should_log(LogLevel::Error) {
            return;
        }
        let fields = redact_sensitive_fields(fields);
        tracing::error!(target: "gemini_client", logger = %self.name, message, fields = %fields);
    }
}

/// Logger that discards everything. Useful in tests.
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn debug(&self, _message: &str, _fields: Value) {}
    fn info(&self, _message: &str, _fields: Value) {}
    fn warn(&self, _message: &str, _fields: Value) {}
    fn error(&self, _message: &str, _fields: Value) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_should_log_respects_level() {
        let logger = StructuredLogger::new("test").with_level(LogLevel::Info);
        assert!(logger.should_log(LogLevel::Error));
        assert!(logger.should_log(LogLevel::Warn));
        assert!(logger.should_log(LogLevel::Info));
        assert!(!logger.should_log(LogLevel::Debug));
        assert!(!logger.should_log(LogLevel::Trace));
    }

    #[test]
    fn test_redact_sensitive_fields() {
        let fields = json!({
            "api_key": "secret-key-123",
            "model": "gemini-1.5-pro",
        });

        let redacted = redact_sensitive_fields(fields);
        assert_eq!(redacted["api_key"], "***REDACTED***");
        assert_eq!(redacted["model"], "gemini-1.5-pro");
    }

    #[test]
    fn test_redact_nested_sensitive_fields() {
        let fields = json!({
            "request": {
                "authorization": "Bearer token-123",
                "model": "gemini-1.5-pro"
            },
            "user": "test-user"
        });

        let redacted = redact_sensitive_fields(fields);
        assert_eq!(redacted["request"]["authorization"], "***REDACTED***");
        assert_eq!(redacted["request"]["model"], "gemini-1.5-pro");
        assert_eq!(redacted["user"], "test-user");
    }
}
