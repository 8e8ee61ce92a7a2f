//! Content-related types for the Gemini API.
//!
//! This module contains types for representing content, messages, and their parts.

use base64::Engine;
use serde::{Deserialize, Serialize};

/// A part of a content message: text, inline binary data, a file reference,
/// a function call, or a function response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Part {
    /// Text content.
    Text {
        /// The text content.
        text: String,
    },
    /// Inline binary data.
    #[serde(rename_all = "camelCase")]
    InlineData {
        /// The inline data blob.
        inline_data: Blob,
    },
    /// Reference to file data.
    #[serde(rename_all = "camelCase")]
    FileData {
        /// The file data reference.
        file_data: FileData,
    },
    /// A function call.
    #[serde(rename_all = "camelCase")]
    FunctionCall {
        /// The function call details.
        function_call: FunctionCall,
    },
    /// A function response.
    #[serde(rename_all = "camelCase")]
    FunctionResponse {
        /// The function response details.
        function_response: FunctionResponse,
    },
}

impl Part {
    /// Build a text part.
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text { text: text.into() }
    }

    /// Returns the text carried by this part, if it is a text part.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Part::Text { text } => Some(text),
            _ => None,
        }
    }

    /// Returns the function call carried by this part, if any.
    pub fn as_function_call(&self) -> Option<&FunctionCall> {
        match self {
            Part::FunctionCall { function_call } => Some(function_call),
            _ => None,
        }
    }
}

/// Binary data blob with MIME type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    /// The MIME type of the data.
    pub mime_type: String,
    /// Base64-encoded binary data.
    pub data: String,
}

impl Blob {
    /// Build a blob from raw bytes, encoding them as base64.
    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
        }
    }
}

/// Reference to file data stored in Gemini's file service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FileData {
    /// The MIME type of the file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// The URI of the file.
    pub file_uri: String,
}

/// A function call request from the model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionCall {
    /// The name of the function to call.
    pub name: String,
    /// The arguments to pass to the function.
    pub args: serde_json::Value,
}

/// A function response to send back to the model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionResponse {
    /// The name of the function that was called.
    pub name: String,
    /// The response data from the function.
    pub response: serde_json::Value,
}

/// A content message with a role and parts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Content {
    /// The role of the content author.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// The parts of the content.
    pub parts: Vec<Part>,
}

impl Content {
    /// Build a single-part user text message.
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: Some(Role::User),
            parts: vec![Part::text(text)],
        }
    }

    /// Build a single-part system instruction.
    pub fn system_text(text: impl Into<String>) -> Self {
        Self {
            role: Some(Role::System),
            parts: vec![Part::text(text)],
        }
    }
}

/// The role of a message author.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// User role.
    User,
    /// Model role.
    Model,
    /// System role.
    System,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_accessors() {
        let text = Part::text("hello");
        assert_eq!(text.as_text(), Some("hello"));
        assert!(text.as_function_call().is_none());

        let call = Part::FunctionCall {
            function_call: FunctionCall {
                name: "lookup".to_string(),
                args: serde_json::json!({"q": "rust"}),
            },
        };
        assert!(call.as_text().is_none());
        assert_eq!(call.as_function_call().map(|f| f.name.as_str()), Some("lookup"));
    }

    #[test]
    fn test_blob_from_bytes() {
        let blob = Blob::from_bytes("image/png", b"\x89PNG");
        assert_eq!(blob.mime_type, "image/png");
        assert_eq!(blob.data, "iVBORw==");
    }

    #[test]
    fn test_part_serde_untagged() {
        let json = r#"{"text":"hi"}"#;
        let part: Part = serde_json::from_str(json).expect("text part");
        assert_eq!(part.as_text(), Some("hi"));

        let json = r#"{"functionCall":{"name":"f","args":{}}}"#;
        let part: Part = serde_json::from_str(json).expect("function call part");
        assert!(part.as_function_call().is_some());
    }

    #[test]
    fn test_content_user_text() {
        let content = Content::user_text("prompt");
        assert_eq!(content.role, Some(Role::User));
        assert_eq!(content.parts.len(), 1);
    }
}
