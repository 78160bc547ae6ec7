//! Chat request and response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::chat::fallback::FallbackCategory;
use crate::chat::intent::Intent;

/// Body of `POST /api/chat`
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// The user's question; absent and blank are both rejected
    #[serde(default)]
    pub message: Option<String>,
}

/// Body returned by `POST /api/chat`
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Always `true`; failures are reported through [`crate::error::AppError`]
    pub success: bool,
    /// Text to display to the user
    pub response: String,
    /// How the response was produced
    pub metadata: ResponseMetadata,
}

/// Origin of a chat response, serialized with a `type` tag
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseMetadata {
    /// Text generated by the model
    AiResponse {
        /// Model that produced the answer
        model: String,
        /// Rough token count (characters / 4)
        tokens: usize,
        /// When the response was produced
        timestamp: DateTime<Utc>,
    },
    /// Static emergency guidance from triage
    Emergency {
        /// Heading of the guidance
        title: String,
        /// When the response was produced
        timestamp: DateTime<Utc>,
    },
    /// Canned answer used because the model call failed
    Fallback {
        /// Category of the canned answer
        fallback_type: FallbackCategory,
        /// Intent detected from the message
        intent: Intent,
        /// Start of the upstream error message
        original_error: String,
        /// When the response was produced
        timestamp: DateTime<Utc>,
    },
}

/// Response origin without payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    /// See [`ResponseMetadata::AiResponse`]
    AiResponse,
    /// See [`ResponseMetadata::Emergency`]
    Emergency,
    /// See [`ResponseMetadata::Fallback`]
    Fallback,
}

impl ResponseMetadata {
    /// Variant of this metadata
    pub fn kind(&self) -> ResponseKind {
        match self {
            ResponseMetadata::AiResponse { .. } => ResponseKind::AiResponse,
            ResponseMetadata::Emergency { .. } => ResponseKind::Emergency,
            ResponseMetadata::Fallback { .. } => ResponseKind::Fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_message_deserializes_as_none() {
        let request: ChatRequest = serde_json::from_str("{}").unwrap();
        assert!(request.message.is_none());
    }

    #[test]
    fn test_metadata_type_tag() {
        let response = ChatResponse {
            success: true,
            response: "texto".to_string(),
            metadata: ResponseMetadata::Fallback {
                fallback_type: FallbackCategory::Information,
                intent: Intent::Facility,
                original_error: "API key is empty".to_string(),
                timestamp: Utc::now(),
            },
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["metadata"]["type"], "fallback");
        assert_eq!(value["metadata"]["fallback_type"], "informacao");
        assert_eq!(value["metadata"]["intent"], "facility");
        assert!(value["metadata"]["timestamp"].is_string());
        assert_eq!(response.metadata.kind(), ResponseKind::Fallback);
    }
}
