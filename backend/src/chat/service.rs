//! Chat request handling
//!
//! Flow for one message:
//! 1. Validate (non-blank, bounded length)
//! 2. Emergency triage, answered without calling the model
//! 3. Model call with the combined prompt
//! 4. On model failure, a canned answer chosen by keyword intent
//!
//! Model failures never reach the caller.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};

use crate::chat::fallback::{self, EMERGENCY_GUIDANCE};
use crate::chat::intent::{detect_intent, Intent};
use crate::chat::models::{ChatResponse, ResponseMetadata};
use crate::chat::prompt::build_prompt;
use crate::chat::triage;
use crate::error::AppError;
use crate::gemini::GenerativeModel;

/// Maximum message length in characters
pub const MAX_MESSAGE_CHARS: usize = 10_000;

/// Error text for a missing or blank message
pub const EMPTY_MESSAGE_ERROR: &str = "Empty message: por favor, digite sua pergunta.";

/// Characters of the question included in logs
const LOG_PREVIEW_CHARS: usize = 60;

/// Characters of the upstream error reported in fallback metadata
const ERROR_PREVIEW_CHARS: usize = 100;

/// Validate a chat message
///
/// # Returns
/// * `Ok(&str)` - The trimmed message
/// * `Err(AppError::Validation)` - Message is absent, blank or too long
pub fn validate_message(message: Option<&str>) -> Result<&str, AppError> {
    let trimmed = message.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Err(AppError::Validation(EMPTY_MESSAGE_ERROR.to_string()));
    }
    if trimmed.chars().count() > MAX_MESSAGE_CHARS {
        return Err(AppError::Validation(format!(
            "Message exceeds maximum length of {} characters",
            MAX_MESSAGE_CHARS
        )));
    }
    Ok(trimmed)
}

/// Answers chat messages through a [`GenerativeModel`]
#[derive(Clone)]
pub struct ChatService {
    model: Arc<dyn GenerativeModel>,
}

impl ChatService {
    /// Create a service backed by `model`
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    /// Name of the backing model
    pub fn model_name(&self) -> &str {
        self.model.model_name()
    }

    /// Produce a response for one message
    ///
    /// # Errors
    /// Only [`AppError::Validation`]; upstream failures become fallback responses.
    pub async fn respond(&self, message: Option<&str>) -> Result<ChatResponse, AppError> {
        let message = validate_message(message)?;

        info!(question = %preview(message, LOG_PREVIEW_CHARS), "Chat question received");

        if let Some(phrase) = triage::matched_phrase(message) {
            warn!(phrase = phrase, "Emergency detected, skipping model call");
            return Ok(emergency_response());
        }

        let prompt = build_prompt(message);
        info!(model = %self.model.model_name(), "Generating answer");

        match self.model.generate(&prompt).await {
            Ok(text) => {
                info!(response_len = text.len(), "Answer generated");
                let tokens = text.chars().count() / 4;
                Ok(ChatResponse {
                    success: true,
                    response: text,
                    metadata: ResponseMetadata::AiResponse {
                        model: self.model.model_name().to_string(),
                        tokens,
                        timestamp: Utc::now(),
                    },
                })
            }
            Err(err) => {
                error!(error = %err, "Model call failed, answering with fallback");
                let intent = detect_intent(message);
                Ok(fallback_response(intent, &err.to_string()))
            }
        }
    }
}

fn emergency_response() -> ChatResponse {
    ChatResponse {
        success: true,
        response: EMERGENCY_GUIDANCE.to_string(),
        metadata: ResponseMetadata::Emergency {
            title: fallback::EMERGENCY.title.to_string(),
            timestamp: Utc::now(),
        },
    }
}

fn fallback_response(intent: Intent, error_message: &str) -> ChatResponse {
    let entry = fallback::fallback_for(intent);
    ChatResponse {
        success: true,
        response: entry.render(),
        metadata: ResponseMetadata::Fallback {
            fallback_type: entry.category,
            intent,
            original_error: error_message.chars().take(ERROR_PREVIEW_CHARS).collect(),
            timestamp: Utc::now(),
        },
    }
}

/// First `max` characters of `text`, with `...` when truncated
fn preview(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let mut short: String = text.chars().take(max).collect();
        short.push_str("...");
        short
    } else {
        text.to_string()
    }
}
