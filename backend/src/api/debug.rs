//! Prompt debugging endpoint

use axum::{extract::rejection::JsonRejection, Json};

use crate::chat::prompt::PromptPreview;
use crate::chat::service::validate_message;
use crate::chat::ChatRequest;
use crate::error::AppError;

/// POST /api/debug/prompt - Show the prompt that would be sent to the model
pub async fn prompt_preview(
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<PromptPreview>, AppError> {
    let Json(request) = payload?;
    let message = validate_message(request.message.as_deref())?;
    Ok(Json(PromptPreview::for_message(message)))
}
