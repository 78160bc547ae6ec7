//! Chat API endpoint
//!
//! `POST /api/chat`: answers one question. Every well-formed request gets a
//! 200 with displayable text; only request-shape problems produce a 400.

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::chat::{ChatRequest, ChatResponse};
use crate::error::AppError;
use crate::state::SharedState;

/// POST /api/chat - Answer a health question
pub async fn chat(
    State(state): State<SharedState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(request) = payload?;
    let response = state.chat.respond(request.message.as_deref()).await?;
    Ok(Json(response))
}
