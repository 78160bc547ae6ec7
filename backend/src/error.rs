//! Error types and error handling for the application
//!
//! This module defines custom error types that can be converted to HTTP responses.
//! All errors implement `IntoResponse` to provide consistent error formatting.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error types
///
/// Only request-shape problems ever reach the client. Failures of the
/// generative model are absorbed by the chat service (see [`UpstreamError`]).
#[derive(Error, Debug)]
pub enum AppError {
    /// The request was malformed or its message was empty / too long
    #[error("{0}")]
    Validation(String),

    /// Internal server error (catch-all for unexpected errors)
    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "success": false,
            "error": self.to_string(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

/// Failures of the external generative-text service
///
/// These never become HTTP errors; the chat service logs them and answers
/// with a canned fallback instead.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// No API key was configured
    #[error("API key is empty")]
    MissingApiKey,

    /// The HTTP request could not be sent or the body could not be read
    #[error("Failed to reach Gemini API: {0}")]
    Transport(#[source] reqwest::Error),

    /// The request exceeded the client timeout
    #[error("Gemini API request timed out")]
    Timeout,

    /// HTTP 429 from the API
    #[error("Gemini API rate limit exceeded: {body}")]
    RateLimited {
        /// Error body returned by the API
        body: String,
    },

    /// Any other non-success HTTP status
    #[error("Gemini API returned error status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Error body returned by the API
        body: String,
    },

    /// The response body was not the expected JSON
    #[error("Failed to parse JSON response from Gemini API: {0}")]
    Parse(String),

    /// The prompt or the answer was blocked by the safety filters
    #[error("Gemini API blocked the prompt: {0}")]
    Blocked(String),

    /// The response carried no candidates
    #[error("Gemini API response contains no candidates")]
    NoCandidates,

    /// The first candidate had no usable text
    #[error("Gemini API response text is empty")]
    EmptyText,
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UpstreamError::Timeout
        } else {
            UpstreamError::Transport(err.without_url())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn test_validation_error_is_bad_request() {
        let response = AppError::Validation("Por favor, digite sua pergunta.".to_string())
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["status"], 400);
        assert_eq!(value["error"], "Por favor, digite sua pergunta.");
    }

    #[tokio::test]
    async fn test_internal_error_is_server_error() {
        let response = AppError::Internal(anyhow::anyhow!("boom")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_upstream_error_messages() {
        assert_eq!(UpstreamError::MissingApiKey.to_string(), "API key is empty");
        let err = UpstreamError::Status {
            status: 500,
            body: "oops".to_string(),
        };
        assert!(err.to_string().contains("500"));
        assert!(UpstreamError::Blocked("SAFETY".to_string())
            .to_string()
            .contains("blocked the prompt"));
    }
}
