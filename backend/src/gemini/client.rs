//! Gemini API client
//!
//! Direct HTTP client for calling the Gemini `generateContent` endpoint
//! with the fixed safety and sampling parameters.

use std::time::Duration;

use async_trait::async_trait;

use crate::config::GeminiConfig;
use crate::error::UpstreamError;
use crate::gemini::types::{GeminiApiRequest, GeminiApiResponse};
use crate::gemini::GenerativeModel;

/// Header carrying the API key, so it never appears in request URLs
pub const API_KEY_HEADER: &str = "x-goog-api-key";

/// HTTP client for the Gemini REST API
///
/// Holds one `reqwest::Client` so connections are pooled across requests.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Build a client from configuration
    ///
    /// # Errors
    /// Returns the `reqwest` error if the HTTP client cannot be constructed
    /// (e.g. the TLS backend fails to initialise).
    pub fn new(config: &GeminiConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self::with_http_client(http, config))
    }

    /// Build a client around an existing `reqwest::Client`
    pub fn with_http_client(http: reqwest::Client, config: &GeminiConfig) -> Self {
        Self {
            http,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Call the API with a complete prompt
    ///
    /// # Returns
    /// * `Ok(String)` - The text of the first candidate
    /// * `Err(UpstreamError)` - If the call failed or produced no usable text
    pub async fn generate_content(&self, prompt: &str) -> Result<String, UpstreamError> {
        if self.api_key.is_empty() {
            return Err(UpstreamError::MissingApiKey);
        }

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let request_body = GeminiApiRequest::for_prompt(prompt);

        tracing::debug!(
            base_url = %self.base_url,
            model = %self.model,
            prompt_len = prompt.len(),
            "Calling Gemini API"
        );

        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request_body)
            .send()
            .await?;

        // Check HTTP status
        let status = response.status();
        if !status.is_success() {
            let status_code = status.as_u16();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());

            tracing::error!(
                status_code = status_code,
                error_body = %error_body,
                "Gemini API returned error status"
            );

            if status_code == 429 {
                return Err(UpstreamError::RateLimited { body: error_body });
            }
            return Err(UpstreamError::Status {
                status: status_code,
                body: error_body,
            });
        }

        let response_body = response.text().await?;
        let parsed: GeminiApiResponse = serde_json::from_str(&response_body)
            .map_err(|e| UpstreamError::Parse(format!("{} - Response body: {}", e, response_body)))?;

        extract_text(parsed)
    }
}

/// Pull the answer out of a parsed response
fn extract_text(parsed: GeminiApiResponse) -> Result<String, UpstreamError> {
    if let Some(reason) = parsed
        .prompt_feedback
        .as_ref()
        .and_then(|feedback| feedback.block_reason.as_ref())
    {
        return Err(UpstreamError::Blocked(reason.clone()));
    }

    let candidate = parsed
        .candidates
        .first()
        .ok_or(UpstreamError::NoCandidates)?;

    let text = candidate.text();
    if text.trim().is_empty() {
        // A safety stop leaves the candidate without content
        if let Some(reason) = candidate
            .finish_reason
            .as_deref()
            .filter(|reason| *reason == "SAFETY")
        {
            return Err(UpstreamError::Blocked(reason.to_string()));
        }
        return Err(UpstreamError::EmptyText);
    }

    tracing::debug!(
        response_len = text.len(),
        "Successfully received response from Gemini API"
    );

    Ok(text)
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String, UpstreamError> {
        self.generate_content(prompt).await
    }
}
