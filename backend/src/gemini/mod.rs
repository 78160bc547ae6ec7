//! Gemini generative-text service
//!
//! Wire types for the `generateContent` REST endpoint, the fixed generation
//! and safety parameters, and the [`GenerativeModel`] seam the chat service
//! calls through.

pub mod client;
pub mod types;

pub use client::GeminiClient;

use crate::error::UpstreamError;
use async_trait::async_trait;

/// A model that turns a prompt into text
///
/// Implemented by [`GeminiClient`]; tests substitute their own.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Name reported in response metadata and health checks
    fn model_name(&self) -> &str;

    /// Generate an answer for a complete prompt
    async fn generate(&self, prompt: &str) -> Result<String, UpstreamError>;
}
