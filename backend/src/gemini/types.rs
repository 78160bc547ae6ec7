//! Gemini API request and response types
//!
//! Structs that mirror the Gemini API JSON format.
//! Field names follow the REST API's camelCase convention.

use serde::{Deserialize, Serialize};

/// Sampling temperature used for every chat answer
pub const TEMPERATURE: f32 = 0.8;
/// Upper bound on generated tokens
pub const MAX_OUTPUT_TOKENS: u32 = 1200;
/// Nucleus-sampling probability mass
pub const TOP_P: f32 = 0.9;
/// Nucleus-sampling candidate count
pub const TOP_K: u32 = 40;

/// Threshold applied to every harm category
pub const SAFETY_THRESHOLD: &str = "BLOCK_MEDIUM_AND_ABOVE";

/// Harm categories filtered on every request
pub const HARM_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

/// Top-level Gemini API response
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GeminiApiResponse {
    /// List of candidate responses from the model
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    /// Optional feedback about the prompt (e.g., if it was blocked)
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

/// A single candidate response from the model
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// The content of this candidate; absent when generation was blocked
    #[serde(default)]
    pub content: Option<Content>,
    /// Why the model stopped generating (if applicable)
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Content structure containing parts of the response
#[derive(Deserialize, Debug)]
pub struct Content {
    /// List of content parts (typically one text part)
    #[serde(default)]
    pub parts: Vec<Part>,
    /// Role of the content (e.g., "model")
    #[serde(default)]
    pub role: Option<String>,
}

/// A single part of content
#[derive(Deserialize, Debug)]
pub struct Part {
    /// The text content of this part (non-text parts carry none)
    #[serde(default)]
    pub text: Option<String>,
}

/// Feedback about the prompt (e.g., if it was blocked)
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    /// Reason the prompt was blocked (if applicable)
    #[serde(default)]
    pub block_reason: Option<String>,
}

impl Candidate {
    /// Concatenated text of all parts
    pub fn text(&self) -> String {
        self.content
            .as_ref()
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

/// Request structure for Gemini API
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GeminiApiRequest {
    /// List of content items to send
    pub contents: Vec<RequestContent>,
    /// Content-safety thresholds
    pub safety_settings: Vec<SafetySetting>,
    /// Sampling parameters
    pub generation_config: GenerationConfig,
}

impl GeminiApiRequest {
    /// Single-turn user request carrying the fixed safety and sampling parameters
    pub fn for_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![RequestContent {
                role: "user".to_string(),
                parts: vec![RequestPart {
                    text: prompt.to_string(),
                }],
            }],
            safety_settings: HARM_CATEGORIES
                .iter()
                .map(|category| SafetySetting {
                    category: category.to_string(),
                    threshold: SAFETY_THRESHOLD.to_string(),
                })
                .collect(),
            generation_config: GenerationConfig::default(),
        }
    }
}

/// Content structure for requests
#[derive(Serialize, Debug)]
pub struct RequestContent {
    /// Author of the content ("user")
    pub role: String,
    /// List of content parts
    pub parts: Vec<RequestPart>,
}

/// A single part for requests (typically text)
#[derive(Serialize, Debug)]
pub struct RequestPart {
    /// The text content
    pub text: String,
}

/// Blocking threshold for one harm category
#[derive(Serialize, Debug)]
pub struct SafetySetting {
    /// Harm category, e.g. "HARM_CATEGORY_HARASSMENT"
    pub category: String,
    /// Threshold, e.g. "BLOCK_MEDIUM_AND_ABOVE"
    pub threshold: String,
}

/// Generation configuration for requests
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Sampling temperature
    pub temperature: f32,
    /// Maximum number of output tokens
    pub max_output_tokens: u32,
    /// Nucleus-sampling probability mass
    pub top_p: f32,
    /// Nucleus-sampling candidate count
    pub top_k: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: TEMPERATURE,
            max_output_tokens: MAX_OUTPUT_TOKENS,
            top_p: TOP_P,
            top_k: TOP_K,
        }
    }
}
