//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use std::env;
use std::fmt;
use std::path::PathBuf;

/// Default Gemini model used for chat answers
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";

/// Default base URL of the Gemini REST API
pub const DEFAULT_GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Generative model configuration
    pub gemini: GeminiConfig,
    /// Static UI bundle configuration
    pub web: WebConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
}

/// Gemini API configuration
#[derive(Clone)]
pub struct GeminiConfig {
    /// API key sent with every request (may be empty)
    pub api_key: String,
    /// Model name, e.g. "gemini-3-flash-preview"
    pub model: String,
    /// Base URL of the REST API
    pub base_url: String,
    /// HTTP request timeout in seconds
    pub timeout_secs: u64,
}

// Keep the key out of startup logs.
impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key_set", &!self.api_key.is_empty())
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_API_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

/// Static file serving configuration
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// Directory holding the pre-built UI bundle (must contain `index.html`)
    pub static_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        let gemini_defaults = GeminiConfig::default();
        Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(5000),
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            },
            gemini: GeminiConfig {
                api_key: env::var("GEMINI_API_KEY").unwrap_or_default(),
                model: env::var("GEMINI_MODEL")
                    .ok()
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or(gemini_defaults.model),
                base_url: env::var("GEMINI_API_BASE_URL")
                    .ok()
                    .filter(|u| !u.trim().is_empty())
                    .unwrap_or(gemini_defaults.base_url),
                timeout_secs: env::var("GEMINI_TIMEOUT_SECS")
                    .ok()
                    .and_then(|t| t.parse().ok())
                    .filter(|t| *t > 0)
                    .unwrap_or(gemini_defaults.timeout_secs),
            },
            web: WebConfig {
                static_dir: env::var("STATIC_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("frontend/dist")),
            },
        }
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
