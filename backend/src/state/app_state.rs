//! Application state
//!
//! Built once at startup and shared read-only between requests.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::chat::ChatService;
use crate::config::Config;
use crate::gemini::GenerativeModel;

/// State handed to every handler
pub type SharedState = Arc<AppState>;

/// Application-wide state
pub struct AppState {
    /// Loaded configuration
    pub config: Config,
    /// Chat handling backed by the configured model
    pub chat: ChatService,
    started_at: Instant,
}

impl AppState {
    /// Create state around a generative model
    pub fn new(config: Config, model: Arc<dyn GenerativeModel>) -> Self {
        Self {
            config,
            chat: ChatService::new(model),
            started_at: Instant::now(),
        }
    }

    /// Wrap in an `Arc` for the router
    pub fn shared(self) -> SharedState {
        Arc::new(self)
    }

    /// Time since the state was created
    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemini::GeminiClient;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_state_reports_model_and_uptime() {
        let config = Config::from_env();
        let client = GeminiClient::with_http_client(reqwest::Client::new(), &config.gemini);
        let expected_model = config.gemini.model.clone();
        let state = AppState::new(config, Arc::new(client));

        assert_eq!(state.chat.model_name(), expected_model);
        assert!(state.uptime() < Duration::from_secs(5));
    }
}
