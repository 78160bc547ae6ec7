// Backend client
// Runs blocking HTTP calls on worker threads and reports results over a channel

use eframe::egui;
use serde::{Deserialize, Serialize};
use std::env;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;
use std::time::Duration;

use crate::state::{ConversationMessage, MessageKind};

/// Backend used when `SUS_VIRTUAL_API_URL` is not set
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// How often the health endpoint is polled
pub const HEALTH_CHECK_INTERVAL: Duration = Duration::from_secs(30);

/// Upper bound on one chat round trip (the model call can be slow)
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Result of a background call
#[derive(Debug)]
pub enum BackendEvent {
    /// The chat endpoint answered (successfully or with a rejection)
    Reply {
        /// Session generation the request was sent from
        generation: u64,
        /// Message to show
        message: ConversationMessage,
    },
    /// The chat endpoint could not be reached
    NetworkError {
        /// Session generation the request was sent from
        generation: u64,
        /// Error description, for logs
        error: String,
    },
    /// Outcome of a health check
    Health(bool),
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

/// Body of a `POST /api/chat` response
#[derive(Debug, Deserialize)]
pub struct ChatReply {
    /// Whether the server accepted the question
    #[serde(default)]
    pub success: bool,
    /// Text to display on success
    #[serde(default)]
    pub response: Option<String>,
    /// Error description on rejection
    #[serde(default)]
    pub error: Option<String>,
    /// Response origin
    #[serde(default)]
    pub metadata: Option<ReplyMetadata>,
}

/// The part of the response metadata the widget uses
#[derive(Debug, Deserialize)]
pub struct ReplyMetadata {
    /// `ai_response`, `emergency` or `fallback`
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl ChatReply {
    /// Convert into a message for the conversation log
    pub fn into_message(self) -> ConversationMessage {
        match (self.success, self.response) {
            (true, Some(text)) => {
                let kind = self
                    .metadata
                    .as_ref()
                    .and_then(|metadata| metadata.kind.as_deref());
                ConversationMessage::bot(text, MessageKind::from_response_type(kind))
            }
            _ => ConversationMessage::bot(
                self.error
                    .unwrap_or_else(|| "Não foi possível processar sua pergunta.".to_string()),
                MessageKind::System,
            ),
        }
    }
}

/// HTTP client for the chatbot backend
pub struct BackendClient {
    base_url: String,
    http: reqwest::blocking::Client,
    events_tx: Sender<BackendEvent>,
    events_rx: Receiver<BackendEvent>,
}

impl BackendClient {
    /// Create a client for `base_url`
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        let (events_tx, events_rx) = channel();
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
            events_tx,
            events_rx,
        })
    }

    /// Create a client for `SUS_VIRTUAL_API_URL` (or the default)
    pub fn from_env() -> Result<Self, reqwest::Error> {
        let base_url = env::var("SUS_VIRTUAL_API_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self::new(base_url)
    }

    /// Backend base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.base_url)
    }

    fn health_url(&self) -> String {
        format!("{}/api/health", self.base_url)
    }

    /// Send a question in the background
    pub fn send_chat(&self, ctx: &egui::Context, generation: u64, message: String) {
        let http = self.http.clone();
        let url = self.chat_url();
        let tx = self.events_tx.clone();
        let ctx = ctx.clone();

        thread::spawn(move || {
            let event = match post_chat(&http, &url, &message) {
                Ok(reply) => BackendEvent::Reply {
                    generation,
                    message: reply.into_message(),
                },
                Err(e) => {
                    tracing::warn!(error = %e, "Chat request failed");
                    BackendEvent::NetworkError {
                        generation,
                        error: e.to_string(),
                    }
                }
            };
            // The receiver only disappears when the app is closing
            let _ = tx.send(event);
            ctx.request_repaint();
        });
    }

    /// Probe the health endpoint in the background
    pub fn check_health(&self, ctx: &egui::Context) {
        let http = self.http.clone();
        let url = self.health_url();
        let tx = self.events_tx.clone();
        let ctx = ctx.clone();

        thread::spawn(move || {
            let healthy = match http.get(&url).timeout(Duration::from_secs(5)).send() {
                Ok(response) => response.status().is_success(),
                Err(e) => {
                    tracing::debug!(error = %e, "Backend offline");
                    false
                }
            };
            let _ = tx.send(BackendEvent::Health(healthy));
            ctx.request_repaint();
        });
    }

    /// Events that arrived since the last call
    pub fn poll_events(&self) -> Vec<BackendEvent> {
        self.events_rx.try_iter().collect()
    }
}

/// POST a question and decode the reply
///
/// Rejections (HTTP 400) still carry a JSON body and decode successfully.
fn post_chat(
    http: &reqwest::blocking::Client,
    url: &str,
    message: &str,
) -> Result<ChatReply, reqwest::Error> {
    http.post(url).json(&ChatRequest { message }).send()?.json()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_ai_response() {
        let reply: ChatReply = serde_json::from_str(
            r#"{"success": true, "response": "Procure uma UBS.", "metadata": {"type": "ai_response", "model": "x"}}"#,
        )
        .unwrap();
        let message = reply.into_message();
        assert_eq!(message.text, "Procure uma UBS.");
        assert_eq!(message.kind, MessageKind::AiResponse);
    }

    #[test]
    fn test_reply_emergency() {
        let reply: ChatReply = serde_json::from_str(
            r#"{"success": true, "response": "LIGUE 192", "metadata": {"type": "emergency"}}"#,
        )
        .unwrap();
        assert_eq!(reply.into_message().kind, MessageKind::Emergency);
    }

    #[test]
    fn test_reply_rejection_becomes_system_message() {
        let reply: ChatReply = serde_json::from_str(
            r#"{"success": false, "error": "Empty message", "status": 400}"#,
        )
        .unwrap();
        let message = reply.into_message();
        assert_eq!(message.kind, MessageKind::System);
        assert_eq!(message.text, "Empty message");
    }

    #[test]
    fn test_client_trims_base_url() {
        let client = BackendClient::new("http://localhost:5000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(client.chat_url(), "http://localhost:5000/api/chat");
        assert_eq!(client.health_url(), "http://localhost:5000/api/health");
    }

    #[test]
    fn test_unreachable_backend_is_network_error() {
        // Port 9 (discard) is not expected to run an HTTP server
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(2))
            .build()
            .unwrap();
        let result = post_chat(&http, "http://127.0.0.1:9/api/chat", "Olá");
        assert!(result.is_err());
    }
}
