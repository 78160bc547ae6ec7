// SUS Virtual Widget - Main Entry Point
// Native chat window for the SUS Virtual health-information backend

mod client;
mod state;
mod ui;

use client::{BackendClient, BackendEvent, HEALTH_CHECK_INTERVAL};
use eframe::egui;
use state::ChatSession;
use std::time::Instant;
use ui::{render_app_layout, UiActions};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let client = BackendClient::from_env()?;
    tracing::info!(backend = %client.base_url(), "Starting chat widget");

    // Configure window options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("SUS Virtual")
            .with_inner_size([480.0, 720.0])
            .with_min_inner_size([360.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SUS Virtual",
        options,
        Box::new(move |_cc| Box::new(ChatWidgetApp::new(client))),
    )?;
    Ok(())
}

/// Main application struct
/// Owns the conversation and the backend connection
struct ChatWidgetApp {
    /// Conversation for the current session
    session: ChatSession,
    /// Backend connection
    client: BackendClient,
    /// When the health endpoint was last polled
    last_health_check: Option<Instant>,
}

impl ChatWidgetApp {
    /// Create a new application instance
    fn new(client: BackendClient) -> Self {
        Self {
            session: ChatSession::new(),
            client,
            last_health_check: None,
        }
    }

    /// Fold finished background calls into the session
    fn apply_events(&mut self, now: Instant) {
        for event in self.client.poll_events() {
            match event {
                BackendEvent::Reply {
                    generation,
                    message,
                } => self.session.receive_reply(generation, message, now),
                BackendEvent::NetworkError { generation, error } => {
                    tracing::warn!(error = %error, "Backend unreachable");
                    self.session.network_failure(generation);
                }
                BackendEvent::Health(healthy) => self.session.set_connected(healthy),
            }
        }
    }

    /// Whether the health endpoint is due for another poll
    fn health_check_due(&self, now: Instant) -> bool {
        self.last_health_check
            .map_or(true, |last| now.duration_since(last) >= HEALTH_CHECK_INTERVAL)
    }

    fn handle_actions(&mut self, ctx: &egui::Context, actions: UiActions) {
        if actions.clear {
            self.session.reset();
        }
        if let Some(message) = actions.send {
            self.client
                .send_chat(ctx, self.session.generation(), message);
        }
    }
}

impl eframe::App for ChatWidgetApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        if self.health_check_due(now) {
            self.client.check_health(ctx);
            self.last_health_check = Some(now);
        }

        self.apply_events(now);
        self.session.release_due(now);

        // Render the main application layout
        let actions = render_app_layout(ctx, &mut self.session);
        self.handle_actions(ctx, actions);

        // Wake up for the held reply or the next health poll
        let next_wake = self
            .session
            .time_until_due(now)
            .unwrap_or(HEALTH_CHECK_INTERVAL)
            .min(HEALTH_CHECK_INTERVAL);
        ctx.request_repaint_after(next_wake);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use state::app_state::TYPING_DELAY;
    use state::{ConversationMessage, MessageKind};

    fn test_app() -> ChatWidgetApp {
        ChatWidgetApp::new(BackendClient::new("http://127.0.0.1:9").unwrap())
    }

    #[test]
    fn test_app_creation() {
        let app = test_app();
        assert_eq!(app.session.messages().len(), 1);
        assert!(app.health_check_due(Instant::now()));
    }

    #[test]
    fn test_health_poll_interval() {
        let mut app = test_app();
        let now = Instant::now();
        app.last_health_check = Some(now);
        assert!(!app.health_check_due(now));
        assert!(app.health_check_due(now + HEALTH_CHECK_INTERVAL));
    }

    #[test]
    fn test_reply_flow_through_session() {
        let mut app = test_app();
        app.session.input = "Como marcar consulta?".to_string();
        let generation = app.session.generation();
        assert!(app.session.submit_input().is_some());

        let now = Instant::now();
        app.session.receive_reply(
            generation,
            ConversationMessage::bot("Vá à UBS.", MessageKind::AiResponse),
            now,
        );
        app.session.release_due(now + TYPING_DELAY);
        assert_eq!(app.session.messages().len(), 3);
    }
}
