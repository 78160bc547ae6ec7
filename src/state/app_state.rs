// Conversation state
// Ordered message log, connectivity flag and the typing-delay hold

use chrono::{DateTime, Local};
use std::time::{Duration, Instant};

/// How long a reply is held back to show the typing indicator
pub const TYPING_DELAY: Duration = Duration::from_millis(800);

/// Greeting shown at the start of every session
pub const WELCOME_TEXT: &str = "Olá! Sou o SUS Virtual 🤖\n\nPosso ajudar com informações sobre:\n• Consultas e exames no SUS\n• Localização de unidades de saúde\n• Programas de saúde e vacinação\n• Medicamentos e Farmácia Popular\n\nPara emergências, ligue **192** imediatamente.";

/// Shown after the conversation is cleared
pub const RESET_TEXT: &str = "Conversa reiniciada! Como posso ajudar você hoje?";

/// Shown when the backend cannot be reached
pub const OFFLINE_TEXT: &str = "⚠️ **Conexão Interrompida**\n\nO servidor está temporariamente indisponível.\n\nPara ajuda imediata:\n• 📞 **Disque 136** - Informações 24h\n• 🏥 **Procure uma UBS** - Atendimento presencial";

/// Author of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    /// Typed by the user
    User,
    /// Produced by the assistant (or locally on its behalf)
    Bot,
}

/// What a message is, used for styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// Session greeting
    Welcome,
    /// User question
    User,
    /// Model-generated answer
    AiResponse,
    /// Emergency guidance
    Emergency,
    /// Server-side canned answer
    Fallback,
    /// Local message shown when the backend is unreachable
    Offline,
    /// Local notice (session reset, rejected request)
    System,
}

impl MessageKind {
    /// Map the `metadata.type` field of a chat response
    pub fn from_response_type(kind: Option<&str>) -> Self {
        match kind {
            Some("emergency") => MessageKind::Emergency,
            Some("fallback") => MessageKind::Fallback,
            _ => MessageKind::AiResponse,
        }
    }
}

/// One entry in the conversation log
#[derive(Debug, Clone)]
pub struct ConversationMessage {
    /// Markdown-ish text (`**bold**` is honoured)
    pub text: String,
    /// Author
    pub sender: Sender,
    /// When the message was added
    pub timestamp: DateTime<Local>,
    /// Styling hint
    pub kind: MessageKind,
}

impl ConversationMessage {
    /// Create a bot message stamped now
    pub fn bot(text: impl Into<String>, kind: MessageKind) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Bot,
            timestamp: Local::now(),
            kind,
        }
    }

    /// Create a user message stamped now
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
            timestamp: Local::now(),
            kind: MessageKind::User,
        }
    }
}

/// A reply waiting for the typing delay to pass
#[derive(Debug, Clone)]
struct PendingReply {
    message: ConversationMessage,
    due_at: Instant,
}

/// State of the current chat session
///
/// The log only grows during a session; [`ChatSession::reset`] starts a new one.
#[derive(Debug, Clone)]
pub struct ChatSession {
    messages: Vec<ConversationMessage>,
    pending: Option<PendingReply>,
    awaiting_response: bool,
    connected: bool,
    generation: u64,
    /// Text currently in the input box
    pub input: String,
    /// Whether the quick-reply suggestions are shown
    pub show_quick_replies: bool,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self {
            messages: vec![ConversationMessage::bot(WELCOME_TEXT, MessageKind::Welcome)],
            pending: None,
            awaiting_response: false,
            connected: true,
            generation: 0,
            input: String::new(),
            show_quick_replies: true,
        }
    }
}

impl ChatSession {
    /// Create a session holding only the welcome message
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages in the order they were added
    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    /// Whether the backend was reachable at the last contact
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Record the outcome of a health check
    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    /// Identifies the session; replies tagged with an older value are dropped
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// A request is in flight or a reply is being held back
    pub fn is_busy(&self) -> bool {
        self.awaiting_response || self.pending.is_some()
    }

    /// Whether to show the typing indicator
    pub fn is_typing(&self) -> bool {
        self.is_busy()
    }

    /// Take the input box contents as a user message
    ///
    /// Returns the trimmed text to send, or `None` if the input is blank or
    /// a request is already in flight.
    pub fn submit_input(&mut self) -> Option<String> {
        let text = self.input.trim().to_string();
        if text.is_empty() || self.is_busy() {
            return None;
        }
        self.input.clear();
        self.messages.push(ConversationMessage::user(text.clone()));
        self.awaiting_response = true;
        Some(text)
    }

    /// Hold a reply until the typing delay has passed
    pub fn receive_reply(&mut self, generation: u64, message: ConversationMessage, now: Instant) {
        if generation != self.generation {
            return;
        }
        self.awaiting_response = false;
        self.connected = true;
        self.pending = Some(PendingReply {
            message,
            due_at: now + TYPING_DELAY,
        });
    }

    /// Append the held reply if its delay has passed
    ///
    /// Returns true if a message was appended.
    pub fn release_due(&mut self, now: Instant) -> bool {
        match self.pending.take() {
            Some(pending) if pending.due_at <= now => {
                self.messages.push(pending.message);
                true
            }
            other => {
                self.pending = other;
                false
            }
        }
    }

    /// Time left before the held reply is shown
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|pending| pending.due_at.saturating_duration_since(now))
    }

    /// The backend could not be reached for the in-flight request
    pub fn network_failure(&mut self, generation: u64) {
        self.connected = false;
        if generation != self.generation {
            return;
        }
        self.awaiting_response = false;
        self.messages
            .push(ConversationMessage::bot(OFFLINE_TEXT, MessageKind::Offline));
    }

    /// Show or hide the quick-reply suggestions
    pub fn toggle_quick_replies(&mut self) {
        self.show_quick_replies = !self.show_quick_replies;
    }

    /// Start a new session, keeping connectivity
    pub fn reset(&mut self) {
        self.messages = vec![ConversationMessage::bot(RESET_TEXT, MessageKind::System)];
        self.pending = None;
        self.awaiting_response = false;
        self.generation += 1;
        self.input.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_starts_with_welcome() {
        let session = ChatSession::new();
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].kind, MessageKind::Welcome);
        assert!(session.is_connected());
        assert!(!session.is_busy());
    }

    #[test]
    fn test_submit_input_appends_user_message() {
        let mut session = ChatSession::new();
        session.input = "  Como marcar consulta?  ".to_string();

        assert_eq!(
            session.submit_input(),
            Some("Como marcar consulta?".to_string())
        );
        assert!(session.input.is_empty());
        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.messages()[1].sender, Sender::User);
        assert!(session.is_busy());
    }

    #[test]
    fn test_submit_rejects_blank_and_busy() {
        let mut session = ChatSession::new();
        session.input = "   ".to_string();
        assert_eq!(session.submit_input(), None);

        session.input = "primeira".to_string();
        assert!(session.submit_input().is_some());
        session.input = "segunda".to_string();
        assert_eq!(session.submit_input(), None);
        assert_eq!(session.input, "segunda");
        assert_eq!(session.messages().len(), 2);
    }

    #[test]
    fn test_reply_held_until_typing_delay() {
        let mut session = ChatSession::new();
        session.input = "Olá".to_string();
        session.submit_input();

        let arrived = Instant::now();
        session.receive_reply(
            session.generation(),
            ConversationMessage::bot("Resposta", MessageKind::AiResponse),
            arrived,
        );
        assert!(session.is_typing());
        assert!(!session.release_due(arrived));
        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.time_until_due(arrived), Some(TYPING_DELAY));

        assert!(session.release_due(arrived + TYPING_DELAY));
        assert_eq!(session.messages().len(), 3);
        assert_eq!(session.messages()[2].text, "Resposta");
        assert!(!session.is_busy());
    }

    #[test]
    fn test_network_failure_appends_offline_message() {
        let mut session = ChatSession::new();
        session.input = "Olá".to_string();
        session.submit_input();

        session.network_failure(session.generation());
        assert!(!session.is_connected());
        assert!(!session.is_busy());
        let last = session.messages().last().unwrap();
        assert_eq!(last.kind, MessageKind::Offline);
        assert_eq!(last.text, OFFLINE_TEXT);
    }

    #[test]
    fn test_reply_marks_connected() {
        let mut session = ChatSession::new();
        session.set_connected(false);
        session.receive_reply(
            session.generation(),
            ConversationMessage::bot("ok", MessageKind::Fallback),
            Instant::now(),
        );
        assert!(session.is_connected());
    }

    #[test]
    fn test_reset_starts_new_session() {
        let mut session = ChatSession::new();
        session.input = "Olá".to_string();
        session.submit_input();
        session.receive_reply(
            session.generation(),
            ConversationMessage::bot("descartada", MessageKind::AiResponse),
            Instant::now(),
        );

        session.reset();
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].kind, MessageKind::System);
        assert!(!session.is_busy());
    }

    #[test]
    fn test_stale_reply_after_reset_is_dropped() {
        let mut session = ChatSession::new();
        session.input = "Olá".to_string();
        session.submit_input();
        let old_generation = session.generation();

        session.reset();
        let now = Instant::now();
        session.receive_reply(
            old_generation,
            ConversationMessage::bot("atrasada", MessageKind::AiResponse),
            now,
        );
        assert!(!session.is_busy());
        assert!(!session.release_due(now + TYPING_DELAY));
        assert_eq!(session.messages().len(), 1);
    }

    #[test]
    fn test_quick_replies_can_be_hidden_and_shown_again() {
        let mut session = ChatSession::new();
        assert!(session.show_quick_replies);

        session.toggle_quick_replies();
        assert!(!session.show_quick_replies);

        session.toggle_quick_replies();
        assert!(session.show_quick_replies);
    }

    #[test]
    fn test_kind_from_response_type() {
        assert_eq!(
            MessageKind::from_response_type(Some("emergency")),
            MessageKind::Emergency
        );
        assert_eq!(
            MessageKind::from_response_type(Some("fallback")),
            MessageKind::Fallback
        );
        assert_eq!(
            MessageKind::from_response_type(Some("ai_response")),
            MessageKind::AiResponse
        );
        assert_eq!(MessageKind::from_response_type(None), MessageKind::AiResponse);
    }
}
