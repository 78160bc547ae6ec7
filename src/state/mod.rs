// State management module
// Holds the in-memory conversation for the current session

pub mod app_state;

pub use app_state::{ChatSession, ConversationMessage, MessageKind, Sender};
