//! Chat module
//!
//! The chat endpoint's core: validation, emergency triage, prompt assembly,
//! the model call and the keyword fallback.

pub mod fallback;
pub mod intent;
pub mod models;
pub mod prompt;
pub mod service;
pub mod triage;

pub use models::{ChatRequest, ChatResponse, ResponseKind, ResponseMetadata};
pub use service::ChatService;
