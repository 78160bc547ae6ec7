//! API module
//!
//! Contains HTTP request handlers for the chat, health and debug endpoints
//! and the static UI bundle.

pub mod chat;
pub mod debug;
pub mod health;
pub mod webui;
