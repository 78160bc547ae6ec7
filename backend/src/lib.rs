//! SUS Virtual Backend Library
//!
//! This library exposes modules for testing and external use.
//! The main binary is in `src/main.rs`.

pub mod api;
pub mod app;
pub mod chat;
pub mod config;
pub mod error;
pub mod gemini;
/// Application state shared by request handlers
pub mod state;
