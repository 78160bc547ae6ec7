// State management module
// Holds the read-only state shared by all request handlers

pub mod app_state;

pub use app_state::{AppState, SharedState};
