//! Emergency triage
//!
//! A plain case-insensitive substring scan. Matches short-circuit the chat
//! flow so emergency guidance never waits on the model.

/// Phrases that indicate a possible medical emergency
pub const EMERGENCY_PHRASES: &[&str] = &[
    "dor no peito",
    "falta de ar",
    "desmaio",
    "sangrando",
    "acidente",
    "parto",
    "convulsão",
    "perda de consciência",
    "chest pain",
    "difficulty breathing",
    "shortness of breath",
    "can't breathe",
    "fainted",
    "bleeding",
    "accident",
    "seizure",
    "loss of consciousness",
    "unconscious",
];

/// First emergency phrase found in `message`, if any
pub fn matched_phrase(message: &str) -> Option<&'static str> {
    let lower = message.to_lowercase();
    EMERGENCY_PHRASES
        .iter()
        .copied()
        .find(|phrase| lower.contains(phrase))
}
