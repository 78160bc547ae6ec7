//! Keyword intent detection
//!
//! Rules are evaluated in order and the first match wins. Anything that
//! matches no rule is [`Intent::General`].

use serde::Serialize;

/// Coarse topic of a user question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Booking or scheduling an appointment
    Appointment,
    /// Urgent care or emergency numbers
    Emergency,
    /// Finding a health facility
    Facility,
    /// Medicines, prescriptions, pharmacies
    Medication,
    /// Anything else
    General,
}

/// A keyword list and the intent it selects
pub struct IntentRule {
    /// Lower-case substrings; any one of them selects the intent
    pub keywords: &'static [&'static str],
    /// Intent selected on match
    pub intent: Intent,
}

/// Detection rules in priority order
pub const INTENT_RULES: &[IntentRule] = &[
    IntentRule {
        keywords: &["consulta", "marcar", "agendar", "appointment", "schedule"],
        intent: Intent::Appointment,
    },
    IntentRule {
        keywords: &[
            "emergência",
            "emergencia",
            "urgente",
            "192",
            "emergency",
            "urgent",
        ],
        intent: Intent::Emergency,
    },
    IntentRule {
        keywords: &[
            "posto",
            "unidade",
            "ubs",
            "upa",
            "clinic",
            "hospital",
            "health center",
            "health unit",
        ],
        intent: Intent::Facility,
    },
    IntentRule {
        keywords: &[
            "medicamento",
            "remédio",
            "remedio",
            "farmácia",
            "farmacia",
            "receita",
            "medication",
            "medicine",
            "pharmacy",
            "prescription",
        ],
        intent: Intent::Medication,
    },
];

/// Classify a message by the first matching rule
pub fn detect_intent(message: &str) -> Intent {
    let lower = message.to_lowercase();
    INTENT_RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|keyword| lower.contains(keyword)))
        .map(|rule| rule.intent)
        .unwrap_or(Intent::General)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appointment() {
        assert_eq!(detect_intent("Como marcar consulta?"), Intent::Appointment);
        assert_eq!(
            detect_intent("I want to schedule a visit"),
            Intent::Appointment
        );
        assert_eq!(
            detect_intent("Need an APPOINTMENT tomorrow"),
            Intent::Appointment
        );
    }

    #[test]
    fn test_facility() {
        assert_eq!(
            detect_intent("where is the nearest clinic"),
            Intent::Facility
        );
        assert_eq!(
            detect_intent("Onde fica a UPA mais próxima?"),
            Intent::Facility
        );
    }

    #[test]
    fn test_medication() {
        assert_eq!(
            detect_intent("I need my medication refilled"),
            Intent::Medication
        );
        assert_eq!(detect_intent("Remédio gratuito"), Intent::Medication);
    }

    #[test]
    fn test_emergency_keywords() {
        assert_eq!(detect_intent("é urgente"), Intent::Emergency);
        assert_eq!(detect_intent("devo ligar 192?"), Intent::Emergency);
    }

    #[test]
    fn test_priority_first_match_wins() {
        // Appointment outranks medication
        assert_eq!(
            detect_intent("schedule a visit to renew my medication"),
            Intent::Appointment
        );
        // Emergency outranks facility
        assert_eq!(detect_intent("urgente, qual UPA?"), Intent::Emergency);
        // Facility outranks medication
        assert_eq!(
            detect_intent("which hospital has this medicine"),
            Intent::Facility
        );
    }

    #[test]
    fn test_default() {
        assert_eq!(detect_intent("Quais são meus direitos?"), Intent::General);
        assert_eq!(detect_intent(""), Intent::General);
    }
}
