//! Canned answers used when the model is unavailable
//!
//! The table is built once on first use and never mutated.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::chat::intent::Intent;

/// Kind of guidance a fallback entry gives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FallbackCategory {
    /// Step-by-step procedure
    #[serde(rename = "procedimento")]
    Procedure,
    /// Emergency guidance
    #[serde(rename = "emergencia")]
    Emergency,
    /// General information
    #[serde(rename = "informacao")]
    Information,
    /// Technical difficulties notice
    #[serde(rename = "tecnico")]
    Technical,
}

/// A pre-written answer for one intent
#[derive(Debug, PartialEq, Eq)]
pub struct FallbackEntry {
    /// Heading shown in bold above the content
    pub title: &'static str,
    /// Markdown body
    pub content: &'static str,
    /// Reported as `fallback_type` in response metadata
    pub category: FallbackCategory,
}

impl FallbackEntry {
    /// Title and content combined for display
    pub fn render(&self) -> String {
        format!("**{}**\n\n{}", self.title, self.content)
    }
}

static APPOINTMENT: FallbackEntry = FallbackEntry {
    title: "📋 Como Marcar Consulta no SUS",
    content: "Para marcar consulta no SUS:\n\n1. **Unidade Básica de Saúde (UBS) mais próxima**\n   • Leve documento com foto e comprovante de residência\n   • Chegue cedo para pegar senha\n\n2. **Telefone: Disque 136**\n   • Atendimento 24h\n   • Informações sobre unidades e horários\n\n3. **Aplicativo/Portal 'Meu SUS'**\n   • Agendamento online em algumas regiões\n   • Consulta resultados de exames\n\n*Tempo de espera varia por região. Para urgências, vá direto a uma UPA.*",
    category: FallbackCategory::Procedure,
};

/// Emergency guidance text returned on a triage match
pub const EMERGENCY_GUIDANCE: &str = "**LIGUE 192 (SAMU) IMEDIATAMENTE**\n\n• **Não espere** para buscar ajuda\n• **Não dirija** se estiver com sintomas graves\n• **Informe claramente** localização e sintomas\n\n**Unidades de Pronto Atendimento (UPA)** funcionam 24h para casos urgentes que não são risco de vida iminente.";

/// Also used by emergency triage for its title
pub static EMERGENCY: FallbackEntry = FallbackEntry {
    title: "🚨 ATENDIMENTO DE EMERGÊNCIA",
    content: EMERGENCY_GUIDANCE,
    category: FallbackCategory::Emergency,
};

static FACILITY: FallbackEntry = FallbackEntry {
    title: "📍 Encontrar Unidades de Saúde",
    content: "Para encontrar a unidade mais próxima:\n\n1. **Disque 136** - Informações atualizadas\n2. **Site do Ministério da Saúde** - Mapa de unidades\n3. **Aplicativos municipais** - Muitas cidades têm apps próprios\n\n**Dica**: Unidades Básicas (UBS) atendem das 7h às 19h geralmente. UPAs são 24h.",
    category: FallbackCategory::Information,
};

static MEDICATION: FallbackEntry = FallbackEntry {
    title: "💊 Medicamentos no SUS",
    content: "O SUS fornece medicamentos através:\n\n**1. Farmácia Popular**\n   • Medicamentos gratuitos ou com desconto\n   • Receita médica necessária\n   • Documentos: RG, CPF, receita\n\n**2. Programas Especiais**\n   • Hipertensão e Diabetes\n   • Asma\n   • Outros tratamentos crônicos\n\n**Importante**: A lista de medicamentos varia por estado.",
    category: FallbackCategory::Procedure,
};

static GENERAL: FallbackEntry = FallbackEntry {
    title: "🤖 Assistente SUS Virtual",
    content: "Desculpe, estou com dificuldades técnicas no momento.\n\n**Para ajuda imediata:**\n• 📞 **Disque 136** - Informações 24h\n• 🌐 **Acesse saude.gov.br** - Site oficial\n• 🏥 **Procure uma UBS** - Atendimento presencial\n\n*Sistema será restabelecido em breve.*",
    category: FallbackCategory::Technical,
};

static FALLBACK_TABLE: Lazy<HashMap<Intent, &'static FallbackEntry>> = Lazy::new(|| {
    HashMap::from([
        (Intent::Appointment, &APPOINTMENT),
        (Intent::Emergency, &EMERGENCY),
        (Intent::Facility, &FACILITY),
        (Intent::Medication, &MEDICATION),
        (Intent::General, &GENERAL),
    ])
});

/// Fallback entry for an intent
pub fn fallback_for(intent: Intent) -> &'static FallbackEntry {
    FALLBACK_TABLE.get(&intent).copied().unwrap_or(&GENERAL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_intent_has_an_entry() {
        for intent in [
            Intent::Appointment,
            Intent::Emergency,
            Intent::Facility,
            Intent::Medication,
            Intent::General,
        ] {
            let entry = fallback_for(intent);
            assert!(!entry.title.is_empty());
            assert!(!entry.content.is_empty());
        }
    }

    #[test]
    fn test_categories() {
        assert_eq!(
            fallback_for(Intent::Facility).category,
            FallbackCategory::Information
        );
        assert_eq!(
            fallback_for(Intent::General).category,
            FallbackCategory::Technical
        );
        assert_eq!(
            serde_json::to_value(FallbackCategory::Information).unwrap(),
            "informacao"
        );
    }

    #[test]
    fn test_render_bolds_title() {
        let rendered = fallback_for(Intent::Medication).render();
        assert!(rendered.starts_with("**💊 Medicamentos no SUS**\n\n"));
        assert!(rendered.ends_with("varia por estado."));
    }

    #[test]
    fn test_emergency_guidance_mentions_samu() {
        assert!(EMERGENCY_GUIDANCE.contains("192"));
        assert_eq!(fallback_for(Intent::Emergency).content, EMERGENCY_GUIDANCE);
    }
}
