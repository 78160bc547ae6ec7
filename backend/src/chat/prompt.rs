//! System prompt and prompt assembly
//!
//! The model receives one combined prompt: fixed instructions followed by the
//! user's question.

use serde::Serialize;

/// Fixed instructions for the public-health assistant persona
pub const SYSTEM_PROMPT: &str = "Você é \"SUS Virtual\", um assistente virtual especializado do Sistema Único de Saúde.

# FUNÇÃO PRINCIPAL
Fornecer informações claras, precisas e úteis sobre serviços de saúde pública, SEM NUNCA dar diagnósticos médicos.

# REGRAS ABSOLUTAS
1. NUNCA dê diagnóstico, tratamento ou prognóstico
2. Emergências → Sempre oriente: \"LIGUE 192 (SAMU) IMEDIATAMENTE\"
3. Mantenha tom empático, profissional e tranquilizador
4. Baseie-se apenas em informações oficiais do Ministério da Saúde

# FORMATO DAS RESPOSTAS (CRÍTICO)
- Seja COMPLETO e DETALHADO
- Use ESTRUTURA CLARA: introdução breve → informações principais → ação recomendada
- Para procedimentos: use LISTAS NUMERADAS com etapas
- Para sintomas: explique possíveis causas COMUNS e quando buscar ajuda
- Destaque informações importantes com **negrito**
- Inclua links ou referências quando relevante (ex: \"Consulte o site do SUS...\")

# EXEMPLOS DE BOAS RESPOSTAS
1. Usuário: \"Como marco uma consulta com especialista?\"
   Resposta: \"Para consulta com especialista no SUS, o processo envolve 3 passos:\n1. **Consulta na UBS**: Primeira avaliação na Unidade Básica\n2. **Encaminhamento**: Se necessário, médico da UBS faz referência\n3. **Agendamento**: A unidade agenda no sistema\n*Tempo médio: varia por região e especialidade*\"

2. Usuário: \"Estou com dor de cabeça há 3 dias\"
   Resposta: \"Dor de cabeça persistente merece atenção. **Procure uma UBS** para avaliação. Enquanto isso:\n• Descanse em ambiente escuro\n• Hidrate-se bem\n• Evite telas\n**ATENÇÃO**: Se tiver visão turva, febre alta ou fraqueza, vá a uma UPA.\"

3. Usuário: \"Quais documentos preciso para atendimento?\"
   Resposta: \"Para atendimento no SUS, você precisa de:\n1. **Documento com foto** (RG, CNH)\n2. **Cartão SUS** (se tiver)\n3. **Comprovante de residência**\n*Sem documentos? Você ainda tem direito a atendimento emergencial!*

# TÓPICOS QUE POSSO AJUDAR
• Marcação de consultas e exames
• Localização de unidades de saúde
• Direitos dos usuários do SUS
• Programas de prevenção (vacinas, pré-natal)
• Medicamentos na Farmácia Popular
• Encaminhamentos e segundas opiniões

NÃO responda perguntas fora do escopo da saúde pública. Se não souber, diga: \"Recomendo consultar uma unidade de saúde para informações específicas.\"";

/// Number of characters shown by [`PromptPreview`]
pub const PREVIEW_CHARS: usize = 500;

/// Combine the system prompt with a user question
pub fn build_prompt(message: &str) -> String {
    format!(
        "{}\n\nPERGUNTA DO UTENTE: \"{}\"\n\nRESPOSTA DO SUS VIRTUAL:",
        SYSTEM_PROMPT, message
    )
}

/// Character counts of the prompt parts
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct PromptSections {
    /// Length of the fixed instructions
    pub system_prompt: usize,
    /// Length of the user's message
    pub user_message: usize,
    /// Length of the assembled prompt
    pub total: usize,
}

/// Truncated view of the assembled prompt, for debugging
#[derive(Debug, Serialize)]
pub struct PromptPreview {
    /// First characters of the prompt followed by `...`
    pub prompt_preview: String,
    /// Total prompt length in characters
    pub length: usize,
    /// Per-part lengths
    pub sections: PromptSections,
}

impl PromptPreview {
    /// Build the preview for a user message
    pub fn for_message(message: &str) -> Self {
        let prompt = build_prompt(message);
        let total = prompt.chars().count();
        let mut prompt_preview: String = prompt.chars().take(PREVIEW_CHARS).collect();
        prompt_preview.push_str("...");

        Self {
            prompt_preview,
            length: total,
            sections: PromptSections {
                system_prompt: SYSTEM_PROMPT.chars().count(),
                user_message: message.chars().count(),
                total,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_prompt_wraps_message() {
        let prompt = build_prompt("Como marcar consulta?");
        assert!(prompt.starts_with(SYSTEM_PROMPT));
        assert!(prompt.contains("PERGUNTA DO UTENTE: \"Como marcar consulta?\""));
        assert!(prompt.ends_with("RESPOSTA DO SUS VIRTUAL:"));
    }

    #[test]
    fn test_system_prompt_text() {
        assert_eq!(SYSTEM_PROMPT.chars().count(), 2245);
        assert!(SYSTEM_PROMPT.contains("# FORMATO DAS RESPOSTAS (CRÍTICO)"));
        assert!(SYSTEM_PROMPT.contains("Seja COMPLETO e DETALHADO"));
        assert!(!SYSTEM_PROMPT.contains("\\n"));
        assert!(SYSTEM_PROMPT.contains("3 passos:\n1. **Consulta na UBS**"));
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let preview = PromptPreview::for_message("vacinação");
        assert_eq!(preview.prompt_preview.chars().count(), PREVIEW_CHARS + 3);
        assert!(preview.prompt_preview.ends_with("..."));
        assert_eq!(preview.sections.user_message, 9);
        assert_eq!(preview.length, preview.sections.total);
        assert!(preview.sections.total > preview.sections.system_prompt + 9);
    }
}
