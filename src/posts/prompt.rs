// Prompt assembly for the Gemini request.
//
// The model is steered hard toward one fixed output shape (three `**Post
// N:**` blocks with Imagem/Legenda bullet lines) because the parser in
// [`crate::posts::parser`] recovers structure from exactly that shape.
// Keep the two in sync when touching either.

/// Build the full generation prompt for a theme.
///
/// `extra_instructions` is free-form user text appended verbatim at the
/// end; blank or whitespace-only input leaves the prompt unchanged.
pub fn build_prompt(theme: &str, extra_instructions: &str) -> String {
    let mut prompt = format!(
        r#"Gere apenas 3 posts para Instagram sobre "{theme}" no formato EXATO abaixo:

**Post 1:**
- Imagem: [Descrição detalhada referente ao texto bíblico]
- Legenda: [Texto bíblico em português com 3 hashtags e **referência bíblica no final do texto é imprescindível**]

**Post 2:**
- Imagem: [Descrição detalhada referente ao texto bíblico]
- Legenda: [Texto bíblico em português com 3 hashtags e **referência bíblica no final do texto é imprescindível**]

**Post 3:**
- Imagem: [Descrição detalhada referente ao texto bíblico]
- Legenda: [Texto bíblico em português com 3 hashtags e **referência bíblica no final do texto é imprescindível**]

Regras:
1. Seja conciso e direto
2. **Inclua a referência bíblica no final da legenda**
3. Mantenha este formato exato

"#
    );

    let extra = extra_instructions.trim();
    if !extra.is_empty() {
        prompt.push_str("Instruções extras: ");
        prompt.push_str(extra);
    }

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_quoted_theme() {
        let prompt = build_prompt("salmos de gratidão", "");
        assert!(prompt.contains("sobre \"salmos de gratidão\""));
    }

    #[test]
    fn prompt_lists_three_post_skeletons() {
        let prompt = build_prompt("fé", "");
        for n in 1..=3 {
            assert!(prompt.contains(&format!("**Post {n}:**")));
        }
        assert_eq!(prompt.matches("- Imagem:").count(), 3);
        assert_eq!(prompt.matches("- Legenda:").count(), 3);
    }

    #[test]
    fn prompt_appends_extra_instructions() {
        let prompt = build_prompt("fé", "  use linguagem jovem  ");
        assert!(prompt.ends_with("Instruções extras: use linguagem jovem"));
    }

    #[test]
    fn blank_extra_instructions_are_ignored() {
        let without = build_prompt("fé", "");
        let whitespace = build_prompt("fé", "   \n ");
        assert_eq!(without, whitespace);
        assert!(!without.contains("Instruções extras"));
    }
}
