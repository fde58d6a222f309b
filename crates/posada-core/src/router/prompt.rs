//! System prompt builder for the generation fallback.
//!
//! Assembles the system prompt from mined hotel facts and the operator's
//! custom instructions, using XML tag boundaries for clear section
//! delineation.

use posada_types::training::HotelFacts;

/// Builds the generation system prompt.
///
/// Layout:
/// ```text
/// <role>Eres el asistente de reservas del hotel...</role>
/// <hotel_info>Amenidades: ... Políticas: ...</hotel_info>
/// <instructions>{custom_instructions}</instructions>
/// ```
///
/// The `<hotel_info>` section is omitted when no facts were mined, and
/// `<instructions>` when the operator configured none.
pub struct GenerationPromptBuilder;

impl GenerationPromptBuilder {
    pub fn build(facts: Option<&HotelFacts>, custom_instructions: &str) -> String {
        let mut sections = Vec::with_capacity(3);

        sections.push(
            "<role>\n\
            Eres el asistente de reservas del hotel. Respondes en español, \
            de forma breve, cordial y concreta. Si no conoces un dato, dilo \
            honestamente y ofrece tomar los datos del huésped para que \
            recepción lo contacte. Nunca inventes precios ni disponibilidad.\n\
            </role>"
                .to_string(),
        );

        if let Some(facts) = facts.filter(|f| !f.is_empty()) {
            let mut lines = Vec::new();
            Self::fact_group(&mut lines, "Amenidades", &facts.amenities);
            Self::fact_group(&mut lines, "Políticas", &facts.policies);
            Self::fact_group(&mut lines, "Tipos de habitación", &facts.room_types);
            Self::fact_group(&mut lines, "Servicios", &facts.services);
            sections.push(format!(
                "<hotel_info>\n{}\n</hotel_info>",
                lines.join("\n")
            ));
        }

        if !custom_instructions.trim().is_empty() {
            sections.push(format!(
                "<instructions>\n{}\n</instructions>",
                custom_instructions.trim()
            ));
        }

        sections.join("\n\n")
    }

    fn fact_group(lines: &mut Vec<String>, label: &str, entries: &[String]) {
        if entries.is_empty() {
            return;
        }
        lines.push(format!("{label}:"));
        for entry in entries {
            lines.push(format!("- {entry}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_prompt_has_only_the_role() {
        let prompt = GenerationPromptBuilder::build(None, "");
        assert!(prompt.starts_with("<role>"));
        assert!(!prompt.contains("<hotel_info>"));
        assert!(!prompt.contains("<instructions>"));
    }

    #[test]
    fn facts_render_as_labeled_bullets() {
        let facts = HotelFacts {
            amenities: vec!["piscina".to_string(), "cochera".to_string()],
            policies: vec!["check-in desde las 14:00".to_string()],
            room_types: vec![],
            services: vec![],
        };
        let prompt = GenerationPromptBuilder::build(Some(&facts), "");
        assert!(prompt.contains("<hotel_info>"));
        assert!(prompt.contains("Amenidades:\n- piscina\n- cochera"));
        assert!(prompt.contains("Políticas:\n- check-in desde las 14:00"));
        assert!(!prompt.contains("Servicios:"));
    }

    #[test]
    fn empty_facts_struct_is_omitted() {
        let prompt = GenerationPromptBuilder::build(Some(&HotelFacts::default()), "");
        assert!(!prompt.contains("<hotel_info>"));
    }

    #[test]
    fn custom_instructions_close_the_prompt() {
        let prompt = GenerationPromptBuilder::build(None, "Ofrece siempre el desayuno.\n");
        assert!(prompt.ends_with("<instructions>\nOfrece siempre el desayuno.\n</instructions>"));
    }
}
