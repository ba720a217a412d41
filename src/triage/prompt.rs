use super::SymptomCategory;

/// Render the analysis prompt sent to every provider.
pub fn build_analysis_prompt(category: SymptomCategory, symptoms: &str) -> String {
    format!(
        r#"As a medical AI assistant, analyze the following {category} symptoms and provide a preliminary analysis. Note any potential serious conditions that require immediate medical attention.

Symptoms reported:
{symptoms}

Please provide:
1. Possible causes
2. Recommended actions
3. Urgency level (Low/Medium/High)
4. When to seek immediate medical attention

Remember to emphasize that this is an AI preliminary analysis and not a substitute for professional medical diagnosis."#,
        category = category.label(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_category_and_symptoms_verbatim() {
        let prompt = build_analysis_prompt(
            SymptomCategory::ChestRespiratory,
            "dry cough for 3 days\nworse at night",
        );
        assert!(prompt.contains("analyze the following Chest & Respiratory symptoms"));
        assert!(prompt.contains("Symptoms reported:\ndry cough for 3 days\nworse at night\n"));
    }

    #[test]
    fn prompt_asks_for_urgency() {
        let prompt = build_analysis_prompt(SymptomCategory::Skin, "itchy rash");
        assert!(prompt.contains("3. Urgency level (Low/Medium/High)"));
        assert!(prompt.contains("not a substitute for professional medical diagnosis"));
    }

    #[test]
    fn prompt_is_deterministic() {
        let a = build_analysis_prompt(SymptomCategory::Abdominal, "cramps");
        let b = build_analysis_prompt(SymptomCategory::Abdominal, "cramps");
        assert_eq!(a, b);
    }
}
