// LLM prompts for the resume editor.

/// Improve-description prompt. Replace `{section}`, `{industry_line}` and `{text}`.
pub const IMPROVE_PROMPT_TEMPLATE: &str = r#"Improve the following {section} description for a professional resume.
{industry_line}
Make it more impactful, quantifiable, and aligned with industry standards.

Current content:
"{text}"

Requirements:
1. Use strong action verbs
2. Include metrics and results where the original content supports them
3. Highlight relevant technical skills
4. Keep it concise but detailed
5. Focus on achievements over responsibilities
6. Use industry-specific keywords
7. Do NOT invent employers, dates, numbers or technologies that are not in the original
8. Put each achievement on its own line; do not add bullet characters

Return only the improved description."#;

pub fn build_improve_prompt(text: &str, section: &str, industry: Option<&str>) -> String {
    let industry_line = match industry {
        Some(industry) => format!("The candidate works in the {industry} industry."),
        None => String::new(),
    };
    IMPROVE_PROMPT_TEMPLATE
        .replace("{section}", section)
        .replace("{industry_line}", &industry_line)
        .replace("{text}", text.trim())
}
