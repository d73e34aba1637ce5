use crate::interview::scoring::QuestionResult;

/// Replace `{industry}` and `{wrong_answers}` before sending.
pub const IMPROVEMENT_TIP_TEMPLATE: &str = r#"The user got the following {industry} technical interview questions wrong:

{wrong_answers}

Based on these mistakes, provide a concise, specific improvement tip.
Focus on the knowledge gaps revealed by these wrong answers.
Keep the response under 2 sentences and make it encouraging.
Don't explicitly mention the mistakes, instead focus on what to learn/practice."#;

pub fn build_tip_prompt<'a>(
    industry: &str,
    wrong: impl IntoIterator<Item = &'a QuestionResult>,
) -> String {
    let wrong_answers = wrong
        .into_iter()
        .map(|r| {
            format!(
                "Question: \"{}\"\nCorrect Answer: \"{}\"\nUser Answer: \"{}\"",
                r.question, r.answer, r.user_answer
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");
    IMPROVEMENT_TIP_TEMPLATE
        .replace("{industry}", industry)
        .replace("{wrong_answers}", &wrong_answers)
}
