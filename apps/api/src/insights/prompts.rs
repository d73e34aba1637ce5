// LLM prompts for industry insights. JSON-only output is enforced by
// llm_client::prompts::JSON_ONLY_SYSTEM.

/// Replace `{industry}` before sending.
pub const INSIGHTS_PROMPT_TEMPLATE: &str = r#"Analyze the current state of the {industry} industry and provide insights in ONLY the following JSON format without any additional notes or explanations:
{
  "salaryRanges": [
    { "role": "string", "min": 0, "max": 0, "median": 0, "location": "string" }
  ],
  "growthRate": 0,
  "demandLevel": "High" | "Medium" | "Low",
  "topSkills": ["skill1", "skill2"],
  "marketOutlook": "Positive" | "Neutral" | "Negative",
  "keyTrends": ["trend1", "trend2"],
  "recommendedSkills": ["skill1", "skill2"]
}

IMPORTANT: Return ONLY the JSON. No additional text, notes, or markdown formatting.
Include at least 5 common roles for salary ranges.
Growth rate should be a percentage.
Include at least 5 skills and trends."#;

pub fn build_insights_prompt(industry: &str) -> String {
    INSIGHTS_PROMPT_TEMPLATE.replace("{industry}", industry)
}
