// Shared prompt fragments. Each feature keeps its own prompts.rs alongside it.

/// System prompt that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// System prompt for free-text answers that are inserted verbatim into the UI.
pub const PLAIN_TEXT_SYSTEM: &str = "You are an experienced career coach and resume writer. \
    Respond with the requested text only: no preamble, no headings, no quotes, \
    no markdown formatting.";
