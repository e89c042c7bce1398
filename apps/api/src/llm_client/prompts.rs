// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "\
**Important:** Output the result in **strict JSON format**. \
Do not include any additional text, explanations, or apologies. \
Do not wrap the JSON in markdown code fences.";
