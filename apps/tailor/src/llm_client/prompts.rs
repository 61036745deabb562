// Shared prompt fragments.
// The tailoring prompt itself lives in tailoring/prompts.rs.

/// System prompt fragment that enforces JSON-only output.
/// Appended to every system prompt, including user-supplied prompt files.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Joins a task-specific system prompt with the JSON-only fragment.
pub fn with_json_only(system: &str) -> String {
    format!("{}\n\n{}", system.trim_end(), JSON_ONLY_SYSTEM)
}
