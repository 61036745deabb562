// Resume tailoring: master resume + job posting → tailored JSON → DOCX.
// All LLM calls go through llm_client — no direct Anthropic API calls here.

pub mod master;
pub mod models;
pub mod pipeline;
pub mod prompts;
pub mod tailor;
