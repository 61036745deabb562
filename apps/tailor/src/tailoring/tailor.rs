//! The tailoring call: one system prompt, one user message, one JSON reply.

use std::path::Path;

use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::prompts::with_json_only;
use crate::llm_client::{parse_json_reply, LlmError, TextGenerator};
use crate::tailoring::prompts::{tailor_user_message, TAILOR_SYSTEM};

/// Resolves the system prompt: the prompt file when configured, else the built-in one.
pub async fn load_system_prompt(prompt_path: Option<&Path>) -> Result<String, AppError> {
    let base = match prompt_path {
        Some(path) => {
            info!("Using tailoring prompt from {}", path.display());
            tokio::fs::read_to_string(path).await.map_err(|e| {
                AppError::Internal(anyhow::anyhow!(
                    "could not read prompt file {}: {e}",
                    path.display()
                ))
            })?
        }
        None => TAILOR_SYSTEM.to_string(),
    };
    Ok(with_json_only(&base))
}

/// Builds the user message: the posting first, then the master resume as compact JSON.
pub fn build_user_message(job_description: &str, master: &Value) -> Result<String, AppError> {
    let master_json = serde_json::to_string(master)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize master resume: {e}")))?;

    Ok(tailor_user_message(job_description, &master_json))
}

/// Sends the posting and master resume to the model and decodes the JSON reply.
pub async fn tailor_resume(
    llm: &dyn TextGenerator,
    system_prompt: &str,
    job_description: &str,
    master: &Value,
) -> Result<Value, AppError> {
    let prompt = build_user_message(job_description, master)?;

    let reply = llm.generate(&prompt, system_prompt).await?;

    parse_json_reply::<Value>(&reply).map_err(|e| match e {
        LlmError::Parse(err) => {
            AppError::MalformedOutput(format!("reply is not valid JSON: {err}"))
        }
        other => AppError::Llm(other),
    })
}
