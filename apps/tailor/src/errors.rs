use thiserror::Error;

use crate::llm_client::LlmError;
use crate::render::RenderError;

/// Pipeline-level error type.
/// Every variant ends the run; `main` logs it with its code and exits non-zero.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid job input: {0}")]
    JobInput(String),

    #[error("{site} blocks headless browsers. {workaround}")]
    BlockedSource {
        site: &'static str,
        workaround: &'static str,
    },

    #[error("Scraping failed: {0}")]
    Scrape(String),

    #[error("Master resume error: {0}")]
    MasterResume(String),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Malformed model output: {0}")]
    MalformedOutput(String),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Stable machine-readable code, used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::JobInput(_) => "JOB_INPUT",
            AppError::BlockedSource { .. } => "BLOCKED_SOURCE",
            AppError::Scrape(_) => "SCRAPE_ERROR",
            AppError::MasterResume(_) => "MASTER_RESUME",
            AppError::Llm(_) => "LLM_ERROR",
            AppError::MalformedOutput(_) => "MALFORMED_OUTPUT",
            AppError::Render(_) => "RENDER_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
