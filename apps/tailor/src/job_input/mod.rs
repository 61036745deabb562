//! Job input resolution — normalizes a URL, a `.txt` path, or pasted text to plain text.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::info;

use crate::errors::AppError;

pub mod browser;

pub use browser::HeadlessBrowserScraper;

/// Sites known to block headless browsers, with the manual workaround shown to the user.
const BLOCKED_SITES: &[(&str, &str, &str)] = &[(
    "linkedin.com",
    "LinkedIn",
    "Copy the job description and pass it via --job \"$(pbpaste)\" or a .txt file.",
)];

/// The three accepted shapes of `--job`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobInput {
    Url(String),
    File(PathBuf),
    Text(String),
}

impl JobInput {
    /// Classifies raw `--job` input.
    ///
    /// Anything starting with `http` is a URL. A value ending in `.txt` is a file
    /// only if that file exists; otherwise it is treated as pasted text.
    pub fn classify(input: &str) -> Self {
        if input.starts_with("http") {
            JobInput::Url(input.to_string())
        } else if input.ends_with(".txt") && Path::new(input).is_file() {
            JobInput::File(PathBuf::from(input))
        } else {
            JobInput::Text(input.to_string())
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            JobInput::Url(_) => "url",
            JobInput::File(_) => "file",
            JobInput::Text(_) => "text",
        }
    }
}

/// Fetches the rendered text of a web page.
#[async_trait]
pub trait PageScraper: Send + Sync {
    async fn page_text(&self, url: &str) -> Result<String, AppError>;
}

/// Rejects URLs on sites that block headless browsers before any browser is launched.
pub fn check_blocked(url: &str) -> Result<(), AppError> {
    match BLOCKED_SITES
        .iter()
        .find(|(needle, _, _)| url.contains(needle))
    {
        Some(&(_, site, workaround)) => Err(AppError::BlockedSource { site, workaround }),
        None => Ok(()),
    }
}

/// Resolves `--job` input to plain job-description text.
pub async fn resolve_job(input: &str, scraper: &dyn PageScraper) -> Result<String, AppError> {
    let job_input = JobInput::classify(input);
    info!("Resolving job input ({})", job_input.kind());

    let text = match job_input {
        JobInput::Url(url) => {
            check_blocked(&url)?;
            scraper.page_text(&url).await?
        }
        JobInput::File(path) => tokio::fs::read_to_string(&path).await.map_err(|e| {
            AppError::JobInput(format!("could not read {}: {e}", path.display()))
        })?,
        JobInput::Text(text) => text,
    };

    if text.trim().is_empty() {
        return Err(AppError::JobInput(
            "resolved job description is empty".to_string(),
        ));
    }

    Ok(text)
}
