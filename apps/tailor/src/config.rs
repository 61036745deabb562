use std::path::PathBuf;

use anyhow::{Context, Result};

/// Tool configuration loaded from environment variables (and `.env` if present).
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub master_resume_path: PathBuf,
    /// Overrides the built-in tailoring prompt when set.
    pub prompt_path: Option<PathBuf>,
    pub output_root: PathBuf,
    pub chrome_path: Option<PathBuf>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            anthropic_api_key: optional("ANTHROPIC_API_KEY").with_context(|| {
                "Required environment variable 'ANTHROPIC_API_KEY' is not set".to_string()
            })?,
            master_resume_path: optional("MASTER_RESUME_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("master_resume.json")),
            prompt_path: optional("TAILOR_PROMPT_PATH").map(PathBuf::from),
            output_root: optional("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("output")),
            chrome_path: optional("CHROME_PATH").map(PathBuf::from),
            rust_log: optional("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}
