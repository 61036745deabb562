mod cli;
mod config;
mod errors;
mod job_input;
mod llm_client;
mod output;
mod render;
mod tailoring;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::Cli;
use crate::config::Config;
use crate::job_input::HeadlessBrowserScraper;
use crate::llm_client::LlmClient;
use crate::tailoring::pipeline::{run, RunRequest};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Structured logging on stderr; stdout is reserved for dry-run JSON
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting tailor v{}", env!("CARGO_PKG_VERSION"));

    let llm = LlmClient::new(config.anthropic_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let scraper = HeadlessBrowserScraper::new(config.chrome_path.clone());

    let request = RunRequest {
        job: cli.job,
        dry_run: cli.dry_run,
        master_resume_path: config.master_resume_path.clone(),
        prompt_path: config.prompt_path.clone(),
        output_root: config.output_root.clone(),
    };

    match run(&request, &scraper, &llm).await {
        Ok(outcome) => {
            info!("Finished {} — {}", outcome.company, outcome.job_title);
            match &outcome.docx {
                Some(_) => println!("Done: {}/", outcome.output_dir.display()),
                None => println!("\nJSON saved to: {}", outcome.tailored_json.display()),
            }
            Ok(())
        }
        Err(e) => {
            error!(code = e.code(), "{e}");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
