//! Tailoring pipeline — one posting per run, strictly sequential.
//!
//! Flow: resolve_job → load master resume → tailor (LLM) → create output dir →
//!       write job_description.txt + tailored_resume.json → render resume.docx.
//!
//! Dry-run stops after the JSON artifact and prints it to stdout instead of rendering.

use std::path::PathBuf;

use tracing::info;

use crate::errors::AppError;
use crate::job_input::{resolve_job, PageScraper};
use crate::llm_client::TextGenerator;
use crate::output::{pretty_json, OutputDir};
use crate::render::render_docx;
use crate::tailoring::master::load_master_resume;
use crate::tailoring::models::{PostingIdentity, TailoredResume};
use crate::tailoring::tailor::{load_system_prompt, tailor_resume};

/// Everything one run needs, resolved from CLI flags and config.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub job: String,
    pub dry_run: bool,
    pub master_resume_path: PathBuf,
    pub prompt_path: Option<PathBuf>,
    pub output_root: PathBuf,
}

/// What a run produced on disk.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub company: String,
    pub job_title: String,
    pub output_dir: PathBuf,
    pub tailored_json: PathBuf,
    /// `None` in dry-run mode.
    pub docx: Option<PathBuf>,
}

pub async fn run(
    request: &RunRequest,
    scraper: &dyn PageScraper,
    llm: &dyn TextGenerator,
) -> Result<RunOutcome, AppError> {
    // Step 0: Resolve input
    let job_description = resolve_job(&request.job, scraper).await?;
    info!("Job description: {} chars", job_description.chars().count());

    // Step 1: Master resume and prompt
    let master = load_master_resume(&request.master_resume_path).await?;
    let system_prompt = load_system_prompt(request.prompt_path.as_deref()).await?;

    // Step 2: Tailor
    info!("Calling Claude API...");
    let tailored = tailor_resume(llm, &system_prompt, &job_description, &master).await?;
    let identity = PostingIdentity::from_value(&tailored)?;
    info!(
        "Tailored for: {} — {}",
        identity.company, identity.job_title
    );

    // Step 3: Output directory
    let out_dir =
        OutputDir::create(&request.output_root, &identity.company, &identity.job_title).await?;

    // Step 4: Artifacts
    out_dir.write_job_description(&job_description).await?;
    let tailored_json = out_dir.write_tailored_json(&tailored).await?;

    if request.dry_run {
        println!("{}", pretty_json(&tailored)?);
        return Ok(outcome(identity, &out_dir, tailored_json, None));
    }

    // Step 5: Render
    let resume = TailoredResume::from_value(&tailored)?;
    let docx_path = out_dir.docx_path();
    render_blocking(resume, docx_path.clone()).await?;

    Ok(outcome(identity, &out_dir, tailored_json, Some(docx_path)))
}

/// DOCX assembly is synchronous file I/O; keep it off the async workers.
async fn render_blocking(resume: TailoredResume, path: PathBuf) -> Result<(), AppError> {
    tokio::task::spawn_blocking(move || render_docx(&resume, &path))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("render task panicked: {e}")))??;
    Ok(())
}

fn outcome(
    identity: PostingIdentity,
    out_dir: &OutputDir,
    tailored_json: PathBuf,
    docx: Option<PathBuf>,
) -> RunOutcome {
    RunOutcome {
        company: identity.company,
        job_title: identity.job_title,
        output_dir: out_dir.path().to_path_buf(),
        tailored_json,
        docx,
    }
}
