//! Output layout: `<root>/<company-slug>/<job-title-slug>/`.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::errors::AppError;

pub const JOB_DESCRIPTION_FILE: &str = "job_description.txt";
pub const TAILORED_JSON_FILE: &str = "tailored_resume.json";
pub const RESUME_DOCX_FILE: &str = "resume.docx";

/// Used when a name slugifies to nothing (e.g. all punctuation).
const EMPTY_SLUG: &str = "unknown";

static NON_ALNUM_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("static regex is valid"));

/// Lowercases, collapses every run of non-`[a-z0-9]` characters to `_`, and trims `_`.
pub fn slugify(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    let slug = NON_ALNUM_RUN.replace_all(&lowered, "_");
    let slug = slug.trim_matches('_');
    if slug.is_empty() {
        EMPTY_SLUG.to_string()
    } else {
        slug.to_string()
    }
}

/// The per-posting artifact directory.
#[derive(Debug, Clone)]
pub struct OutputDir {
    path: PathBuf,
}

impl OutputDir {
    /// Creates `<root>/<slug(company)>/<slug(job_title)>/`. Existing directories are reused.
    pub async fn create(root: &Path, company: &str, job_title: &str) -> Result<Self, AppError> {
        let path = root.join(slugify(company)).join(slugify(job_title));
        tokio::fs::create_dir_all(&path).await?;
        debug!("Output directory ready: {}", path.display());
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn job_description_path(&self) -> PathBuf {
        self.path.join(JOB_DESCRIPTION_FILE)
    }

    pub fn tailored_json_path(&self) -> PathBuf {
        self.path.join(TAILORED_JSON_FILE)
    }

    pub fn docx_path(&self) -> PathBuf {
        self.path.join(RESUME_DOCX_FILE)
    }

    pub async fn write_job_description(&self, text: &str) -> Result<PathBuf, AppError> {
        let path = self.job_description_path();
        tokio::fs::write(&path, text).await?;
        Ok(path)
    }

    /// Writes the model output as 2-space-indented JSON.
    pub async fn write_tailored_json(&self, tailored: &Value) -> Result<PathBuf, AppError> {
        let path = self.tailored_json_path();
        let json = pretty_json(tailored)?;
        tokio::fs::write(&path, json).await?;
        Ok(path)
    }
}

pub fn pretty_json(value: &Value) -> Result<String, AppError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize tailored JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_slugify_collapses_punctuation_and_spaces() {
        assert_eq!(slugify("Acme Robotics, Inc."), "acme_robotics_inc");
        assert_eq!(
            slugify("Senior Rust Engineer (Platform)"),
            "senior_rust_engineer_platform"
        );
    }

    #[test]
    fn test_slugify_trims_and_lowercases() {
        assert_eq!(slugify("  --Data & ML--  "), "data_ml");
        assert_eq!(slugify("SRE II"), "sre_ii");
    }

    #[test]
    fn test_slugify_non_ascii_becomes_separator() {
        assert_eq!(slugify("Zürich Café"), "z_rich_caf");
    }

    #[test]
    fn test_slugify_empty_falls_back() {
        assert_eq!(slugify("!!!"), "unknown");
        assert_eq!(slugify(""), "unknown");
    }

    #[tokio::test]
    async fn test_output_dir_is_created_under_slugs() {
        let root = tempfile::tempdir().unwrap();
        let dir = OutputDir::create(root.path(), "Acme, Inc.", "Staff Engineer")
            .await
            .unwrap();

        assert_eq!(dir.path(), root.path().join("acme_inc").join("staff_engineer"));
        assert!(dir.path().is_dir());
    }

    #[tokio::test]
    async fn test_output_dir_creation_is_idempotent() {
        let root = tempfile::tempdir().unwrap();
        OutputDir::create(root.path(), "Acme", "SRE").await.unwrap();
        let again = OutputDir::create(root.path(), "Acme", "SRE").await.unwrap();
        assert!(again.path().is_dir());
    }

    #[tokio::test]
    async fn test_artifacts_are_written() {
        let root = tempfile::tempdir().unwrap();
        let dir = OutputDir::create(root.path(), "Acme", "SRE").await.unwrap();

        let jd = dir.write_job_description("We need an SRE.").await.unwrap();
        let js = dir
            .write_tailored_json(&json!({"company": "Acme", "job_title": "SRE"}))
            .await
            .unwrap();

        assert_eq!(std::fs::read_to_string(jd).unwrap(), "We need an SRE.");
        let written = std::fs::read_to_string(js).unwrap();
        assert_eq!(
            written,
            "{\n  \"company\": \"Acme\",\n  \"job_title\": \"SRE\"\n}"
        );
        assert!(dir.docx_path().ends_with("acme/sre/resume.docx"));
    }
}
