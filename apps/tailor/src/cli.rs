use clap::Parser;

/// Tailor the master resume to one job posting and render it as a DOCX.
#[derive(Debug, Parser)]
#[command(name = "tailor", version, about)]
pub struct Cli {
    /// Job posting URL, .txt file path, or raw text
    #[arg(long)]
    pub job: String,

    /// Save and print the tailored JSON without generating the DOCX
    #[arg(long)]
    pub dry_run: bool,
}
