// DOCX renderer: tailored resume JSON → one-page, ATS-friendly Word document.
// Fixed layout only. Section order, fonts and spacing are constants in style.rs.

pub mod document;
pub mod numbering;
pub mod ooxml;
pub mod package;
pub mod page;
pub mod style;

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::tailoring::models::TailoredResume;

pub use page::{default_page_config, PageConfig};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML error: {0}")]
    Xml(String),
}

/// Renders `resume` to a `.docx` at `path` using the default US Letter page.
pub fn render_docx(resume: &TailoredResume, path: &Path) -> Result<(), RenderError> {
    render_docx_with(resume, &default_page_config(), path)
}

pub fn render_docx_with(
    resume: &TailoredResume,
    page: &PageConfig,
    path: &Path,
) -> Result<(), RenderError> {
    let paragraphs = document::resume_paragraphs(resume);
    let parts = package::package_parts(
        document::document_xml(&paragraphs, page)?,
        numbering::numbering_xml()?,
        &format!("{} \u{2014} {}", resume.meta.name, resume.job_title),
        &resume.meta.name,
        chrono::Utc::now(),
    )?;

    let file = BufWriter::new(File::create(path)?);
    let mut writer = package::write_package(file, &parts)?;
    std::io::Write::flush(&mut writer)?;

    info!(
        "Rendered {} paragraphs ({:.1}in text width) to {}",
        paragraphs.len(),
        page.text_width_in(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use super::*;
    use crate::render::package::{DOCUMENT_PART, NUMBERING_PART};
    use crate::tailoring::models::fixtures::tailored_value;

    fn read_part(path: &Path, name: &str) -> String {
        let mut archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
        let mut xml = String::new();
        archive
            .by_name(name)
            .unwrap()
            .read_to_string(&mut xml)
            .unwrap();
        xml
    }

    fn rendered_fixture() -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.docx");
        let resume = TailoredResume::from_value(&tailored_value()).unwrap();
        render_docx(&resume, &path).unwrap();
        (dir, path)
    }

    #[test]
    fn test_rendered_docx_honours_page_and_margins() {
        let (_dir, path) = rendered_fixture();
        let document = read_part(&path, DOCUMENT_PART);

        assert!(document.contains(r#"<w:pgSz w:w="12240" w:h="15840"/>"#));
        assert!(document.contains(r#"w:top="720""#));
        assert!(document.contains(r#"w:bottom="720""#));
        assert!(document.contains(r#"w:left="1008""#));
        assert!(document.contains(r#"w:right="1008""#));
    }

    #[test]
    fn test_rendered_docx_contains_resume_content() {
        let (_dir, path) = rendered_fixture();
        let document = read_part(&path, DOCUMENT_PART);

        assert!(document.contains(">JANE DOE<"));
        assert!(document.contains(">EXPERIENCE<"));
        assert!(document.contains("Built a Rust ingestion service handling 40k events/s"));
        assert!(document.contains(r#"<w:rFonts w:ascii="Calibri""#));
    }

    #[test]
    fn test_rendered_docx_ships_bullet_numbering() {
        let (_dir, path) = rendered_fixture();
        let numbering = read_part(&path, NUMBERING_PART);
        assert!(numbering.contains(r#"<w:numFmt w:val="bullet"/>"#));
    }

    #[test]
    fn test_custom_page_config_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a4.docx");
        let resume = TailoredResume::from_value(&tailored_value()).unwrap();
        let page = PageConfig {
            width_in: 8.27,
            height_in: 11.69,
            ..default_page_config()
        };

        render_docx_with(&resume, &page, &path).unwrap();

        let document = read_part(&path, DOCUMENT_PART);
        assert!(document.contains(r#"<w:pgSz w:w="11909" w:h="16834"/>"#));
    }

    #[test]
    fn test_multiline_summary_keeps_line_breaks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.docx");
        let mut value = tailored_value();
        value["summary"] = serde_json::json!("Builds platforms.\nShips on time.");
        let resume = TailoredResume::from_value(&value).unwrap();

        render_docx(&resume, &path).unwrap();

        let document = read_part(&path, DOCUMENT_PART);
        assert!(document.contains(
            r#">Builds platforms.</w:t><w:br/><w:t xml:space="preserve">Ships on time.<"#
        ));
    }

    #[test]
    fn test_render_into_missing_directory_is_io_error() {
        let resume = TailoredResume::from_value(&tailored_value()).unwrap();
        let result = render_docx(&resume, Path::new("/no/such/dir/resume.docx"));
        assert!(matches!(result, Err(RenderError::Io(_))));
    }
}
