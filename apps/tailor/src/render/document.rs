//! Maps a `TailoredResume` onto styled paragraphs and the `word/document.xml` part.
//!
//! Section order is fixed: header, summary, experience, skills, projects, education.

use crate::render::numbering::BULLET_NUM_ID;
use crate::render::ooxml::{Paragraph, Run, XmlWriter};
use crate::render::page::PageConfig;
use crate::render::style::*;
use crate::render::RenderError;
use crate::tailoring::models::{Education, Experience, Meta, Project, SkillGroup, TailoredResume};

pub const WORDPROCESSING_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
pub const RELATIONSHIPS_NS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Builds the full paragraph sequence for a resume.
pub fn resume_paragraphs(resume: &TailoredResume) -> Vec<Paragraph> {
    let mut paragraphs = Vec::new();

    add_header(&mut paragraphs, &resume.meta);
    add_summary(&mut paragraphs, &resume.summary);

    add_section_header(&mut paragraphs, "Experience");
    add_experience(&mut paragraphs, &resume.experience);

    add_section_header(&mut paragraphs, "Skills");
    add_skills(&mut paragraphs, &resume.skills);

    add_section_header(&mut paragraphs, "Projects");
    add_projects(&mut paragraphs, &resume.projects);

    add_section_header(&mut paragraphs, "Education");
    add_education(&mut paragraphs, &resume.education);

    paragraphs
}

/// Serializes paragraphs plus page setup into `word/document.xml`.
pub fn document_xml(paragraphs: &[Paragraph], page: &PageConfig) -> Result<String, RenderError> {
    let mut xml = XmlWriter::with_declaration();
    xml.open(
        "w:document",
        &[
            ("xmlns:w", WORDPROCESSING_NS.to_string()),
            ("xmlns:r", RELATIONSHIPS_NS.to_string()),
        ],
    );
    xml.open("w:body", &[]);
    for paragraph in paragraphs {
        paragraph.write_xml(&mut xml);
    }
    page.write_section_properties(&mut xml);
    xml.close("w:body");
    xml.close("w:document");
    xml.finish()
}

fn add_header(out: &mut Vec<Paragraph>, meta: &Meta) {
    out.push(
        Paragraph::new(NAME_SPACING).centered().run(
            Run::new(meta.name.to_uppercase(), NAME_PT, ACCENT)
                .bold()
                .character_spacing(NAME_CHARACTER_SPACING_PT),
        ),
    );

    out.push(
        Paragraph::new(HEADLINE_SPACING)
            .centered()
            .run(Run::new(meta.title.as_str(), HEADLINE_PT, GRAY)),
    );

    let contact = meta.contact_parts().join(CONTACT_SEPARATOR);
    out.push(
        Paragraph::new(CONTACT_SPACING)
            .centered()
            .run(Run::new(contact, CONTACT_PT, GRAY)),
    );
}

fn add_summary(out: &mut Vec<Paragraph>, summary: &str) {
    out.push(Paragraph::new(SUMMARY_SPACING).run(Run::new(summary, BODY_PT, DARK)));
}

fn add_section_header(out: &mut Vec<Paragraph>, title: &str) {
    out.push(
        Paragraph::new(SECTION_HEADER_SPACING)
            .bottom_border(SECTION_RULE)
            .run(Run::new(title.to_uppercase(), SECTION_HEADER_PT, ACCENT).bold()),
    );
}

fn bullet(text: &str) -> Paragraph {
    Paragraph::new(BULLET_SPACING)
        .bullet(BULLET_NUM_ID)
        .run(Run::new(text, BODY_PT, DARK))
}

fn date_range(start: &str, end: &str) -> String {
    format!("{start}{DATE_RANGE_SEPARATOR}{end}")
}

fn add_experience(out: &mut Vec<Paragraph>, experience: &[Experience]) {
    for job in experience {
        out.push(
            Paragraph::new(ENTRY_TITLE_SPACING)
                .run(Run::new(job.title.as_str(), ENTRY_TITLE_PT, DARK).bold())
                .run(Run::new(
                    format!(
                        "{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}{}",
                        job.company, job.location
                    ),
                    BODY_PT,
                    GRAY,
                )),
        );

        out.push(
            Paragraph::new(DATES_SPACING)
                .run(Run::new(date_range(&job.start, &job.end), DATES_PT, GRAY)),
        );

        out.extend(job.bullets.iter().map(|b| bullet(b)));
    }
}

fn add_skills(out: &mut Vec<Paragraph>, skills: &[SkillGroup]) {
    for group in skills {
        out.push(
            Paragraph::new(SKILL_LINE_SPACING)
                .run(Run::new(format!("{}: ", title_case(&group.label)), BODY_PT, ACCENT).bold())
                .run(Run::new(group.items.join(", "), BODY_PT, DARK)),
        );
    }
}

fn add_projects(out: &mut Vec<Paragraph>, projects: &[Project]) {
    for project in projects {
        out.push(
            Paragraph::new(PROJECT_TITLE_SPACING)
                .run(Run::new(project.name.as_str(), ENTRY_TITLE_PT, DARK).bold())
                .run(Run::new(
                    format!("{FIELD_SEPARATOR}{}", project.tech.join(", ")),
                    BODY_PT,
                    GRAY,
                )),
        );
        out.push(bullet(&project.description));
    }
}

fn add_education(out: &mut Vec<Paragraph>, education: &[Education]) {
    for edu in education {
        let mut degree_line = Paragraph::new(ENTRY_TITLE_SPACING)
            .run(Run::new(edu.degree.as_str(), ENTRY_TITLE_PT, DARK).bold());
        if let Some(honors) = edu.honors.as_deref().filter(|h| !h.trim().is_empty()) {
            degree_line = degree_line.run(Run::new(
                format!("{FIELD_SEPARATOR}{honors}"),
                BODY_PT,
                ACCENT,
            ));
        }
        out.push(degree_line);

        out.push(Paragraph::new(EDUCATION_DETAIL_SPACING).run(Run::new(
            format!(
                "{}{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}{}",
                edu.institution,
                edu.location,
                date_range(&edu.start, &edu.end)
            ),
            BODY_PT,
            GRAY,
        )));
    }
}

/// Capitalizes the first letter of every alphabetic run and lowercases the rest
/// (`"cloud infrastructure"` → `"Cloud Infrastructure"`, `"ci/cd"` → `"Ci/Cd"`).
pub fn title_case(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut prev_alpha = false;
    for c in label.chars() {
        if prev_alpha {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_alpha = c.is_alphabetic();
    }
    out
}
