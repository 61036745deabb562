//! WordprocessingML writer: a thin wrapper over `quick_xml::Writer` plus paragraph/run models.
//!
//! Child element order inside `w:pPr` and `w:rPr` follows the schema sequence
//! (Word rejects out-of-order properties).

use std::borrow::Cow;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::render::style::FONT_NAME;
use crate::render::RenderError;

pub const XML_DECLARATION: &str =
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// Drops characters XML 1.0 cannot carry: C0 controls other than tab/newline/CR,
/// and the noncharacters U+FFFE and U+FFFF.
pub fn sanitize(text: &str) -> Cow<'_, str> {
    fn allowed(c: char) -> bool {
        !matches!(c, '\u{0}'..='\u{8}' | '\u{b}' | '\u{c}' | '\u{e}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}')
    }

    if text.chars().all(allowed) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.chars().filter(|&c| allowed(c)).collect())
    }
}

/// Event-level XML writer over `quick_xml::Writer`. Escaping is handled by quick-xml;
/// the first write error is kept and reported by `finish`.
pub struct XmlWriter {
    writer: Writer<Vec<u8>>,
    error: Option<String>,
}

impl XmlWriter {
    pub fn new() -> Self {
        Self {
            writer: Writer::new(Vec::new()),
            error: None,
        }
    }

    pub fn with_declaration() -> Self {
        let mut xml = Self::new();
        xml.write(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))));
        xml
    }

    fn write(&mut self, event: Event<'_>) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.writer.write_event(event) {
            self.error = Some(e.to_string());
        }
    }

    fn start_tag<'a>(tag: &'a str, attrs: &[(&str, String)]) -> BytesStart<'a> {
        let mut start = BytesStart::new(tag);
        for (name, value) in attrs {
            start.push_attribute((*name, sanitize(value).as_ref()));
        }
        start
    }

    pub fn open(&mut self, tag: &str, attrs: &[(&str, String)]) {
        self.write(Event::Start(Self::start_tag(tag, attrs)));
    }

    pub fn empty(&mut self, tag: &str, attrs: &[(&str, String)]) {
        self.write(Event::Empty(Self::start_tag(tag, attrs)));
    }

    pub fn close(&mut self, tag: &str) {
        self.write(Event::End(BytesEnd::new(tag)));
    }

    /// Escaped character data.
    pub fn text(&mut self, text: &str) {
        self.write(Event::Text(BytesText::new(&sanitize(text))));
    }

    /// `<tag attrs>escaped text</tag>`
    pub fn text_element(&mut self, tag: &str, attrs: &[(&str, String)], text: &str) {
        self.open(tag, attrs);
        self.text(text);
        self.close(tag);
    }

    /// Shorthand for the ubiquitous `<w:x w:val="..."/>`.
    pub fn val(&mut self, tag: &str, value: impl ToString) {
        self.empty(tag, &[("w:val", value.to_string())]);
    }

    pub fn finish(self) -> Result<String, RenderError> {
        if let Some(message) = self.error {
            return Err(RenderError::Xml(message));
        }
        String::from_utf8(self.writer.into_inner())
            .map_err(|e| RenderError::Xml(e.to_string()))
    }
}

impl Default for XmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Points → half-points (the unit of `w:sz`).
pub fn half_points(pt: f32) -> u32 {
    (pt * 2.0).round() as u32
}

/// Points → twips (the unit of `w:spacing` on runs and paragraphs).
pub fn pt_to_twips(pt: f32) -> i32 {
    (pt * 20.0).round() as i32
}

/// Paragraph spacing in twips; `line` is in 240ths of a line (`lineRule="auto"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spacing {
    pub before: u32,
    pub after: u32,
    pub line: u32,
}

impl Spacing {
    pub const fn new(before: u32, after: u32) -> Self {
        Self {
            before,
            after,
            line: 240,
        }
    }
}

impl Default for Spacing {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

/// A styled span of text.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub text: String,
    pub size_pt: f32,
    pub bold: bool,
    pub color: &'static str,
    pub character_spacing_pt: Option<f32>,
}

impl Run {
    pub fn new(text: impl Into<String>, size_pt: f32, color: &'static str) -> Self {
        Self {
            text: text.into(),
            size_pt,
            bold: false,
            color,
            character_spacing_pt: None,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn character_spacing(mut self, pt: f32) -> Self {
        self.character_spacing_pt = Some(pt);
        self
    }

    pub fn write_xml(&self, xml: &mut XmlWriter) {
        xml.open("w:r", &[]);
        xml.open("w:rPr", &[]);
        xml.empty(
            "w:rFonts",
            &[
                ("w:ascii", FONT_NAME.to_string()),
                ("w:hAnsi", FONT_NAME.to_string()),
                ("w:cs", FONT_NAME.to_string()),
            ],
        );
        if self.bold {
            xml.empty("w:b", &[]);
            xml.empty("w:bCs", &[]);
        }
        xml.val("w:color", self.color);
        if let Some(pt) = self.character_spacing_pt {
            xml.val("w:spacing", pt_to_twips(pt));
        }
        let size = half_points(self.size_pt);
        xml.val("w:sz", size);
        xml.val("w:szCs", size);
        xml.close("w:rPr");
        self.write_content(xml);
        xml.close("w:r");
    }

    /// Run text as `w:t` segments; line breaks become `w:br`, tabs `w:tab`.
    fn write_content(&self, xml: &mut XmlWriter) {
        let mut segment = String::new();
        let mut chars = self.text.chars().peekable();
        while let Some(c) = chars.next() {
            let control = match c {
                '\n' => "w:br",
                '\r' => {
                    if chars.peek() == Some(&'\n') {
                        continue;
                    }
                    "w:br"
                }
                '\t' => "w:tab",
                c => {
                    segment.push(c);
                    continue;
                }
            };
            write_segment(xml, &mut segment);
            xml.empty(control, &[]);
        }
        write_segment(xml, &mut segment);
    }
}

fn write_segment(xml: &mut XmlWriter, segment: &mut String) {
    if !segment.is_empty() {
        xml.text_element("w:t", &[("xml:space", "preserve".to_string())], segment);
        segment.clear();
    }
}

/// Bottom rule drawn under a paragraph (section headers).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BottomBorder {
    pub color: &'static str,
    /// Eighths of a point.
    pub size: u32,
    /// Points between text and rule.
    pub space: u32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paragraph {
    pub runs: Vec<Run>,
    pub centered: bool,
    pub spacing: Spacing,
    /// Numbering instance (`w:numId`) for bullet paragraphs.
    pub bullet_num_id: Option<u32>,
    pub bottom_border: Option<BottomBorder>,
}

impl Paragraph {
    pub fn new(spacing: Spacing) -> Self {
        Self {
            spacing,
            ..Self::default()
        }
    }

    pub fn run(mut self, run: Run) -> Self {
        self.runs.push(run);
        self
    }

    pub fn centered(mut self) -> Self {
        self.centered = true;
        self
    }

    pub fn bullet(mut self, num_id: u32) -> Self {
        self.bullet_num_id = Some(num_id);
        self
    }

    pub fn bottom_border(mut self, border: BottomBorder) -> Self {
        self.bottom_border = Some(border);
        self
    }

    /// Concatenated run text, as a reader would see it.
    #[cfg(test)]
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    pub fn write_xml(&self, xml: &mut XmlWriter) {
        xml.open("w:p", &[]);
        xml.open("w:pPr", &[]);
        if let Some(num_id) = self.bullet_num_id {
            xml.open("w:numPr", &[]);
            xml.val("w:ilvl", 0);
            xml.val("w:numId", num_id);
            xml.close("w:numPr");
        }
        if let Some(border) = self.bottom_border {
            xml.open("w:pBdr", &[]);
            xml.empty(
                "w:bottom",
                &[
                    ("w:val", "single".to_string()),
                    ("w:sz", border.size.to_string()),
                    ("w:space", border.space.to_string()),
                    ("w:color", border.color.to_string()),
                ],
            );
            xml.close("w:pBdr");
        }
        xml.empty(
            "w:spacing",
            &[
                ("w:before", self.spacing.before.to_string()),
                ("w:after", self.spacing.after.to_string()),
                ("w:line", self.spacing.line.to_string()),
                ("w:lineRule", "auto".to_string()),
            ],
        );
        if self.centered {
            xml.val("w:jc", "center");
        }
        xml.close("w:pPr");
        for run in &self.runs {
            run.write_xml(xml);
        }
        xml.close("w:p");
    }
}
