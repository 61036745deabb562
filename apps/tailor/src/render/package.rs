//! OPC packaging: the fixed set of parts that make a `.docx`, zipped with deflate.

use std::io::{Seek, Write};

use chrono::{DateTime, SecondsFormat, Utc};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::render::document::WORDPROCESSING_NS;
use crate::render::ooxml::{XmlWriter, XML_DECLARATION};
use crate::render::style::FONT_NAME;
use crate::render::RenderError;

pub const DOCUMENT_PART: &str = "word/document.xml";
pub const NUMBERING_PART: &str = "word/numbering.xml";
pub const STYLES_PART: &str = "word/styles.xml";

const CONTENT_TYPES: &str = r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/><Override PartName="/word/numbering.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml"/><Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/><Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/><Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/></Relationships>"#;

const DOCUMENT_RELS: &str = r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering" Target="numbering.xml"/></Relationships>"#;

const CORE_PROPERTIES_NS: &str =
    "http://schemas.openxmlformats.org/package/2006/metadata/core-properties";

const APP_PROPERTIES: &str = r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties"><Application>tailor</Application></Properties>"#;

/// A named part and its complete XML body.
pub struct Part {
    pub name: &'static str,
    pub xml: String,
}

/// Document-level defaults: Calibri everywhere, no paragraph spacing unless set.
fn styles_xml() -> Result<String, RenderError> {
    let font = || FONT_NAME.to_string();
    let mut xml = XmlWriter::with_declaration();
    xml.open("w:styles", &[("xmlns:w", WORDPROCESSING_NS.to_string())]);

    xml.open("w:docDefaults", &[]);
    xml.open("w:rPrDefault", &[]);
    xml.open("w:rPr", &[]);
    xml.empty(
        "w:rFonts",
        &[
            ("w:ascii", font()),
            ("w:hAnsi", font()),
            ("w:eastAsia", font()),
            ("w:cs", font()),
        ],
    );
    xml.val("w:sz", 21);
    xml.val("w:szCs", 21);
    xml.val("w:lang", "en-US");
    xml.close("w:rPr");
    xml.close("w:rPrDefault");
    xml.open("w:pPrDefault", &[]);
    xml.open("w:pPr", &[]);
    xml.empty(
        "w:spacing",
        &[
            ("w:after", "0".to_string()),
            ("w:line", "240".to_string()),
            ("w:lineRule", "auto".to_string()),
        ],
    );
    xml.close("w:pPr");
    xml.close("w:pPrDefault");
    xml.close("w:docDefaults");

    xml.open(
        "w:style",
        &[
            ("w:type", "paragraph".to_string()),
            ("w:default", "1".to_string()),
            ("w:styleId", "Normal".to_string()),
        ],
    );
    xml.val("w:name", "Normal");
    xml.empty("w:qFormat", &[]);
    xml.close("w:style");

    xml.close("w:styles");
    xml.finish()
}

fn core_properties_xml(
    title: &str,
    author: &str,
    created: DateTime<Utc>,
) -> Result<String, RenderError> {
    let timestamp = created.to_rfc3339_opts(SecondsFormat::Secs, true);
    let w3cdtf = || [("xsi:type", "dcterms:W3CDTF".to_string())];

    let mut xml = XmlWriter::with_declaration();
    xml.open(
        "cp:coreProperties",
        &[
            ("xmlns:cp", CORE_PROPERTIES_NS.to_string()),
            ("xmlns:dc", "http://purl.org/dc/elements/1.1/".to_string()),
            ("xmlns:dcterms", "http://purl.org/dc/terms/".to_string()),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance".to_string()),
        ],
    );
    xml.text_element("dc:title", &[], title);
    xml.text_element("dc:creator", &[], author);
    xml.text_element("dcterms:created", &w3cdtf(), &timestamp);
    xml.text_element("dcterms:modified", &w3cdtf(), &timestamp);
    xml.close("cp:coreProperties");
    xml.finish()
}

fn with_declaration(xml: &str) -> String {
    format!("{XML_DECLARATION}{xml}")
}

/// Every part of the package, content types first.
pub fn package_parts(
    document_xml: String,
    numbering_xml: String,
    title: &str,
    author: &str,
    created: DateTime<Utc>,
) -> Result<Vec<Part>, RenderError> {
    Ok(vec![
        Part {
            name: "[Content_Types].xml",
            xml: with_declaration(CONTENT_TYPES),
        },
        Part {
            name: "_rels/.rels",
            xml: with_declaration(PACKAGE_RELS),
        },
        Part {
            name: DOCUMENT_PART,
            xml: document_xml,
        },
        Part {
            name: "word/_rels/document.xml.rels",
            xml: with_declaration(DOCUMENT_RELS),
        },
        Part {
            name: STYLES_PART,
            xml: styles_xml()?,
        },
        Part {
            name: NUMBERING_PART,
            xml: numbering_xml,
        },
        Part {
            name: "docProps/core.xml",
            xml: core_properties_xml(title, author, created)?,
        },
        Part {
            name: "docProps/app.xml",
            xml: with_declaration(APP_PROPERTIES),
        },
    ])
}

/// Zips `parts` into `writer` and returns the writer.
pub fn write_package<W: Write + Seek>(writer: W, parts: &[Part]) -> Result<W, RenderError> {
    let mut zip = ZipWriter::new(writer);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    for part in parts {
        zip.start_file(part.name, options)?;
        zip.write_all(part.xml.as_bytes())?;
    }

    Ok(zip.finish()?)
}
