//! Bullet list definition (`word/numbering.xml`).
//! One abstract definition, one instance; every bullet paragraph references `BULLET_NUM_ID`.

use crate::render::document::WORDPROCESSING_NS;
use crate::render::ooxml::XmlWriter;
use crate::render::style::{
    BULLET_GLYPH, BULLET_GLYPH_FONT, BULLET_INDENT_HANGING, BULLET_INDENT_LEFT,
};
use crate::render::RenderError;

const BULLET_ABSTRACT_NUM_ID: u32 = 1;
pub const BULLET_NUM_ID: u32 = 1;

pub fn numbering_xml() -> Result<String, RenderError> {
    let mut xml = XmlWriter::with_declaration();
    xml.open("w:numbering", &[("xmlns:w", WORDPROCESSING_NS.to_string())]);

    xml.open(
        "w:abstractNum",
        &[("w:abstractNumId", BULLET_ABSTRACT_NUM_ID.to_string())],
    );
    xml.open("w:lvl", &[("w:ilvl", "0".to_string())]);
    xml.val("w:start", 1);
    xml.val("w:numFmt", "bullet");
    xml.val("w:lvlText", BULLET_GLYPH);
    xml.val("w:lvlJc", "left");
    xml.open("w:pPr", &[]);
    xml.empty(
        "w:ind",
        &[
            ("w:left", BULLET_INDENT_LEFT.to_string()),
            ("w:hanging", BULLET_INDENT_HANGING.to_string()),
        ],
    );
    xml.close("w:pPr");
    xml.open("w:rPr", &[]);
    xml.empty(
        "w:rFonts",
        &[
            ("w:ascii", BULLET_GLYPH_FONT.to_string()),
            ("w:hAnsi", BULLET_GLYPH_FONT.to_string()),
            ("w:hint", "default".to_string()),
        ],
    );
    xml.close("w:rPr");
    xml.close("w:lvl");
    xml.close("w:abstractNum");

    xml.open("w:num", &[("w:numId", BULLET_NUM_ID.to_string())]);
    xml.val("w:abstractNumId", BULLET_ABSTRACT_NUM_ID);
    xml.close("w:num");

    xml.close("w:numbering");
    xml.finish()
}
