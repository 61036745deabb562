//! Page geometry for the rendered resume.
//!
//! OOXML expresses page size and margins in twips (1/20 pt, 1440 per inch).
//! Dimensions are kept in inches here and converted only when the section
//! properties are written.

use crate::render::ooxml::XmlWriter;

pub const TWIPS_PER_INCH: f32 = 1440.0;

/// Layout parameters for the single resume page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageConfig {
    pub width_in: f32,
    pub height_in: f32,
    pub margin_top_in: f32,
    pub margin_bottom_in: f32,
    pub margin_left_in: f32,
    pub margin_right_in: f32,
    /// Header/footer distance from the page edge.
    pub header_footer_in: f32,
}

/// US Letter (8.5" × 11") with 0.5" top/bottom and 0.7" left/right margins.
pub fn default_page_config() -> PageConfig {
    PageConfig {
        width_in: 8.5,
        height_in: 11.0,
        margin_top_in: 0.5,
        margin_bottom_in: 0.5,
        margin_left_in: 0.7,
        margin_right_in: 0.7,
        header_footer_in: 0.5,
    }
}

pub fn inches_to_twips(inches: f32) -> u32 {
    (inches * TWIPS_PER_INCH).round() as u32
}

impl PageConfig {
    /// Usable text width in inches.
    pub fn text_width_in(&self) -> f32 {
        self.width_in - self.margin_left_in - self.margin_right_in
    }

    /// Writes `<w:sectPr>` (page size + margins). Must be the last child of `<w:body>`.
    pub fn write_section_properties(&self, xml: &mut XmlWriter) {
        xml.open("w:sectPr", &[]);
        xml.empty(
            "w:pgSz",
            &[
                ("w:w", inches_to_twips(self.width_in).to_string()),
                ("w:h", inches_to_twips(self.height_in).to_string()),
            ],
        );
        xml.empty(
            "w:pgMar",
            &[
                ("w:top", inches_to_twips(self.margin_top_in).to_string()),
                ("w:right", inches_to_twips(self.margin_right_in).to_string()),
                ("w:bottom", inches_to_twips(self.margin_bottom_in).to_string()),
                ("w:left", inches_to_twips(self.margin_left_in).to_string()),
                ("w:header", inches_to_twips(self.header_footer_in).to_string()),
                ("w:footer", inches_to_twips(self.header_footer_in).to_string()),
                ("w:gutter", "0".to_string()),
            ],
        );
        xml.close("w:sectPr");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_page_is_us_letter() {
        let page = default_page_config();
        assert_eq!(inches_to_twips(page.width_in), 12240);
        assert_eq!(inches_to_twips(page.height_in), 15840);
    }

    #[test]
    fn test_margin_twips() {
        let page = default_page_config();
        assert_eq!(inches_to_twips(page.margin_top_in), 720);
        assert_eq!(inches_to_twips(page.margin_left_in), 1008);
    }

    #[test]
    fn test_text_width() {
        let page = default_page_config();
        assert!((page.text_width_in() - 7.1).abs() < 1e-5);
    }

    #[test]
    fn test_section_properties_xml() {
        let mut xml = XmlWriter::new();
        default_page_config().write_section_properties(&mut xml);
        let out = xml.finish().unwrap();
        assert!(out.contains(r#"<w:pgSz w:w="12240" w:h="15840"/>"#));
        assert!(out.contains(
            r#"<w:pgMar w:top="720" w:right="1008" w:bottom="720" w:left="1008" w:header="720" w:footer="720" w:gutter="0"/>"#
        ));
        assert!(out.starts_with("<w:sectPr>") && out.ends_with("</w:sectPr>"));
    }
}
