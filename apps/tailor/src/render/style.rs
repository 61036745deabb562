//! Fixed style rules: one font, three colors, and the size/spacing table per element.
//! Sizes are points; spacing values are twips.

use crate::render::ooxml::{BottomBorder, Spacing};

pub const FONT_NAME: &str = "Calibri";

/// Dark steel blue for the name, section headers and skill labels.
pub const ACCENT: &str = "2B4C7E";
/// Near-black body text.
pub const DARK: &str = "1A1A1A";
/// Secondary text: dates, locations, contact line.
pub const GRAY: &str = "555555";

pub const NAME_PT: f32 = 20.0;
pub const NAME_CHARACTER_SPACING_PT: f32 = 1.5;
pub const HEADLINE_PT: f32 = 11.5;
pub const CONTACT_PT: f32 = 8.5;
pub const SECTION_HEADER_PT: f32 = 11.5;
pub const ENTRY_TITLE_PT: f32 = 11.0;
pub const BODY_PT: f32 = 10.5;
pub const DATES_PT: f32 = 10.0;

pub const NAME_SPACING: Spacing = Spacing::new(0, 0);
pub const HEADLINE_SPACING: Spacing = Spacing::new(20, 20);
pub const CONTACT_SPACING: Spacing = Spacing::new(0, 60);
pub const SUMMARY_SPACING: Spacing = Spacing::new(0, 40);
pub const SECTION_HEADER_SPACING: Spacing = Spacing::new(120, 40);
pub const ENTRY_TITLE_SPACING: Spacing = Spacing::new(60, 0);
pub const PROJECT_TITLE_SPACING: Spacing = Spacing::new(60, 20);
pub const DATES_SPACING: Spacing = Spacing::new(0, 20);
pub const SKILL_LINE_SPACING: Spacing = Spacing::new(0, 20);
pub const EDUCATION_DETAIL_SPACING: Spacing = Spacing::new(0, 0);
pub const BULLET_SPACING: Spacing = Spacing::new(0, 5);

pub const SECTION_RULE: BottomBorder = BottomBorder {
    color: ACCENT,
    size: 4,
    space: 2,
};

/// Separator between contact fields.
pub const CONTACT_SEPARATOR: &str = "  \u{b7}  ";
/// Separator between fields on an entry's title line.
pub const FIELD_SEPARATOR: &str = "  |  ";
/// En dash between start and end dates.
pub const DATE_RANGE_SEPARATOR: &str = " \u{2013} ";

/// Bullet glyph and indentation (twips) for the list numbering definition.
pub const BULLET_GLYPH: &str = "\u{2022}";
pub const BULLET_GLYPH_FONT: &str = "Symbol";
pub const BULLET_INDENT_LEFT: u32 = 360;
pub const BULLET_INDENT_HANGING: u32 = 180;
