use std::io::{Read, Seek};

use super::{WML_NS, read_zip_text, twips_attr, wml, wml_attr};

pub(super) const DEFAULT_FONT: &str = "Times New Roman";
pub(super) const DEFAULT_FONT_SIZE: f32 = 11.0;

pub(super) struct StyleDefaults {
    pub(super) font_name: String,
    pub(super) font_size: f32,
    pub(super) space_before: f32,
    pub(super) space_after: f32,
}

impl Default for StyleDefaults {
    fn default() -> Self {
        Self {
            font_name: DEFAULT_FONT.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            space_before: 0.0,
            space_after: 0.0,
        }
    }
}

/// Read `w:docDefaults` from `word/styles.xml`, falling back to our own defaults.
pub(super) fn parse_style_defaults<R: Read + Seek>(zip: &mut zip::ZipArchive<R>) -> StyleDefaults {
    let mut defaults = StyleDefaults::default();
    let Some(xml_content) = read_zip_text(zip, "word/styles.xml") else {
        return defaults;
    };
    let Ok(xml) = roxmltree::Document::parse(&xml_content) else {
        return defaults;
    };
    let Some(doc_defaults) = wml(xml.root_element(), "docDefaults") else {
        return defaults;
    };

    if let Some(rpr) = wml(doc_defaults, "rPrDefault").and_then(|n| wml(n, "rPr")) {
        if let Some(font) = wml(rpr, "rFonts").and_then(|f| f.attribute((WML_NS, "ascii"))) {
            defaults.font_name = font.to_string();
        }
        if let Some(half_points) = wml_attr(rpr, "sz").and_then(|v| v.parse::<f32>().ok()) {
            defaults.font_size = half_points / 2.0;
        }
    }
    if let Some(spacing) = wml(doc_defaults, "pPrDefault")
        .and_then(|n| wml(n, "pPr"))
        .and_then(|n| wml(n, "spacing"))
    {
        if let Some(before) = twips_attr(spacing, "before") {
            defaults.space_before = before;
        }
        if let Some(after) = twips_attr(spacing, "after") {
            defaults.space_after = after;
        }
    }
    defaults
}
