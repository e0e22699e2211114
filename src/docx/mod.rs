mod styles;
mod writer;

use std::io::{Read, Seek};
use std::path::Path;

use crate::error::Error;
use crate::model::{
    Alignment, Block, BorderStyle, CellBorder, CellBorders, CellVAlign, Document, LineSpacing,
    Paragraph, Run, SectionProperties, Table, TableCell, TableRow, VMerge,
};

pub use writer::to_bytes;

pub(super) const WML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

pub(super) fn twips_to_pts(twips: f32) -> f32 {
    twips / 20.0
}

pub(super) fn pts_to_twips(pts: f32) -> i64 {
    (pts * 20.0).round() as i64
}

pub(super) fn parse_hex_color(val: &str) -> Option<[u8; 3]> {
    if val == "auto" || val.len() != 6 || !val.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&val[0..2], 16).ok()?;
    let g = u8::from_str_radix(&val[2..4], 16).ok()?;
    let b = u8::from_str_radix(&val[4..6], 16).ok()?;
    Some([r, g, b])
}

/// Parse a WML boolean toggle element (e.g., w:b).
/// Present with no val or val != "0"/"false" means true.
pub(super) fn wml_bool(parent: roxmltree::Node, name: &str) -> Option<bool> {
    wml(parent, name).map(|n| {
        n.attribute((WML_NS, "val"))
            .is_none_or(|v| v != "0" && v != "false")
    })
}

pub(super) fn wml<'a>(
    node: roxmltree::Node<'a, 'a>,
    name: &str,
) -> Option<roxmltree::Node<'a, 'a>> {
    node.children()
        .find(|n| n.tag_name().name() == name && n.tag_name().namespace() == Some(WML_NS))
}

fn wml_children<'a>(
    node: roxmltree::Node<'a, 'a>,
    name: &'a str,
) -> impl Iterator<Item = roxmltree::Node<'a, 'a>> + 'a {
    node.children()
        .filter(move |n| n.tag_name().name() == name && n.tag_name().namespace() == Some(WML_NS))
}

pub(super) fn wml_attr<'a>(node: roxmltree::Node<'a, 'a>, child: &str) -> Option<&'a str> {
    wml(node, child).and_then(|n| n.attribute((WML_NS, "val")))
}

pub(super) fn twips_attr(node: roxmltree::Node, attr: &str) -> Option<f32> {
    node.attribute((WML_NS, attr))
        .and_then(|v| v.parse::<f32>().ok())
        .map(twips_to_pts)
}

pub(super) fn read_zip_text<R: Read + Seek>(
    zip: &mut zip::ZipArchive<R>,
    name: &str,
) -> Option<String> {
    let mut content = String::new();
    zip.by_name(name).ok()?.read_to_string(&mut content).ok()?;
    Some(content)
}

fn parse_alignment(val: &str) -> Alignment {
    match val {
        "center" => Alignment::Center,
        "right" | "end" => Alignment::Right,
        "both" | "distribute" => Alignment::Justify,
        _ => Alignment::Left,
    }
}

fn parse_cell_border(bdr_node: roxmltree::Node, name: &str) -> Option<CellBorder> {
    let n = wml(bdr_node, name)?;
    let val = n.attribute((WML_NS, "val")).unwrap_or("none");
    if val == "nil" || val == "none" {
        return None;
    }
    let weight = n
        .attribute((WML_NS, "sz"))
        .and_then(|v| v.parse::<u8>().ok())
        .unwrap_or(4);
    let color = n
        .attribute((WML_NS, "color"))
        .and_then(parse_hex_color)
        .unwrap_or([0, 0, 0]);
    Some(CellBorder {
        weight,
        style: BorderStyle::from_wml(val).unwrap_or(BorderStyle::Single),
        color,
    })
}

fn parse_section_properties(sect_node: roxmltree::Node) -> SectionProperties {
    let defaults = SectionProperties::default();
    let pg_sz = wml(sect_node, "pgSz");
    let pg_mar = wml(sect_node, "pgMar");
    SectionProperties {
        page_width: pg_sz.and_then(|n| twips_attr(n, "w")).unwrap_or(defaults.page_width),
        page_height: pg_sz.and_then(|n| twips_attr(n, "h")).unwrap_or(defaults.page_height),
        margin_top: pg_mar.and_then(|n| twips_attr(n, "top")).unwrap_or(defaults.margin_top),
        margin_bottom: pg_mar
            .and_then(|n| twips_attr(n, "bottom"))
            .unwrap_or(defaults.margin_bottom),
        margin_left: pg_mar.and_then(|n| twips_attr(n, "left")).unwrap_or(defaults.margin_left),
        margin_right: pg_mar
            .and_then(|n| twips_attr(n, "right"))
            .unwrap_or(defaults.margin_right),
    }
}

fn parse_run(r: roxmltree::Node, default_font: &str, default_size: f32) -> Run {
    let rpr = wml(r, "rPr");
    let font_name = rpr
        .and_then(|pr| wml(pr, "rFonts"))
        .and_then(|f| f.attribute((WML_NS, "ascii")))
        .unwrap_or(default_font)
        .to_string();
    let font_size = rpr
        .and_then(|pr| wml_attr(pr, "sz"))
        .and_then(|v| v.parse::<f32>().ok())
        .map(|half_points| half_points / 2.0)
        .unwrap_or(default_size);
    let bold = rpr.and_then(|pr| wml_bool(pr, "b")).unwrap_or(false);

    let mut text = String::new();
    for child in r.children() {
        if child.tag_name().namespace() != Some(WML_NS) {
            continue;
        }
        match child.tag_name().name() {
            "t" => text.push_str(child.text().unwrap_or("")),
            "br" | "cr" => text.push('\n'),
            "tab" => text.push('\t'),
            _ => {}
        }
    }

    Run {
        text,
        font_size,
        font_name,
        bold,
    }
}

fn parse_paragraph(p: roxmltree::Node, defaults: &styles::StyleDefaults) -> Paragraph {
    let ppr = wml(p, "pPr");
    let alignment = ppr
        .and_then(|pr| wml_attr(pr, "jc"))
        .map(parse_alignment)
        .unwrap_or(Alignment::Left);
    let spacing = ppr.and_then(|pr| wml(pr, "spacing"));
    let space_before = spacing
        .and_then(|n| twips_attr(n, "before"))
        .unwrap_or(defaults.space_before);
    let space_after = spacing
        .and_then(|n| twips_attr(n, "after"))
        .unwrap_or(defaults.space_after);
    let line_spacing = spacing.and_then(|n| {
        let line = n
            .attribute((WML_NS, "line"))
            .and_then(|v| v.parse::<f32>().ok())?;
        Some(match n.attribute((WML_NS, "lineRule")) {
            Some("exact") => LineSpacing::Exact(twips_to_pts(line)),
            Some("atLeast") => LineSpacing::AtLeast(twips_to_pts(line)),
            _ => LineSpacing::Auto(line / 240.0),
        })
    });

    let runs = wml_children(p, "r")
        .map(|r| parse_run(r, &defaults.font_name, defaults.font_size))
        .collect();

    Paragraph {
        runs,
        alignment,
        space_before,
        space_after,
        line_spacing,
    }
}

fn parse_table(node: roxmltree::Node, defaults: &styles::StyleDefaults) -> Table {
    let col_widths: Vec<f32> = wml(node, "tblGrid")
        .into_iter()
        .flat_map(|grid| wml_children(grid, "gridCol"))
        .filter_map(|n| twips_attr(n, "w"))
        .collect();

    let fixed_layout = wml(node, "tblPr")
        .and_then(|pr| wml(pr, "tblLayout"))
        .and_then(|n| n.attribute((WML_NS, "type")))
        == Some("fixed");

    let mut rows = Vec::new();
    for tr in wml_children(node, "tr") {
        let (height, height_exact) = wml(tr, "trPr")
            .and_then(|pr| wml(pr, "trHeight"))
            .map(|h| {
                let val = h
                    .attribute((WML_NS, "val"))
                    .and_then(|v| v.parse::<f32>().ok())
                    .map(twips_to_pts);
                let exact = h.attribute((WML_NS, "hRule")) == Some("exact");
                (val, exact)
            })
            .unwrap_or((None, false));

        let mut cells = Vec::new();
        let mut grid_col = 0usize;
        for tc in wml_children(tr, "tc") {
            let tc_pr = wml(tc, "tcPr");
            let grid_span = tc_pr
                .and_then(|pr| wml_attr(pr, "gridSpan"))
                .and_then(|v| v.parse::<u16>().ok())
                .unwrap_or(1);
            let width = tc_pr
                .and_then(|pr| wml(pr, "tcW"))
                .and_then(|w| twips_attr(w, "w"))
                .unwrap_or_else(|| {
                    col_widths
                        .iter()
                        .skip(grid_col)
                        .take(grid_span as usize)
                        .sum()
                });
            let v_merge = tc_pr
                .and_then(|pr| wml(pr, "vMerge"))
                .map(|n| match n.attribute((WML_NS, "val")) {
                    Some("restart") => VMerge::Restart,
                    _ => VMerge::Continue,
                })
                .unwrap_or(VMerge::None);
            let v_align = tc_pr
                .and_then(|pr| wml_attr(pr, "vAlign"))
                .map(|v| match v {
                    "center" => CellVAlign::Center,
                    "bottom" => CellVAlign::Bottom,
                    _ => CellVAlign::Top,
                })
                .unwrap_or(CellVAlign::Top);
            let borders = tc_pr
                .and_then(|pr| wml(pr, "tcBorders"))
                .map(|bdr| CellBorders {
                    top: parse_cell_border(bdr, "top"),
                    bottom: parse_cell_border(bdr, "bottom"),
                    left: parse_cell_border(bdr, "left")
                        .or_else(|| parse_cell_border(bdr, "start")),
                    right: parse_cell_border(bdr, "right")
                        .or_else(|| parse_cell_border(bdr, "end")),
                })
                .unwrap_or_default();
            let paragraphs = wml_children(tc, "p")
                .map(|p| parse_paragraph(p, defaults))
                .collect();

            cells.push(TableCell {
                width,
                paragraphs,
                borders,
                grid_span,
                v_merge,
                v_align,
            });
            grid_col += grid_span as usize;
        }

        rows.push(TableRow {
            cells,
            height,
            height_exact,
        });
    }

    Table {
        col_widths,
        rows,
        fixed_layout,
    }
}

fn parse_archive<R: Read + Seek>(mut zip: zip::ZipArchive<R>) -> Result<Document, Error> {
    let defaults = styles::parse_style_defaults(&mut zip);

    let xml_content = read_zip_text(&mut zip, "word/document.xml").ok_or_else(|| {
        Error::InvalidDocx("missing word/document.xml (is this a DOCX file?)".into())
    })?;
    let xml = roxmltree::Document::parse(&xml_content)?;
    let root = xml.root_element();
    let body = wml(root, "body").ok_or_else(|| Error::InvalidDocx("Missing w:body".into()))?;

    let mut section = SectionProperties::default();
    let mut blocks = Vec::new();
    for node in body.children() {
        if node.tag_name().namespace() != Some(WML_NS) {
            continue;
        }
        match node.tag_name().name() {
            "tbl" => blocks.push(Block::Table(parse_table(node, &defaults))),
            "p" => blocks.push(Block::Paragraph(parse_paragraph(node, &defaults))),
            "sectPr" => section = parse_section_properties(node),
            _ => {}
        }
    }

    log::debug!("Parsed {} body blocks", blocks.len());
    Ok(Document { section, blocks })
}

pub fn parse(path: &Path) -> Result<Document, Error> {
    let file = std::fs::File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => Error::Io(
            std::io::Error::new(e.kind(), format!("{}: {}", e, path.display())),
        ),
        _ => Error::Io(e),
    })?;
    let zip = zip::ZipArchive::new(file)
        .map_err(|_| Error::InvalidDocx("file is not a ZIP archive".into()))?;
    parse_archive(zip)
}

pub fn parse_bytes(data: &[u8]) -> Result<Document, Error> {
    let zip = zip::ZipArchive::new(std::io::Cursor::new(data))
        .map_err(|_| Error::InvalidDocx("data is not a ZIP archive".into()))?;
    parse_archive(zip)
}
