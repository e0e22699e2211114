use std::io::{Cursor, Read, Seek};

use docx_rs::{
    AlignmentType, BorderType, BreakType, Docx, HeightRule, LineSpacing, LineSpacingType,
    PageMargin, Paragraph, Run, RunFonts, Table, TableCell, TableCellBorder,
    TableCellBorderPosition, TableLayoutType, TableRow, VAlignType, VMergeType, WidthType,
};

use crate::error::Error;
use crate::model::{self, Alignment, Block, BorderStyle, CellBorder, CellVAlign, Document, VMerge};

use super::pts_to_twips;
use super::styles::{DEFAULT_FONT, DEFAULT_FONT_SIZE};

fn twips(pts: f32) -> usize {
    pts_to_twips(pts).max(0) as usize
}

fn half_points(pts: f32) -> usize {
    (pts * 2.0).round().max(0.0) as usize
}

fn fonts(name: &str) -> RunFonts {
    RunFonts::new()
        .ascii(name)
        .hi_ansi(name)
        .east_asia(name)
        .cs(name)
}

fn alignment_type(alignment: Alignment) -> AlignmentType {
    match alignment {
        Alignment::Left => AlignmentType::Left,
        Alignment::Center => AlignmentType::Center,
        Alignment::Right => AlignmentType::Right,
        Alignment::Justify => AlignmentType::Both,
    }
}

fn border_type(style: BorderStyle) -> BorderType {
    match style {
        BorderStyle::Single => BorderType::Single,
        BorderStyle::Double => BorderType::Double,
        BorderStyle::Dotted => BorderType::Dotted,
        BorderStyle::Dashed => BorderType::Dashed,
    }
}

fn line_spacing(para: &model::Paragraph) -> LineSpacing {
    let spacing = LineSpacing::new()
        .before(twips(para.space_before) as u32)
        .after(twips(para.space_after) as u32);
    match para.line_spacing {
        Some(model::LineSpacing::Auto(mult)) => spacing
            .line((mult * 240.0).round() as i32)
            .line_rule(LineSpacingType::Auto),
        Some(model::LineSpacing::Exact(pts)) => spacing
            .line(pts_to_twips(pts) as i32)
            .line_rule(LineSpacingType::Exact),
        Some(model::LineSpacing::AtLeast(pts)) => spacing
            .line(pts_to_twips(pts) as i32)
            .line_rule(LineSpacingType::AtLeast),
        None => spacing,
    }
}

/// `\n` in the text becomes a text-wrapping break inside the run.
fn build_run(run: &model::Run) -> Run {
    let mut out = Run::new().fonts(fonts(&run.font_name)).size(half_points(run.font_size));
    if run.bold {
        out = out.bold();
    }
    for (i, line) in run.text.split('\n').enumerate() {
        if i > 0 {
            out = out.add_break(BreakType::TextWrapping);
        }
        if !line.is_empty() {
            out = out.add_text(line);
        }
    }
    out
}

fn build_paragraph(para: &model::Paragraph) -> Paragraph {
    para.runs.iter().fold(
        Paragraph::new()
            .align(alignment_type(para.alignment))
            .line_spacing(line_spacing(para)),
        |p, run| p.add_run(build_run(run)),
    )
}

fn cell_border(position: TableCellBorderPosition, border: CellBorder) -> TableCellBorder {
    let [r, g, b] = border.color;
    TableCellBorder::new(position)
        .border_type(border_type(border.style))
        .size(border.weight as usize)
        .color(format!("{r:02X}{g:02X}{b:02X}"))
}

fn build_cell(cell: &model::TableCell) -> Result<TableCell, Error> {
    let mut out = TableCell::new()
        .width(twips(cell.width), WidthType::Dxa)
        .vertical_align(match cell.v_align {
            CellVAlign::Top => VAlignType::Top,
            CellVAlign::Center => VAlignType::Center,
            CellVAlign::Bottom => VAlignType::Bottom,
        });
    if cell.grid_span > 1 {
        out = out.grid_span(cell.grid_span as usize);
    }
    match cell.v_merge {
        VMerge::Restart => out = out.vertical_merge(VMergeType::Restart),
        VMerge::Continue => out = out.vertical_merge(VMergeType::Continue),
        VMerge::None => {}
    }

    for (name, position, edge) in [
        ("top", TableCellBorderPosition::Top, cell.borders.top),
        ("left", TableCellBorderPosition::Left, cell.borders.left),
        ("bottom", TableCellBorderPosition::Bottom, cell.borders.bottom),
        ("right", TableCellBorderPosition::Right, cell.borders.right),
    ] {
        let border = edge.ok_or_else(|| Error::Layout(format!("cell has no {name} border")))?;
        out = out.set_border(cell_border(position, border));
    }

    // A cell must end with a paragraph.
    if cell.paragraphs.is_empty() {
        out = out.add_paragraph(build_paragraph(&model::Paragraph::empty(Alignment::Left)));
    }
    for para in &cell.paragraphs {
        out = out.add_paragraph(build_paragraph(para));
    }
    Ok(out)
}

fn build_row(row: &model::TableRow) -> Result<TableRow, Error> {
    let cells = row.cells.iter().map(build_cell).collect::<Result<Vec<_>, _>>()?;
    let mut out = TableRow::new(cells);
    if let Some(height) = row.height {
        let rule = if row.height_exact {
            HeightRule::Exact
        } else {
            HeightRule::AtLeast
        };
        out = out.row_height(pts_to_twips(height) as f32).height_rule(rule);
    }
    Ok(out)
}

fn build_table(table: &model::Table) -> Result<Table, Error> {
    let rows = table.rows.iter().map(build_row).collect::<Result<Vec<_>, _>>()?;
    let mut out = Table::new(rows).set_grid(table.col_widths.iter().map(|w| twips(*w)).collect());
    if table.fixed_layout {
        out = out.layout(TableLayoutType::Fixed);
    }
    Ok(out)
}

fn build_docx(doc: &Document) -> Result<Docx, Error> {
    let section = &doc.section;
    let mut docx = Docx::new()
        .default_fonts(fonts(DEFAULT_FONT))
        .default_size(half_points(DEFAULT_FONT_SIZE))
        .page_size(
            twips(section.page_width) as u32,
            twips(section.page_height) as u32,
        )
        .page_margin(
            PageMargin::new()
                .top(pts_to_twips(section.margin_top) as i32)
                .bottom(pts_to_twips(section.margin_bottom) as i32)
                .left(pts_to_twips(section.margin_left) as i32)
                .right(pts_to_twips(section.margin_right) as i32),
        );

    for block in &doc.blocks {
        docx = match block {
            Block::Paragraph(para) => docx.add_paragraph(build_paragraph(para)),
            Block::Table(table) => docx.add_table(build_table(table)?),
        };
    }
    // The body may not end with a table.
    if matches!(doc.blocks.last(), Some(Block::Table(_)) | None) {
        docx = docx.add_paragraph(build_paragraph(&model::Paragraph::empty(Alignment::Left)));
    }
    Ok(docx)
}

/// Copy every entry of a packed archive with a fixed modification time so the
/// package bytes do not depend on the clock.
fn normalize_timestamps<R: Read + Seek>(packed: R) -> Result<Vec<u8>, Error> {
    let mut archive = zip::ZipArchive::new(packed)?;
    let mut out = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for i in 0..archive.len() {
        let entry = archive.by_index_raw(i)?;
        out.raw_copy_file_touch(entry, zip::DateTime::default(), None)?;
    }
    Ok(out.finish()?.into_inner())
}

/// Serialize `doc` into a DOCX package.
pub fn to_bytes(doc: &Document) -> Result<Vec<u8>, Error> {
    let docx = build_docx(doc)?;
    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| Error::Pack(e.to_string()))?;
    buf.set_position(0);
    let bytes = normalize_timestamps(buf)?;
    log::debug!("Packed DOCX ({} bytes)", bytes.len());
    Ok(bytes)
}
