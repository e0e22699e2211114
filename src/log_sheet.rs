//! Layout of the internship work-hours log sheet.
//!
//! Everything here is fixed: one A4 page holding a single table with a
//! merged title row, a two-row header, twelve blank rows for entries and a
//! "Total hours" row at the bottom.

use crate::error::Error;
use crate::grid::{Grid, TextStyle};
use crate::model::{Block, CellBorder, CellVAlign, Document, Edge, SectionProperties, inches};

pub const TITLE: &str = "LOG SHEET OF WORK PERFORMED DURING INTERNSHIP";
pub const FONT_NAME: &str = "Times New Roman";

pub const COLS: usize = 7;
pub const BLANK_ROWS: usize = 12;
/// Title + two header rows + blank rows + total row.
pub const ROWS: usize = 1 + 2 + BLANK_ROWS + 1;

pub const TITLE_ROW: usize = 0;
pub const HEADER_MAIN_ROW: usize = 1;
pub const HEADER_SUB_ROW: usize = 2;
pub const FIRST_BLANK_ROW: usize = 3;
pub const TOTAL_ROW: usize = ROWS - 1;

/// Date, Time From, Time To, Total Hours, Details, Signature (Authorised), Signature (Student).
pub const COLUMN_WIDTHS_IN: [f32; COLS] = [0.80, 0.60, 0.60, 0.70, 2.97, 0.90, 0.90];

pub const TITLE_ROW_HEIGHT_IN: f32 = 0.42;
pub const ROW_HEIGHT_IN: f32 = 0.45;

pub const PAGE_WIDTH_IN: f32 = 8.27;
pub const PAGE_HEIGHT_IN: f32 = 11.69;
pub const MARGIN_SIDE_IN: f32 = 0.4;
pub const MARGIN_VERTICAL_IN: f32 = 0.35;

const TITLE_SIZE: f32 = 13.0;
const LABEL_SIZE: f32 = 11.0;
const SIGNATURE_SIZE: f32 = 10.0;

/// Header cells spanning both header rows: (column, label, font size).
const STACKED_HEADERS: [(usize, &str, f32); 5] = [
    (0, "Date", LABEL_SIZE),
    (3, "Total\nHours", LABEL_SIZE),
    (4, "Details of work done", LABEL_SIZE),
    (5, "Signature\nof\nAuthorised\nPerson", SIGNATURE_SIZE),
    (6, "Signature\nof student", SIGNATURE_SIZE),
];

fn page_geometry() -> SectionProperties {
    SectionProperties {
        page_width: inches(PAGE_WIDTH_IN),
        page_height: inches(PAGE_HEIGHT_IN),
        margin_top: inches(MARGIN_VERTICAL_IN),
        margin_bottom: inches(MARGIN_VERTICAL_IN),
        margin_left: inches(MARGIN_SIDE_IN),
        margin_right: inches(MARGIN_SIDE_IN),
    }
}

fn apply_default_cell_format(grid: &mut Grid) -> Result<(), Error> {
    for r in 0..grid.rows() {
        let height = if r == TITLE_ROW {
            TITLE_ROW_HEIGHT_IN
        } else {
            ROW_HEIGHT_IN
        };
        grid.set_row_height(r, inches(height))?;
        for c in 0..grid.cols() {
            grid.set_v_align(r, c, CellVAlign::Center)?;
            for edge in [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right] {
                grid.set_border(r, c, edge, CellBorder::THIN)?;
            }
        }
    }
    Ok(())
}

fn populate_title(grid: &mut Grid, style: &TextStyle) -> Result<(), Error> {
    grid.merge(TITLE_ROW, 0, TITLE_ROW, COLS - 1)?;
    grid.set_text(TITLE_ROW, 0, TITLE, &style.sized(TITLE_SIZE))
}

fn populate_header(grid: &mut Grid, style: &TextStyle) -> Result<(), Error> {
    for (col, _, _) in STACKED_HEADERS {
        grid.merge(HEADER_MAIN_ROW, col, HEADER_SUB_ROW, col)?;
    }
    grid.merge(HEADER_MAIN_ROW, 1, HEADER_MAIN_ROW, 2)?;

    grid.set_text(HEADER_MAIN_ROW, 1, "Time", style)?;
    grid.set_text(HEADER_SUB_ROW, 1, "From", style)?;
    grid.set_text(HEADER_SUB_ROW, 2, "To", style)?;
    for (col, label, size) in STACKED_HEADERS {
        grid.set_text(HEADER_MAIN_ROW, col, label, &style.sized(size))?;
    }
    Ok(())
}

fn clear_blank_rows(grid: &mut Grid, style: &TextStyle) -> Result<(), Error> {
    for r in FIRST_BLANK_ROW..FIRST_BLANK_ROW + BLANK_ROWS {
        for c in 0..COLS {
            grid.set_text(r, c, "", style)?;
        }
    }
    Ok(())
}

fn populate_total_row(grid: &mut Grid, style: &TextStyle) -> Result<(), Error> {
    grid.merge(TOTAL_ROW, 0, TOTAL_ROW, 2)?;
    grid.set_text(TOTAL_ROW, 0, "Total hours", style)
}

/// Thick outer frame plus a thick rule under the title.
fn apply_emphasis_borders(grid: &mut Grid) -> Result<(), Error> {
    let last_row = grid.rows() - 1;
    let last_col = grid.cols() - 1;
    for c in 0..grid.cols() {
        grid.set_border(TITLE_ROW, c, Edge::Top, CellBorder::THICK)?;
        grid.set_border(last_row, c, Edge::Bottom, CellBorder::THICK)?;
    }
    for r in 0..grid.rows() {
        grid.set_border(r, 0, Edge::Left, CellBorder::THICK)?;
        grid.set_border(r, last_col, Edge::Right, CellBorder::THICK)?;
    }
    for c in 0..grid.cols() {
        grid.set_border(TITLE_ROW, c, Edge::Bottom, CellBorder::THICK)?;
    }
    Ok(())
}

/// Lay out the log sheet grid. Merges always precede text in a region.
pub fn build_grid() -> Result<Grid, Error> {
    let mut grid = Grid::new(ROWS, COLS);
    for (col, width) in COLUMN_WIDTHS_IN.iter().enumerate() {
        grid.set_column_width(col, inches(*width))?;
    }
    apply_default_cell_format(&mut grid)?;
    log::debug!("Created {ROWS}x{COLS} grid with default borders");

    let label = TextStyle::new(FONT_NAME, LABEL_SIZE).bold();
    populate_title(&mut grid, &label)?;
    populate_header(&mut grid, &label)?;
    clear_blank_rows(&mut grid, &TextStyle::new(FONT_NAME, LABEL_SIZE))?;
    populate_total_row(&mut grid, &label)?;
    apply_emphasis_borders(&mut grid)?;
    log::debug!("Populated title, header and total rows");

    Ok(grid)
}

pub fn build_document() -> Result<Document, Error> {
    let table = build_grid()?.to_table()?;
    Ok(Document {
        section: page_geometry(),
        blocks: vec![Block::Table(table)],
    })
}
