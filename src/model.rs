pub const POINTS_PER_INCH: f32 = 72.0;

pub fn inches(value: f32) -> f32 {
    value * POINTS_PER_INCH
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LineSpacing {
    Auto(f32),    // multiplier (e.g. 1.0 = single)
    Exact(f32),   // fixed height in points
    AtLeast(f32), // minimum height in points
}

pub struct SectionProperties {
    pub page_width: f32,
    pub page_height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
}

impl Default for SectionProperties {
    /// US Letter with one-inch margins, what Word assumes when `w:sectPr` is silent.
    fn default() -> Self {
        Self {
            page_width: 612.0,
            page_height: 792.0,
            margin_top: 72.0,
            margin_bottom: 72.0,
            margin_left: 72.0,
            margin_right: 72.0,
        }
    }
}

pub struct Document {
    pub section: SectionProperties,
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Table(t) => Some(t),
            Block::Paragraph(_) => None,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Paragraph {
    pub runs: Vec<Run>,
    pub alignment: Alignment,
    pub space_before: f32,
    pub space_after: f32,
    pub line_spacing: Option<LineSpacing>,
}

impl Paragraph {
    /// Paragraph with no runs, zero spacing and single line spacing.
    pub fn empty(alignment: Alignment) -> Self {
        Self {
            runs: Vec::new(),
            alignment,
            space_before: 0.0,
            space_after: 0.0,
            line_spacing: Some(LineSpacing::Auto(1.0)),
        }
    }

    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// `text` may contain `\n`, written as a line break inside the run.
#[derive(Clone, Debug, PartialEq)]
pub struct Run {
    pub text: String,
    pub font_size: f32,
    pub font_name: String,
    pub bold: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VMerge {
    None,
    Restart,
    Continue,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CellVAlign {
    Top,
    Center,
    Bottom,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BorderStyle {
    Single,
    Double,
    Dotted,
    Dashed,
}

impl BorderStyle {
    pub fn as_wml(self) -> &'static str {
        match self {
            BorderStyle::Single => "single",
            BorderStyle::Double => "double",
            BorderStyle::Dotted => "dotted",
            BorderStyle::Dashed => "dashed",
        }
    }

    pub fn from_wml(val: &str) -> Option<Self> {
        match val {
            "single" => Some(BorderStyle::Single),
            "double" => Some(BorderStyle::Double),
            "dotted" => Some(BorderStyle::Dotted),
            "dashed" => Some(BorderStyle::Dashed),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellBorder {
    pub weight: u8, // eighths of a point
    pub style: BorderStyle,
    pub color: [u8; 3], // RGB
}

impl CellBorder {
    pub const THIN: CellBorder = CellBorder::single(4);
    pub const THICK: CellBorder = CellBorder::single(12);

    pub const fn single(weight: u8) -> Self {
        Self {
            weight,
            style: BorderStyle::Single,
            color: [0, 0, 0],
        }
    }

    pub fn width_pt(&self) -> f32 {
        self.weight as f32 / 8.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

/// `None` on an edge means the border was never set; the writer refuses those.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CellBorders {
    pub top: Option<CellBorder>,
    pub bottom: Option<CellBorder>,
    pub left: Option<CellBorder>,
    pub right: Option<CellBorder>,
}

impl CellBorders {
    pub fn all(border: CellBorder) -> Self {
        Self {
            top: Some(border),
            bottom: Some(border),
            left: Some(border),
            right: Some(border),
        }
    }

    pub fn edge(&self, edge: Edge) -> Option<CellBorder> {
        match edge {
            Edge::Top => self.top,
            Edge::Bottom => self.bottom,
            Edge::Left => self.left,
            Edge::Right => self.right,
        }
    }

    pub fn set(&mut self, edge: Edge, border: CellBorder) {
        match edge {
            Edge::Top => self.top = Some(border),
            Edge::Bottom => self.bottom = Some(border),
            Edge::Left => self.left = Some(border),
            Edge::Right => self.right = Some(border),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.top.is_some() && self.bottom.is_some() && self.left.is_some() && self.right.is_some()
    }
}

pub struct Table {
    pub col_widths: Vec<f32>, // points
    pub rows: Vec<TableRow>,
    pub fixed_layout: bool,
}

pub struct TableRow {
    pub cells: Vec<TableCell>,
    pub height: Option<f32>,
    pub height_exact: bool,
}

pub struct TableCell {
    pub width: f32, // points
    pub paragraphs: Vec<Paragraph>,
    pub borders: CellBorders,
    pub grid_span: u16,
    pub v_merge: VMerge,
    pub v_align: CellVAlign,
}

impl TableCell {
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
}
