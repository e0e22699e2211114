use crate::error::Error;
use crate::model::{
    Alignment, CellBorder, CellBorders, CellVAlign, Edge, Paragraph, Run, Table, TableCell,
    TableRow, VMerge,
};

/// Character and paragraph formatting applied by [`Grid::set_text`].
#[derive(Clone, Debug)]
pub struct TextStyle {
    pub bold: bool,
    pub font_size: f32,
    pub font_name: String,
    pub alignment: Alignment,
}

impl TextStyle {
    pub fn new(font_name: &str, font_size: f32) -> Self {
        Self {
            bold: false,
            font_size,
            font_name: font_name.to_string(),
            alignment: Alignment::Center,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn sized(&self, font_size: f32) -> Self {
        Self {
            font_size,
            ..self.clone()
        }
    }
}

struct LogicalCell {
    row_span: usize,
    col_span: usize,
    paragraph: Paragraph,
    v_align: CellVAlign,
}

impl LogicalCell {
    fn single() -> Self {
        Self {
            row_span: 1,
            col_span: 1,
            paragraph: Paragraph::empty(Alignment::Left),
            v_align: CellVAlign::Top,
        }
    }
}

enum Slot {
    Origin(LogicalCell),
    Covered { row: usize, col: usize },
}

/// A fixed-size table under construction.
///
/// Every grid position starts as its own cell. [`Grid::merge`] folds a
/// rectangle into the cell at its top-left corner; the other positions in the
/// rectangle are then covered and refuse text. Borders are kept per grid
/// position so an edge can be restyled along a row or column regardless of
/// merges. [`Grid::to_table`] lowers the grid into WordprocessingML-shaped
/// rows (`gridSpan` for horizontal merges, `vMerge` for vertical ones).
pub struct Grid {
    rows: usize,
    cols: usize,
    col_widths: Vec<f32>,
    row_heights: Vec<Option<f32>>,
    slots: Vec<Slot>,
    borders: Vec<CellBorders>,
    merged: bool,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            col_widths: vec![0.0; cols],
            row_heights: vec![None; rows],
            slots: (0..rows * cols).map(|_| Slot::Origin(LogicalCell::single())).collect(),
            borders: vec![CellBorders::default(); rows * cols],
            merged: false,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    fn index(&self, row: usize, col: usize) -> Result<usize, Error> {
        if row >= self.rows || col >= self.cols {
            return Err(Error::Layout(format!(
                "cell ({row}, {col}) is outside the {}x{} grid",
                self.rows, self.cols
            )));
        }
        Ok(row * self.cols + col)
    }

    /// Width of one grid column in points, applied to every row.
    pub fn set_column_width(&mut self, col: usize, width: f32) -> Result<(), Error> {
        self.index(0, col)?;
        if self.merged {
            return Err(Error::Layout(format!(
                "column {col} resized after cells were merged"
            )));
        }
        self.col_widths[col] = width;
        Ok(())
    }

    /// Minimum row height in points.
    pub fn set_row_height(&mut self, row: usize, height: f32) -> Result<(), Error> {
        self.index(row, 0)?;
        self.row_heights[row] = Some(height);
        Ok(())
    }

    /// Merge the inclusive rectangle `(top, left)..=(bottom, right)`.
    ///
    /// Fails if the rectangle reaches outside the grid, overlaps an earlier
    /// merge, or covers a position that already holds text.
    pub fn merge(
        &mut self,
        top: usize,
        left: usize,
        bottom: usize,
        right: usize,
    ) -> Result<(), Error> {
        self.index(bottom, right)?;
        if top > bottom || left > right {
            return Err(Error::Layout(format!(
                "empty merge range ({top}, {left})..=({bottom}, {right})"
            )));
        }
        for r in top..=bottom {
            for c in left..=right {
                match &self.slots[r * self.cols + c] {
                    Slot::Origin(cell) if cell.row_span == 1 && cell.col_span == 1 => {
                        if !cell.paragraph.runs.is_empty() {
                            return Err(Error::Layout(format!(
                                "cell ({r}, {c}) already has text and cannot be merged"
                            )));
                        }
                    }
                    _ => {
                        return Err(Error::Layout(format!(
                            "merge ({top}, {left})..=({bottom}, {right}) overlaps \
                             an earlier merge at ({r}, {c})"
                        )));
                    }
                }
            }
        }
        for r in top..=bottom {
            for c in left..=right {
                let idx = r * self.cols + c;
                if r == top && c == left {
                    if let Slot::Origin(cell) = &mut self.slots[idx] {
                        cell.row_span = bottom - top + 1;
                        cell.col_span = right - left + 1;
                    }
                } else {
                    self.slots[idx] = Slot::Covered { row: top, col: left };
                }
            }
        }
        self.merged = true;
        log::debug!("Merged ({top}, {left})..=({bottom}, {right})");
        Ok(())
    }

    /// Position of the logical cell that owns `(row, col)`.
    pub fn origin_of(&self, row: usize, col: usize) -> Result<(usize, usize), Error> {
        match &self.slots[self.index(row, col)?] {
            Slot::Origin(_) => Ok((row, col)),
            Slot::Covered { row, col } => Ok((*row, *col)),
        }
    }

    /// `(row_span, col_span)` of the cell at `(row, col)`; `None` for a covered position.
    pub fn span(&self, row: usize, col: usize) -> Result<Option<(usize, usize)>, Error> {
        match &self.slots[self.index(row, col)?] {
            Slot::Origin(cell) => Ok(Some((cell.row_span, cell.col_span))),
            Slot::Covered { .. } => Ok(None),
        }
    }

    fn origin_mut(&mut self, row: usize, col: usize) -> Result<&mut LogicalCell, Error> {
        let idx = self.index(row, col)?;
        match &mut self.slots[idx] {
            Slot::Origin(cell) => Ok(cell),
            Slot::Covered { row: or, col: oc } => Err(Error::Layout(format!(
                "cell ({row}, {col}) is covered by the merged cell at ({or}, {oc})"
            ))),
        }
    }

    /// Replace the content of the cell at `(row, col)` with one paragraph.
    ///
    /// Empty `text` leaves an empty paragraph with no runs.
    pub fn set_text(
        &mut self,
        row: usize,
        col: usize,
        text: &str,
        style: &TextStyle,
    ) -> Result<(), Error> {
        let cell = self.origin_mut(row, col)?;
        let mut paragraph = Paragraph::empty(style.alignment);
        if !text.is_empty() {
            paragraph.runs.push(Run {
                text: text.to_string(),
                font_size: style.font_size,
                font_name: style.font_name.clone(),
                bold: style.bold,
            });
        }
        cell.paragraph = paragraph;
        Ok(())
    }

    pub fn text(&self, row: usize, col: usize) -> Result<String, Error> {
        match &self.slots[self.index(row, col)?] {
            Slot::Origin(cell) => Ok(cell.paragraph.text()),
            Slot::Covered { .. } => Ok(String::new()),
        }
    }

    /// Vertical alignment of the cell owning `(row, col)`.
    pub fn set_v_align(
        &mut self,
        row: usize,
        col: usize,
        v_align: CellVAlign,
    ) -> Result<(), Error> {
        let (row, col) = self.origin_of(row, col)?;
        self.origin_mut(row, col)?.v_align = v_align;
        Ok(())
    }

    pub fn set_border(
        &mut self,
        row: usize,
        col: usize,
        edge: Edge,
        border: CellBorder,
    ) -> Result<(), Error> {
        let idx = self.index(row, col)?;
        self.borders[idx].set(edge, border);
        Ok(())
    }

    pub fn border(&self, row: usize, col: usize, edge: Edge) -> Result<Option<CellBorder>, Error> {
        Ok(self.borders[self.index(row, col)?].edge(edge))
    }

    /// Borders of a physical cell spanning `span` columns from `(row, col)`.
    fn span_borders(&self, row: usize, col: usize, span: usize) -> CellBorders {
        let first = self.borders[row * self.cols + col];
        let last = self.borders[row * self.cols + col + span - 1];
        CellBorders {
            right: last.right,
            ..first
        }
    }

    fn span_width(&self, col: usize, span: usize) -> f32 {
        self.col_widths[col..col + span].iter().sum()
    }

    /// Lower the grid into table rows.
    ///
    /// Fails if any grid position is missing a border edge.
    pub fn to_table(&self) -> Result<Table, Error> {
        for (idx, borders) in self.borders.iter().enumerate() {
            if !borders.is_complete() {
                return Err(Error::Layout(format!(
                    "cell ({}, {}) does not have all four borders set",
                    idx / self.cols,
                    idx % self.cols
                )));
            }
        }

        let mut rows = Vec::with_capacity(self.rows);
        for r in 0..self.rows {
            let mut cells = Vec::new();
            let mut c = 0usize;
            while c < self.cols {
                match &self.slots[r * self.cols + c] {
                    Slot::Origin(cell) => {
                        let span = cell.col_span;
                        cells.push(TableCell {
                            width: self.span_width(c, span),
                            paragraphs: vec![cell.paragraph.clone()],
                            borders: self.span_borders(r, c, span),
                            grid_span: span as u16,
                            v_merge: if cell.row_span > 1 {
                                VMerge::Restart
                            } else {
                                VMerge::None
                            },
                            v_align: cell.v_align,
                        });
                        c += span;
                    }
                    Slot::Covered { row: or, col: oc } if *oc == c && *or < r => {
                        let Slot::Origin(origin) = &self.slots[or * self.cols + oc] else {
                            return Err(Error::Layout(format!(
                                "merged cell at ({or}, {oc}) has no origin"
                            )));
                        };
                        let span = origin.col_span;
                        cells.push(TableCell {
                            width: self.span_width(c, span),
                            paragraphs: vec![Paragraph::empty(origin.paragraph.alignment)],
                            borders: self.span_borders(r, c, span),
                            grid_span: span as u16,
                            v_merge: VMerge::Continue,
                            v_align: origin.v_align,
                        });
                        c += span;
                    }
                    Slot::Covered { row: or, col: oc } => {
                        return Err(Error::Layout(format!(
                            "cell ({r}, {c}) is covered by ({or}, {oc}) \
                             but is not in its first column"
                        )));
                    }
                }
            }
            rows.push(TableRow {
                cells,
                height: self.row_heights[r],
                height_exact: false,
            });
        }

        Ok(Table {
            col_widths: self.col_widths.clone(),
            rows,
            fixed_layout: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bordered(rows: usize, cols: usize) -> Grid {
        let mut grid = Grid::new(rows, cols);
        for r in 0..rows {
            for c in 0..cols {
                for edge in [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right] {
                    grid.set_border(r, c, edge, CellBorder::THIN).unwrap();
                }
            }
        }
        grid
    }

    #[test]
    fn merge_rejects_overlap() {
        let mut grid = Grid::new(3, 3);
        grid.merge(0, 0, 1, 1).unwrap();
        assert!(matches!(grid.merge(1, 1, 2, 2), Err(Error::Layout(_))));
        assert!(grid.merge(2, 0, 2, 2).is_ok());
    }

    #[test]
    fn merge_rejects_populated_cells() {
        let mut grid = Grid::new(2, 2);
        let style = TextStyle::new("Times New Roman", 11.0);
        grid.set_text(0, 1, "x", &style).unwrap();
        assert!(grid.merge(0, 0, 0, 1).is_err());
    }

    #[test]
    fn covered_cells_refuse_text() {
        let mut grid = Grid::new(2, 3);
        let style = TextStyle::new("Times New Roman", 11.0);
        grid.merge(0, 0, 0, 2).unwrap();
        assert!(grid.set_text(0, 2, "nope", &style).is_err());
        grid.set_text(0, 0, "title", &style).unwrap();
        assert_eq!(grid.text(0, 0).unwrap(), "title");
        assert_eq!(grid.origin_of(0, 2).unwrap(), (0, 0));
        assert_eq!(grid.span(0, 0).unwrap(), Some((1, 3)));
        assert_eq!(grid.span(0, 1).unwrap(), None);
    }

    #[test]
    fn widths_are_fixed_once_merged() {
        let mut grid = Grid::new(2, 2);
        grid.set_column_width(0, 36.0).unwrap();
        grid.merge(0, 0, 1, 0).unwrap();
        assert!(grid.set_column_width(1, 36.0).is_err());
    }

    #[test]
    fn out_of_range_is_an_error() {
        let mut grid = Grid::new(2, 2);
        assert!(grid.merge(0, 0, 2, 0).is_err());
        assert!(grid.set_border(0, 5, Edge::Top, CellBorder::THIN).is_err());
    }

    #[test]
    fn lowering_emits_grid_span_and_vmerge() {
        let mut grid = bordered(3, 3);
        for c in 0..3 {
            grid.set_column_width(c, 10.0 * (c + 1) as f32).unwrap();
        }
        grid.merge(0, 0, 0, 2).unwrap();
        grid.merge(1, 0, 2, 0).unwrap();
        grid.set_border(1, 2, Edge::Right, CellBorder::THICK).unwrap();
        grid.set_border(2, 0, Edge::Bottom, CellBorder::THICK).unwrap();

        let table = grid.to_table().unwrap();
        assert_eq!(table.rows.len(), 3);

        let title = &table.rows[0].cells;
        assert_eq!(title.len(), 1);
        assert_eq!(title[0].grid_span, 3);
        assert_eq!(title[0].width, 60.0);

        let row1 = &table.rows[1].cells;
        assert_eq!(row1.len(), 3);
        assert_eq!(row1[0].v_merge, VMerge::Restart);
        assert_eq!(row1[2].borders.right, Some(CellBorder::THICK));

        let row2 = &table.rows[2].cells;
        assert_eq!(row2[0].v_merge, VMerge::Continue);
        assert_eq!(row2[0].borders.bottom, Some(CellBorder::THICK));
        assert_eq!(row2[1].v_merge, VMerge::None);
    }

    #[test]
    fn lowering_requires_every_border() {
        let mut grid = bordered(2, 2);
        grid.borders[3] = CellBorders::default();
        assert!(grid.to_table().is_err());
    }
}
