use std::fmt;

use crate::model::{Document, POINTS_PER_INCH, VMerge};

/// One physical cell as stored in a row.
#[derive(Clone, Debug, PartialEq)]
pub struct CellSummary {
    pub grid_col: usize,
    pub span: usize,
    pub v_merge: VMerge,
    pub text: String,
}

/// Shape of the first table in a document.
#[derive(Clone, Debug, PartialEq)]
pub struct TableSummary {
    pub grid_cols: usize,
    pub col_widths_in: Vec<f32>,
    pub rows: Vec<Vec<CellSummary>>,
}

impl TableSummary {
    pub fn from_document(doc: &Document) -> Option<Self> {
        let table = doc.tables().next()?;
        let rows = table
            .rows
            .iter()
            .map(|row| {
                let mut grid_col = 0usize;
                row.cells
                    .iter()
                    .map(|cell| {
                        let span = cell.grid_span.max(1) as usize;
                        let summary = CellSummary {
                            grid_col,
                            span,
                            v_merge: cell.v_merge,
                            text: cell.text(),
                        };
                        grid_col += span;
                        summary
                    })
                    .collect()
            })
            .collect();
        Some(Self {
            grid_cols: table.col_widths.len(),
            col_widths_in: table
                .col_widths
                .iter()
                .map(|w| w / POINTS_PER_INCH)
                .collect(),
            rows,
        })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cell whose span covers `grid_col` in `row`.
    pub fn cell_at(&self, row: usize, grid_col: usize) -> Option<&CellSummary> {
        self.rows
            .get(row)?
            .iter()
            .find(|c| c.grid_col <= grid_col && grid_col < c.grid_col + c.span)
    }
}

impl fmt::Display for TableSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} rows x {} columns", self.rows.len(), self.grid_cols)?;
        let widths: Vec<String> = self
            .col_widths_in
            .iter()
            .map(|w| format!("{w:.2}in"))
            .collect();
        writeln!(f, "column widths: {}", widths.join(", "))?;
        for (ri, row) in self.rows.iter().enumerate() {
            let cells: Vec<String> = row
                .iter()
                .map(|c| {
                    let merge = match c.v_merge {
                        VMerge::Restart => "v+",
                        VMerge::Continue => "v|",
                        VMerge::None => "",
                    };
                    let range = if c.span > 1 {
                        format!("..{}", c.grid_col + c.span - 1)
                    } else {
                        String::new()
                    };
                    format!("[{}{range}{merge} {:?}]", c.grid_col, c.text)
                })
                .collect();
            writeln!(f, "{ri:>2}: {}", cells.join(" "))?;
        }
        Ok(())
    }
}
