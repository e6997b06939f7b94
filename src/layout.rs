//! Display-line bookkeeping kept beside an alignment.
//!
//! A wrapping display may need several screen lines for one row. Those
//! counts change with window width, so they live here, keyed by row index,
//! and the [`crate::Diff3LineVector`] itself stays immutable.

use crate::diff3::Diff3LineVector;

/// Screen lines needed per row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayLayout {
    lines_needed: Vec<usize>,
}

impl DisplayLayout {
    /// One screen line per row.
    pub fn new(rows: usize) -> Self {
        Self {
            lines_needed: vec![1; rows],
        }
    }

    pub fn for_vector(vector: &Diff3LineVector) -> Self {
        Self::new(vector.len())
    }

    pub fn rows(&self) -> usize {
        self.lines_needed.len()
    }

    pub fn lines_needed(&self, row: usize) -> usize {
        self.lines_needed.get(row).copied().unwrap_or(0)
    }

    /// Rows outside the layout are ignored.
    pub fn set_lines_needed(&mut self, row: usize, lines: usize) {
        if let Some(slot) = self.lines_needed.get_mut(row) {
            *slot = lines;
        }
    }

    pub fn total_lines(&self) -> usize {
        self.lines_needed.iter().sum()
    }

    /// First screen line of `row`; past the end, the total line count.
    pub fn display_line_of(&self, row: usize) -> usize {
        self.lines_needed[..row.min(self.rows())].iter().sum()
    }

    /// Row shown on screen line `line`.
    pub fn row_of_display_line(&self, line: usize) -> Option<usize> {
        let mut start = 0;
        for (row, &needed) in self.lines_needed.iter().enumerate() {
            if line < start + needed {
                return Some(row);
            }
            start += needed;
        }
        None
    }
}
