//! The projector's output: a row-major matrix of single-cell glyphs.

use std::fmt;

use crate::glyph::{BLANK, FILL};

/// Rendered glyph grid. Row 0 is the top of the pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    columns: usize,
    lines: Vec<String>,
    cursors: Vec<usize>,
}

impl Grid {
    /// Assemble a grid from top-to-bottom column strips.
    ///
    /// Every strip must hold exactly `rows` glyphs.
    pub(crate) fn from_columns(strips: &[Vec<char>], cursors: Vec<usize>, rows: usize) -> Self {
        let lines = (0..rows)
            .map(|row| strips.iter().map(|strip| strip[row]).collect())
            .collect();
        Self {
            columns: strips.len(),
            lines,
            cursors,
        }
    }

    pub fn rows(&self) -> usize {
        self.lines.len()
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Rows as strings, top first. Each holds `columns()` chars, not bytes.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn cell(&self, column: usize, row: usize) -> Option<char> {
        self.lines.get(row)?.chars().nth(column)
    }

    /// The row each column's edge glyph was drawn on.
    pub fn cursor_rows(&self) -> &[usize] {
        &self.cursors
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(line)?;
        }
        Ok(())
    }
}

/// One column, top to bottom: blanks, the edge glyph at `cursor`, then fill.
pub(crate) fn draw_column(cursor: usize, edge: char, rows: usize) -> Vec<char> {
    let mut strip = Vec::with_capacity(rows);
    strip.extend(std::iter::repeat_n(BLANK, cursor));
    strip.push(edge);
    strip.extend(std::iter::repeat_n(FILL, rows - cursor - 1));
    strip
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_partitions_rows() {
        assert_eq!(draw_column(0, '^', 1), vec!['^']);
        assert_eq!(draw_column(2, '/', 4), vec![' ', ' ', '/', '█']);
        assert_eq!(draw_column(3, '-', 4), vec![' ', ' ', ' ', '-']);
    }

    #[test]
    fn transpose_is_row_major() {
        let strips = vec![draw_column(0, 'a', 3), draw_column(1, 'b', 3)];
        let grid = Grid::from_columns(&strips, vec![0, 1], 3);
        assert_eq!(grid.lines(), &["a ", "█b", "██"]);
        assert_eq!(grid.cell(1, 1), Some('b'));
        assert_eq!(grid.cell(2, 0), None);
        assert_eq!(grid.to_string(), "a \n█b\n██");
    }

    #[test]
    fn multibyte_glyphs_count_as_one_cell() {
        let strips = vec![draw_column(0, '▃', 2); 5];
        let grid = Grid::from_columns(&strips, vec![0; 5], 2);
        assert_eq!(grid.columns(), 5);
        for line in grid.lines() {
            assert_eq!(line.chars().count(), 5);
            assert!(line.len() > 5);
        }
    }
}
