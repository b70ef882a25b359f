//! Glyph selection strategies.
//!
//! A strategy decides how many resampled points feed each terminal column and
//! which single glyph sits on that column's cursor row. Everything above the
//! cursor is [`BLANK`], everything below is [`FILL`].
//!
//! | strategy | points per column | glyphs                     |
//! |----------|-------------------|----------------------------|
//! | `shade`  | 1                 | `▁▂▃▄▅▆▇█` (eighths)       |
//! | `slope`  | 2 (left, right)   | `-` `/` `\`                |
//! | `peak`   | 3 (l, center, r)  | `^` `v` `-` `/` `\`        |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Background above the cursor row.
pub const BLANK: char = ' ';
/// Solid fill below the cursor row.
pub const FILL: char = '█';

/// Cell coverage in eighths, indexed by how many eighths are filled.
const SHADES: [char; 9] = [BLANK, '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// How a strategy wants the series resampled and sliced into columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleLayout {
    /// Number of points to resample the series to.
    pub width: usize,
    /// Whether the last point lands exactly on the newest sample.
    pub fencepost: bool,
    /// Points handed to the strategy per column.
    pub window: usize,
    /// Offset between the first points of neighbouring columns.
    pub stride: usize,
}

impl SampleLayout {
    /// The slice of scaled positions that belongs to `column`.
    ///
    /// A layout narrower than its columns need gets the window shifted back
    /// to end on the last position, or shortened if there are fewer points.
    pub fn neighbors<'a>(&self, positions: &'a [f64], column: usize) -> &'a [f64] {
        let start = column * self.stride;
        match positions.get(start..start + self.window) {
            Some(window) => window,
            None => {
                let window = self.window.min(positions.len());
                &positions[positions.len() - window..]
            }
        }
    }
}

/// Row index of the cell a scaled position falls in.
fn cell(position: f64) -> usize {
    position.max(0.0) as usize
}

/// Chooses a column's edge glyph from its neighbouring scaled row positions.
pub trait GlyphStrategy: fmt::Debug + Send + Sync {
    fn kind(&self) -> StrategyKind;

    fn layout(&self, columns: usize) -> SampleLayout;

    fn select_glyph(&self, neighbors: &[f64]) -> char;

    /// Mean cell of the neighbours (integer division), clamped to the grid.
    fn cursor_row(&self, neighbors: &[f64], rows: usize) -> usize {
        let sum: usize = neighbors.iter().map(|&p| cell(p)).sum();
        (sum / neighbors.len().max(1)).min(rows.saturating_sub(1))
    }
}

/// Sub-row shading: the fractional part of the position picks an eighth block.
#[derive(Debug, Clone, Copy, Default)]
pub struct Shade;

impl GlyphStrategy for Shade {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Shade
    }

    fn layout(&self, columns: usize) -> SampleLayout {
        SampleLayout {
            width: columns,
            fencepost: true,
            window: 1,
            stride: 1,
        }
    }

    fn select_glyph(&self, neighbors: &[f64]) -> char {
        // A position of 3.25 means the curve crosses a quarter of the way down
        // row 3, so the lower three quarters of that cell are filled. Covered
        // eighths round up, so the edge cell is never blank.
        let Some(&position) = neighbors.first() else {
            return BLANK;
        };
        let above = (position.fract() * 8.0) as usize;
        SHADES[8 - above.min(7)]
    }
}

fn slope_glyph(left: usize, right: usize) -> char {
    use std::cmp::Ordering;
    match left.cmp(&right) {
        Ordering::Equal => '-',
        // Larger row index is lower on screen, so the curve rises.
        Ordering::Greater => '/',
        Ordering::Less => '\\',
    }
}

/// Two-point slope: compares the column's left and right edges.
#[derive(Debug, Clone, Copy, Default)]
pub struct Slope;

impl GlyphStrategy for Slope {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Slope
    }

    fn layout(&self, columns: usize) -> SampleLayout {
        SampleLayout {
            width: columns + 1,
            fencepost: true,
            window: 2,
            stride: 1,
        }
    }

    fn select_glyph(&self, neighbors: &[f64]) -> char {
        slope_glyph(cell(neighbors[0]), cell(neighbors[1]))
    }
}

/// Three-point slope: marks local peaks and troughs at the column centre.
#[derive(Debug, Clone, Copy, Default)]
pub struct Peak;

impl GlyphStrategy for Peak {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Peak
    }

    fn layout(&self, columns: usize) -> SampleLayout {
        SampleLayout {
            width: 2 * columns + 1,
            fencepost: true,
            window: 3,
            stride: 2,
        }
    }

    fn select_glyph(&self, neighbors: &[f64]) -> char {
        let left = cell(neighbors[0]);
        let center = cell(neighbors[1]);
        let right = cell(neighbors[2]);
        if left == center && center == right {
            '-'
        } else if center < left && center < right {
            '^'
        } else if center > left && center > right {
            'v'
        } else {
            slope_glyph(left, right)
        }
    }
}

/// Named strategy, as selected on the command line or cycled in the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    #[default]
    Shade,
    Slope,
    Peak,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 3] = [Self::Shade, Self::Slope, Self::Peak];

    pub fn next(self) -> Self {
        match self {
            Self::Shade => Self::Slope,
            Self::Slope => Self::Peak,
            Self::Peak => Self::Shade,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Shade => "shade",
            Self::Slope => "slope",
            Self::Peak => "peak",
        }
    }

    pub fn strategy(self) -> Box<dyn GlyphStrategy> {
        match self {
            Self::Shade => Box::new(Shade),
            Self::Slope => Box::new(Slope),
            Self::Peak => Box::new(Peak),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "shade" | "blocks" => Ok(Self::Shade),
            "slope" | "2" => Ok(Self::Slope),
            "peak" | "3" => Ok(Self::Peak),
            other => Err(format!("unknown glyph strategy '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shade_whole_row_is_full_block() {
        assert_eq!(Shade.select_glyph(&[4.0]), '█');
    }

    #[test]
    fn shade_uses_eighths() {
        assert_eq!(Shade.select_glyph(&[2.5]), '▄');
        assert_eq!(Shade.select_glyph(&[2.875]), '▁');
        assert_eq!(Shade.select_glyph(&[2.125]), '▇');
    }

    #[test]
    fn shade_near_cell_bottom_keeps_a_sliver() {
        assert_eq!(Shade.select_glyph(&[2.95]), '▁');
        assert_eq!(Shade.select_glyph(&[2.99]), '▁');
        assert_eq!(Shade.select_glyph(&[2.9]), '▁');
        assert_eq!(Shade.select_glyph(&[2.8]), '▂');
    }

    #[test]
    fn slope_glyphs() {
        assert_eq!(Slope.select_glyph(&[3.2, 3.7]), '-');
        assert_eq!(Slope.select_glyph(&[5.0, 2.0]), '/');
        assert_eq!(Slope.select_glyph(&[1.0, 4.0]), '\\');
    }

    #[test]
    fn peak_glyphs() {
        assert_eq!(Peak.select_glyph(&[4.0, 1.0, 3.0]), '^');
        assert_eq!(Peak.select_glyph(&[1.0, 4.0, 2.0]), 'v');
        assert_eq!(Peak.select_glyph(&[2.0, 2.5, 2.9]), '-');
        assert_eq!(Peak.select_glyph(&[4.0, 3.0, 1.0]), '/');
        assert_eq!(Peak.select_glyph(&[1.0, 1.0, 4.0]), '\\');
    }

    #[test]
    fn cursor_row_averages_with_integer_division() {
        assert_eq!(Peak.cursor_row(&[1.9, 2.0, 4.5], 10), 2);
        assert_eq!(Slope.cursor_row(&[1.0, 4.0], 10), 2);
        assert_eq!(Shade.cursor_row(&[7.6], 10), 7);
    }

    #[test]
    fn cursor_row_is_clamped() {
        assert_eq!(Shade.cursor_row(&[9.0], 4), 3);
        assert_eq!(Shade.cursor_row(&[-2.0], 4), 0);
    }

    #[test]
    fn layouts_cover_every_column() {
        for kind in StrategyKind::ALL {
            let strategy = kind.strategy();
            let layout = strategy.layout(7);
            let positions = vec![0.0; layout.width];
            for column in 0..7 {
                assert_eq!(layout.neighbors(&positions, column).len(), layout.window);
            }
        }
    }

    #[test]
    fn short_layout_clamps_window() {
        let layout = SampleLayout {
            width: 4,
            fencepost: true,
            window: 3,
            stride: 2,
        };
        let positions = [0.0, 1.0, 2.0, 3.0];
        assert_eq!(layout.neighbors(&positions, 0), &[0.0, 1.0, 2.0]);
        assert_eq!(layout.neighbors(&positions, 1), &[1.0, 2.0, 3.0]);
        assert_eq!(layout.neighbors(&positions, 5), &[1.0, 2.0, 3.0]);
        assert_eq!(layout.neighbors(&positions[..2], 0), &[0.0, 1.0]);
    }

    #[test]
    fn kind_cycles_and_parses() {
        assert_eq!(StrategyKind::default(), StrategyKind::Shade);
        assert_eq!(StrategyKind::Shade.next().next().next(), StrategyKind::Shade);
        for kind in StrategyKind::ALL {
            assert_eq!(kind.name().parse::<StrategyKind>(), Ok(kind));
            assert_eq!(kind.strategy().kind(), kind);
        }
        assert!("sparkles".parse::<StrategyKind>().is_err());
    }
}
