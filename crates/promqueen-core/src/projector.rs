//! Series-to-grid projection.
//!
//! Three stages, each usable on its own:
//!
//! 1. [`resample`] stretches or squeezes the series to the strategy's width
//!    by linear interpolation.
//! 2. [`scale_rows`] maps values onto fractional row positions, top-down.
//! 3. The [`GlyphStrategy`] picks an edge glyph and cursor row per column,
//!    and the columns are transposed into a row-major [`Grid`].

use log::trace;

use crate::error::InvalidInput;
use crate::glyph::{GlyphStrategy, StrategyKind};
use crate::grid::{Grid, draw_column};

fn lerp(x: f64, y: f64, t: f64) -> f64 {
    // Exact when x == y, so flat stretches stay flat.
    x + (y - x) * t
}

/// Resample `points` to exactly `width` evenly spaced values.
///
/// With `fencepost`, the first and last outputs land on the first and last
/// samples (`idx = i * (L-1) / (W-1)`). Without it the step is `(L-1) / W`
/// and the newest sample is never reached.
pub fn resample(points: &[f64], width: usize, fencepost: bool) -> Vec<f64> {
    if points.is_empty() || width == 0 {
        return Vec::new();
    }
    let last = points.len() - 1;
    let divisor = if fencepost {
        (width - 1).max(1)
    } else {
        width
    };
    (0..width)
        .map(|i| {
            let idx = (i * last) as f64 / divisor as f64;
            let pos = (idx as usize).min(last);
            let t = idx - pos as f64;
            lerp(points[pos], points[(pos + 1).min(last)], t)
        })
        .collect()
}

/// Map values onto fractional row positions in `[0, rows - 1]`.
///
/// The minimum lands on the bottom row and the maximum one row below the top.
/// Grids shorter than three rows get no margin. A flat series is widened by
/// one unit either way so it draws mid-pane instead of dividing by zero.
pub fn scale_rows(values: &[f64], rows: usize) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }
    let mut bottom = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut top = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if top == bottom {
        top += 1.0;
        bottom -= 1.0;
    }

    let floor_row = rows.saturating_sub(1) as f64;
    let margin = if rows >= 3 { 1.0 } else { 0.0 };
    let usable = (floor_row - margin).max(0.0);
    // Halved so ranges near f64::MAX don't overflow to infinity.
    let span = top / 2.0 - bottom / 2.0;
    if !(span > 0.0 && span.is_finite()) {
        // Too large for the widening to register, or a subnormal range that
        // halving rounds away: draw it flat.
        return vec![floor_row - 0.5 * usable; values.len()];
    }

    values
        .iter()
        .map(|&v| {
            let height = (v / 2.0 - bottom / 2.0) / span;
            (floor_row - height * usable).clamp(0.0, floor_row)
        })
        .collect()
}

fn validate(points: &[f64], columns: usize, rows: usize) -> Result<(), InvalidInput> {
    if columns == 0 || rows == 0 {
        return Err(InvalidInput::EmptyGrid { columns, rows });
    }
    if points.is_empty() {
        return Err(InvalidInput::EmptySeries);
    }
    if let Some((index, &value)) = points.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(InvalidInput::NonFinite { index, value });
    }
    Ok(())
}

/// Projects series onto glyph grids with a fixed glyph strategy.
///
/// Holds no per-call state; one projector can serve any number of callers.
#[derive(Debug)]
pub struct Projector {
    strategy: Box<dyn GlyphStrategy>,
}

impl Projector {
    pub fn new<S: GlyphStrategy + 'static>(strategy: S) -> Self {
        Self {
            strategy: Box::new(strategy),
        }
    }

    pub fn from_kind(kind: StrategyKind) -> Self {
        Self {
            strategy: kind.strategy(),
        }
    }

    pub fn strategy(&self) -> &dyn GlyphStrategy {
        self.strategy.as_ref()
    }

    /// Render `points` into a `rows` x `columns` grid.
    pub fn project(
        &self,
        points: &[f64],
        columns: usize,
        rows: usize,
    ) -> Result<Grid, InvalidInput> {
        validate(points, columns, rows)?;

        let layout = self.strategy.layout(columns);
        let values = resample(points, layout.width, layout.fencepost);
        let positions = scale_rows(&values, rows);

        let mut strips = Vec::with_capacity(columns);
        let mut cursors = Vec::with_capacity(columns);
        for column in 0..columns {
            let neighbors = layout.neighbors(&positions, column);
            let cursor = self.strategy.cursor_row(neighbors, rows);
            let edge = self.strategy.select_glyph(neighbors);
            strips.push(draw_column(cursor, edge, rows));
            cursors.push(cursor);
        }

        trace!(
            "projected {} samples onto {columns}x{rows} ({})",
            points.len(),
            self.strategy.kind()
        );
        Ok(Grid::from_columns(&strips, cursors, rows))
    }
}

impl Default for Projector {
    fn default() -> Self {
        Self::from_kind(StrategyKind::default())
    }
}

/// Project with the default (sub-row shading) strategy.
pub fn project(points: &[f64], columns: usize, rows: usize) -> Result<Grid, InvalidInput> {
    Projector::default().project(points, columns, rows)
}
