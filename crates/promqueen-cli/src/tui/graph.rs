//! Ratatui widget that draws a projected series verbatim, one glyph per cell.

use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Wrap};

use promqueen_core::{PALETTE_SIZE, Projector, StrategyKind};

/// Pane colours, indexed by [`promqueen_core::Pane::palette`].
pub const PALETTE: [Color; PALETTE_SIZE] = [
    Color::LightBlue,
    Color::LightCyan,
    Color::Gray,
    Color::LightGreen,
    Color::LightMagenta,
    Color::LightRed,
];

pub fn palette_color(slot: usize) -> Color {
    PALETTE[slot % PALETTE_SIZE]
}

pub struct GraphWidget<'a> {
    points: &'a [f64],
    strategy: StrategyKind,
    style: Style,
}

impl<'a> GraphWidget<'a> {
    pub fn new(points: &'a [f64], strategy: StrategyKind) -> Self {
        Self {
            points,
            strategy,
            style: Style::default(),
        }
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

impl Widget for GraphWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let projector = Projector::from_kind(self.strategy);
        let grid = match projector.project(self.points, area.width as usize, area.height as usize) {
            Ok(grid) => grid,
            Err(e) => {
                Paragraph::new(format!("cannot draw: {e}"))
                    .style(Style::default().fg(Color::Red))
                    .wrap(Wrap { trim: true })
                    .render(area, buf);
                return;
            }
        };

        for (y, line) in grid.lines().iter().enumerate() {
            for (x, glyph) in line.chars().enumerate() {
                let pos = (area.x + x as u16, area.y + y as u16);
                if let Some(cell) = buf.cell_mut(pos) {
                    cell.set_char(glyph).set_style(self.style);
                }
            }
        }
    }
}
