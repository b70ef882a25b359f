//! Dashboard rendering.
//!
//! ┌──────────────────────────────────────────────┐
//! │ PromQueen ♛  rate(http_requests[5m])  #12    │
//! ├──────────────────────────────────────────────┤
//! │ 2/3 {job="api"}                              │
//! │                          ▃▆█▅                │
//! │        ▂▄▅▇█▆▃▁       ▂▇████████▄            │
//! │ ▁▃▅▇████████████▅▃▂▄▆██████████████▇▅▃▂▁▂▃▅▆ │
//! │ Viewing query rate(http_requests[5m]): ...   │
//! ├──────────────────────────────────────────────┤
//! │ Idle                                         │
//! ├──────────────────────────────────────────────┤
//! │ ↑↓ pane   g: glyphs   r: refresh   q: quit   │
//! └──────────────────────────────────────────────┘

use super::app::Snapshot;
use super::graph::{GraphWidget, palette_color};
use ratatui::{prelude::*, widgets::*};

pub fn draw(f: &mut Frame, snap: &Snapshot) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Min(3),    // graph pane
            Constraint::Length(3), // status
            Constraint::Length(1), // keys
        ])
        .split(f.area());

    draw_title(f, rows[0], snap);
    draw_pane(f, rows[1], snap);
    draw_status(f, rows[2], snap);
    draw_keys(f, rows[3]);
}

fn draw_title(f: &mut Frame, area: Rect, snap: &Snapshot) {
    let spin = if snap.fetching { " ⟳" } else { "" };
    let paused = if snap.paused { "  PAUSED" } else { "" };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Line::from(vec![
            Span::styled(" PromQueen ♛ ", Style::default().bold().fg(Color::Cyan)),
            Span::styled(
                snap.render.query().to_string(),
                Style::default().bold().fg(Color::Yellow),
            ),
            Span::styled(
                format!(
                    "  #{}  {}ms  every {}s  {}{spin}{paused} ",
                    snap.cycle_count,
                    snap.last_ms,
                    snap.interval.as_secs(),
                    snap.render.strategy(),
                ),
                Style::default().fg(Color::DarkGray),
            ),
        ]));

    f.render_widget(block, area);
}

fn draw_pane(f: &mut Frame, area: Rect, snap: &Snapshot) {
    let state = &snap.render;
    let Some(pane) = state.current() else {
        let block = Block::default().borders(Borders::ALL).title(" Graph Pane ");
        let p = Paragraph::new("Waiting for data…")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(p, area);
        return;
    };

    let color = palette_color(pane.palette);
    let latest = pane
        .series
        .latest()
        .map(|v| format!("  {v}"))
        .unwrap_or_default();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(format!(
            " {}/{} {}{latest} ",
            state.index() + 1,
            state.panes().len(),
            pane.series.describe()
        ))
        .title_bottom(Line::from(format!(" {} ", pane.status)).style(Style::default().fg(Color::DarkGray)));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let points = pane.series.values();
    let graph = GraphWidget::new(&points, state.strategy()).style(Style::default().fg(color));
    f.render_widget(graph, inner);
}

fn draw_status(f: &mut Frame, area: Rect, snap: &Snapshot) {
    let block = Block::default().borders(Borders::ALL).title(" Status ");
    let p = Paragraph::new(snap.render.status().to_string()).block(block);
    f.render_widget(p, area);
}

fn draw_keys(f: &mut Frame, area: Rect) {
    let bar = Paragraph::new(
        " ↑↓ pane   g: glyphs   r: refresh   p: pause   +/-: interval   q: quit",
    )
    .style(Style::default().bg(Color::DarkGray).fg(Color::White));
    f.render_widget(bar, area);
}
