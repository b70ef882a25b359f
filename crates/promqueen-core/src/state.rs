//! Immutable dashboard state.
//!
//! Each transition consumes a [`RenderState`] and returns the next one. The
//! UI loop owns the current value; fetch workers and key handlers replace it.

use crate::glyph::StrategyKind;
use crate::query::Series;

/// Number of distinct pane colours; pane `i` uses palette slot `i % PALETTE_SIZE`.
pub const PALETTE_SIZE: usize = 6;

/// Footer messages for each step of the fetch cycle.
pub mod status {
    pub const STARTING: &str = "Starting up…";
    pub const LOOP_STARTED: &str = "Starting query loop…";
    pub const GOT_RESPONSE: &str = "Got response…";
    pub const IDLE: &str = "Idle";
    pub const NO_SERIES: &str = "Error: Prometheus returned zero rows";

    pub fn fetching(query: &str) -> String {
        format!("Fetching query {query:?}…")
    }

    pub fn drawing(index: usize) -> String {
        format!("Drawing graph {index}…")
    }

    pub fn backend_error(error_type: &str, message: &str) -> String {
        format!("Error from Prometheus: {error_type}: {message}")
    }

    pub fn fetch_failed(reason: &dyn std::fmt::Display) -> String {
        format!("Fetch failed: {reason}")
    }

    pub fn viewing(query: &str, labels: &str) -> String {
        format!("Viewing query {query}: {labels}")
    }
}

/// One navigable graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Pane {
    pub series: Series,
    /// Pane caption naming the query and the series labels.
    pub status: String,
    pub palette: usize,
}

impl Pane {
    pub fn new(query: &str, index: usize, series: Series) -> Self {
        let status = status::viewing(query, &series.describe());
        Self {
            series,
            status,
            palette: index % PALETTE_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    query: String,
    panes: Vec<Pane>,
    index: usize,
    status: String,
    usable: bool,
    strategy: StrategyKind,
}

impl Default for RenderState {
    fn default() -> Self {
        Self::new("")
    }
}

impl RenderState {
    pub fn new(query: &str) -> Self {
        Self {
            query: query.to_string(),
            panes: Vec::new(),
            index: 0,
            status: status::STARTING.to_string(),
            usable: false,
            strategy: StrategyKind::default(),
        }
    }

    pub fn with_status(self, status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            ..self
        }
    }

    pub fn with_strategy(self, strategy: StrategyKind) -> Self {
        Self { strategy, ..self }
    }

    /// Replace the panes with one per series. The selected pane survives a
    /// refresh as long as it still exists.
    pub fn with_series(self, series: Vec<Series>) -> Self {
        let panes: Vec<Pane> = series
            .into_iter()
            .enumerate()
            .map(|(i, s)| Pane::new(&self.query, i, s))
            .collect();
        let index = if self.index < panes.len() { self.index } else { 0 };
        let usable = !panes.is_empty();
        Self {
            panes,
            index,
            usable,
            ..self
        }
    }

    pub fn next_pane(self) -> Self {
        self.step(1)
    }

    pub fn previous_pane(self) -> Self {
        let back = self.panes.len().saturating_sub(1);
        self.step(back)
    }

    fn step(self, by: usize) -> Self {
        if !self.usable || self.panes.is_empty() {
            return self;
        }
        let index = (self.index + by) % self.panes.len();
        Self { index, ..self }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn panes(&self) -> &[Pane] {
        &self.panes
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&Pane> {
        self.panes.get(self.index)
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// True once a fetch has produced at least one pane.
    pub fn is_usable(&self) -> bool {
        self.usable
    }

    pub fn strategy(&self) -> StrategyKind {
        self.strategy
    }
}
