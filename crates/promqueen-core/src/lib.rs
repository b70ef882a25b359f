//! # promqueen-core
//!
//! **Numeric series in, terminal glyphs out.**
//!
//! `promqueen-core` is the projection engine behind the `promqueen` dashboard:
//! it turns a sequence of samples of any length into a `rows` x `columns`
//! grid of single-cell glyphs, whatever the size of either.
//!
//! ## Quick Start
//!
//! ```
//! use promqueen_core::{Projector, StrategyKind};
//!
//! let points = [1.0, 3.0, 2.0, 5.0, 4.0];
//! let grid = Projector::from_kind(StrategyKind::Shade)
//!     .project(&points, 10, 4)
//!     .unwrap();
//!
//! assert_eq!(grid.rows(), 4);
//! assert!(grid.lines().iter().all(|l| l.chars().count() == 10));
//! println!("{grid}");
//! ```
//!
//! ## Architecture
//!
//! Resample → Scale → Select glyph per column → Transpose
//!
//! Three glyph strategies:
//! - **Shade** (default): eighth-block glyphs give sub-row vertical resolution.
//! - **Slope**: `-` `/` `\` from each column's left and right edge.
//! - **Peak**: adds `^` and `v` for local extremes at the column centre.
//!
//! Around the projector sit the pieces the dashboard needs but which do no
//! I/O: [`query`] decodes range-query responses and [`state`] holds the
//! immutable pane/status state.

pub mod error;
pub mod glyph;
pub mod grid;
pub mod projector;
pub mod query;
pub mod state;

pub use error::{Error, InvalidInput, Result};
pub use glyph::{GlyphStrategy, Peak, SampleLayout, Shade, Slope, StrategyKind};
pub use grid::Grid;
pub use projector::{Projector, project, resample, scale_rows};
pub use query::{QueryRange, Sample, Series, decode_response};
pub use state::{PALETTE_SIZE, Pane, RenderState};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
