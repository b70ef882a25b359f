use log::debug;

use promqueen_core::state::status;
use promqueen_core::{Projector, Series, StrategyKind};

use crate::fetch::{self, FetchConfig};

pub fn run(config: &FetchConfig, width: usize, height: usize, strategy: StrategyKind) {
    let series = match fetch::fetch_series(&fetch::agent(), config) {
        Ok(series) => series,
        Err(e) => {
            eprintln!("{}", fetch::status_for(&e));
            std::process::exit(1);
        }
    };

    let projector = Projector::from_kind(strategy);
    for (i, s) in series.iter().enumerate() {
        debug!("{}", status::drawing(i));
        println!("{}", render(&projector, &config.query, s, width, height));
    }
}

/// Caption line followed by the graph, or a note when it cannot be drawn.
fn render(projector: &Projector, query: &str, series: &Series, width: usize, height: usize) -> String {
    let caption = status::viewing(query, &series.describe());
    match projector.project(&series.values(), width, height) {
        Ok(grid) => format!("{caption}\n{grid}\n"),
        Err(e) => format!("{caption}\n  (cannot draw: {e})\n"),
    }
}
