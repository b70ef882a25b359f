use std::time::Duration;

use promqueen_core::StrategyKind;

use crate::fetch::FetchConfig;

pub struct WatchConfig {
    pub fetch: FetchConfig,
    pub interval: Duration,
    pub strategy: StrategyKind,
}

pub fn run(config: WatchConfig) {
    let mut app = crate::tui::app::App::new(config);
    if let Err(e) = app.run() {
        eprintln!("TUI error: {e}");
        std::process::exit(1);
    }
}
