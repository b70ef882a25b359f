pub mod plot;
pub mod show;
pub mod watch;

use std::time::Duration;

use promqueen_core::StrategyKind;

use crate::fetch::FetchConfig;

/// Parse "500ms", "30s", "15m", "1h"; a bare number means seconds.
pub fn try_parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();

    let (numeric, multiplier) = if let Some(rest) = s.strip_suffix("ms") {
        (rest, 1u64)
    } else if let Some(rest) = s.strip_suffix('s') {
        (rest, 1000)
    } else if let Some(rest) = s.strip_suffix('m') {
        (rest, 60_000)
    } else if let Some(rest) = s.strip_suffix('h') {
        (rest, 3_600_000)
    } else {
        (s, 1000)
    };

    let value: u64 = numeric.trim().parse().ok()?;
    Some(Duration::from_millis(value.checked_mul(multiplier)?))
}

/// Like [`try_parse_duration`], but exits on bad input.
pub fn parse_duration(s: &str) -> Duration {
    try_parse_duration(s).unwrap_or_else(|| {
        eprintln!("Invalid duration: {s}");
        std::process::exit(1);
    })
}

/// Parse a glyph strategy name, falling back to shading.
pub fn parse_glyphs(s: &str) -> StrategyKind {
    s.parse().unwrap_or_else(|e| {
        eprintln!("{e}, using shade");
        StrategyKind::Shade
    })
}

pub fn fetch_config(url: &str, query: &str, window: &str, step: &str) -> FetchConfig {
    FetchConfig {
        url: url.to_string(),
        query: query.to_string(),
        window: parse_duration(window),
        step: parse_duration(step),
    }
}
