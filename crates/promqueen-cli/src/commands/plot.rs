use std::fs;
use std::io::{self, Read};

use promqueen_core::{Grid, InvalidInput, Projector, StrategyKind};

/// Read the whole input: a file path, or stdin for `None` / `"-"`.
pub fn read_input(path: Option<&str>) -> io::Result<String> {
    match path {
        Some(p) if p != "-" => fs::read_to_string(p),
        _ => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

/// Split on whitespace and commas; every token must be a number.
pub fn parse_points(text: &str) -> Result<Vec<f64>, String> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(|t| t.parse::<f64>().map_err(|_| format!("not a number: {t:?}")))
        .collect()
}

pub fn render(
    points: &[f64],
    width: usize,
    height: usize,
    strategy: StrategyKind,
) -> Result<Grid, InvalidInput> {
    Projector::from_kind(strategy).project(points, width, height)
}

pub fn run(path: Option<&str>, width: usize, height: usize, strategy: StrategyKind) {
    let text = match read_input(path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Cannot read input: {e}");
            std::process::exit(1);
        }
    };
    let points = match parse_points(&text) {
        Ok(points) => points,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    match render(&points, width, height, strategy) {
        Ok(grid) => println!("{grid}"),
        Err(e) => {
            eprintln!("Cannot plot: {e}");
            std::process::exit(1);
        }
    }
}
