//! PromQueen — watch Prometheus range queries as live terminal graphs.

mod commands;
mod fetch;
mod tui;

use std::fs::File;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "promqueen")]
#[command(about = "PromQueen ♛ — a simple Prometheus query visualizer")]
#[command(version = promqueen_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Live dashboard: re-run a range query on an interval and graph every series
    Watch {
        /// PromQL expression
        query: String,

        /// Prometheus base URL
        #[arg(long, default_value = "http://localhost:9090")]
        url: String,

        /// Poll interval (e.g. "15s", "1m"), kept between 1s and 10m
        #[arg(long, default_value = "15s")]
        interval: String,

        /// How far back each query reaches
        #[arg(long, default_value = "15m")]
        window: String,

        /// Query resolution step
        #[arg(long, default_value = "1m")]
        step: String,

        /// Glyph strategy: shade (eighth blocks), slope (2-point), peak (3-point)
        #[arg(long, default_value = "shade", value_parser = ["shade", "slope", "peak"])]
        glyphs: String,

        /// Write logs here (the dashboard owns the terminal)
        #[arg(long)]
        log_file: Option<String>,
    },

    /// Run a range query once and print every series as a graph
    Show {
        /// PromQL expression
        query: String,

        /// Prometheus base URL
        #[arg(long, default_value = "http://localhost:9090")]
        url: String,

        /// How far back the query reaches
        #[arg(long, default_value = "15m")]
        window: String,

        /// Query resolution step
        #[arg(long, default_value = "1m")]
        step: String,

        /// Graph width in columns
        #[arg(long, default_value = "80")]
        width: usize,

        /// Graph height in rows
        #[arg(long, default_value = "12")]
        height: usize,

        /// Glyph strategy: shade, slope, peak
        #[arg(long, default_value = "shade", value_parser = ["shade", "slope", "peak"])]
        glyphs: String,
    },

    /// Graph numbers from a file (or stdin), separated by whitespace or commas
    Plot {
        /// Input file; reads stdin when omitted or "-"
        file: Option<String>,

        /// Graph width in columns
        #[arg(long, default_value = "80")]
        width: usize,

        /// Graph height in rows
        #[arg(long, default_value = "12")]
        height: usize,

        /// Glyph strategy: shade, slope, peak
        #[arg(long, default_value = "shade", value_parser = ["shade", "slope", "peak"])]
        glyphs: String,
    },
}

/// Route `log` output through env_logger. `RUST_LOG` picks the level.
fn init_logging(log_file: Option<&str>) {
    let mut builder = env_logger::Builder::from_default_env();
    if let Some(path) = log_file {
        match File::create(path) {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(e) => {
                eprintln!("Cannot open log file {path}: {e}");
                std::process::exit(1);
            }
        }
    }
    builder.init();
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Watch {
            query,
            url,
            interval,
            window,
            step,
            glyphs,
            log_file,
        } => {
            // Without a log file the dashboard would be scribbled over, so stay quiet.
            if log_file.is_some() {
                init_logging(log_file.as_deref());
            }
            commands::watch::run(commands::watch::WatchConfig {
                fetch: commands::fetch_config(&url, &query, &window, &step),
                interval: commands::parse_duration(&interval),
                strategy: commands::parse_glyphs(&glyphs),
            })
        }
        Commands::Show {
            query,
            url,
            window,
            step,
            width,
            height,
            glyphs,
        } => {
            init_logging(None);
            commands::show::run(
                &commands::fetch_config(&url, &query, &window, &step),
                width,
                height,
                commands::parse_glyphs(&glyphs),
            )
        }
        Commands::Plot {
            file,
            width,
            height,
            glyphs,
        } => {
            init_logging(None);
            commands::plot::run(file.as_deref(), width, height, commands::parse_glyphs(&glyphs))
        }
    }
}
