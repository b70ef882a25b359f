//! Dashboard state and event loop.
//!
//! Design: the UI thread only draws and handles keys. Each poll interval a
//! background thread runs the query and swaps a new [`RenderState`] into the
//! shared slot, so a slow backend never freezes the screen.

use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{
    Arc, Mutex, MutexGuard,
    atomic::{AtomicBool, Ordering},
};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{debug, warn};
use ratatui::prelude::*;

use promqueen_core::{RenderState, Series};
use promqueen_core::state::status;

use crate::commands::watch::WatchConfig;
use crate::fetch::{self, FetchConfig, FetchError};

pub const MIN_INTERVAL: Duration = Duration::from_secs(1);
pub const MAX_INTERVAL: Duration = Duration::from_secs(600);

// ---------------------------------------------------------------------------
// SharedState — written by the fetch thread
// ---------------------------------------------------------------------------

struct SharedState {
    render: RenderState,
    fetching: bool,
    cycle_count: u64,
    last_ms: u64,
}

fn lock(shared: &Mutex<SharedState>) -> MutexGuard<'_, SharedState> {
    shared.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn transition(shared: &Mutex<SharedState>, f: impl FnOnce(RenderState) -> RenderState) {
    let mut s = lock(shared);
    let current = std::mem::take(&mut s.render);
    s.render = f(current);
}

/// Install a finished fetch, stepping the status through each pane first.
fn publish(shared: &Mutex<SharedState>, outcome: Result<Vec<Series>, FetchError>, last_ms: u64) {
    if let Ok(series) = &outcome {
        debug!("fetched {} series in {last_ms}ms", series.len());
        for index in 0..series.len() {
            transition(shared, |s| s.with_status(status::drawing(index)));
        }
    }

    let mut s = lock(shared);
    s.cycle_count += 1;
    s.last_ms = last_ms;
    let render = std::mem::take(&mut s.render);
    s.render = match outcome {
        Ok(series) => render.with_series(series).with_status(status::IDLE),
        Err(e) => {
            warn!("fetch failed: {e}");
            render.with_status(fetch::status_for(&e))
        }
    };
    s.fetching = false;
}

/// Everything one frame needs, captured under a single lock.
pub struct Snapshot {
    pub render: RenderState,
    pub fetching: bool,
    pub cycle_count: u64,
    pub last_ms: u64,
    pub paused: bool,
    pub interval: Duration,
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    fetch: Arc<FetchConfig>,
    agent: ureq::Agent,
    interval: Duration,
    running: bool,
    paused: bool,
    shared: Arc<Mutex<SharedState>>,
    fetch_flag: Arc<AtomicBool>,
}

impl App {
    pub fn new(config: WatchConfig) -> Self {
        let render = RenderState::new(&config.fetch.query).with_strategy(config.strategy);
        Self {
            fetch: Arc::new(config.fetch),
            agent: fetch::agent(),
            interval: config.interval.clamp(MIN_INTERVAL, MAX_INTERVAL),
            running: true,
            paused: false,
            shared: Arc::new(Mutex::new(SharedState {
                render,
                fetching: false,
                cycle_count: 0,
                last_ms: 0,
            })),
            fetch_flag: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Restore the terminal before the panic message is printed.
        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, crossterm::cursor::Show);
            original_hook(info);
        }));

        let result = self.run_loop(&mut terminal);

        let _ = panic::take_hook();
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            crossterm::cursor::Show
        )?;

        result
    }

    fn run_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        transition(&self.shared, |s| s.with_status(status::LOOP_STARTED));
        self.kick_fetch();
        let mut last_tick = Instant::now();

        while self.is_running() {
            let snapshot = self.snapshot();
            terminal.draw(|f| super::ui::draw(f, &snapshot))?;

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }

            if last_tick.elapsed() >= self.interval() {
                if !self.paused {
                    self.kick_fetch();
                }
                last_tick = Instant::now();
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Char('p') => self.paused = !self.paused,
            KeyCode::Char('r') | KeyCode::Char('R') => self.kick_fetch(),
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Char(']') => {
                self.interval = (self.interval / 2).max(MIN_INTERVAL);
            }
            KeyCode::Char('-') | KeyCode::Char('[') => {
                self.interval = (self.interval * 2).min(MAX_INTERVAL);
            }
            // Nothing to navigate until a fetch has produced panes.
            _ if !self.is_usable() => {}
            KeyCode::Up | KeyCode::Char('k') => {
                transition(&self.shared, RenderState::previous_pane);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                transition(&self.shared, RenderState::next_pane);
            }
            KeyCode::Char('g') => transition(&self.shared, |s| {
                let next = s.strategy().next();
                s.with_strategy(next)
            }),
            _ => {}
        }
    }

    fn kick_fetch(&self) {
        if self.fetch_flag.swap(true, Ordering::AcqRel) {
            return;
        }

        let config = Arc::clone(&self.fetch);
        let agent = self.agent.clone();
        let shared = Arc::clone(&self.shared);
        let flag = Arc::clone(&self.fetch_flag);

        thread::spawn(move || {
            {
                let mut s = lock(&shared);
                s.fetching = true;
                let render = std::mem::take(&mut s.render);
                s.render = render.with_status(status::fetching(&config.query));
            }

            let inner = panic::catch_unwind(AssertUnwindSafe(|| {
                let started = Instant::now();
                let body = fetch::request(&agent, &config);
                if body.is_ok() {
                    transition(&shared, |s| s.with_status(status::GOT_RESPONSE));
                }
                let outcome = body.and_then(|body| fetch::decode(&body));

                publish(&shared, outcome, started.elapsed().as_millis() as u64);
            }));

            if inner.is_err() {
                let mut s = lock(&shared);
                s.fetching = false;
            }
            flag.store(false, Ordering::Release);
        });
    }

    pub fn is_usable(&self) -> bool {
        lock(&self.shared).render.is_usable()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn snapshot(&self) -> Snapshot {
        let s = lock(&self.shared);
        Snapshot {
            render: s.render.clone(),
            fetching: s.fetching,
            cycle_count: s.cycle_count,
            last_ms: s.last_ms,
            paused: self.paused,
            interval: self.interval,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
