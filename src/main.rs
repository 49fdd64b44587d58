//! Terminal cascade puzzle runner (default binary).
//!
//! Usage: `tui-cascade [--config <path>]`. Without `--config` the path is taken
//! from `TUI_CASCADE_CONFIG`; with neither, built-in defaults apply. Logs go to
//! `tui-cascade.log` (filter with `RUST_LOG`) since the terminal is in use.

use std::cell::Cell;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use tui_cascade::core::{GameConfig, GameSnapshot};
use tui_cascade::engine::{EngineObserver, GameEngine, ReadinessGate};
use tui_cascade::input::{should_quit, InputHandler};
use tui_cascade::term::{FrameBuffer, GameView, Palette, TerminalRenderer, Viewport};
use tui_cascade::types::TICK_MS;

const LOG_FILE: &str = "tui-cascade.log";

#[derive(Debug, Parser)]
#[command(name = "tui-cascade")]
#[command(about = "Falling-piece matching puzzle with chain-reaction cascades")]
struct Cli {
    /// TOML game config.
    #[arg(long, env = "TUI_CASCADE_CONFIG")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    init_logging()?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(err) = &result {
        error!("{err:#}");
    }
    result
}

fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    match path {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(GameConfig::default()),
    }
}

fn init_logging() -> Result<()> {
    let file = File::create(LOG_FILE).with_context(|| format!("creating {LOG_FILE}"))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

/// Marks the frame dirty whenever the engine reports a visible change.
struct Redraw {
    dirty: Rc<Cell<bool>>,
}

impl EngineObserver for Redraw {
    fn on_render(&mut self, _snapshot: &GameSnapshot) {
        self.dirty.set(true);
    }

    fn on_game_over(&mut self, final_score: u32) {
        info!(final_score, "press r to restart");
        self.dirty.set(true);
    }
}

fn run(term: &mut TerminalRenderer, config: GameConfig) -> Result<()> {
    let mut gate = ReadinessGate::new(config.identities);
    let palette = Palette::build(config.identities, &mut gate);
    let view = GameView::new(palette);

    let mut engine = GameEngine::from_config(config, clock_seed())?;
    let dirty = Rc::new(Cell::new(true));
    engine.set_observer(Box::new(Redraw {
        dirty: Rc::clone(&dirty),
    }));
    engine.start(&gate)?;

    let mut input = InputHandler::new();
    let mut snap = engine.snapshot();
    let mut fb = FrameBuffer::new(0, 0);
    let mut last_size = (0, 0);

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let size = crossterm::terminal::size().unwrap_or((80, 24));
        if size != last_size {
            last_size = size;
            term.invalidate();
            dirty.set(true);
        }
        if dirty.replace(false) {
            engine.snapshot_into(&mut snap);
            view.render_into(&snap, Viewport::new(size.0, size.1), &mut fb);
            term.draw_swap(&mut fb)?;
        }

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press && should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = input.handle_key_event(key) {
                        if engine.apply_action(action) {
                            dirty.set(true);
                        }
                    }
                }
                Event::Resize(..) => dirty.set(true),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            if let Some(action) = input.update(TICK_MS) {
                if engine.apply_action(action) {
                    dirty.set(true);
                }
            }
            engine.tick(TICK_MS);
        }
    }
}
