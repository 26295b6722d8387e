//! Terminal runner (default binary).
//!
//! Owns everything the engine does not: the command line, the log file, the
//! wall clock and the terminal. Each frame it measures the real time since
//! the previous frame, hands it to the engine together with the latest key
//! press, and draws the resulting snapshot.

use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use log::info;

use termtris::core::{GameConfig, GameSnapshot, GameState, GeneratorPolicy};
use termtris::input::{handle_key_event, should_quit, ActionLatch};
use termtris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport, Wipe};
use termtris::types::{
    DEFAULT_FIELD_HEIGHT, DEFAULT_FIELD_WIDTH, DEFAULT_LINES_PER_LEVEL, FRAME_MS,
};

#[derive(Debug, Parser)]
#[command(name = "termtris")]
#[command(about = "Falling-block puzzle game for the terminal")]
struct Cli {
    /// Field width in cells
    #[arg(long, default_value_t = DEFAULT_FIELD_WIDTH)]
    width: u16,
    /// Field height in cells
    #[arg(long, default_value_t = DEFAULT_FIELD_HEIGHT)]
    height: u16,
    /// Piece generator: uniform or bag
    #[arg(long, default_value = "bag", value_parser = parse_generator)]
    generator: GeneratorPolicy,
    /// Cleared lines needed per level
    #[arg(long, default_value_t = DEFAULT_LINES_PER_LEVEL)]
    lines_per_level: u32,
    /// Seed for the piece generator (defaults to the system clock)
    #[arg(long)]
    seed: Option<u32>,
    /// Write debug logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn parse_generator(s: &str) -> Result<GeneratorPolicy, String> {
    GeneratorPolicy::from_str(s)
        .ok_or_else(|| format!("unknown generator '{s}' (expected uniform or bag)"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = GameConfig {
        width: cli.width,
        height: cli.height,
        generator: cli.generator,
        lines_per_level: cli.lines_per_level,
        seed: cli.seed.unwrap_or_else(clock_seed),
    };
    let mut game = GameState::new(config).context("invalid game settings")?;
    info!("seed {}", config.seed);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut game);

    // Always try to restore terminal state.
    let _ = term.exit();
    result?;

    println!(
        "score {}  level {}  lines {}",
        game.score(),
        game.level(),
        game.cleared_lines()
    );
    Ok(())
}

/// Send log records to `path`; stdout belongs to the game
fn init_logging(path: &Path) -> Result<()> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} {:<5} {}: {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(log::LevelFilter::Debug)
        .chain(
            fern::log_file(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?,
        )
        .apply()?;
    Ok(())
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn viewport() -> Viewport {
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    Viewport::new(w, h)
}

fn run(term: &mut TerminalRenderer, game: &mut GameState) -> Result<()> {
    let view = GameView::default();
    let mut latch = ActionLatch::new();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let frame = Duration::from_millis(FRAME_MS);
    let mut last_tick = Instant::now();

    loop {
        // Input with timeout until the next frame.
        let timeout = frame.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        info!("quit at score {}", game.score());
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        latch.press(action);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        if last_tick.elapsed() < frame {
            continue;
        }
        let now = Instant::now();
        game.tick(now - last_tick, latch.take());
        last_tick = now;

        game.snapshot_into(&mut snap);
        view.render_into(&snap, viewport(), &mut fb);
        term.draw_swap(&mut fb)?;

        if game.is_game_over() {
            return play_wipe(term, &view, &snap, &mut fb);
        }
    }
}

fn play_wipe(
    term: &mut TerminalRenderer,
    view: &GameView,
    snap: &GameSnapshot,
    fb: &mut FrameBuffer,
) -> Result<()> {
    let rows = u16::try_from(snap.height).unwrap_or(u16::MAX);
    let mut wipe = Wipe::new(rows);
    while wipe.advance() {
        thread::sleep(Wipe::STEP);
        view.render_wipe_into(snap, &wipe, viewport(), fb);
        term.draw_swap(fb)?;
    }
    Ok(())
}
