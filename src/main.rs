//! Terminal Tetris runner (default binary).
//!
//! Polls crossterm events until the next fixed tick, feeds them to the scene
//! state machine and redraws through the framebuffer renderer.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;

use item_tetris::app::{App, Control};
use item_tetris::config::{self, Config};
use item_tetris::logging;
use item_tetris::scores::{self, HighScores};
use item_tetris::term::{FrameBuffer, TerminalRenderer, Viewport};
use item_tetris::types::{GameMode, Randomizer, TICK_MS};

#[derive(Parser, Debug)]
#[command(name = "item-tetris", version, about = "Terminal Tetris with an item mode")]
struct Cli {
    /// Config file (default: $ITEM_TETRIS_CONFIG or the platform config dir)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Seed for the piece generator
    #[arg(long)]
    seed: Option<u64>,

    /// Start a game right away, skipping the menu
    #[arg(long, value_parser = parse_mode)]
    mode: Option<GameMode>,

    /// Cleared lines between bomb pieces in item mode
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    item_every: Option<u32>,

    /// Piece randomizer
    #[arg(long, value_parser = parse_randomizer)]
    randomizer: Option<Randomizer>,
}

fn parse_mode(s: &str) -> Result<GameMode, String> {
    GameMode::from_str(s).ok_or_else(|| format!("expected 'normal' or 'item', got '{s}'"))
}

fn parse_randomizer(s: &str) -> Result<Randomizer, String> {
    Randomizer::from_str(s).ok_or_else(|| format!("expected 'uniform' or 'bag', got '{s}'"))
}

/// Restore terminal state - called on panic or unexpected exit
fn restore_terminal() {
    use crossterm::{
        cursor, execute,
        terminal::{disable_raw_mode, LeaveAlternateScreen},
    };
    let _ = disable_raw_mode();
    let _ = execute!(std::io::stdout(), cursor::Show, LeaveAlternateScreen);
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        original_hook(panic_info);
    }));

    let data_dir = config::data_dir();
    logging::init(data_dir.as_deref());

    let config_path = config::resolve_path(cli.config.as_deref());
    let mut config = match &config_path {
        Some(path) => Config::load(path).context("loading config")?,
        None => Config::default(),
    };
    if let Some(every) = cli.item_every {
        config.items.interval = every;
    }
    if let Some(randomizer) = cli.randomizer {
        config.game.randomizer = randomizer;
    }

    let seed = cli
        .seed
        .or(config.game.seed)
        .unwrap_or_else(rand::random::<u64>);

    let scores_path = scores::default_path();
    let high_scores = scores_path
        .as_deref()
        .map(HighScores::load_or_default)
        .unwrap_or_default();

    info!(
        config = ?config_path,
        seed,
        item_interval = config.items.interval,
        "starting"
    );

    let mut app = App::new(config, seed, high_scores, scores_path);
    if let Some(mode) = cli.mode {
        app.start_game(mode);
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut app);

    // Always try to restore terminal state.
    let _ = term.exit();
    info!("exiting");
    result
}

fn run(term: &mut TerminalRenderer, app: &mut App) -> Result<()> {
    let mut fb = FrameBuffer::new(0, 0);
    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        app.render_into(Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        if app.handle_key(key) == Control::Quit {
                            return Ok(());
                        }
                    }
                    KeyEventKind::Repeat => {
                        // Ignore terminal auto-repeat; DAS/ARR handles repeats internally.
                    }
                    KeyEventKind::Release => app.handle_key_release(key),
                },
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            app.tick(TICK_MS);
        }
    }
}
