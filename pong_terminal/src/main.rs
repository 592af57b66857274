mod display;
mod input;
mod renderer;

use std::fs::File;
use std::io::{self, BufWriter};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, Show},
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute, queue,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, Clear, ClearType,
        EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use game_core::driver::{LoopDriver, SystemClock};
use game_core::{Config, Game, MatchState, Side};
use glam::Vec2;
use tracing::info;
use tracing_subscriber::EnvFilter;

use display::DisplayThread;
use input::{KeyboardMode, TerminalInput};
use renderer::TerminalRenderer;

const LOG_FILE: &str = "pong.log";

/// Raw mode and the alternate screen, undone on drop
struct TerminalGuard {
    enhanced: bool,
}

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut guard = Self { enhanced: false };

        let mut stdout = io::stdout();
        if matches!(supports_keyboard_enhancement(), Ok(true)) {
            queue!(
                stdout,
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                        | KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                )
            )?;
            guard.enhanced = true;
        }
        execute!(stdout, EnterAlternateScreen, Hide, Clear(ClearType::All))?;

        Ok(guard)
    }

    fn keyboard_mode(&self) -> KeyboardMode {
        if self.enhanced {
            KeyboardMode::Enhanced
        } else {
            KeyboardMode::HoldWindow
        }
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        if self.enhanced {
            let _ = queue!(stdout, PopKeyboardEnhancementFlags);
        }
        let _ = execute!(stdout, LeaveAlternateScreen, Show);
        let _ = disable_raw_mode();
    }
}

/// Log to a file only when RUST_LOG asks for it; the terminal is the screen
fn init_logging() -> Result<()> {
    if std::env::var_os("RUST_LOG").is_none() {
        return Ok(());
    }

    let file = File::create(LOG_FILE).with_context(|| format!("failed to create {LOG_FILE}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

fn main() -> Result<()> {
    init_logging()?;

    let config = Config::default();
    let field = Vec2::new(config.field_width, config.field_height);
    let driver = LoopDriver::new(config.tick_rate);
    let mut game = Game::new(config, seed()).context("invalid game configuration")?;

    let (run, drawn) = {
        let guard = TerminalGuard::enter().context("failed to set up the terminal")?;
        info!(mode = ?guard.keyboard_mode(), "terminal ready");

        let mut input = TerminalInput::new(guard.keyboard_mode());
        let renderer = TerminalRenderer::new(BufWriter::new(io::stdout()), field);
        let mut display = DisplayThread::spawn(renderer, driver.tick_duration() / 2);

        let run = driver.run(&mut game, &mut input, &mut display, &mut SystemClock);
        // Stop drawing before the guard leaves the alternate screen
        (run, display.join())
    };
    drawn.context("terminal drawing failed")?;
    let summary = run.context("game loop failed")?;

    info!(
        ticks = summary.ticks,
        dropped = summary.dropped_ticks,
        frames = summary.frames,
        "game over"
    );

    let score = game.score;
    match game.state {
        MatchState::Won(Side::Left) => println!("You won {} - {}", score.left, score.right),
        MatchState::Won(Side::Right) => println!("You lost {} - {}", score.left, score.right),
        MatchState::Playing => println!("Final score: {} - {}", score.left, score.right),
    }
    Ok(())
}
