//! Fixed-tick loop driver.
//!
//! The driver owns timing only. Input and drawing are collaborator traits so
//! the same loop runs against a terminal, a window, or a test script.

use std::io;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::{DriverError, Game, Params, PlayerInput, Snapshot};

/// Produces the human player's signals, without blocking
pub trait InputSource {
    fn poll(&mut self) -> io::Result<PlayerInput>;
}

/// Draws a snapshot
pub trait Renderer {
    fn render(&mut self, snapshot: &Snapshot) -> io::Result<()>;
}

pub trait Clock {
    fn now(&self) -> Instant;
    fn sleep(&mut self, duration: Duration);
}

/// Wall clock backed by `std::thread::sleep`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    /// Ticks skipped because the loop fell too far behind real time
    pub dropped_ticks: u64,
    pub frames: u64,
}

#[derive(Debug, Clone, Copy)]
pub struct LoopDriver {
    tick_duration: Duration,
    max_catch_up_ticks: u32,
}

impl LoopDriver {
    pub fn new(tick_rate: u32) -> Self {
        Self {
            tick_duration: Duration::from_nanos(1_000_000_000 / u64::from(tick_rate.max(1))),
            max_catch_up_ticks: Params::MAX_CATCH_UP_TICKS,
        }
    }

    pub fn with_max_catch_up(mut self, ticks: u32) -> Self {
        self.max_catch_up_ticks = ticks.max(1);
        self
    }

    pub fn tick_duration(&self) -> Duration {
        self.tick_duration
    }

    /// Run until the input source asks to quit
    pub fn run<I, R, C>(
        &self,
        game: &mut Game,
        input: &mut I,
        renderer: &mut R,
        clock: &mut C,
    ) -> Result<RunSummary, DriverError>
    where
        I: InputSource,
        R: Renderer,
        C: Clock,
    {
        let mut summary = RunSummary::default();
        let mut next_tick = clock.now();
        let mut pending_reset = false;

        loop {
            let mut frame_input = input.poll().map_err(DriverError::Input)?;
            if frame_input.quit {
                info!(ticks = summary.ticks, "quit requested");
                break;
            }

            // A reset pressed between ticks is kept for the next tick
            pending_reset |= frame_input.reset;

            let now = clock.now();
            let mut ran = 0;
            while next_tick <= now && ran < self.max_catch_up_ticks {
                frame_input.reset = pending_reset;
                game.tick(&frame_input);
                pending_reset = false;

                next_tick += self.tick_duration;
                ran += 1;
                summary.ticks += 1;
            }

            if next_tick <= now {
                let behind = (now - next_tick).as_nanos() / self.tick_duration.as_nanos() + 1;
                let behind = u32::try_from(behind).unwrap_or(u32::MAX);
                next_tick += self.tick_duration * behind;
                summary.dropped_ticks += u64::from(behind);
                warn!(dropped = behind, "simulation fell behind, dropping ticks");
            }

            if ran > 0 {
                renderer
                    .render(&game.snapshot())
                    .map_err(DriverError::Render)?;
                summary.frames += 1;
            }

            let now = clock.now();
            if next_tick > now {
                clock.sleep(next_tick - now);
            }
        }

        Ok(summary)
    }
}
