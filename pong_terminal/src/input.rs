//! Keyboard input for the human paddle.
//!
//! Terminals that support keyboard enhancement report key releases, so a
//! movement key is held until it is let go. Everywhere else only presses
//! (and auto-repeat presses) arrive, and each one holds the key for a short
//! window instead.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use game_core::driver::InputSource;
use game_core::PlayerInput;

/// How long a press counts as held when releases are not reported.
/// Longer than a typical auto-repeat delay so holding a key moves smoothly.
pub const HOLD_WINDOW: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardMode {
    /// Press and release events are reported
    Enhanced,
    /// Presses only; held state decays after `HOLD_WINDOW`
    HoldWindow,
}

#[derive(Debug, Clone, Copy, Default)]
struct HeldKey {
    pressed: bool,
    expires: Option<Instant>,
}

impl HeldKey {
    fn press(&mut self, mode: KeyboardMode, now: Instant) {
        match mode {
            KeyboardMode::Enhanced => self.pressed = true,
            KeyboardMode::HoldWindow => self.expires = Some(now + HOLD_WINDOW),
        }
    }

    fn release(&mut self) {
        *self = Self::default();
    }

    fn is_held(&self, now: Instant) -> bool {
        self.pressed || self.expires.is_some_and(|expires| now < expires)
    }
}

/// Key state machine, independent of where events come from
#[derive(Debug, Clone)]
pub struct Keys {
    mode: KeyboardMode,
    up: HeldKey,
    down: HeldKey,
    reset: bool,
    quit: bool,
}

impl Keys {
    pub fn new(mode: KeyboardMode) -> Self {
        Self {
            mode,
            up: HeldKey::default(),
            down: HeldKey::default(),
            reset: false,
            quit: false,
        }
    }

    pub fn handle(&mut self, event: KeyEvent, now: Instant) {
        let pressed = matches!(event.kind, KeyEventKind::Press | KeyEventKind::Repeat);

        match event.code {
            KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => {
                if pressed {
                    self.up.press(self.mode, now);
                    // Reversing should not wait for the other key to decay
                    if self.mode == KeyboardMode::HoldWindow {
                        self.down.release();
                    }
                } else {
                    self.up.release();
                }
            }
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => {
                if pressed {
                    self.down.press(self.mode, now);
                    if self.mode == KeyboardMode::HoldWindow {
                        self.up.release();
                    }
                } else {
                    self.down.release();
                }
            }
            _ if event.kind != KeyEventKind::Press => {}
            KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Char(' ') => self.reset = true,
            KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
                self.quit = true
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.quit = true,
            _ => {}
        }
    }

    /// Current signals. Reset and quit fire once per press.
    pub fn take_input(&mut self, now: Instant) -> PlayerInput {
        let input = PlayerInput {
            up: self.up.is_held(now),
            down: self.down.is_held(now),
            reset: self.reset,
            quit: self.quit,
        };
        self.reset = false;
        if input.reset {
            self.up.release();
            self.down.release();
        }
        input
    }
}

/// Reads pending crossterm key events without blocking
pub struct TerminalInput {
    keys: Keys,
}

impl TerminalInput {
    pub fn new(mode: KeyboardMode) -> Self {
        Self {
            keys: Keys::new(mode),
        }
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> io::Result<PlayerInput> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                self.keys.handle(key, Instant::now());
            }
        }
        Ok(self.keys.take_input(Instant::now()))
    }
}
