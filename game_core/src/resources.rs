use crate::{Direction, Side};

/// Time resource: the fixed step every system integrates over
#[derive(Debug, Clone, Copy)]
pub struct Time {
    pub dt: f32,
}

impl Time {
    pub fn new(dt: f32) -> Self {
        Self { dt }
    }
}

impl Default for Time {
    fn default() -> Self {
        Self { dt: 1.0 / 60.0 }
    }
}

/// Game score tracking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub left: u8,  // Human player
    pub right: u8, // Computer player
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, side: Side) {
        match side {
            Side::Left => self.left = self.left.saturating_add(1),
            Side::Right => self.right = self.right.saturating_add(1),
        }
    }

    pub fn has_winner(&self, win_score: u8) -> Option<Side> {
        if self.left >= win_score {
            Some(Side::Left)
        } else if self.right >= win_score {
            Some(Side::Right)
        } else {
            None
        }
    }
}

/// Match phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchState {
    #[default]
    Playing,
    /// Terminal until the match is reset
    Won(Side),
}

impl MatchState {
    pub fn is_over(&self) -> bool {
        matches!(self, MatchState::Won(_))
    }
}

/// Random number generator
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

/// Events that occurred during this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Events {
    pub point_scored: Option<Side>,
    pub match_won: Option<Side>,
    pub ball_hit_paddle: Option<Side>,
    pub ball_hit_wall: bool,
    pub ball_released: bool,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Serve delay after a point: the ball waits at center until the timer runs out
#[derive(Debug, Clone, Copy, Default)]
pub struct ServeTimer {
    pub ticks_left: u32,
}

impl ServeTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_delay(&mut self, ticks: u32) {
        self.ticks_left = ticks;
    }

    /// Count down one tick. Returns true on the tick the ball is released.
    pub fn update(&mut self) -> bool {
        if self.ticks_left > 0 {
            self.ticks_left -= 1;
            return self.ticks_left == 0;
        }
        false
    }

    pub fn is_waiting(&self) -> bool {
        self.ticks_left > 0
    }
}

/// Per-tick signals from the input collaborator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerInput {
    pub up: bool,
    pub down: bool,
    pub reset: bool,
    pub quit: bool,
}

impl PlayerInput {
    /// Opposing keys cancel out
    pub fn direction(&self) -> Direction {
        match (self.up, self.down) {
            (true, false) => Direction::Up,
            (false, true) => Direction::Down,
            _ => Direction::None,
        }
    }
}

/// Queue of paddle direction requests from human players
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    pub inputs: Vec<(Side, Direction)>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.inputs.clear();
    }

    pub fn push_input(&mut self, side: Side, dir: Direction) {
        self.inputs.push((side, dir));
    }
}
