/// Game tuning parameters for Pong
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Field (pixels)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    // Paddle
    pub const PADDLE_WIDTH: f32 = 12.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    pub const PADDLE_MARGIN: f32 = 30.0;
    pub const PADDLE_SPEED: f32 = 420.0; // px/s, human paddle
    pub const AI_PADDLE_SPEED: f32 = 390.0; // px/s, a little slower than the player

    // Ball
    pub const BALL_SIZE: f32 = 14.0;
    pub const BALL_SPEED_INITIAL: f32 = 360.0;
    pub const BALL_SPEED_INCREMENT: f32 = 18.0; // Added on every paddle hit
    pub const BALL_SPEED_MAX: f32 = 680.0;
    pub const MAX_DEFLECTION: f32 = 0.9; // radians, ~52 degrees at the paddle tips
    pub const SERVE_ANGLE: f32 = 0.35; // radians either side of horizontal
    pub const SERVE_DELAY: f32 = 0.8; // seconds the ball waits at center

    // AI
    pub const AI_REACTION_MIN_TICKS: u32 = 5;
    pub const AI_REACTION_MAX_TICKS: u32 = 10;
    pub const AI_AIM_ERROR_MIN: f32 = 10.0;
    pub const AI_AIM_ERROR_MAX: f32 = 64.0;
    pub const AI_DEAD_ZONE: f32 = 6.0;
    pub const AI_IDLE_ERROR_SCALE: f32 = 0.3;

    // Score
    pub const WIN_SCORE: u8 = 10; // First to 10 wins

    // Loop
    pub const TICK_RATE: u32 = 60;
    pub const MAX_CATCH_UP_TICKS: u32 = 5; // Drop ticks instead of spiralling after a stall
}
