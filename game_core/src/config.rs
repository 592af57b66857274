use std::f32::consts::FRAC_PI_2;

use glam::Vec2;

use crate::error::ConfigError;
use crate::params::Params;
use crate::Side;

/// Game configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub field_width: f32,
    pub field_height: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_margin: f32,
    pub paddle_speed: f32,
    pub ai_paddle_speed: f32,
    pub ball_size: f32,
    pub ball_speed_initial: f32,
    pub ball_speed_increment: f32,
    pub ball_speed_max: f32,
    pub max_deflection: f32,
    pub serve_angle: f32,
    pub serve_delay: f32,
    pub ai_reaction_min_ticks: u32,
    pub ai_reaction_max_ticks: u32,
    pub ai_aim_error_min: f32,
    pub ai_aim_error_max: f32,
    pub ai_dead_zone: f32,
    pub ai_idle_error_scale: f32,
    pub win_score: u8,
    pub tick_rate: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            field_width: Params::FIELD_WIDTH,
            field_height: Params::FIELD_HEIGHT,
            paddle_width: Params::PADDLE_WIDTH,
            paddle_height: Params::PADDLE_HEIGHT,
            paddle_margin: Params::PADDLE_MARGIN,
            paddle_speed: Params::PADDLE_SPEED,
            ai_paddle_speed: Params::AI_PADDLE_SPEED,
            ball_size: Params::BALL_SIZE,
            ball_speed_initial: Params::BALL_SPEED_INITIAL,
            ball_speed_increment: Params::BALL_SPEED_INCREMENT,
            ball_speed_max: Params::BALL_SPEED_MAX,
            max_deflection: Params::MAX_DEFLECTION,
            serve_angle: Params::SERVE_ANGLE,
            serve_delay: Params::SERVE_DELAY,
            ai_reaction_min_ticks: Params::AI_REACTION_MIN_TICKS,
            ai_reaction_max_ticks: Params::AI_REACTION_MAX_TICKS,
            ai_aim_error_min: Params::AI_AIM_ERROR_MIN,
            ai_aim_error_max: Params::AI_AIM_ERROR_MAX,
            ai_dead_zone: Params::AI_DEAD_ZONE,
            ai_idle_error_scale: Params::AI_IDLE_ERROR_SCALE,
            win_score: Params::WIN_SCORE,
            tick_rate: Params::TICK_RATE,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds simulated by one tick
    pub fn dt(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }

    pub fn field_center(&self) -> Vec2 {
        Vec2::new(self.field_width / 2.0, self.field_height / 2.0)
    }

    /// Left edge X of the paddle on the given side
    pub fn paddle_x(&self, side: Side) -> f32 {
        match side {
            Side::Left => self.paddle_margin,
            Side::Right => self.field_width - self.paddle_margin - self.paddle_width,
        }
    }

    /// Serve delay expressed in whole ticks
    pub fn serve_delay_ticks(&self) -> u32 {
        (self.serve_delay * self.tick_rate as f32).round() as u32
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_speed", self.paddle_speed),
            ("ai_paddle_speed", self.ai_paddle_speed),
            ("ball_size", self.ball_size),
            ("ball_speed_initial", self.ball_speed_initial),
            ("ball_speed_max", self.ball_speed_max),
        ];
        for (name, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NotPositive { name, value });
            }
        }

        let non_negative = [
            ("ball_speed_increment", self.ball_speed_increment),
            ("serve_delay", self.serve_delay),
        ];
        for (name, value) in non_negative {
            if value.is_nan() || value < 0.0 {
                return Err(ConfigError::Negative { name, value });
            }
        }

        // Anything at or past a right angle sends the ball back into the paddle
        if !(0.0..FRAC_PI_2).contains(&self.max_deflection) {
            return Err(ConfigError::DeflectionOutOfRange {
                value: self.max_deflection,
            });
        }

        if self.tick_rate == 0 {
            return Err(ConfigError::ZeroTickRate);
        }

        // Paddle hits are overlap tests, so one tick of travel must not be
        // able to carry the ball across a paddle
        let step = self.ball_speed_max * self.dt();
        let limit = self.paddle_width + self.ball_size;
        if step >= limit {
            return Err(ConfigError::BallTooFast { step, limit });
        }
        if self.win_score == 0 {
            return Err(ConfigError::ZeroWinScore);
        }

        let ranges = [
            (
                "ball_speed",
                self.ball_speed_initial,
                self.ball_speed_max,
            ),
            (
                "ai_reaction_ticks",
                self.ai_reaction_min_ticks as f32,
                self.ai_reaction_max_ticks as f32,
            ),
            (
                "ai_aim_error",
                self.ai_aim_error_min,
                self.ai_aim_error_max,
            ),
            (
                "serve_angle",
                -self.serve_angle,
                self.serve_angle,
            ),
        ];
        for (name, min, max) in ranges {
            if min > max {
                return Err(ConfigError::EmptyRange { name, min, max });
            }
        }

        if self.paddle_x(Side::Left) + self.paddle_width >= self.paddle_x(Side::Right) {
            return Err(ConfigError::PaddlesOverlap {
                field_width: self.field_width,
            });
        }
        if self.paddle_height >= self.field_height {
            return Err(ConfigError::PaddleTooTall {
                paddle_height: self.paddle_height,
                field_height: self.field_height,
            });
        }

        Ok(())
    }
}
