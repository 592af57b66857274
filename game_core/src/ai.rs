//! Computer opponent.
//!
//! The controller drives its paddle through the same `Direction` requests a
//! human would. It only looks at the ball every few ticks, predicts where the
//! ball will cross its paddle, and aims a little off that spot. The aim error
//! is rolled once per observation, so a bad read stays bad until the next one.

use rand::Rng;

use crate::geometry::fold_into;
use crate::{Ball, Config, Direction, GameRng, Paddle, Side};

/// AI state component, attached to the paddle it controls
#[derive(Debug, Clone, Copy)]
pub struct AiController {
    /// Ticks until the next look at the ball; 0 means look this tick
    pub reaction_countdown: u32,
    /// Paddle center Y the controller is steering toward
    pub target_y: f32,
    pub aim_error: f32,
}

impl AiController {
    pub fn new(config: &Config) -> Self {
        Self {
            reaction_countdown: 0,
            target_y: config.field_height / 2.0,
            aim_error: 0.0,
        }
    }

    pub fn reset(&mut self, config: &Config) {
        *self = Self::new(config);
    }

    /// Pick this tick's direction for `paddle`
    pub fn decide(
        &mut self,
        ball: &Ball,
        paddle: &Paddle,
        config: &Config,
        rng: &mut GameRng,
    ) -> Direction {
        if self.reaction_countdown == 0 {
            self.observe(ball, paddle, config, rng);
            // Next look lands `delay` ticks after this one
            let delay = rng
                .0
                .gen_range(config.ai_reaction_min_ticks..=config.ai_reaction_max_ticks);
            self.reaction_countdown = delay.saturating_sub(1);
        } else {
            self.reaction_countdown -= 1;
        }

        let diff = self.target_y - paddle.rect.center().y;
        if diff > config.ai_dead_zone {
            Direction::Down
        } else if diff < -config.ai_dead_zone {
            Direction::Up
        } else {
            Direction::None
        }
    }

    fn observe(&mut self, ball: &Ball, paddle: &Paddle, config: &Config, rng: &mut GameRng) {
        let error = roll_aim_error(config, rng);

        match predict_intercept_y(ball, paddle, config.field_height) {
            Some(predicted) => {
                self.aim_error = error;
                self.target_y = predicted + error;
            }
            None => {
                // Ball heading away: drift back toward the middle
                self.aim_error = error * config.ai_idle_error_scale;
                self.target_y = config.field_height / 2.0 + self.aim_error;
            }
        }
    }
}

fn roll_aim_error(config: &Config, rng: &mut GameRng) -> f32 {
    let magnitude = rng
        .0
        .gen_range(config.ai_aim_error_min..=config.ai_aim_error_max);
    if rng.0.gen_bool(0.5) {
        magnitude
    } else {
        -magnitude
    }
}

/// Ball center Y when it reaches `paddle`'s face, or None if it is moving away.
///
/// Straight-line extrapolation folded between the walls, so bounces off the
/// top and bottom are accounted for without stepping the physics.
pub fn predict_intercept_y(ball: &Ball, paddle: &Paddle, field_height: f32) -> Option<f32> {
    let vx = ball.vel.x;
    let gap = match paddle.side {
        Side::Right if vx > 0.0 => paddle.rect.left() - ball.rect.right(),
        Side::Left if vx < 0.0 => ball.rect.left() - paddle.rect.right(),
        _ => return None,
    };

    let time_to_reach = gap.max(0.0) / vx.abs();
    let raw_y = ball.rect.center().y + ball.vel.y * time_to_reach;
    let half = ball.rect.size.y / 2.0;
    Some(fold_into(raw_y, half, field_height - half))
}
