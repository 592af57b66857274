use hecs::World;
use tracing::debug;

use crate::{Ball, Config, Events, GameRng, Paddle, ServeTimer, Side};

/// Advance the ball one tick, or hold it at center while a serve is pending
pub fn update_ball(
    world: &mut World,
    config: &Config,
    serve_timer: &mut ServeTimer,
    events: &mut Events,
    rng: &mut GameRng,
) {
    if serve_timer.is_waiting() {
        if serve_timer.update() {
            events.ball_released = true;
        }
        return;
    }

    // Copy the paddles out so the ball can be borrowed mutably below
    let mut left = None;
    let mut right = None;
    for (_e, paddle) in world.query::<&Paddle>().iter() {
        match paddle.side {
            Side::Left => left = Some(*paddle),
            Side::Right => right = Some(*paddle),
        }
    }
    let (Some(left), Some(right)) = (left, right) else {
        return;
    };

    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        let outcome = ball.update(config, &left, &right, rng);

        events.ball_hit_wall |= outcome.hit_wall;
        if outcome.hit_paddle.is_some() {
            events.ball_hit_paddle = outcome.hit_paddle;
        }

        if let Some(scorer) = outcome.scored {
            events.point_scored = Some(scorer);
            serve_timer.start_delay(config.serve_delay_ticks());
            debug!(?scorer, vel = ?ball.vel, "ball out, serving again");
        }
    }
}
