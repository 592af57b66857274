use crate::{Config, Paddle, PaddleIntent, Time};
use hecs::World;

/// Apply paddle movement based on intents
pub fn move_paddles(world: &mut World, time: &Time, config: &Config) {
    for (_entity, (paddle, intent)) in world.query_mut::<(&mut Paddle, &PaddleIntent)>() {
        paddle.move_vertical(intent.dir, time.dt, 0.0, config.field_height);
    }
}
