use hecs::World;

use crate::{AiController, Ball, Config, GameRng, InputQueue, Paddle, PaddleIntent};

/// Ingest human input and turn it into paddle intents
pub fn ingest_inputs(world: &mut World, input_queue: &mut InputQueue) {
    for (side, dir) in input_queue.inputs.drain(..) {
        for (_entity, (paddle, intent)) in world.query_mut::<(&Paddle, &mut PaddleIntent)>() {
            if paddle.side == side {
                intent.dir = dir;
            }
        }
    }
}

/// Let every AI controller pick its paddle's intent for this tick
pub fn drive_ai(world: &mut World, config: &Config, rng: &mut GameRng) {
    let ball = world
        .query::<&Ball>()
        .iter()
        .next()
        .map(|(_e, ball)| *ball);

    let Some(ball) = ball else {
        return;
    };

    for (_entity, (paddle, ai, intent)) in
        world.query_mut::<(&Paddle, &mut AiController, &mut PaddleIntent)>()
    {
        intent.dir = ai.decide(&ball, paddle, config, rng);
    }
}
