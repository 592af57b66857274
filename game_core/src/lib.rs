pub mod ai;
pub mod components;
pub mod config;
pub mod driver;
pub mod error;
pub mod game;
pub mod geometry;
pub mod params;
pub mod resources;
pub mod snapshot;
pub mod systems;

pub use ai::*;
pub use components::*;
pub use config::*;
pub use error::*;
pub use game::*;
pub use geometry::*;
pub use params::*;
pub use resources::*;
pub use snapshot::*;

use hecs::World;
use systems::*;

/// Run one tick of the Pong simulation
#[allow(clippy::too_many_arguments)]
pub fn step(
    world: &mut World,
    time: &Time,
    config: &Config,
    score: &mut Score,
    state: &mut MatchState,
    events: &mut Events,
    input_queue: &mut InputQueue,
    rng: &mut GameRng,
    serve_timer: &mut ServeTimer,
) {
    // Clear events at start of tick
    events.clear();

    // Frozen once someone has won
    if state.is_over() {
        input_queue.clear();
        return;
    }

    // 1. Ingest inputs (apply to paddle intents)
    ingest_inputs(world, input_queue);

    // 2. AI paddles decide their intents
    drive_ai(world, config, rng);

    // 3. Move paddles based on intents
    move_paddles(world, time, config);

    // 4. Move ball, bounce off walls and paddles, detect points
    update_ball(world, config, serve_timer, events, rng);

    // 5. Tally points and check for a winner
    check_scoring(events, score, state, config);
}

/// Helper to create a human-controlled paddle entity
pub fn create_paddle(world: &mut World, side: Side, config: &Config) -> hecs::Entity {
    world.spawn((
        Paddle::new(side, config.paddle_speed, config),
        PaddleIntent::new(),
    ))
}

/// Helper to create a computer-controlled paddle entity
pub fn create_ai_paddle(world: &mut World, side: Side, config: &Config) -> hecs::Entity {
    world.spawn((
        Paddle::new(side, config.ai_paddle_speed, config),
        PaddleIntent::new(),
        AiController::new(config),
    ))
}

/// Helper to create the ball entity
pub fn create_ball(world: &mut World, ball: Ball) -> hecs::Entity {
    world.spawn((ball,))
}
