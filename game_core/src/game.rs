//! A single match between the human (left) and the computer (right).

use glam::Vec2;
use hecs::World;
use rand::Rng;
use tracing::info;

use crate::{
    create_ai_paddle, create_ball, create_paddle, step, AiController, Ball, Config, ConfigError,
    Events, GameRng, InputQueue, MatchState, Paddle, PaddleIntent, PlayerInput, Rect, Score,
    ServeTimer, Side, Snapshot, Time,
};

pub struct Game {
    pub world: World,
    pub time: Time,
    pub config: Config,
    pub score: Score,
    pub state: MatchState,
    pub events: Events,
    pub input_queue: InputQueue,
    pub rng: GameRng,
    pub serve_timer: ServeTimer,
    /// Simulation ticks run this match; stops counting once the match is won
    pub tick: u64,
}

impl Game {
    pub fn new(config: Config, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut world = World::new();
        let mut rng = GameRng::new(seed);

        create_paddle(&mut world, Side::Left, &config);
        create_ai_paddle(&mut world, Side::Right, &config);

        let mut ball = Ball::new(config.field_center(), config.ball_size, Vec2::ZERO);
        let toward = random_side(&mut rng);
        ball.serve(&config, toward, &mut rng);
        create_ball(&mut world, ball);

        let mut serve_timer = ServeTimer::new();
        serve_timer.start_delay(config.serve_delay_ticks());

        Ok(Self {
            world,
            time: Time::new(config.dt()),
            config,
            score: Score::new(),
            state: MatchState::Playing,
            events: Events::new(),
            input_queue: InputQueue::new(),
            rng,
            serve_timer,
            tick: 0,
        })
    }

    /// Advance the match by one tick and report what happened
    pub fn tick(&mut self, input: &PlayerInput) -> Events {
        if input.reset {
            self.reset();
            return self.events;
        }

        let frozen = self.state.is_over();
        self.input_queue.push_input(Side::Left, input.direction());

        step(
            &mut self.world,
            &self.time,
            &self.config,
            &mut self.score,
            &mut self.state,
            &mut self.events,
            &mut self.input_queue,
            &mut self.rng,
            &mut self.serve_timer,
        );

        if !frozen {
            self.tick += 1;
        }
        self.events
    }

    /// Start a fresh match: zero scores, centered paddles, new serve
    pub fn reset(&mut self) {
        self.score = Score::new();
        self.state = MatchState::Playing;
        self.events.clear();
        self.input_queue.clear();
        self.tick = 0;

        for (_e, (paddle, intent)) in self
            .world
            .query_mut::<(&mut Paddle, &mut PaddleIntent)>()
        {
            paddle.recenter(self.config.field_height);
            *intent = PaddleIntent::new();
        }
        for (_e, ai) in self.world.query_mut::<&mut AiController>() {
            ai.reset(&self.config);
        }

        let toward = random_side(&mut self.rng);
        for (_e, ball) in self.world.query_mut::<&mut Ball>() {
            ball.serve(&self.config, toward, &mut self.rng);
        }
        self.serve_timer
            .start_delay(self.config.serve_delay_ticks());

        info!(?toward, "match reset");
    }

    pub fn ball(&self) -> Option<Ball> {
        self.world
            .query::<&Ball>()
            .iter()
            .next()
            .map(|(_e, ball)| *ball)
    }

    pub fn paddle(&self, side: Side) -> Option<Paddle> {
        self.world
            .query::<&Paddle>()
            .iter()
            .find(|(_e, paddle)| paddle.side == side)
            .map(|(_e, paddle)| *paddle)
    }

    /// Copy of everything the renderer needs for this tick
    pub fn snapshot(&self) -> Snapshot {
        let config = &self.config;
        let paddle_rect = |side| {
            self.paddle(side)
                .unwrap_or_else(|| Paddle::new(side, config.paddle_speed, config))
                .rect
        };
        let ball = self.ball().map_or_else(
            || Rect::from_center_size(config.field_center(), Vec2::splat(config.ball_size)),
            |ball| ball.rect,
        );

        Snapshot {
            tick: self.tick,
            left_paddle: paddle_rect(Side::Left),
            right_paddle: paddle_rect(Side::Right),
            ball,
            score: self.score,
            state: self.state,
            serving: self.serve_timer.is_waiting(),
        }
    }
}

/// Coin flip for which side receives a fresh serve
pub fn random_side(rng: &mut GameRng) -> Side {
    if rng.0.gen_bool(0.5) {
        Side::Left
    } else {
        Side::Right
    }
}
