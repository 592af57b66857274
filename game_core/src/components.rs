use glam::Vec2;
use rand::Rng;

use crate::{Config, GameRng, Rect};

/// Which half of the field a paddle defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Horizontal sign pointing at this side of the field
    pub fn sign(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// Vertical movement request for a paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Up,
    Down,
    #[default]
    None,
}

impl Direction {
    /// Y grows downward, so Up is negative
    pub fn sign(self) -> f32 {
        match self {
            Direction::Up => -1.0,
            Direction::Down => 1.0,
            Direction::None => 0.0,
        }
    }
}

/// Paddle component
#[derive(Debug, Clone, Copy)]
pub struct Paddle {
    pub side: Side,
    pub rect: Rect,
    pub speed: f32, // px/s
}

impl Paddle {
    /// Paddle on `side`, vertically centered in the field
    pub fn new(side: Side, speed: f32, config: &Config) -> Self {
        let top = (config.field_height - config.paddle_height) / 2.0;
        Self {
            side,
            rect: Rect::new(
                Vec2::new(config.paddle_x(side), top),
                Vec2::new(config.paddle_width, config.paddle_height),
            ),
            speed,
        }
    }

    /// Move one tick in `direction`, keeping the rect inside `[bounds_top, bounds_bottom]`
    pub fn move_vertical(
        &mut self,
        direction: Direction,
        dt: f32,
        bounds_top: f32,
        bounds_bottom: f32,
    ) {
        let dy = direction.sign() * self.speed * dt;
        let max_top = (bounds_bottom - self.rect.size.y).max(bounds_top);
        self.rect.pos.y = (self.rect.pos.y + dy).clamp(bounds_top, max_top);
    }

    pub fn recenter(&mut self, field_height: f32) {
        self.rect.pos.y = (field_height - self.rect.size.y) / 2.0;
    }
}

/// Movement intent for paddle
#[derive(Debug, Clone, Copy, Default)]
pub struct PaddleIntent {
    pub dir: Direction,
}

impl PaddleIntent {
    pub fn new() -> Self {
        Self::default()
    }
}

/// What happened to the ball during one update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BallUpdate {
    pub hit_wall: bool,
    pub hit_paddle: Option<Side>,
    /// Side that won the point; the ball has already been served again
    pub scored: Option<Side>,
}

/// Ball component - the pong ball
#[derive(Debug, Clone, Copy)]
pub struct Ball {
    pub rect: Rect,
    pub vel: Vec2,
    /// Tracked separately so bounces can renormalize `vel` against it
    pub speed: f32,
}

impl Ball {
    pub fn new(center: Vec2, size: f32, vel: Vec2) -> Self {
        Self {
            rect: Rect::from_center_size(center, Vec2::splat(size)),
            vel,
            speed: vel.length(),
        }
    }

    /// Serve from field center toward `toward` at a random angle
    pub fn serve(&mut self, config: &Config, toward: Side, rng: &mut GameRng) {
        let angle = rng.0.gen_range(-config.serve_angle..=config.serve_angle);
        self.serve_at_angle(config, toward, angle);
    }

    pub fn serve_at_angle(&mut self, config: &Config, toward: Side, angle: f32) {
        self.rect.set_center(config.field_center());
        self.speed = config.ball_speed_initial;
        self.vel = Vec2::new(
            toward.sign() * self.speed * angle.cos(),
            self.speed * angle.sin(),
        );
    }

    /// One tick of ball physics: motion, walls, paddles, then scoring
    pub fn update(
        &mut self,
        config: &Config,
        left: &Paddle,
        right: &Paddle,
        rng: &mut GameRng,
    ) -> BallUpdate {
        let mut outcome = BallUpdate::default();

        self.advance(config.dt());
        outcome.hit_wall = self.bounce_off_walls(config.field_height);

        // Paddles are resolved before the scoring check so a return near the
        // back wall is never counted as a point
        for paddle in [left, right] {
            if self.bounce_off_paddle(paddle, config) {
                outcome.hit_paddle = Some(paddle.side);
                break;
            }
        }

        if let Some(scorer) = self.out_of_bounds(config.field_width) {
            outcome.scored = Some(scorer);
            self.serve(config, scorer.opponent(), rng);
        }

        outcome
    }

    pub fn advance(&mut self, dt: f32) {
        self.rect.pos += self.vel * dt;
    }

    /// Reflect off the top and bottom walls. Returns true on a bounce.
    pub fn bounce_off_walls(&mut self, field_height: f32) -> bool {
        let height = self.rect.size.y;

        if self.rect.top() < 0.0 {
            // Mirror the overshoot back inside
            self.rect.pos.y = -self.rect.pos.y;
            self.vel.y = self.vel.y.abs();
        } else if self.rect.bottom() > field_height {
            let overshoot = self.rect.bottom() - field_height;
            self.rect.pos.y = field_height - height - overshoot;
            self.vel.y = -self.vel.y.abs();
        } else {
            return false;
        }

        self.rect.pos.y = self.rect.pos.y.clamp(0.0, (field_height - height).max(0.0));
        true
    }

    /// Normalized distance between ball center and paddle center, in [-1, 1]
    pub fn hit_offset(&self, paddle: &Paddle) -> f32 {
        let half_height = paddle.rect.size.y / 2.0;
        ((self.rect.center().y - paddle.rect.center().y) / half_height).clamp(-1.0, 1.0)
    }

    /// Bounce off `paddle` if overlapping it while moving toward it
    pub fn bounce_off_paddle(&mut self, paddle: &Paddle, config: &Config) -> bool {
        let approaching = match paddle.side {
            Side::Left => self.vel.x < 0.0,
            Side::Right => self.vel.x > 0.0,
        };
        if !approaching || !self.rect.intersects(&paddle.rect) {
            return false;
        }

        let angle = self.hit_offset(paddle) * config.max_deflection;
        self.speed = (self.speed + config.ball_speed_increment).min(config.ball_speed_max);

        let away = paddle.side.opponent().sign();
        self.vel = Vec2::new(
            away * self.speed * angle.cos(),
            self.speed * angle.sin(),
        );

        // Sit flush against the paddle face so the next tick starts clear of it
        match paddle.side {
            Side::Left => self.rect.pos.x = paddle.rect.right(),
            Side::Right => self.rect.pos.x = paddle.rect.left() - self.rect.size.x,
        }

        true
    }

    /// Side that wins the point if the ball has left the field horizontally
    pub fn out_of_bounds(&self, field_width: f32) -> Option<Side> {
        if self.rect.left() < 0.0 {
            Some(Side::Right)
        } else if self.rect.right() > field_width {
            Some(Side::Left)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-3;

    fn left_paddle(config: &Config) -> Paddle {
        Paddle::new(Side::Left, config.paddle_speed, config)
    }

    fn right_paddle(config: &Config) -> Paddle {
        Paddle::new(Side::Right, config.ai_paddle_speed, config)
    }

    /// Ball overlapping the left paddle's face, moving left
    fn ball_at_left_paddle(config: &Config, paddle: &Paddle, center_y: f32, speed: f32) -> Ball {
        let x = paddle.rect.right() + config.ball_size / 2.0 - 2.0;
        Ball::new(Vec2::new(x, center_y), config.ball_size, Vec2::new(-speed, 0.0))
    }

    #[test]
    fn test_paddle_spawns_centered() {
        let config = Config::new();
        let paddle = left_paddle(&config);
        assert_eq!(paddle.rect.center().y, config.field_height / 2.0);
        assert_eq!(paddle.rect.left(), config.paddle_x(Side::Left));
    }

    #[test]
    fn test_paddle_moves_by_speed() {
        let config = Config::new();
        let mut paddle = left_paddle(&config);
        let start = paddle.rect.top();

        paddle.move_vertical(Direction::Down, config.dt(), 0.0, config.field_height);
        assert!((paddle.rect.top() - (start + config.paddle_speed * config.dt())).abs() < EPSILON);

        paddle.move_vertical(Direction::Up, config.dt(), 0.0, config.field_height);
        assert!((paddle.rect.top() - start).abs() < EPSILON);

        paddle.move_vertical(Direction::None, config.dt(), 0.0, config.field_height);
        assert!((paddle.rect.top() - start).abs() < EPSILON);
    }

    #[test]
    fn test_paddle_clamped_to_bounds() {
        let config = Config::new();
        let mut paddle = left_paddle(&config);

        for _ in 0..200 {
            paddle.move_vertical(Direction::Up, config.dt(), 0.0, config.field_height);
            assert!(paddle.rect.top() >= 0.0);
        }
        assert_eq!(paddle.rect.top(), 0.0);

        for _ in 0..200 {
            paddle.move_vertical(Direction::Down, config.dt(), 0.0, config.field_height);
            assert!(paddle.rect.bottom() <= config.field_height);
        }
        assert_eq!(paddle.rect.bottom(), config.field_height);
    }

    #[test]
    fn test_ball_new_tracks_speed() {
        let ball = Ball::new(Vec2::new(400.0, 300.0), 14.0, Vec2::new(-300.0, 400.0));
        assert!((ball.speed - 500.0).abs() < EPSILON);
        assert_eq!(ball.rect.center(), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_ball_bounces_off_top_wall() {
        let config = Config::new();
        let mut ball = Ball::new(Vec2::new(400.0, 5.0), config.ball_size, Vec2::new(240.0, -300.0));
        ball.rect.pos.y = -4.0;

        assert!(ball.bounce_off_walls(config.field_height));
        assert_eq!(ball.vel, Vec2::new(240.0, 300.0), "Only the vertical sign flips");
        assert_eq!(ball.rect.top(), 4.0, "Overshoot is mirrored back inside");
    }

    #[test]
    fn test_ball_bounces_off_bottom_wall() {
        let config = Config::new();
        let mut ball = Ball::new(Vec2::new(400.0, 0.0), config.ball_size, Vec2::new(-240.0, 300.0));
        ball.rect.pos.y = config.field_height - config.ball_size + 3.0;

        assert!(ball.bounce_off_walls(config.field_height));
        assert_eq!(ball.vel, Vec2::new(-240.0, -300.0));
        assert!((ball.rect.bottom() - (config.field_height - 3.0)).abs() < EPSILON);
    }

    #[test]
    fn test_ball_inside_field_does_not_bounce() {
        let config = Config::new();
        let mut ball = Ball::new(config.field_center(), config.ball_size, Vec2::new(240.0, 300.0));
        assert!(!ball.bounce_off_walls(config.field_height));
        assert_eq!(ball.vel, Vec2::new(240.0, 300.0));
    }

    #[test]
    fn test_wall_bounce_never_tunnels() {
        let config = Config::new();
        // Overshoot larger than the field itself still ends up inside
        let mut ball = Ball::new(Vec2::ZERO, config.ball_size, Vec2::new(0.0, -680.0));
        ball.rect.pos.y = -2000.0;

        ball.bounce_off_walls(config.field_height);
        assert!(ball.rect.top() >= 0.0);
        assert!(ball.rect.bottom() <= config.field_height);
    }

    #[test]
    fn test_center_hit_returns_straight() {
        let config = Config::new();
        let paddle = left_paddle(&config);
        let mut ball = ball_at_left_paddle(&config, &paddle, paddle.rect.center().y, 400.0);

        assert!(ball.bounce_off_paddle(&paddle, &config));
        assert!(ball.vel.x > 0.0, "Ball should head right after the left paddle");
        assert!(ball.vel.y.abs() < EPSILON, "Center hit should return flat");
    }

    #[test]
    fn test_edge_hit_gives_max_deflection() {
        let config = Config::new();
        let paddle = left_paddle(&config);
        let mut ball = ball_at_left_paddle(&config, &paddle, paddle.rect.bottom(), 400.0);

        assert!(ball.bounce_off_paddle(&paddle, &config));
        let angle = ball.vel.y.atan2(ball.vel.x);
        assert!((angle - config.max_deflection).abs() < EPSILON);

        let mut ball = ball_at_left_paddle(&config, &paddle, paddle.rect.top(), 400.0);
        assert!(ball.bounce_off_paddle(&paddle, &config));
        let angle = ball.vel.y.atan2(ball.vel.x);
        assert!((angle + config.max_deflection).abs() < EPSILON, "Top edge deflects upward");
    }

    #[test]
    fn test_paddle_bounce_speeds_up_and_keeps_invariant() {
        let config = Config::new();
        let paddle = left_paddle(&config);
        let mut ball = ball_at_left_paddle(&config, &paddle, paddle.rect.top() + 20.0, 400.0);

        assert!(ball.bounce_off_paddle(&paddle, &config));
        assert!((ball.speed - (400.0 + config.ball_speed_increment)).abs() < EPSILON);
        assert!((ball.vel.length() - ball.speed).abs() < EPSILON);
    }

    #[test]
    fn test_paddle_bounce_caps_speed() {
        let config = Config::new();
        let paddle = left_paddle(&config);
        let speed = config.ball_speed_max - 1.0;
        let mut ball = ball_at_left_paddle(&config, &paddle, paddle.rect.center().y, speed);

        assert!(ball.bounce_off_paddle(&paddle, &config));
        assert_eq!(ball.speed, config.ball_speed_max);
        assert!((ball.vel.length() - config.ball_speed_max).abs() < EPSILON);
    }

    #[test]
    fn test_paddle_bounce_pushes_ball_clear() {
        let config = Config::new();
        let left = left_paddle(&config);
        let mut ball = ball_at_left_paddle(&config, &left, left.rect.center().y, 400.0);
        ball.bounce_off_paddle(&left, &config);
        assert_eq!(ball.rect.left(), left.rect.right());
        assert!(!ball.rect.intersects(&left.rect));

        let right = right_paddle(&config);
        let mut ball = Ball::new(
            Vec2::new(right.rect.left() + 2.0, right.rect.center().y),
            config.ball_size,
            Vec2::new(400.0, 0.0),
        );
        assert!(ball.bounce_off_paddle(&right, &config));
        assert!(ball.vel.x < 0.0);
        assert_eq!(ball.rect.right(), right.rect.left());
    }

    #[test]
    fn test_no_bounce_when_moving_away() {
        let config = Config::new();
        let paddle = left_paddle(&config);
        let mut ball = ball_at_left_paddle(&config, &paddle, paddle.rect.center().y, 400.0);
        ball.vel.x = 400.0;

        assert!(!ball.bounce_off_paddle(&paddle, &config));
        assert_eq!(ball.vel, Vec2::new(400.0, 0.0));
        assert_eq!(ball.speed, 400.0);
    }

    #[test]
    fn test_no_bounce_when_missing_paddle() {
        let config = Config::new();
        let paddle = left_paddle(&config);
        let mut ball = ball_at_left_paddle(&config, &paddle, paddle.rect.bottom() + 40.0, 400.0);
        assert!(!ball.bounce_off_paddle(&paddle, &config));
    }

    #[test]
    fn test_out_of_bounds_sides() {
        let config = Config::new();
        let mut ball = Ball::new(config.field_center(), config.ball_size, Vec2::new(-360.0, 0.0));
        assert_eq!(ball.out_of_bounds(config.field_width), None);

        ball.rect.pos.x = -0.5;
        assert_eq!(ball.out_of_bounds(config.field_width), Some(Side::Right));

        ball.rect.pos.x = config.field_width - config.ball_size + 0.5;
        assert_eq!(ball.out_of_bounds(config.field_width), Some(Side::Left));
    }

    #[test]
    fn test_serve_heads_toward_given_side() {
        let config = Config::new();
        let mut rng = GameRng::new(7);
        let mut ball = Ball::new(Vec2::ZERO, config.ball_size, Vec2::new(600.0, 0.0));
        ball.speed = 600.0;

        for _ in 0..20 {
            ball.serve(&config, Side::Left, &mut rng);
            assert!(ball.vel.x < 0.0);
            assert_eq!(ball.rect.center(), config.field_center());
            assert_eq!(ball.speed, config.ball_speed_initial);
            assert!((ball.vel.length() - ball.speed).abs() < EPSILON);
            assert!(ball.vel.y.atan2(-ball.vel.x).abs() <= config.serve_angle + EPSILON);

            ball.serve(&config, Side::Right, &mut rng);
            assert!(ball.vel.x > 0.0);
        }
    }

    #[test]
    fn test_update_scores_and_serves_toward_conceder() {
        let config = Config::new();
        let mut rng = GameRng::new(1);
        let left = left_paddle(&config);
        let right = right_paddle(&config);

        // Ball slipping past the left paddle well below it
        let mut ball = Ball::new(Vec2::new(8.0, 580.0), config.ball_size, Vec2::new(-360.0, 0.0));
        let outcome = ball.update(&config, &left, &right, &mut rng);

        assert_eq!(outcome.scored, Some(Side::Right));
        assert_eq!(ball.rect.center(), config.field_center());
        assert!(ball.vel.x < 0.0, "Serve goes toward the player who conceded");
    }

    #[test]
    fn test_update_prefers_paddle_over_scoring() {
        let config = Config::new();
        let mut rng = GameRng::new(1);
        let left = left_paddle(&config);
        let right = right_paddle(&config);

        let start_x = left.rect.right() + config.ball_size / 2.0 + 2.0;
        let mut ball = Ball::new(
            Vec2::new(start_x, left.rect.center().y),
            config.ball_size,
            Vec2::new(-config.ball_speed_max, 0.0),
        );
        let outcome = ball.update(&config, &left, &right, &mut rng);

        assert_eq!(outcome.hit_paddle, Some(Side::Left));
        assert_eq!(outcome.scored, None);
        assert!(ball.vel.x > 0.0);
    }

    #[test]
    fn test_fastest_valid_ball_cannot_skip_paddle() {
        // Coarse ticks: 34 px of travel per tick, just under 30 + 14
        let config = Config {
            tick_rate: 20,
            paddle_width: 30.0,
            ..Config::new()
        };
        assert_eq!(config.validate(), Ok(()));

        let mut rng = GameRng::new(1);
        let left = left_paddle(&config);
        let right = right_paddle(&config);

        // Every starting gap up to one full tick of travel still meets the paddle
        for gap in [0.5, 1.0, 10.0, 20.0, 33.0] {
            let start_x = left.rect.right() + config.ball_size / 2.0 + gap;
            let mut ball = Ball::new(
                Vec2::new(start_x, left.rect.center().y),
                config.ball_size,
                Vec2::new(-config.ball_speed_max, 0.0),
            );
            let outcome = ball.update(&config, &left, &right, &mut rng);

            assert_eq!(outcome.hit_paddle, Some(Side::Left), "gap {gap}");
            assert_eq!(outcome.scored, None, "gap {gap}");
        }
    }
}
