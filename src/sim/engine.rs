//! Fixed-step Breakout engine
//!
//! One `step()` is one tick: move the ball, resolve at most one collision per
//! surface kind, then tell the listener what changed. The caller owns the
//! clock; nothing here scales by elapsed time.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::{
    ball_block_contact, ball_hits_paddle, bounce_off_paddle, bounce_off_walls, resolve_contact,
};
use super::geometry::Rect;
use super::listener::GameStateListener;
use super::state::{Ball, Block, Outcome, Paddle};
use crate::config::{ConfigError, EngineConfig, RespawnPolicy};

/// The game engine. Owns all simulation state and the listener it reports to.
#[derive(Debug)]
pub struct BreakoutEngine<L> {
    config: EngineConfig,
    ball: Ball,
    paddle: Paddle,
    /// Row-major; iteration order decides which block wins a tie
    blocks: Vec<Block>,
    lives: u32,
    running: bool,
    outcome: Outcome,
    /// Paddle moved since the listener last heard about it
    paddle_dirty: bool,
    /// Last ball position sent to the listener
    reported_ball: Option<Vec2>,
    rng: Pcg32,
    ticks: u64,
    listener: L,
}

impl<L: GameStateListener> BreakoutEngine<L> {
    /// Create an engine.
    ///
    /// # Panics
    ///
    /// Panics if `config` fails [`EngineConfig::validate`]. Use
    /// [`BreakoutEngine::try_new`] for configs that come from outside the
    /// program.
    pub fn new(config: EngineConfig, listener: L) -> Self {
        match Self::try_new(config, listener) {
            Ok(engine) => engine,
            Err(e) => panic!("invalid engine config: {e}"),
        }
    }

    pub fn try_new(config: EngineConfig, listener: L) -> Result<Self, ConfigError> {
        config.validate()?;

        let paddle = Paddle::centered(
            config.field_width,
            config.field_height,
            config.paddle_width,
            config.paddle_height,
        );
        let ball = Ball::new(config.spawn_point(), config.ball_velocity, config.ball_radius);
        let blocks = config.build_blocks();

        log::info!(
            "Engine created: {}x{} field, {} blocks, {} lives",
            config.field_width,
            config.field_height,
            blocks.len(),
            config.initial_lives
        );

        let mut engine = Self {
            rng: respawn_rng(&config.respawn),
            lives: config.initial_lives,
            config,
            ball,
            paddle,
            blocks,
            running: true,
            outcome: Outcome::InProgress,
            paddle_dirty: true,
            reported_ball: None,
            ticks: 0,
            listener,
        };
        engine.reset_ball();
        Ok(engine)
    }

    /// Advance the simulation by one tick. Does nothing while paused or once
    /// the session has been won or lost.
    pub fn step(&mut self) {
        if !self.running || self.outcome != Outcome::InProgress {
            return;
        }
        self.ticks += 1;

        let prev_bounds = self.ball.bounds();
        let prev_bottom = self.ball.bottom();
        self.ball.step();

        let walls = bounce_off_walls(&mut self.ball, self.config.field_width);
        if walls.any() {
            log::trace!("Wall bounce {:?} at tick {}", walls, self.ticks);
        }

        let missed = if ball_hits_paddle(prev_bottom, &self.ball, &self.paddle) {
            bounce_off_paddle(&mut self.ball, &self.paddle, &self.config.paddle_reflection);
            false
        } else {
            self.ball.pos.y > self.config.field_height
        };

        if missed {
            self.handle_miss();
        } else {
            self.check_blocks(&prev_bounds);
        }

        self.notify_ball_moved();
        if self.paddle_dirty {
            self.paddle_dirty = false;
            let p = self.paddle;
            self.listener.paddle_moved(p.x, p.y, p.width, p.height);
        }
    }

    /// Track the pointer. `mouse_x` is clamped so the paddle stays on the
    /// field; ignored while paused.
    pub fn update_paddle_location(&mut self, mouse_x: f32) {
        if !self.running {
            return;
        }
        let x = if self.config.center_paddle_on_cursor {
            mouse_x - self.paddle.width / 2.0
        } else {
            mouse_x
        };
        if self.paddle.move_to(x, self.config.field_width) {
            self.paddle_dirty = true;
        }
    }

    pub fn pause(&mut self) {
        if self.running {
            log::debug!("Paused at tick {}", self.ticks);
        }
        self.running = false;
    }

    pub fn resume(&mut self) {
        if !self.running {
            log::debug!("Resumed at tick {}", self.ticks);
        }
        self.running = true;
    }

    /// Restore lives and every block, and respawn the ball. Does not resume.
    pub fn reset_game(&mut self) {
        self.lives = self.config.initial_lives;
        self.outcome = Outcome::InProgress;
        self.blocks = self.config.build_blocks();
        self.rng = respawn_rng(&self.config.respawn);
        self.reset_ball();
        self.paddle_dirty = true;

        log::debug!(
            "Game reset: {} lives, {} blocks",
            self.lives,
            self.blocks.len()
        );

        self.listener.number_of_lives_changed(self.lives);
        for block in &self.blocks {
            self.listener.block_updated(block);
        }
    }

    /// Put the ball back on its spawn point with the respawn velocity
    pub fn reset_ball(&mut self) {
        self.ball.pos = self.config.spawn_point();
        self.ball.vel = match self.config.respawn {
            RespawnPolicy::Fixed => self.config.ball_velocity,
            RespawnPolicy::Seeded { .. } => {
                let mut vel = self.config.ball_velocity;
                if self.rng.random_bool(0.5) {
                    vel.x = -vel.x;
                }
                vel
            }
        };
    }

    // === Queries ===

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn paddle_height(&self) -> f32 {
        self.paddle.height
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn paddle(&self) -> &Paddle {
        &self.paddle
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Blocks not yet destroyed
    pub fn remaining_blocks(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| !b.state.is_destroyed())
            .count()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Running ticks performed since construction
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    pub fn into_listener(self) -> L {
        self.listener
    }

    // === Tick internals ===

    fn handle_miss(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        log::debug!("Ball missed paddle, {} lives left", self.lives);
        self.listener.ball_missed_paddle();

        if self.lives == 0 {
            // Leave the ball where it fell, on the bottom edge
            self.ball.pos.y = self.ball.pos.y.min(self.config.field_height);
            self.finish(Outcome::Lost);
        } else {
            self.reset_ball();
            self.listener.number_of_lives_changed(self.lives);
        }
    }

    /// Resolve the first block the ball overlaps, if any
    fn check_blocks(&mut self, prev_bounds: &Rect) {
        let ball = &self.ball;
        let Some((index, contact)) = self
            .blocks
            .iter()
            .enumerate()
            .filter(|(_, b)| !b.state.is_destroyed())
            .find_map(|(i, b)| ball_block_contact(prev_bounds, ball, &b.rect).map(|c| (i, c)))
        else {
            return;
        };

        resolve_contact(&mut self.ball, &contact);
        self.keep_ball_in_field();

        let state = self.blocks[index].hit();
        self.listener.block_updated(&self.blocks[index]);

        if state.is_destroyed() && self.remaining_blocks() == 0 {
            self.finish(Outcome::Won);
        }
    }

    fn keep_ball_in_field(&mut self) {
        let r = self.ball.radius;
        let min = Vec2::splat(r);
        let max = Vec2::new(self.config.field_width - r, self.config.field_height);
        self.ball.pos = self.ball.pos.clamp(min, max);
    }

    fn notify_ball_moved(&mut self) {
        if self.reported_ball == Some(self.ball.pos) {
            return;
        }
        self.reported_ball = Some(self.ball.pos);
        let b = self.ball;
        self.listener.ball_moved(b.pos.x, b.pos.y, b.radius);
    }

    fn finish(&mut self, outcome: Outcome) {
        self.running = false;
        self.outcome = outcome;
        match outcome {
            Outcome::Won => {
                log::info!("Game won after {} ticks", self.ticks);
                self.listener.game_win();
            }
            Outcome::Lost => {
                log::info!("Game lost after {} ticks", self.ticks);
                self.listener.game_lose();
            }
            Outcome::InProgress => {}
        }
    }
}

fn respawn_rng(policy: &RespawnPolicy) -> Pcg32 {
    let seed = match policy {
        RespawnPolicy::Seeded { seed } => *seed,
        RespawnPolicy::Fixed => 0,
    };
    Pcg32::seed_from_u64(seed)
}
