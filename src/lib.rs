//! Breakout Engine - A fixed-step Breakout simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball, paddle, blocks, collisions, lifecycle)
//! - `config`: Data-driven field geometry and gameplay policies
//!
//! Rendering is left to the caller: a front end implements
//! [`sim::GameStateListener`] and redraws whatever the engine reports.

pub mod config;
pub mod sim;

pub use config::{BlockLayout, ConfigError, EngineConfig, PaddleReflection, RespawnPolicy};
pub use sim::{BreakoutEngine, GameEvent, GameStateListener};

/// Default engine configuration constants
pub mod consts {
    /// Play field dimensions
    pub const FIELD_WIDTH: f32 = 240.0;
    pub const FIELD_HEIGHT: f32 = 240.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 5.0;
    /// Initial ball velocity, pixels per tick
    pub const BALL_VELOCITY_X: f32 = 1.0;
    pub const BALL_VELOCITY_Y: f32 = 1.0;

    /// Paddle defaults - paddle sits on the bottom edge of the field
    pub const PADDLE_WIDTH: f32 = 50.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;

    /// Block grid defaults
    pub const BLOCK_ROWS: u32 = 4;
    pub const BLOCK_COLUMNS: u32 = 8;
    /// Share of the field height a derived grid fills
    pub const GRID_HEIGHT_FRACTION: f32 = 1.0 / 3.0;
    /// Largest block count a layout may produce
    pub const MAX_BLOCKS: u64 = 4096;

    pub const INITIAL_LIVES: u32 = 3;
}
