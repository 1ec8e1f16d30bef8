//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per `step()` call, no delta time
//! - Seeded RNG only
//! - Stable iteration order (row-major blocks)
//! - No rendering or platform dependencies

pub mod collision;
pub mod engine;
pub mod geometry;
pub mod listener;
pub mod state;

pub use collision::{Contact, WallHits, ball_block_contact, bounce_off_walls, reflect_velocity};
pub use engine::BreakoutEngine;
pub use geometry::Rect;
pub use listener::{EventLog, GameEvent, GameStateListener};
pub use state::{Ball, Block, BlockState, Outcome, Paddle};
