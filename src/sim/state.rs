//! Simulation entities: ball, paddle, blocks and session outcome

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;

/// How the current session ended, if it has
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Outcome {
    #[default]
    InProgress,
    /// Every block destroyed
    Won,
    /// Lives ran out
    Lost,
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Centre position
    pub pos: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self { pos, vel, radius }
    }

    pub fn bounds(&self) -> Rect {
        Rect::around(self.pos, self.radius)
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }

    /// Advance one tick
    pub fn step(&mut self) {
        self.pos += self.vel;
    }
}

/// The player's paddle, pinned to the bottom edge of the field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
    /// Top edge (field height - paddle height)
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    /// Paddle centred horizontally on the bottom edge of a field
    pub fn centered(field_width: f32, field_height: f32, width: f32, height: f32) -> Self {
        Self {
            x: (field_width - width) / 2.0,
            y: field_height - height,
            width,
            height,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Move the left edge to `x`, kept inside `[0, field_width - width]`.
    /// Returns true if the paddle moved.
    pub fn move_to(&mut self, x: f32, field_width: f32) -> bool {
        let max_x = (field_width - self.width).max(0.0);
        // NaN input collapses to the left edge
        let clamped = if x.is_nan() { 0.0 } else { x.clamp(0.0, max_x) };
        if clamped == self.x {
            return false;
        }
        self.x = clamped;
        true
    }
}

/// Block damage state. Only ever moves forward: New -> Hit -> Destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum BlockState {
    #[default]
    New,
    Hit,
    Destroyed,
}

impl BlockState {
    /// State after one more hit
    pub fn advance(self) -> Self {
        match self {
            BlockState::New => BlockState::Hit,
            BlockState::Hit | BlockState::Destroyed => BlockState::Destroyed,
        }
    }

    pub fn is_destroyed(self) -> bool {
        self == BlockState::Destroyed
    }
}

/// A destructible block
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub row: u32,
    pub column: u32,
    pub rect: Rect,
    pub state: BlockState,
}

impl Block {
    pub fn new(row: u32, column: u32, rect: Rect) -> Self {
        Self {
            row,
            column,
            rect,
            state: BlockState::New,
        }
    }

    /// Register a hit. Returns the new state.
    pub fn hit(&mut self) -> BlockState {
        self.state = self.state.advance();
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_state_is_monotonic() {
        let mut block = Block::new(0, 0, Rect::new(0.0, 0.0, 10.0, 5.0));
        assert_eq!(block.state, BlockState::New);
        assert_eq!(block.hit(), BlockState::Hit);
        assert_eq!(block.hit(), BlockState::Destroyed);
        // Further hits never revive a block
        assert_eq!(block.hit(), BlockState::Destroyed);
        assert!(BlockState::New < BlockState::Hit && BlockState::Hit < BlockState::Destroyed);
    }

    #[test]
    fn test_paddle_move_clamps_to_field() {
        let mut paddle = Paddle::centered(200.0, 200.0, 50.0, 10.0);
        assert_eq!(paddle.x, 75.0);
        assert_eq!(paddle.y, 190.0);

        assert!(paddle.move_to(1000.0, 200.0));
        assert_eq!(paddle.x, 150.0);

        assert!(paddle.move_to(-20.0, 200.0));
        assert_eq!(paddle.x, 0.0);

        // Same position reports no movement
        assert!(!paddle.move_to(0.0, 200.0));
        assert!(!paddle.move_to(f32::NAN, 200.0));
    }

    #[test]
    fn test_ball_step() {
        let mut ball = Ball::new(Vec2::new(10.0, 10.0), Vec2::new(2.0, -1.0), 3.0);
        ball.step();
        assert_eq!(ball.pos, Vec2::new(12.0, 9.0));
        assert_eq!(ball.bottom(), 12.0);
    }
}
