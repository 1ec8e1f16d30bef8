//! Engine configuration
//!
//! Field geometry, block layout and the gameplay policies that differ between
//! Breakout variants. Loaded from JSON or built in code; every engine is
//! constructed from one of these.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::geometry::Rect;
use crate::sim::state::Block;

/// How the block grid is laid out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockLayout {
    /// Rows and columns; block size is derived from the field. The grid spans
    /// the full width and the top third of the field.
    Grid { rows: u32, columns: u32 },
    /// Explicit block size; as many columns as fit across the field.
    Sized { width: f32, height: f32, rows: u32 },
    /// Explicit pixel rects
    Rects { rects: Vec<Rect> },
}

impl Default for BlockLayout {
    fn default() -> Self {
        BlockLayout::Grid {
            rows: BLOCK_ROWS,
            columns: BLOCK_COLUMNS,
        }
    }
}

/// What the paddle does to the ball's horizontal velocity
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PaddleReflection {
    /// Only the vertical velocity flips
    #[default]
    Mirror,
    /// Horizontal velocity is set from where the ball struck: `max_dx` at the
    /// paddle's edges, zero at its centre
    Angled { max_dx: f32 },
}

/// Velocity the ball respawns with after a miss
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RespawnPolicy {
    /// Always the configured velocity
    #[default]
    Fixed,
    /// Configured velocity with a horizontal direction drawn from a seeded RNG
    Seeded { seed: u64 },
}

/// Reasons a configuration is rejected
#[derive(Debug)]
pub enum ConfigError {
    /// JSON could not be parsed
    Parse(serde_json::Error),
    /// A length that must be finite and positive is not
    NonPositive { field: &'static str, value: f32 },
    /// The paddle does not fit on the field
    PaddleTooLarge,
    /// The ball does not fit on the field
    BallTooLarge,
    NoLives,
    /// The layout produces no blocks
    NoBlocks,
    /// The layout produces more than `max` blocks
    TooManyBlocks { max: u64 },
    /// A block lies outside the field or reaches into the paddle row
    BlockOutOfBounds { index: usize },
    ZeroVelocity,
    /// A per-tick velocity component could skip through the ball's own width
    VelocityTooFast { component: f32 },
    /// The spawn point leaves the ball outside the field or inside a block
    BadSpawn,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "invalid config JSON: {e}"),
            ConfigError::NonPositive { field, value } => {
                write!(f, "{field} must be finite and positive, got {value}")
            }
            ConfigError::PaddleTooLarge => {
                write!(f, "paddle must fit within the field width and half its height")
            }
            ConfigError::BallTooLarge => write!(f, "ball diameter must be smaller than the field"),
            ConfigError::NoLives => write!(f, "initial lives must be at least 1"),
            ConfigError::NoBlocks => write!(f, "block layout produces no blocks"),
            ConfigError::TooManyBlocks { max } => {
                write!(f, "block layout produces more than {max} blocks")
            }
            ConfigError::BlockOutOfBounds { index } => {
                write!(f, "block {index} lies outside the field or overlaps the paddle row")
            }
            ConfigError::ZeroVelocity => write!(f, "ball velocity must be non-zero"),
            ConfigError::VelocityTooFast { component } => write!(
                f,
                "ball velocity component {component} must be smaller than the ball diameter"
            ),
            ConfigError::BadSpawn => {
                write!(f, "ball spawn point must keep the ball inside the field and clear of blocks")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Ball ===
    pub ball_radius: f32,
    /// Velocity at game start and after each miss (pixels per tick)
    pub ball_velocity: Vec2,
    /// Ball centre at spawn; `None` means the field centre
    pub ball_spawn: Option<Vec2>,
    pub respawn: RespawnPolicy,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_reflection: PaddleReflection,
    /// Centre the paddle under the cursor instead of putting its left edge there
    pub center_paddle_on_cursor: bool,

    // === Session ===
    pub blocks: BlockLayout,
    pub initial_lives: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            ball_radius: BALL_RADIUS,
            ball_velocity: Vec2::new(BALL_VELOCITY_X, BALL_VELOCITY_Y),
            ball_spawn: None,
            respawn: RespawnPolicy::Fixed,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_reflection: PaddleReflection::Mirror,
            center_paddle_on_cursor: true,

            blocks: BlockLayout::default(),
            initial_lives: INITIAL_LIVES,
        }
    }
}

impl EngineConfig {
    /// Default geometry on a field of the given size
    pub fn with_field(width: f32, height: f32) -> Self {
        Self {
            field_width: width,
            field_height: height,
            ..Self::default()
        }
    }

    /// Parse a JSON config. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Where the ball spawns
    pub fn spawn_point(&self) -> Vec2 {
        self.ball_spawn
            .unwrap_or_else(|| Vec2::new(self.field_width / 2.0, self.field_height / 2.0))
    }

    /// Number of blocks the layout produces, `None` if it overflows `u64`
    pub fn block_count(&self) -> Option<u64> {
        match &self.blocks {
            BlockLayout::Grid { rows, columns } => u64::from(*rows).checked_mul(u64::from(*columns)),
            BlockLayout::Sized { width, rows, .. } => {
                u64::from(*rows).checked_mul(u64::from(self.sized_columns(*width)))
            }
            BlockLayout::Rects { rects } => Some(rects.len() as u64),
        }
    }

    fn sized_columns(&self, width: f32) -> u32 {
        if width <= 0.0 || !width.is_finite() {
            return 0;
        }
        // Float to int casts saturate
        (self.field_width / width).floor() as u32
    }

    /// Lay out the block grid in row-major order, every block `New`
    pub fn build_blocks(&self) -> Vec<Block> {
        match &self.blocks {
            BlockLayout::Grid { rows, columns } => {
                if *rows == 0 || *columns == 0 {
                    return Vec::new();
                }
                let width = self.field_width / *columns as f32;
                let height = self.field_height * GRID_HEIGHT_FRACTION / *rows as f32;
                grid(*rows, *columns, width, height)
            }
            BlockLayout::Sized {
                width,
                height,
                rows,
            } => {
                let columns = self.sized_columns(*width);
                grid(*rows, columns, *width, *height)
            }
            BlockLayout::Rects { rects } => rects
                .iter()
                .enumerate()
                .map(|(i, rect)| Block::new(0, i as u32, *rect))
                .collect(),
        }
    }

    /// Check the geometry is playable
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("field_width", self.field_width)?;
        positive("field_height", self.field_height)?;
        positive("ball_radius", self.ball_radius)?;
        positive("paddle_width", self.paddle_width)?;
        positive("paddle_height", self.paddle_height)?;

        if self.paddle_width > self.field_width || self.paddle_height > self.field_height / 2.0 {
            return Err(ConfigError::PaddleTooLarge);
        }

        let diameter = self.ball_radius * 2.0;
        if diameter >= self.field_width || diameter >= self.field_height {
            return Err(ConfigError::BallTooLarge);
        }

        if self.initial_lives == 0 {
            return Err(ConfigError::NoLives);
        }

        let velocity = self.ball_velocity;
        if !velocity.is_finite() {
            return Err(ConfigError::VelocityTooFast {
                component: f32::INFINITY,
            });
        }
        if velocity == Vec2::ZERO {
            return Err(ConfigError::ZeroVelocity);
        }
        for component in [velocity.x, velocity.y] {
            if component.abs() >= diameter {
                return Err(ConfigError::VelocityTooFast { component });
            }
        }
        if let PaddleReflection::Angled { max_dx } = self.paddle_reflection {
            if !max_dx.is_finite() || max_dx < 0.0 || max_dx >= diameter {
                return Err(ConfigError::VelocityTooFast { component: max_dx });
            }
        }

        if let BlockLayout::Sized { width, height, .. } = &self.blocks {
            positive("blocks.width", *width)?;
            positive("blocks.height", *height)?;
        }

        match self.block_count() {
            Some(count) if count <= MAX_BLOCKS => {}
            _ => return Err(ConfigError::TooManyBlocks { max: MAX_BLOCKS }),
        }

        let blocks = self.build_blocks();
        if blocks.is_empty() {
            return Err(ConfigError::NoBlocks);
        }

        let play_area = Rect::new(
            0.0,
            0.0,
            self.field_width,
            self.field_height - self.paddle_height,
        );
        for (index, block) in blocks.iter().enumerate() {
            let rect = &block.rect;
            let sized = rect.width > 0.0 && rect.height > 0.0;
            if !sized || !play_area.contains_rect(rect) {
                return Err(ConfigError::BlockOutOfBounds { index });
            }
        }

        let spawn = self.spawn_point();
        let ball = Rect::around(spawn, self.ball_radius);
        if !spawn.is_finite()
            || !play_area.contains_rect(&ball)
            || blocks.iter().any(|b| b.rect.overlaps(&ball))
        {
            return Err(ConfigError::BadSpawn);
        }

        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn grid(rows: u32, columns: u32, width: f32, height: f32) -> Vec<Block> {
    let mut blocks = Vec::with_capacity((rows as usize).saturating_mul(columns as usize));
    for row in 0..rows {
        for column in 0..columns {
            let rect = Rect::new(column as f32 * width, row as f32 * height, width, height);
            blocks.push(Block::new(row, column, rect));
        }
    }
    blocks
}
