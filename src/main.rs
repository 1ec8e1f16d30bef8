//! Breakout Engine headless driver
//!
//! Stands in for a graphical front end: every listener callback is logged
//! instead of drawn. Handy for checking a config or watching a game play out
//! with `RUST_LOG=debug`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use breakout_engine::sim::{Block, Outcome};
use breakout_engine::{BreakoutEngine, EngineConfig, GameStateListener, RespawnPolicy};

#[derive(Parser, Debug)]
#[command(author, version, about = "Run the Breakout engine without a window", long_about = None)]
struct Args {
    /// Engine config (JSON). Built-in defaults when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Give up after this many ticks
    #[arg(long, default_value_t = 100_000)]
    ticks: u64,
    /// Keep the paddle under the ball
    #[arg(long)]
    autopilot: bool,
    /// Respawn in a seeded random horizontal direction
    #[arg(long)]
    seed: Option<u64>,
}

/// Front end that logs callbacks and keeps a tally
#[derive(Debug, Default)]
struct ConsoleFrontEnd {
    ball_moves: u64,
    paddle_moves: u64,
    misses: u32,
    block_updates: u32,
}

impl GameStateListener for ConsoleFrontEnd {
    fn ball_moved(&mut self, x: f32, y: f32, _radius: f32) {
        self.ball_moves += 1;
        log::trace!("ball ({x:.1}, {y:.1})");
    }

    fn paddle_moved(&mut self, x: f32, _y: f32, _width: f32, _height: f32) {
        self.paddle_moves += 1;
        log::trace!("paddle x={x:.1}");
    }

    fn ball_missed_paddle(&mut self) {
        self.misses += 1;
        log::debug!("Missed!");
    }

    fn block_updated(&mut self, block: &Block) {
        self.block_updates += 1;
        log::debug!("Block ({}, {}) -> {:?}", block.row, block.column, block.state);
    }

    fn number_of_lives_changed(&mut self, lives: u32) {
        log::info!("Lives: {lives}");
    }

    fn game_win(&mut self) {
        log::info!("!! You Win !!");
    }

    fn game_lose(&mut self) {
        log::info!("** Game Over **");
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => EngineConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.respawn = RespawnPolicy::Seeded { seed };
    }

    let mut engine =
        BreakoutEngine::try_new(config, ConsoleFrontEnd::default()).context("build engine")?;

    // Idle until the first "click", which resets and resumes
    engine.pause();
    engine.reset_game();
    engine.resume();
    log::info!("Breakout (headless) running, autopilot={}", args.autopilot);

    while engine.running() && engine.ticks() < args.ticks {
        if args.autopilot {
            let ball_x = engine.ball().pos.x;
            let cursor = if engine.config().center_paddle_on_cursor {
                ball_x
            } else {
                ball_x - engine.paddle().width / 2.0
            };
            engine.update_paddle_location(cursor);
        }
        engine.step();
    }

    let result = match engine.outcome() {
        Outcome::Won => "won",
        Outcome::Lost => "lost",
        Outcome::InProgress => "unfinished",
    };
    let ticks = engine.ticks();
    let lives = engine.lives();
    let remaining = engine.remaining_blocks();
    let total = engine.blocks().len();
    let tally = engine.into_listener();

    println!(
        "{result} after {ticks} ticks: {lives} lives left, {remaining}/{total} blocks standing, \
         {} misses, {} block updates, {} ball moves, {} paddle moves",
        tally.misses, tally.block_updates, tally.ball_moves, tally.paddle_moves
    );
    Ok(())
}

fn load_config(path: &Path) -> Result<EngineConfig> {
    let json = fs::read_to_string(path).with_context(|| format!("read config {path:?}"))?;
    EngineConfig::from_json(&json).with_context(|| format!("parse config {path:?}"))
}
