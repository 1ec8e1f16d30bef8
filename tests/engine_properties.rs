//! Property tests for the engine's invariants over random geometry and input

use breakout_engine::config::{BlockLayout, EngineConfig, PaddleReflection, RespawnPolicy};
use breakout_engine::sim::{BlockState, BreakoutEngine, EventLog, GameEvent, Outcome};
use glam::Vec2;
use proptest::prelude::*;

const FIELD: f32 = 200.0;
const PADDLE_WIDTH: f32 = 50.0;
const MAX_TICKS: usize = 3000;

fn config_strategy() -> impl Strategy<Value = EngineConfig> {
    (
        (0.5f32..4.0, any::<bool>()),
        (0.5f32..4.0, any::<bool>()),
        1u32..4,
        1u32..6,
        1u32..4,
        any::<u64>(),
        any::<bool>(),
    )
        .prop_map(|((vx, flip_x), (vy, up), rows, columns, lives, seed, angled)| EngineConfig {
            field_width: FIELD,
            field_height: FIELD,
            ball_radius: 5.0,
            paddle_width: PADDLE_WIDTH,
            paddle_height: 10.0,
            ball_velocity: Vec2::new(if flip_x { -vx } else { vx }, if up { -vy } else { vy }),
            respawn: RespawnPolicy::Seeded { seed },
            paddle_reflection: if angled {
                PaddleReflection::Angled { max_dx: 3.0 }
            } else {
                PaddleReflection::Mirror
            },
            blocks: BlockLayout::Grid { rows, columns },
            initial_lives: lives,
            ..EngineConfig::default()
        })
}

fn cursor_strategy() -> impl Strategy<Value = Vec<Option<f32>>> {
    prop::collection::vec(prop::option::of(-50.0f32..250.0), 1..200)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_invariants_hold_every_tick(config in config_strategy(), cursor in cursor_strategy()) {
        let initial_lives = config.initial_lives;
        let mut engine = BreakoutEngine::new(config, EventLog::new());
        let mut seen: Vec<BlockState> = engine.blocks().iter().map(|b| b.state).collect();

        for tick in 0..MAX_TICKS {
            if !engine.running() {
                break;
            }
            if let Some(x) = cursor[tick % cursor.len()] {
                engine.update_paddle_location(x);
            }
            let lives_before = engine.lives();
            engine.step();
            let events = engine.listener_mut().take();

            // Ball and paddle stay on the field
            let pos = engine.ball().pos;
            prop_assert!((0.0..=FIELD).contains(&pos.x), "ball x {} off field", pos.x);
            prop_assert!((0.0..=FIELD).contains(&pos.y), "ball y {} off field", pos.y);
            let paddle_x = engine.paddle().x;
            prop_assert!((0.0..=FIELD - PADDLE_WIDTH).contains(&paddle_x));

            // Blocks only ever advance, one at most per tick
            for (prev, block) in seen.iter_mut().zip(engine.blocks()) {
                prop_assert!(block.state >= *prev, "block went back from {:?} to {:?}", prev, block.state);
                *prev = block.state;
            }
            let block_updates = events
                .iter()
                .filter(|e| matches!(e, GameEvent::BlockUpdated { .. }))
                .count();
            prop_assert!(block_updates <= 1);

            prop_assert!(engine.lives() <= lives_before);
            prop_assert!(engine.lives() <= initial_lives);

            if engine.lives() == 0 {
                prop_assert!(!engine.running());
                prop_assert_eq!(engine.outcome(), Outcome::Lost);
                prop_assert!(events.contains(&GameEvent::GameLose));
            }
            if engine.remaining_blocks() == 0 {
                prop_assert!(!engine.running());
                prop_assert_eq!(engine.outcome(), Outcome::Won);
                prop_assert!(events.contains(&GameEvent::GameWin));
            }
            if engine.running() {
                prop_assert_eq!(engine.outcome(), Outcome::InProgress);
            }
        }
    }

    #[test]
    fn prop_paused_engine_is_inert(config in config_strategy(), warmup in 0usize..200, idle in 1usize..200) {
        let mut engine = BreakoutEngine::new(config, EventLog::new());
        for _ in 0..warmup {
            engine.step();
        }
        engine.pause();
        engine.listener_mut().clear();

        let ball = *engine.ball();
        let paddle = *engine.paddle();
        let blocks = engine.blocks().to_vec();
        let lives = engine.lives();

        for _ in 0..idle {
            engine.update_paddle_location(0.0);
            engine.step();
        }

        prop_assert_eq!(*engine.ball(), ball);
        prop_assert_eq!(*engine.paddle(), paddle);
        prop_assert_eq!(engine.blocks(), &blocks[..]);
        prop_assert_eq!(engine.lives(), lives);
        prop_assert!(engine.listener().is_empty());
    }

    #[test]
    fn prop_paddle_is_clamped(cursor in -1.0e6f32..1.0e6) {
        let config = EngineConfig::with_field(FIELD, FIELD);
        let mut engine = BreakoutEngine::new(config, ());
        engine.update_paddle_location(cursor);

        let expected = (cursor - PADDLE_WIDTH / 2.0).clamp(0.0, FIELD - PADDLE_WIDTH);
        prop_assert_eq!(engine.paddle().x, expected);
    }
}

#[test]
fn test_shipped_configs_validate() {
    for json in [
        include_str!("../configs/classic.json"),
        include_str!("../configs/angled.json"),
    ] {
        let config = EngineConfig::from_json(json).expect("shipped config should load");
        let engine = BreakoutEngine::new(config, ());
        assert!(engine.running());
        assert!(!engine.blocks().is_empty());
    }
}

#[test]
fn test_classic_config_matches_defaults() {
    let config = EngineConfig::from_json(include_str!("../configs/classic.json")).expect("load");
    assert_eq!(config, EngineConfig::default());
}

#[test]
fn test_reset_replays_identically() {
    // Seeded respawn restarts with the game, so a reset run repeats the first
    let config = EngineConfig {
        initial_lives: 2,
        respawn: RespawnPolicy::Seeded { seed: 99 },
        ..EngineConfig::with_field(FIELD, FIELD)
    };
    let mut engine = BreakoutEngine::new(config, EventLog::new());
    engine.reset_game();
    engine.listener_mut().clear();

    fn run(engine: &mut BreakoutEngine<EventLog>) -> Vec<GameEvent> {
        engine.resume();
        for _ in 0..MAX_TICKS {
            if !engine.running() {
                break;
            }
            // Keep the paddle on the far side so every pass is a miss
            let away = if engine.ball().pos.x < FIELD / 2.0 { 1000.0 } else { -1000.0 };
            engine.update_paddle_location(away);
            engine.step();
        }
        engine.listener_mut().take()
    }

    let first = run(&mut engine);
    engine.reset_game();
    engine.listener_mut().clear();
    let second = run(&mut engine);

    assert!(first.contains(&GameEvent::GameLose));
    assert_eq!(first, second);
}
