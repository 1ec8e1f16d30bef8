//! Engine -> front end notifications
//!
//! The engine reports every state change through [`GameStateListener`]
//! synchronously from inside `step()` and the lifecycle calls. Listeners are
//! output sinks: nothing they do feeds back into the simulation.

use serde::Serialize;

use super::state::{Block, BlockState};

/// Callbacks fired by the engine. All methods default to doing nothing, so a
/// front end only implements what it draws.
pub trait GameStateListener {
    /// Ball centre moved
    fn ball_moved(&mut self, _x: f32, _y: f32, _radius: f32) {}

    /// Paddle moved; `x`/`y` are its top-left corner
    fn paddle_moved(&mut self, _x: f32, _y: f32, _width: f32, _height: f32) {}

    /// Ball fell past the bottom of the field
    fn ball_missed_paddle(&mut self) {}

    /// A block changed state (or was reset to `New`)
    fn block_updated(&mut self, _block: &Block) {}

    fn number_of_lives_changed(&mut self, _lives: u32) {}

    fn game_win(&mut self) {}

    fn game_lose(&mut self) {}
}

impl<L: GameStateListener + ?Sized> GameStateListener for &mut L {
    fn ball_moved(&mut self, x: f32, y: f32, radius: f32) {
        (**self).ball_moved(x, y, radius)
    }

    fn paddle_moved(&mut self, x: f32, y: f32, width: f32, height: f32) {
        (**self).paddle_moved(x, y, width, height)
    }

    fn ball_missed_paddle(&mut self) {
        (**self).ball_missed_paddle()
    }

    fn block_updated(&mut self, block: &Block) {
        (**self).block_updated(block)
    }

    fn number_of_lives_changed(&mut self, lives: u32) {
        (**self).number_of_lives_changed(lives)
    }

    fn game_win(&mut self) {
        (**self).game_win()
    }

    fn game_lose(&mut self) {
        (**self).game_lose()
    }
}

impl<L: GameStateListener + ?Sized> GameStateListener for Box<L> {
    fn ball_moved(&mut self, x: f32, y: f32, radius: f32) {
        (**self).ball_moved(x, y, radius)
    }

    fn paddle_moved(&mut self, x: f32, y: f32, width: f32, height: f32) {
        (**self).paddle_moved(x, y, width, height)
    }

    fn ball_missed_paddle(&mut self) {
        (**self).ball_missed_paddle()
    }

    fn block_updated(&mut self, block: &Block) {
        (**self).block_updated(block)
    }

    fn number_of_lives_changed(&mut self, lives: u32) {
        (**self).number_of_lives_changed(lives)
    }

    fn game_win(&mut self) {
        (**self).game_win()
    }

    fn game_lose(&mut self) {
        (**self).game_lose()
    }
}

/// A listener that ignores everything
impl GameStateListener for () {}

/// One listener callback, as data
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    BallMoved { x: f32, y: f32, radius: f32 },
    PaddleMoved { x: f32, y: f32, width: f32, height: f32 },
    BallMissedPaddle,
    BlockUpdated { row: u32, column: u32, state: BlockState },
    LivesChanged { lives: u32 },
    GameWin,
    GameLose,
}

/// Records callbacks in the order they fired
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Drain everything recorded so far
    pub fn take(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn count(&self, predicate: impl Fn(&GameEvent) -> bool) -> usize {
        self.events.iter().filter(|e| predicate(e)).count()
    }
}

impl GameStateListener for EventLog {
    fn ball_moved(&mut self, x: f32, y: f32, radius: f32) {
        self.events.push(GameEvent::BallMoved { x, y, radius });
    }

    fn paddle_moved(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.events.push(GameEvent::PaddleMoved {
            x,
            y,
            width,
            height,
        });
    }

    fn ball_missed_paddle(&mut self) {
        self.events.push(GameEvent::BallMissedPaddle);
    }

    fn block_updated(&mut self, block: &Block) {
        self.events.push(GameEvent::BlockUpdated {
            row: block.row,
            column: block.column,
            state: block.state,
        });
    }

    fn number_of_lives_changed(&mut self, lives: u32) {
        self.events.push(GameEvent::LivesChanged { lives });
    }

    fn game_win(&mut self) {
        self.events.push(GameEvent::GameWin);
    }

    fn game_lose(&mut self) {
        self.events.push(GameEvent::GameLose);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::Rect;

    #[test]
    fn test_event_log_records_in_order() {
        let mut log = EventLog::new();
        log.number_of_lives_changed(2);
        log.ball_missed_paddle();
        log.block_updated(&Block::new(1, 3, Rect::new(0.0, 0.0, 1.0, 1.0)));

        assert_eq!(
            log.events(),
            &[
                GameEvent::LivesChanged { lives: 2 },
                GameEvent::BallMissedPaddle,
                GameEvent::BlockUpdated {
                    row: 1,
                    column: 3,
                    state: BlockState::New
                },
            ]
        );
        assert_eq!(log.count(|e| matches!(e, GameEvent::BallMissedPaddle)), 1);

        let taken = log.take();
        assert_eq!(taken.len(), 3);
        assert!(log.is_empty());
    }

    #[test]
    fn test_borrowed_and_boxed_listeners_forward() {
        fn finish<L: GameStateListener>(mut listener: L) {
            listener.number_of_lives_changed(0);
            listener.game_lose();
        }

        let mut log = EventLog::new();
        finish(&mut log);
        assert_eq!(
            log.events(),
            &[GameEvent::LivesChanged { lives: 0 }, GameEvent::GameLose]
        );

        let boxed: Box<dyn GameStateListener> = Box::new(EventLog::new());
        finish(boxed);
        finish(());
    }

    #[test]
    fn test_events_serialize_with_tag() {
        let json = serde_json::to_string(&GameEvent::LivesChanged { lives: 4 }).expect("json");
        assert_eq!(json, r#"{"event":"lives_changed","lives":4}"#);
    }
}
