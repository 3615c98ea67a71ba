//! Narrow interfaces to the collaborators the game core drives
//!
//! The core never renders, plays audio or touches storage itself. It reports
//! through a [`UiSink`] and a [`ScoreStore`] (audio lives in [`crate::audio`]).

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;

use crate::error::StoreError;
use crate::sim::{Bomb, BombId, Difficulty, RoundPhase};

/// Presentation side: text, sprites, particles, shake
pub trait UiSink {
    fn on_score_changed(&mut self, score: u32);
    fn on_lives_changed(&mut self, lives: u32);
    fn on_entity_spawned(&mut self, bomb: &Bomb);
    fn on_entity_removed(&mut self, id: BombId);
    fn on_round_over(&mut self, final_score: u32);

    fn on_phase_changed(&mut self, _phase: RoundPhase) {}
    fn on_difficulty_changed(&mut self, _difficulty: Difficulty) {}
    /// Start the catch-shrink effect
    fn on_bomb_caught(&mut self, _id: BombId) {}
    /// Start the explosion effect (floor hit or forced at game over)
    fn on_bomb_exploded(&mut self, _id: BombId) {}
}

/// Leaderboard persistence
pub trait ScoreStore {
    /// Record a finished round. Returns the leaderboard rank it earned, if any.
    fn record_score(&mut self, score: u32) -> Result<Option<usize>, StoreError>;
    /// Best `limit` scores, descending
    fn read_top_scores(&self, limit: usize) -> Result<Vec<u32>, StoreError>;
}

/// UI notification as plain data (for hosts that poll instead of implementing [`UiSink`])
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    Score { score: u32 },
    Lives { lives: u32 },
    Spawned { id: BombId, x: f32, y: f32 },
    Removed { id: BombId },
    Caught { id: BombId },
    Exploded { id: BombId },
    Phase { phase: &'static str },
    Difficulty { spawn_rate: f32, fall_speed: f32 },
    RoundOver { final_score: u32 },
}

/// [`UiSink`] that queues [`UiEvent`]s behind a shared handle.
/// Clone it before handing one copy to the game; drain with [`QueuedUi::take`].
#[derive(Debug, Clone, Default)]
pub struct QueuedUi {
    queue: Rc<RefCell<Vec<UiEvent>>>,
}

impl QueuedUi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return everything queued so far
    pub fn take(&self) -> Vec<UiEvent> {
        std::mem::take(&mut *self.queue.borrow_mut())
    }

    fn push(&self, event: UiEvent) {
        self.queue.borrow_mut().push(event);
    }
}

impl UiSink for QueuedUi {
    fn on_score_changed(&mut self, score: u32) {
        self.push(UiEvent::Score { score });
    }

    fn on_lives_changed(&mut self, lives: u32) {
        self.push(UiEvent::Lives { lives });
    }

    fn on_entity_spawned(&mut self, bomb: &Bomb) {
        self.push(UiEvent::Spawned {
            id: bomb.id,
            x: bomb.pos.x,
            y: bomb.pos.y,
        });
    }

    fn on_entity_removed(&mut self, id: BombId) {
        self.push(UiEvent::Removed { id });
    }

    fn on_round_over(&mut self, final_score: u32) {
        self.push(UiEvent::RoundOver { final_score });
    }

    fn on_phase_changed(&mut self, phase: RoundPhase) {
        self.push(UiEvent::Phase {
            phase: phase.as_str(),
        });
    }

    fn on_difficulty_changed(&mut self, difficulty: Difficulty) {
        self.push(UiEvent::Difficulty {
            spawn_rate: difficulty.spawn_rate,
            fall_speed: difficulty.fall_speed,
        });
    }

    fn on_bomb_caught(&mut self, id: BombId) {
        self.push(UiEvent::Caught { id });
    }

    fn on_bomb_exploded(&mut self, id: BombId) {
        self.push(UiEvent::Exploded { id });
    }
}

/// [`UiSink`] that narrates the round to the log (headless runs)
#[derive(Debug, Default)]
pub struct LogUi;

impl UiSink for LogUi {
    fn on_score_changed(&mut self, score: u32) {
        log::debug!("Score: {score}");
    }

    fn on_lives_changed(&mut self, lives: u32) {
        log::info!("Lives: {lives}");
    }

    fn on_entity_spawned(&mut self, bomb: &Bomb) {
        log::trace!("Bomb {} appeared at x={:.0}", bomb.id, bomb.pos.x);
    }

    fn on_entity_removed(&mut self, id: BombId) {
        log::trace!("Bomb {id} gone");
    }

    fn on_round_over(&mut self, final_score: u32) {
        log::info!("GAME OVER - final score {final_score}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queued_ui_shares_queue_between_clones() {
        let handle = QueuedUi::new();
        let mut sink = handle.clone();
        sink.on_score_changed(3);
        sink.on_entity_removed(7);

        assert_eq!(
            handle.take(),
            vec![UiEvent::Score { score: 3 }, UiEvent::Removed { id: 7 }]
        );
        assert!(handle.take().is_empty());
    }

    #[test]
    fn test_ui_event_json_shape() {
        let json = serde_json::to_string(&UiEvent::Spawned {
            id: 4,
            x: 10.0,
            y: -24.0,
        })
        .unwrap();
        assert_eq!(json, r#"{"type":"spawned","id":4,"x":10.0,"y":-24.0}"#);
    }
}
