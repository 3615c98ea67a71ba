//! Round phase and the events the simulation reports outward
//!
//! Events are queued during a step and drained by whoever drives the round,
//! so the simulation never calls into presentation code directly.

use serde::{Deserialize, Serialize};

use super::bomb::{Bomb, BombId};
use super::difficulty::Difficulty;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Waiting for a start command
    Ready,
    /// Active gameplay
    Playing,
    /// Frozen mid-round; nothing ticks or animates
    Paused,
    /// Lives exhausted, waiting for a restart
    GameOver,
}

impl RoundPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundPhase::Ready => "ready",
            RoundPhase::Playing => "playing",
            RoundPhase::Paused => "paused",
            RoundPhase::GameOver => "game_over",
        }
    }

    /// Whether `start()` is accepted from this phase
    pub fn can_start(&self) -> bool {
        matches!(self, RoundPhase::Ready | RoundPhase::GameOver)
    }
}

/// Something observable happened inside the round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged(RoundPhase),
    BombSpawned(Bomb),
    /// Player caught a bomb (score already updated)
    BombCaught(BombId),
    /// A bomb reached the floor (life already charged)
    BombHitFloor(BombId),
    /// A bomb was forced to explode at game over
    BombExploded(BombId),
    /// Terminal animation done or round torn down; the view can drop it
    BombRemoved(BombId),
    ScoreChanged(u32),
    LivesChanged(u32),
    DifficultyChanged(Difficulty),
    RoundOver { final_score: u32 },
}
