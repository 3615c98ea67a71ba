//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (bombs kept in spawn order)
//! - No rendering, audio or platform dependencies

pub mod bomb;
pub mod difficulty;
pub mod round;
pub mod spawner;
pub mod state;

pub use bomb::{Bomb, BombEvent, BombId, BombState, Bounds};
pub use difficulty::Difficulty;
pub use round::Round;
pub use spawner::Spawner;
pub use state::{GameEvent, RoundPhase};
