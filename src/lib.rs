//! Bomb Catch - click falling bombs before they reach the floor
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bomb physics, spawning, difficulty, round state)
//! - `game`: Fixed-step frame loop that dispatches simulation events to collaborators
//! - `config`: Injected gameplay tuning
//! - `highscores` / `persistence`: Top-N leaderboard and its storage backends
//! - `audio`: Sound effect playback (Web Audio on wasm, silent natively)
//! - `platform`: Browser bindings for a JS presentation layer

pub mod audio;
pub mod config;
pub mod error;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod services;
pub mod settings;
pub mod sim;

pub use config::GameConfig;
pub use error::{ConfigError, StoreError};
pub use game::Game;
pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants (defaults for [`GameConfig`])
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death.
    /// Covers a whole `MAX_FRAME_DT` frame so slow displays still run in real time.
    pub const MAX_SUBSTEPS: u32 = 12;
    /// Longest frame delta accepted from the clock (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Canvas dimensions
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;
    /// Bombs touching this line cost a life
    pub const FLOOR_Y: f32 = 560.0;

    /// Bomb sprite half extents
    pub const BOMB_HALF_WIDTH: f32 = 24.0;
    pub const BOMB_HALF_HEIGHT: f32 = 24.0;
    /// Visual spin (radians per second)
    pub const BOMB_SPIN_SPEED: f32 = 2.0;
    /// Spawn angle spread either side of straight down (degrees)
    pub const ANGLE_VARIANCE_DEG: f32 = 45.0;

    pub const INITIAL_LIVES: u32 = 9;

    /// Spawns per second
    pub const INITIAL_SPAWN_RATE: f32 = 0.5;
    pub const SPAWN_RATE_INCREASE: f32 = 0.05;
    pub const MAX_SPAWN_RATE: f32 = 3.0;

    /// Fall speed (pixels per second)
    pub const INITIAL_FALL_SPEED: f32 = 100.0;
    pub const FALL_SPEED_INCREASE: f32 = 5.0;
    pub const MAX_FALL_SPEED: f32 = 400.0;

    /// Terminal animation lengths (seconds)
    pub const CATCH_ANIM_SECS: f32 = 0.25;
    pub const EXPLODE_ANIM_SECS: f32 = 0.6;

    /// Leaderboard size
    pub const MAX_HIGH_SCORES: usize = 5;
}

/// Clamp a clock delta to a usable step: negative, NaN and infinite deltas
/// (paused or resumed clocks) become zero.
#[inline]
pub fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 { dt } else { 0.0 }
}

/// Convert a spawn angle (degrees from straight down) into a velocity with
/// the given speed. Screen y grows downward, so 0° falls straight down.
#[inline]
pub fn fall_velocity(speed: f32, angle_deg: f32) -> glam::Vec2 {
    let angle = angle_deg.to_radians();
    glam::Vec2::new(speed * angle.sin(), speed * angle.cos())
}
