//! Gameplay tuning injected into the round controller and spawner.
//!
//! [`GameConfig`] mirrors every default in [`crate::consts`]. It derives
//! `Deserialize` with `#[serde(default)]`, so a JSON document only needs the
//! keys it wants to override:
//!
//! ```
//! let config = bomb_catch::GameConfig::from_json(r#"{ "initial_lives": 1 }"#).unwrap();
//! assert_eq!(config.initial_lives, 1);
//! assert_eq!(config.max_high_scores, 5);
//! ```

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Runtime-tunable gameplay configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Canvas ───────────────────────────────────────────────────────────────
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub floor_y: f32,

    // ── Bomb ─────────────────────────────────────────────────────────────────
    pub bomb_half_width: f32,
    pub bomb_half_height: f32,
    pub spin_speed: f32,
    pub angle_variance_deg: f32,
    pub catch_anim_secs: f32,
    pub explode_anim_secs: f32,

    // ── Round ────────────────────────────────────────────────────────────────
    pub initial_lives: u32,

    // ── Difficulty ───────────────────────────────────────────────────────────
    pub initial_spawn_rate: f32,
    pub spawn_rate_increase: f32,
    pub max_spawn_rate: f32,
    pub initial_fall_speed: f32,
    pub fall_speed_increase: f32,
    pub max_fall_speed: f32,

    // ── Leaderboard ──────────────────────────────────────────────────────────
    pub max_high_scores: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            floor_y: FLOOR_Y,

            bomb_half_width: BOMB_HALF_WIDTH,
            bomb_half_height: BOMB_HALF_HEIGHT,
            spin_speed: BOMB_SPIN_SPEED,
            angle_variance_deg: ANGLE_VARIANCE_DEG,
            catch_anim_secs: CATCH_ANIM_SECS,
            explode_anim_secs: EXPLODE_ANIM_SECS,

            initial_lives: INITIAL_LIVES,

            initial_spawn_rate: INITIAL_SPAWN_RATE,
            spawn_rate_increase: SPAWN_RATE_INCREASE,
            max_spawn_rate: MAX_SPAWN_RATE,
            initial_fall_speed: INITIAL_FALL_SPEED,
            fall_speed_increase: FALL_SPEED_INCREASE,
            max_fall_speed: MAX_FALL_SPEED,

            max_high_scores: MAX_HIGH_SCORES,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON override document and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON (for writing a starter config file)
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject tuning that would let the simulation break its invariants
    /// (zero spawn interval, bombs falling upward, negative lives).
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("canvas_width", self.canvas_width)?;
        positive("canvas_height", self.canvas_height)?;
        positive("floor_y", self.floor_y)?;
        non_negative("bomb_half_width", self.bomb_half_width)?;
        non_negative("bomb_half_height", self.bomb_half_height)?;
        non_negative("spin_speed", self.spin_speed)?;
        non_negative("catch_anim_secs", self.catch_anim_secs)?;
        non_negative("explode_anim_secs", self.explode_anim_secs)?;

        if self.canvas_width < self.bomb_half_width * 2.0 {
            return Err(ConfigError::InvalidValue {
                field: "canvas_width",
                value: self.canvas_width,
                expected: ">= 2 * bomb_half_width",
            });
        }
        if self.floor_y > self.canvas_height {
            return Err(ConfigError::InvalidValue {
                field: "floor_y",
                value: self.floor_y,
                expected: "<= canvas_height",
            });
        }
        if !(0.0..90.0).contains(&self.angle_variance_deg) {
            return Err(ConfigError::InvalidValue {
                field: "angle_variance_deg",
                value: self.angle_variance_deg,
                expected: "0 <= variance < 90",
            });
        }
        if self.initial_lives == 0 {
            return Err(ConfigError::InvalidValue {
                field: "initial_lives",
                value: 0.0,
                expected: ">= 1",
            });
        }

        positive("initial_spawn_rate", self.initial_spawn_rate)?;
        non_negative("spawn_rate_increase", self.spawn_rate_increase)?;
        at_least("max_spawn_rate", self.max_spawn_rate, self.initial_spawn_rate)?;
        positive("initial_fall_speed", self.initial_fall_speed)?;
        non_negative("fall_speed_increase", self.fall_speed_increase)?;
        at_least("max_fall_speed", self.max_fall_speed, self.initial_fall_speed)?;

        if self.max_high_scores == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_high_scores",
                value: 0.0,
                expected: ">= 1",
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            value,
            expected: "finite and > 0",
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            value,
            expected: "finite and >= 0",
        })
    }
}

fn at_least(field: &'static str, value: f32, min: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= min {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            value,
            expected: "finite and >= its initial value",
        })
    }
}
