//! Difficulty curve: catches -> (spawn rate, fall speed)

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;

/// Spawn rate and fall speed in effect for the current catch count
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    /// Spawns per second
    pub spawn_rate: f32,
    /// Bomb speed at spawn (pixels per second)
    pub fall_speed: f32,
}

impl Difficulty {
    /// Starting difficulty of a round
    pub fn initial(config: &GameConfig) -> Self {
        Self::for_catches(0, config)
    }

    /// Linear ramp per catch, each axis saturating at its own maximum
    pub fn for_catches(catches: u32, config: &GameConfig) -> Self {
        let n = catches as f32;
        let spawn_rate = (config.initial_spawn_rate + n * config.spawn_rate_increase)
            .min(config.max_spawn_rate);
        let fall_speed = (config.initial_fall_speed + n * config.fall_speed_increase)
            .min(config.max_fall_speed);

        debug_assert!(spawn_rate > 0.0 && spawn_rate <= config.max_spawn_rate);
        debug_assert!(fall_speed > 0.0 && fall_speed <= config.max_fall_speed);

        Self {
            spawn_rate,
            fall_speed,
        }
    }

    /// Seconds between spawns at this rate
    pub fn spawn_interval(&self) -> f32 {
        1.0 / self.spawn_rate
    }
}
