//! Bomb spawner
//!
//! Accumulator scheduling: a countdown runs down by each step's delta; when
//! it crosses zero one bomb spawns and `1 / spawn_rate` is added back. The
//! leftover carries over, so the long-run rate is exact and intervals never
//! collapse to zero. At most one bomb spawns per call.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::bomb::{Bomb, BombId};
use super::difficulty::Difficulty;
use crate::config::GameConfig;
use crate::sanitize_dt;

#[derive(Debug, Clone)]
pub struct Spawner {
    rng: Pcg32,
    /// Seconds until the next spawn
    timer: f32,
    min_x: f32,
    max_x: f32,
    spawn_y: f32,
    angle_variance: f32,
}

impl Spawner {
    pub fn new(seed: u64, config: &GameConfig) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            timer: Difficulty::initial(config).spawn_interval(),
            min_x: config.bomb_half_width,
            max_x: config.canvas_width - config.bomb_half_width,
            spawn_y: -config.bomb_half_height,
            angle_variance: config.angle_variance_deg,
        }
    }

    /// Seconds until the next spawn
    pub fn timer(&self) -> f32 {
        self.timer
    }

    /// Run the countdown; spawn a bomb with id `id` when it elapses
    pub fn try_spawn(&mut self, id: BombId, difficulty: Difficulty, dt: f32) -> Option<Bomb> {
        self.timer -= sanitize_dt(dt);
        if self.timer > 0.0 {
            return None;
        }
        self.timer += difficulty.spawn_interval();

        let x = self.rng.random_range(self.min_x..=self.max_x);
        let angle = self.rng.random_range(-self.angle_variance..=self.angle_variance);
        Some(Bomb::spawn(id, x, self.spawn_y, difficulty.fall_speed, angle))
    }
}
