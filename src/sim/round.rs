//! Round controller
//!
//! Owns every live bomb plus score, lives and difficulty, and moves the round
//! through `Ready -> Playing -> GameOver`. Anything that arrives at the wrong
//! moment (a click on a bomb that already exploded, a tick while paused, a
//! late animation callback for a discarded bomb) is absorbed as a no-op.

use super::bomb::{Bomb, BombEvent, BombId, Bounds};
use super::difficulty::Difficulty;
use super::spawner::Spawner;
use super::state::{GameEvent, RoundPhase};
use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::sanitize_dt;

#[derive(Debug, Clone)]
pub struct Round {
    config: GameConfig,
    bounds: Bounds,
    /// Base seed; each start derives its own spawner seed from it
    seed: u64,
    /// Number of rounds started so far
    rounds_started: u32,
    phase: RoundPhase,
    score: u32,
    lives: u32,
    catches: u32,
    difficulty: Difficulty,
    spawner: Spawner,
    /// Live bombs in spawn order
    bombs: Vec<Bomb>,
    /// Never reset, so a stale id from a torn-down round can't alias a new bomb
    next_id: BombId,
    events: Vec<GameEvent>,
}

impl Round {
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            bounds: Bounds::from_config(&config),
            seed,
            rounds_started: 0,
            phase: RoundPhase::Ready,
            score: 0,
            lives: config.initial_lives,
            catches: 0,
            difficulty: Difficulty::initial(&config),
            spawner: Spawner::new(seed, &config),
            bombs: Vec::new(),
            next_id: 1,
            events: Vec::new(),
            config,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn catches(&self) -> u32 {
        self.catches
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn bombs(&self) -> &[Bomb] {
        &self.bombs
    }

    pub fn bomb(&self, id: BombId) -> Option<&Bomb> {
        self.bombs.iter().find(|b| b.id == id)
    }

    /// Events queued since the last drain
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take every queued event, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Begin a fresh round. Only valid from `Ready` or `GameOver`.
    pub fn start(&mut self) {
        if !self.phase.can_start() {
            log::debug!("start ignored in phase {:?}", self.phase);
            return;
        }

        self.clear_bombs();
        self.rounds_started += 1;
        self.score = 0;
        self.lives = self.config.initial_lives;
        self.catches = 0;
        self.difficulty = Difficulty::initial(&self.config);
        self.spawner = Spawner::new(self.round_seed(), &self.config);

        self.set_phase(RoundPhase::Playing);
        self.events.push(GameEvent::ScoreChanged(self.score));
        self.events.push(GameEvent::LivesChanged(self.lives));
        self.events.push(GameEvent::DifficultyChanged(self.difficulty));
        log::info!("Round {} started ({} lives)", self.rounds_started, self.lives);
    }

    /// Hard stop: discard every bomb and return to `Ready` without a result
    pub fn stop(&mut self) {
        if self.phase == RoundPhase::Ready {
            return;
        }
        self.clear_bombs();
        self.set_phase(RoundPhase::Ready);
        log::info!("Round {} stopped", self.rounds_started);
    }

    pub fn pause(&mut self) {
        if self.phase == RoundPhase::Playing {
            self.set_phase(RoundPhase::Paused);
        }
    }

    pub fn resume(&mut self) {
        if self.phase == RoundPhase::Paused {
            self.set_phase(RoundPhase::Playing);
        }
    }

    /// Advance spawning and bomb physics by `dt` seconds. No-op unless playing.
    pub fn tick(&mut self, dt: f32) {
        if self.phase != RoundPhase::Playing {
            return;
        }
        let dt = sanitize_dt(dt);

        if let Some(bomb) = self.spawner.try_spawn(self.next_id, self.difficulty, dt) {
            self.next_id += 1;
            log::trace!("Bomb {} spawned at x={:.1}", bomb.id, bomb.pos.x);
            self.events.push(GameEvent::BombSpawned(bomb.clone()));
            self.bombs.push(bomb);
        }

        let bounds = self.bounds;
        let spin = self.config.spin_speed;
        let explode_secs = self.config.explode_anim_secs;
        let mut floor_hits = Vec::new();
        for bomb in &mut self.bombs {
            if bomb.advance(dt, &bounds, spin, explode_secs) == Some(BombEvent::FloorHit) {
                floor_hits.push(bomb.id);
            }
        }

        for id in floor_hits {
            self.charge_life(id);
        }
    }

    /// Advance catch/explosion animations and discard finished bombs.
    /// Runs in every phase except `Paused`, so game-over explosions play out.
    pub fn animate(&mut self, dt: f32) {
        if self.phase == RoundPhase::Paused {
            return;
        }
        let mut finished = false;
        for bomb in &mut self.bombs {
            finished |= bomb.advance_animation(dt) == Some(BombEvent::Finished);
        }
        if finished {
            self.sweep_removed();
        }
    }

    /// The view finished a bomb's terminal animation ahead of the timer.
    /// Unknown, removed and still-falling bombs are ignored.
    pub fn finish_animation(&mut self, id: BombId) {
        let Some(bomb) = self.bombs.iter_mut().find(|b| b.id == id) else {
            log::debug!("finish for unknown bomb {id} ignored");
            return;
        };
        if bomb.finish().is_some() {
            self.sweep_removed();
        }
    }

    /// Player pressed on bomb `id`. Forwarded only while the bomb is live and falling.
    pub fn pointer_down(&mut self, id: BombId) -> bool {
        if !self.bomb(id).is_some_and(Bomb::is_falling) {
            log::debug!("pointer on bomb {id} ignored (not falling)");
            return false;
        }
        self.on_catch(id)
    }

    /// Score a catch. Returns whether it counted.
    pub fn on_catch(&mut self, id: BombId) -> bool {
        if self.phase != RoundPhase::Playing {
            return false;
        }
        let catch_secs = self.config.catch_anim_secs;
        let Some(bomb) = self.bombs.iter_mut().find(|b| b.id == id) else {
            return false;
        };
        if bomb.catch(catch_secs).is_none() {
            return false;
        }

        self.score += 1;
        self.catches += 1;
        self.difficulty = Difficulty::for_catches(self.catches, &self.config);

        self.events.push(GameEvent::BombCaught(id));
        self.events.push(GameEvent::ScoreChanged(self.score));
        self.events.push(GameEvent::DifficultyChanged(self.difficulty));
        log::debug!(
            "Caught bomb {id}: score {} (rate {:.2}/s, speed {:.0})",
            self.score,
            self.difficulty.spawn_rate,
            self.difficulty.fall_speed
        );
        true
    }

    /// Treat bomb `id` as having reached the floor. Only a still-falling bomb
    /// costs a life; anything already caught or exploding is ignored.
    pub fn on_floor_hit(&mut self, id: BombId) {
        if self.phase != RoundPhase::Playing {
            return;
        }
        let explode_secs = self.config.explode_anim_secs;
        let Some(bomb) = self.bombs.iter_mut().find(|b| b.id == id) else {
            return;
        };
        if bomb.explode(explode_secs) {
            self.charge_life(id);
        }
    }

    /// Bomb `id` has just gone `Falling -> Exploding` at the floor
    fn charge_life(&mut self, id: BombId) {
        if self.phase != RoundPhase::Playing {
            // Round already ended earlier in this step
            self.events.push(GameEvent::BombExploded(id));
            return;
        }

        self.lives = self.lives.saturating_sub(1);
        self.events.push(GameEvent::BombHitFloor(id));
        self.events.push(GameEvent::LivesChanged(self.lives));
        log::debug!("Bomb {id} hit the floor: {} lives left", self.lives);

        if self.lives == 0 {
            self.enter_game_over();
        }
    }

    fn enter_game_over(&mut self) {
        self.set_phase(RoundPhase::GameOver);

        let explode_secs = self.config.explode_anim_secs;
        for bomb in &mut self.bombs {
            if bomb.explode(explode_secs) {
                self.events.push(GameEvent::BombExploded(bomb.id));
            }
        }

        self.events.push(GameEvent::RoundOver {
            final_score: self.score,
        });
        log::info!(
            "Round {} over: score {}, {} catches",
            self.rounds_started,
            self.score,
            self.catches
        );
    }

    fn set_phase(&mut self, phase: RoundPhase) {
        if self.phase != phase {
            log::debug!("Phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
            self.events.push(GameEvent::PhaseChanged(phase));
        }
    }

    fn sweep_removed(&mut self) {
        let events = &mut self.events;
        self.bombs.retain(|bomb| {
            if bomb.is_removed() {
                events.push(GameEvent::BombRemoved(bomb.id));
                false
            } else {
                true
            }
        });
    }

    fn clear_bombs(&mut self) {
        for bomb in self.bombs.drain(..) {
            self.events.push(GameEvent::BombRemoved(bomb.id));
        }
    }

    fn round_seed(&self) -> u64 {
        self.seed
            .wrapping_add((self.rounds_started as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }

    /// Place a falling bomb directly (bypasses the spawner)
    #[cfg(test)]
    pub(crate) fn insert_bomb(&mut self, x: f32, y: f32, angle_deg: f32) -> BombId {
        let id = self.next_id;
        self.next_id += 1;
        self.bombs.push(Bomb::spawn(
            id,
            x,
            y,
            self.difficulty.fall_speed,
            angle_deg,
        ));
        id
    }
}
