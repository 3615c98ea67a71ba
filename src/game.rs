//! Game façade: drives a [`Round`] from a frame clock and fans its events out
//! to the UI, sound and leaderboard collaborators.
//!
//! The simulation runs on a fixed step ([`SIM_DT`]) fed by an accumulator, so
//! spawning and motion are identical at any display frame rate down to
//! `1 / MAX_FRAME_DT` (longer frames are clamped).

use crate::audio::{SoundEffect, SoundPlayer};
use crate::config::GameConfig;
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::error::ConfigError;
use crate::sanitize_dt;
use crate::services::{ScoreStore, UiSink};
use crate::settings::Settings;
use crate::sim::{BombId, GameEvent, Round, RoundPhase};

pub struct Game {
    round: Round,
    sound: Box<dyn SoundPlayer>,
    ui: Box<dyn UiSink>,
    scores: Box<dyn ScoreStore>,
    /// Assets loaded; `start()` is refused until then
    prepared: bool,
    accumulator: f32,
}

impl Game {
    pub fn new(
        config: GameConfig,
        seed: u64,
        sound: Box<dyn SoundPlayer>,
        ui: Box<dyn UiSink>,
        scores: Box<dyn ScoreStore>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            round: Round::new(config, seed)?,
            sound,
            ui,
            scores,
            prepared: false,
            accumulator: 0.0,
        })
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn phase(&self) -> RoundPhase {
        self.round.phase()
    }

    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    /// One-time preparation (asset loading) has completed
    pub fn mark_prepared(&mut self) {
        if !self.prepared {
            self.prepared = true;
            log::info!("Assets ready");
        }
    }

    /// Start (or restart) a round. Returns whether a round is now playing.
    pub fn start(&mut self) -> bool {
        if !self.prepared {
            log::warn!("start requested before assets were ready");
            return false;
        }
        self.round.start();
        self.accumulator = 0.0;
        self.dispatch();
        self.round.phase() == RoundPhase::Playing
    }

    /// Hard stop back to `Ready`; nothing is recorded
    pub fn stop(&mut self) {
        self.round.stop();
        self.accumulator = 0.0;
        self.dispatch();
    }

    pub fn pause(&mut self) {
        self.round.pause();
        self.dispatch();
    }

    pub fn resume(&mut self) {
        self.round.resume();
        self.dispatch();
    }

    /// Advance by one display frame of `dt` seconds
    pub fn frame(&mut self, dt: f32) {
        let dt = sanitize_dt(dt).min(MAX_FRAME_DT);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.round.tick(SIM_DT);
            self.round.animate(SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        if self.accumulator >= SIM_DT {
            // Drop whole steps we couldn't run rather than spiral; keep the fraction
            log::trace!("Dropped {:.4}s of backlog", self.accumulator);
            self.accumulator %= SIM_DT;
        }

        self.dispatch();
    }

    /// Pointer pressed on bomb `id`. Returns whether it was caught.
    pub fn pointer_down(&mut self, id: BombId) -> bool {
        let caught = self.round.pointer_down(id);
        self.dispatch();
        caught
    }

    /// The view finished bomb `id`'s terminal animation
    pub fn finish_animation(&mut self, id: BombId) {
        self.round.finish_animation(id);
        self.dispatch();
    }

    /// Push changed preferences to the sound output
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.sound.apply_settings(settings);
    }

    /// Best `limit` scores; an unreadable store reads as empty
    pub fn top_scores(&self, limit: usize) -> Vec<u32> {
        match self.scores.read_top_scores(limit) {
            Ok(scores) => scores,
            Err(err) => {
                log::warn!("High scores unavailable: {err}");
                Vec::new()
            }
        }
    }

    fn dispatch(&mut self) {
        for event in self.round.drain_events() {
            match event {
                GameEvent::PhaseChanged(phase) => self.ui.on_phase_changed(phase),
                GameEvent::BombSpawned(bomb) => self.ui.on_entity_spawned(&bomb),
                GameEvent::BombCaught(id) => {
                    self.ui.on_bomb_caught(id);
                    self.sound.play(SoundEffect::Catch);
                }
                GameEvent::BombHitFloor(id) => {
                    self.ui.on_bomb_exploded(id);
                    self.sound.play(SoundEffect::Explode);
                }
                GameEvent::BombExploded(id) => self.ui.on_bomb_exploded(id),
                GameEvent::BombRemoved(id) => self.ui.on_entity_removed(id),
                GameEvent::ScoreChanged(score) => self.ui.on_score_changed(score),
                GameEvent::LivesChanged(lives) => self.ui.on_lives_changed(lives),
                GameEvent::DifficultyChanged(difficulty) => {
                    self.ui.on_difficulty_changed(difficulty)
                }
                GameEvent::RoundOver { final_score } => self.finish_round(final_score),
            }
        }
    }

    fn finish_round(&mut self, final_score: u32) {
        self.ui.on_round_over(final_score);
        self.sound.play(SoundEffect::GameOver);

        match self.scores.record_score(final_score) {
            Ok(Some(1)) => {
                log::info!("New high score: {final_score}");
                self.sound.play(SoundEffect::HighScore);
            }
            Ok(Some(rank)) => log::info!("Score {final_score} placed #{rank}"),
            Ok(None) => {}
            Err(err) => log::warn!("Could not record score {final_score}: {err}"),
        }
    }
}
