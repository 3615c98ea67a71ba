//! wasm-bindgen surface for a JS host
//!
//! The host owns the canvas and the animation-frame loop. Each frame it calls
//! `frame(dt_ms)`, draws `bombs_json()`, and plays effects for whatever
//! `take_events_json()` returns. Clicks are hit-tested in JS and forwarded as
//! `pointer_down(id)`.

use wasm_bindgen::prelude::*;

use super::clock_seed;
use crate::audio::WebAudio;
use crate::config::GameConfig;
use crate::game::Game;
use crate::persistence::LocalStorageStore;
use crate::services::QueuedUi;
use crate::settings::Settings;

#[wasm_bindgen]
pub struct WebGame {
    game: Game,
    ui: QueuedUi,
    settings: Settings,
}

#[wasm_bindgen]
impl WebGame {
    /// Build a game from an optional JSON config override
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<WebGame, JsValue> {
        console_error_panic_hook::set_once();
        // Already initialised on a second instance
        let _ = console_log::init_with_level(log::Level::Info);

        let config = match config_json {
            Some(json) => {
                GameConfig::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?
            }
            None => GameConfig::default(),
        };
        let seed = clock_seed();
        let settings = Settings::load();
        let ui = QueuedUi::new();
        let max_entries = config.max_high_scores;

        let game = Game::new(
            config,
            seed,
            Box::new(WebAudio::new(&settings)),
            Box::new(ui.clone()),
            Box::new(LocalStorageStore::new(max_entries)),
        )
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Bomb Catch initialized with seed: {}", seed);
        Ok(WebGame { game, ui, settings })
    }

    /// Sprites and sounds are loaded; unlocks `start()`
    pub fn mark_prepared(&mut self) {
        self.game.mark_prepared();
    }

    pub fn start(&mut self) -> bool {
        self.game.start()
    }

    pub fn stop(&mut self) {
        self.game.stop();
    }

    pub fn pause(&mut self) {
        self.game.pause();
    }

    pub fn resume(&mut self) {
        self.game.resume();
    }

    /// Advance by one animation frame (milliseconds, as requestAnimationFrame reports)
    pub fn frame(&mut self, dt_ms: f64) {
        self.game.frame((dt_ms / 1000.0) as f32);
    }

    pub fn pointer_down(&mut self, id: u32) -> bool {
        self.game.pointer_down(id)
    }

    pub fn finish_animation(&mut self, id: u32) {
        self.game.finish_animation(id);
    }

    pub fn phase(&self) -> String {
        self.game.phase().as_str().to_string()
    }

    pub fn score(&self) -> u32 {
        self.game.round().score()
    }

    pub fn lives(&self) -> u32 {
        self.game.round().lives()
    }

    /// Live bombs: `[{ id, pos: [x, y], vel: [vx, vy], rotation, state }]`
    pub fn bombs_json(&self) -> String {
        serde_json::to_string(self.game.round().bombs()).unwrap_or_else(|_| "[]".to_string())
    }

    /// UI notifications since the last call
    pub fn take_events_json(&self) -> String {
        serde_json::to_string(&self.ui.take()).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn settings_json(&self) -> String {
        self.settings.to_json()
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.settings.muted = muted;
        self.store_settings();
    }

    pub fn set_master_volume(&mut self, volume: f32) {
        self.settings.set_master_volume(volume);
        self.store_settings();
    }

    pub fn set_sfx_volume(&mut self, volume: f32) {
        self.settings.set_sfx_volume(volume);
        self.store_settings();
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.settings.reduced_motion = reduced;
        self.store_settings();
    }

    pub fn top_scores_json(&self, limit: usize) -> String {
        serde_json::to_string(&self.game.top_scores(limit)).unwrap_or_else(|_| "[]".to_string())
    }
}

impl WebGame {
    fn store_settings(&mut self) {
        self.game.apply_settings(&self.settings);
        if let Err(err) = self.settings.save() {
            log::warn!("Settings not saved: {err}");
        }
    }
}
