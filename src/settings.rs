//! Player preferences
//!
//! Stored apart from the leaderboard, under [`Settings::STORAGE_KEY`] on the
//! web. Native builds always start from defaults.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Overall gain, 0..=1
    pub master_volume: f32,
    /// Effects gain on top of `master_volume`, 0..=1
    pub sfx_volume: f32,
    pub muted: bool,
    /// Hosts should skip shake and flashes
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            reduced_motion: false,
        }
    }
}

impl Settings {
    pub const STORAGE_KEY: &'static str = "bomb_catch_settings";

    /// Parse stored settings. Unreadable input yields defaults, missing
    /// fields keep theirs.
    pub fn from_json(json: &str) -> Self {
        serde_json::from_str(json).unwrap_or_else(|err| {
            log::warn!("Ignoring unreadable settings: {err}");
            Self::default()
        })
    }

    pub fn to_json(&self) -> String {
        // Plain struct of numbers and bools
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = clamp_unit(vol);
    }

    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = clamp_unit(vol);
    }

    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        use crate::persistence::browser_storage;

        let stored = browser_storage()
            .ok()
            .and_then(|storage| storage.get_item(Self::STORAGE_KEY).ok().flatten());
        match stored {
            Some(json) => {
                log::info!("Settings restored");
                Self::from_json(&json)
            }
            None => Self::default(),
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) -> Result<(), crate::error::StoreError> {
        use crate::error::StoreError;
        use crate::persistence::browser_storage;

        browser_storage()?
            .set_item(Self::STORAGE_KEY, &self.to_json())
            .map_err(|_| StoreError::Unavailable("LocalStorage write"))
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

/// NaN counts as silence
fn clamp_unit(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "muted": true }"#);
        assert!(settings.muted);
        assert_eq!(settings.master_volume, 0.8);
    }

    #[test]
    fn test_garbage_falls_back_to_defaults() {
        assert_eq!(Settings::from_json("not json"), Settings::default());
    }

    #[test]
    fn test_json_survives_reload() {
        let mut settings = Settings::default();
        settings.set_sfx_volume(0.3);
        settings.reduced_motion = true;
        assert_eq!(Settings::from_json(&settings.to_json()), settings);
    }

    #[test]
    fn test_volume_setters_clamp() {
        let mut settings = Settings::default();
        settings.set_master_volume(3.0);
        settings.set_sfx_volume(-1.0);
        assert_eq!(settings.master_volume, 1.0);
        assert_eq!(settings.sfx_volume, 0.0);

        settings.set_master_volume(f32::NAN);
        assert_eq!(settings.master_volume, 0.0);
    }
}
