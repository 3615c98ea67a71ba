//! Browser LocalStorage leaderboard (wasm)

use web_sys::Storage;

use super::{decode, encode};
use crate::error::StoreError;
use crate::highscores::HighScores;
use crate::services::ScoreStore;

/// Window LocalStorage, if the page is allowed one
pub fn browser_storage() -> Result<Storage, StoreError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
        .ok_or(StoreError::Unavailable("LocalStorage"))
}

const STORAGE_KEY: &str = "bomb_catch_highscores";

#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    max_entries: usize,
}

impl LocalStorageStore {
    pub fn new(max_entries: usize) -> Self {
        Self { max_entries }
    }

    pub fn load(&self) -> Result<HighScores, StoreError> {
        let storage = browser_storage()?;
        match storage.get_item(STORAGE_KEY) {
            Ok(Some(json)) => decode(&json, self.max_entries),
            Ok(None) => Ok(HighScores::new(self.max_entries)),
            Err(_) => Err(StoreError::Unavailable("LocalStorage read")),
        }
    }

    pub fn save(&self, scores: &HighScores) -> Result<(), StoreError> {
        let storage = browser_storage()?;
        storage
            .set_item(STORAGE_KEY, &encode(scores)?)
            .map_err(|_| StoreError::Unavailable("LocalStorage write"))?;
        log::info!("High scores saved ({} entries)", scores.entries().len());
        Ok(())
    }
}

impl ScoreStore for LocalStorageStore {
    fn record_score(&mut self, score: u32) -> Result<Option<usize>, StoreError> {
        let mut scores = match self.load() {
            Err(StoreError::Serde(err)) => {
                log::warn!("Unreadable high scores in LocalStorage, starting fresh: {err}");
                HighScores::new(self.max_entries)
            }
            loaded => loaded?,
        };
        let rank = scores.add_score(score);
        if rank.is_some() {
            self.save(&scores)?;
        }
        Ok(rank)
    }

    fn read_top_scores(&self, limit: usize) -> Result<Vec<u32>, StoreError> {
        Ok(self.load()?.top(limit))
    }
}
