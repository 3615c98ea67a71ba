//! Leaderboard persistence
//!
//! Stored form is a JSON array of scores, best first (`[30,20,10]`).
//! Backends:
//! - [`MemoryStore`]: process lifetime only
//! - [`FileStore`]: JSON file, atomic replace via a temp file (native)
//! - [`LocalStorageStore`]: browser LocalStorage (wasm)

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod local_storage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::{LocalStorageStore, browser_storage};

use crate::error::StoreError;
use crate::highscores::HighScores;
use crate::services::ScoreStore;

/// Serialize a leaderboard to its stored form
pub fn encode(scores: &HighScores) -> Result<String, StoreError> {
    Ok(serde_json::to_string(scores.entries())?)
}

/// Parse the stored form, re-sorting and trimming to `max_entries`
pub fn decode(json: &str, max_entries: usize) -> Result<HighScores, StoreError> {
    let raw: Vec<u32> = serde_json::from_str(json)?;
    Ok(HighScores::from_scores(raw, max_entries))
}

/// In-memory leaderboard
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    scores: HighScores,
}

impl MemoryStore {
    pub fn new(max_entries: usize) -> Self {
        Self {
            scores: HighScores::new(max_entries),
        }
    }

    pub fn scores(&self) -> &HighScores {
        &self.scores
    }
}

impl ScoreStore for MemoryStore {
    fn record_score(&mut self, score: u32) -> Result<Option<usize>, StoreError> {
        Ok(self.scores.add_score(score))
    }

    fn read_top_scores(&self, limit: usize) -> Result<Vec<u32>, StoreError> {
        Ok(self.scores.top(limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_orders_scores() {
        let mut store = MemoryStore::new(5);
        for s in [10, 30, 20] {
            store.record_score(s).unwrap();
        }
        assert_eq!(store.read_top_scores(5).unwrap(), vec![30, 20, 10]);
    }

    #[test]
    fn test_memory_store_keeps_top_five() {
        let mut store = MemoryStore::new(5);
        for s in [1, 2, 3, 4, 5, 6] {
            store.record_score(s).unwrap();
        }
        assert_eq!(store.read_top_scores(10).unwrap(), vec![6, 5, 4, 3, 2]);
        assert_eq!(store.read_top_scores(2).unwrap(), vec![6, 5]);
    }

    #[test]
    fn test_encode_decode() {
        let scores = HighScores::from_scores([10, 30, 20], 5);
        let json = encode(&scores).unwrap();
        assert_eq!(json, "[30,20,10]");
        assert_eq!(decode(&json, 5).unwrap(), scores);
    }

    #[test]
    fn test_decode_reorders_and_trims_foreign_data() {
        let scores = decode("[1,9,4,7,3,8]", 5).unwrap();
        assert_eq!(scores.entries(), &[9, 8, 7, 4, 3]);
    }

    #[test]
    fn test_decode_rejects_non_array() {
        assert!(matches!(
            decode(r#"{"entries":[]}"#, 5),
            Err(StoreError::Serde(_))
        ));
    }
}
