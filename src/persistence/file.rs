//! JSON file leaderboard (native)

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{decode, encode};
use crate::error::StoreError;
use crate::highscores::HighScores;
use crate::services::ScoreStore;

/// Leaderboard kept in a JSON file. Every write goes to `<path>.tmp` first
/// and is renamed over the real file, so a crash never leaves half a file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    max_entries: usize,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>, max_entries: usize) -> Self {
        Self {
            path: path.into(),
            max_entries,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file; a missing file is an empty leaderboard
    pub fn load(&self) -> Result<HighScores, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(json) => decode(&json, self.max_entries),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(HighScores::new(self.max_entries)),
            Err(err) => Err(err.into()),
        }
    }

    pub fn save(&self, scores: &HighScores) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, encode(scores)?)?;
        fs::rename(&tmp, &self.path)?;
        log::debug!(
            "High scores saved to {} ({} entries)",
            self.path.display(),
            scores.entries().len()
        );
        Ok(())
    }
}

impl ScoreStore for FileStore {
    fn record_score(&mut self, score: u32) -> Result<Option<usize>, StoreError> {
        let mut scores = match self.load() {
            Err(StoreError::Serde(err)) => {
                log::warn!(
                    "Unreadable high scores in {}, starting fresh: {err}",
                    self.path.display()
                );
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
