//! High score leaderboard
//!
//! A bounded table of the best round scores, kept sorted descending. Storage
//! lives in [`crate::persistence`]; this type only holds the ordering rules.

use crate::consts::MAX_HIGH_SCORES;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScores {
    /// Best first
    entries: Vec<u32>,
    max_entries: usize,
}

impl Default for HighScores {
    fn default() -> Self {
        Self::new(MAX_HIGH_SCORES)
    }
}

impl HighScores {
    /// Create an empty leaderboard holding at most `max_entries` scores
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Vec::with_capacity(max_entries),
            max_entries,
        }
    }

    /// Build from stored scores in any order, keeping the best `max_entries`
    pub fn from_scores(scores: impl IntoIterator<Item = u32>, max_entries: usize) -> Self {
        let mut entries: Vec<u32> = scores.into_iter().filter(|&s| s > 0).collect();
        entries.sort_unstable_by(|a, b| b.cmp(a));
        entries.truncate(max_entries);
        Self {
            entries,
            max_entries,
        }
    }

    /// All entries, best first
    pub fn entries(&self) -> &[u32] {
        &self.entries
    }

    /// Would `score` earn a place? Zero never does.
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 || self.max_entries == 0 {
            return false;
        }
        if self.entries.len() < self.max_entries {
            return true;
        }
        // Must beat the lowest entry
        self.entries.last().is_none_or(|&lowest| score > lowest)
    }

    /// 1-based place `score` would take, if it earns one
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|&e| score > e);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Insert `score` and return its 1-based place. The table is unchanged
    /// when the score doesn't place.
    pub fn add_score(&mut self, score: u32) -> Option<usize> {
        let rank = self.potential_rank(score)?;
        // Ties rank below the earlier score
        self.entries.insert(rank - 1, score);
        self.entries.truncate(self.max_entries);
        Some(rank)
    }

    /// Best `limit` scores, descending
    pub fn top(&self, limit: usize) -> Vec<u32> {
        self.entries.iter().take(limit).copied().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().copied()
    }
}
