//! High score leaderboard
//!
//! A fixed table of the 10 best scores, rebuilt from the score log at the
//! end of every game. Empty slots hold 0.

use serde::{Deserialize, Serialize};

/// Number of slots in the leaderboard
pub const MAX_HIGH_SCORES: usize = 10;

/// Top 10 leaderboard, sorted descending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HighScores {
    entries: [i32; MAX_HIGH_SCORES],
}

impl HighScores {
    /// Create an empty (all zero) leaderboard
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a leaderboard by inserting every score in order
    pub fn from_scores(scores: impl IntoIterator<Item = i32>) -> Self {
        let mut table = Self::new();
        table.rebuild(scores);
        table
    }

    /// All ten slots, best first
    pub fn entries(&self) -> &[i32; MAX_HIGH_SCORES] {
        &self.entries
    }

    /// Insert a score at the first slot it strictly beats.
    /// Equal scores land after the existing ones.
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn insert(&mut self, score: i32) -> Option<usize> {
        let pos = self.entries.iter().position(|&e| score > e)?;
        self.entries[pos..].rotate_right(1);
        self.entries[pos] = score;
        Some(pos + 1)
    }

    /// Clear the table and insert every score in order
    pub fn rebuild(&mut self, scores: impl IntoIterator<Item = i32>) {
        self.entries = [0; MAX_HIGH_SCORES];
        for score in scores {
            self.insert(score);
        }
    }

    /// Get the top score (0 when empty)
    pub fn top_score(&self) -> i32 {
        self.entries[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_descending_order() {
        let table = HighScores::from_scores([3, 9, 1, 7]);
        assert_eq!(table.entries(), &[9, 7, 3, 1, 0, 0, 0, 0, 0, 0]);
        assert_eq!(table.top_score(), 9);
    }

    #[test]
    fn test_insert_returns_rank() {
        let mut table = HighScores::from_scores([10, 5]);
        assert_eq!(table.insert(7), Some(2));
        assert_eq!(table.insert(20), Some(1));
        assert_eq!(table.insert(0), None);
    }

    #[test]
    fn test_non_positive_scores_never_enter() {
        let table = HighScores::from_scores([0, -4, 0]);
        assert_eq!(table, HighScores::new());
    }

    #[test]
    fn test_full_table_displaces_tenth() {
        let mut table = HighScores::from_scores(1..=10);
        assert_eq!(table.entries()[9], 1);

        assert_eq!(table.insert(1), None);
        assert_eq!(table.insert(4), Some(8));
        assert_eq!(table.entries(), &[10, 9, 8, 7, 6, 5, 4, 4, 3, 2]);
    }

    #[test]
    fn test_rebuild_clears_previous_entries() {
        let mut table = HighScores::from_scores([50, 40]);
        table.rebuild([2, 3]);
        assert_eq!(table.entries(), &[3, 2, 0, 0, 0, 0, 0, 0, 0, 0]);
    }
}
