//! High score leaderboard system
//!
//! Persisted with the profile blob, tracks top 10 scores.

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Final score
    pub score: u64,
    /// Distance covered (whole units)
    pub distance: u64,
    /// Play time in whole seconds (paused time excluded)
    pub time: u64,
    /// Display date supplied by the host when the run started
    pub date: String,
}

/// High score leaderboard, sorted descending by score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score would land on the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Add a finished run to the leaderboard
    /// Returns the rank achieved (1-indexed) or None if it fell off the end
    pub fn add_score(&mut self, entry: HighScoreEntry) -> Option<usize> {
        if !self.qualifies(entry.score) {
            return None;
        }

        // Ties go after existing entries so earlier runs keep their rank
        let pos = self.entries.iter().position(|e| entry.score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    /// Restore ordering and bound after loading untrusted data
    pub fn normalize(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_HIGH_SCORES);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn entry(score: u64) -> HighScoreEntry {
        HighScoreEntry {
            score,
            distance: score / 10,
            time: 30,
            date: "1/1/2026".to_string(),
        }
    }

    #[test]
    fn test_add_score_ranks() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(entry(500)), Some(1));
        assert_eq!(scores.add_score(entry(900)), Some(1));
        assert_eq!(scores.add_score(entry(700)), Some(2));
        assert_eq!(scores.top_score(), Some(900));
        assert_eq!(
            scores.entries.iter().map(|e| e.score).collect::<Vec<_>>(),
            vec![900, 700, 500]
        );
    }

    #[test]
    fn test_full_board_rejects_low_score() {
        let mut scores = HighScores::new();
        for s in 1..=10 {
            scores.add_score(entry(s * 100));
        }
        assert_eq!(scores.len(), MAX_HIGH_SCORES);
        assert!(!scores.qualifies(100));
        assert_eq!(scores.add_score(entry(50)), None);
        assert_eq!(scores.add_score(entry(150)), Some(10));
        assert_eq!(scores.entries.last().map(|e| e.score), Some(150));
    }

    #[test]
    fn test_zero_score_still_recorded_when_room() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(entry(0)), Some(1));
    }

    #[test]
    fn test_normalize_sorts_and_bounds_loaded_data() {
        let mut scores = HighScores {
            entries: (0..15).map(|s| entry(s * 10)).collect(),
        };
        scores.normalize();
        assert_eq!(scores.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.top_score(), Some(140));
        assert!(scores.entries.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let mut scores = HighScores::new();
        scores.add_score(entry(42));
        let json = serde_json::to_string(&scores).unwrap();
        assert!(json.starts_with('['));
        assert!(json.contains(r#""score":42"#));
    }

    proptest! {
        #[test]
        fn prop_board_bounded_and_sorted(inserts in proptest::collection::vec(0u64..50_000, 0..40)) {
            let mut scores = HighScores::new();
            for s in inserts {
                scores.add_score(entry(s));
                prop_assert!(scores.len() <= MAX_HIGH_SCORES);
                prop_assert!(scores.entries.windows(2).all(|w| w[0].score >= w[1].score));
            }
        }
    }
}
