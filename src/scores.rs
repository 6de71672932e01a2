//! Best score and leaderboard persistence
//!
//! Both stores are best-effort: a failed LocalStorage read or write is
//! logged and ignored, and the session proceeds identically either way.

use serde::{Deserialize, Serialize};

use crate::platform::storage;

/// Maximum number of leaderboard entries to keep
pub const MAX_LEADERBOARD_ENTRIES: usize = 10;

/// The single best score carried across sessions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BestScore(pub u32);

impl BestScore {
    /// Stored as a bare integer string, matching the original save format
    const STORAGE_KEY: &'static str = "color_match_best";

    pub fn load() -> Self {
        match storage::get(Self::STORAGE_KEY).and_then(|s| s.trim().parse().ok()) {
            Some(best) => {
                log::info!("loaded best score {best}");
                Self(best)
            }
            None => Self::default(),
        }
    }

    /// Record a final score; persists and returns true only when it beats
    /// the stored best
    pub fn update(&mut self, score: u32) -> bool {
        if score <= self.0 {
            return false;
        }
        self.0 = score;
        if !storage::set(Self::STORAGE_KEY, &score.to_string()) {
            log::warn!("best score not persisted (storage unavailable)");
        }
        true
    }
}

/// A single leaderboard entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Final session score
    pub score: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// Local leaderboard, sorted descending by score and capped to the top 10
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    const STORAGE_KEY: &'static str = "color_match_leaderboard";

    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_LEADERBOARD_ENTRIES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if it doesn't
    /// qualify)
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Record a score. Returns the rank achieved (1-indexed) or None if it
    /// didn't qualify.
    pub fn record_score(&mut self, score: u32, timestamp: f64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = LeaderboardEntry { score, timestamp };
        let pos = self.entries.iter().position(|e| score > e.score);
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

        self.entries.truncate(MAX_LEADERBOARD_ENTRIES);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    pub fn load() -> Self {
        if let Some(json) = storage::get(Self::STORAGE_KEY) {
            if let Ok(board) = serde_json::from_str::<Leaderboard>(&json) {
                log::info!("loaded {} leaderboard entries", board.entries.len());
                return board;
            }
        }
        Self::new()
    }

    pub fn save(&self) {
        match serde_json::to_string(self) {
            Ok(json) => {
                if !storage::set(Self::STORAGE_KEY, &json) {
                    log::warn!("leaderboard not persisted (storage unavailable)");
                }
            }
            Err(e) => log::warn!("leaderboard serialization failed: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_score_updates_only_upward() {
        let mut best = BestScore(50);
        assert!(!best.update(40));
        assert_eq!(best.0, 50);
        assert!(!best.update(50));
        assert!(best.update(60));
        assert_eq!(best.0, 60);
    }

    #[test]
    fn test_leaderboard_sorted_descending() {
        let mut board = Leaderboard::new();
        assert_eq!(board.record_score(30, 1.0), Some(1));
        assert_eq!(board.record_score(50, 2.0), Some(1));
        assert_eq!(board.record_score(40, 3.0), Some(2));

        let scores: Vec<u32> = board.entries.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![50, 40, 30]);
    }

    #[test]
    fn test_leaderboard_caps_entries() {
        let mut board = Leaderboard::new();
        for i in 1..=15u32 {
            board.record_score(i * 10, i as f64);
        }
        assert_eq!(board.entries.len(), MAX_LEADERBOARD_ENTRIES);
        assert_eq!(board.top_score(), Some(150));
        // Lowest surviving entry is 150 - 90 = 60
        assert_eq!(board.entries.last().map(|e| e.score), Some(60));
    }

    #[test]
    fn test_zero_score_never_qualifies() {
        let mut board = Leaderboard::new();
        assert!(!board.qualifies(0));
        assert_eq!(board.record_score(0, 1.0), None);
        assert!(board.is_empty());
    }

    #[test]
    fn test_full_board_rejects_low_scores() {
        let mut board = Leaderboard::new();
        for i in 1..=10u32 {
            board.record_score(i * 10, i as f64);
        }
        assert!(!board.qualifies(10));
        assert_eq!(board.potential_rank(10), None);
        assert!(board.qualifies(11));
        assert_eq!(board.potential_rank(11), Some(10));
        assert_eq!(board.record_score(5, 99.0), None);
    }
}
