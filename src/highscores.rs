//! High score leaderboard system
//!
//! Persisted to the data directory, tracks the top 10 scores per mode.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::persistence;
use crate::platform;
use crate::sim::GameMode;

/// Maximum number of high scores to keep per mode
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Player's score
    pub score: u64,
    /// Mode the score was set in
    pub mode: GameMode,
    /// Simulated seconds the run lasted
    pub seconds: f32,
    /// Unix timestamp (seconds) when achieved
    pub timestamp: u64,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    /// All modes, each mode's entries sorted descending by score
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Entries for one mode, best first
    pub fn board(&self, mode: GameMode) -> impl Iterator<Item = &HighScoreEntry> {
        self.entries.iter().filter(move |e| e.mode == mode)
    }

    /// Check if a score qualifies for the mode's leaderboard
    pub fn qualifies(&self, mode: GameMode, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        let board: Vec<_> = self.board(mode).collect();
        if board.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        board.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, mode: GameMode, score: u64) -> Option<usize> {
        if !self.qualifies(mode, score) {
            return None;
        }
        let board: Vec<_> = self.board(mode).collect();
        let rank = board.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(board.len()) + 1)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(
        &mut self,
        mode: GameMode,
        score: u64,
        seconds: f32,
        timestamp: u64,
    ) -> Option<usize> {
        let rank = self.potential_rank(mode, score)?;

        let entry = HighScoreEntry {
            score,
            mode,
            seconds,
            timestamp,
        };

        // Insert before the first entry of this mode with a lower score
        let pos = self
            .entries
            .iter()
            .position(|e| e.mode == mode && score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);

        // Trim this mode's board to max size
        let mut kept = 0;
        self.entries.retain(|e| {
            if e.mode != mode {
                return true;
            }
            kept += 1;
            kept <= MAX_HIGH_SCORES
        });

        Some(rank)
    }

    /// Menu line for a mode's best run ("Dodge        best     120  3 mins ago")
    pub fn best_line(&self, mode: GameMode, now: u64) -> String {
        match self.board(mode).next() {
            Some(best) => format!(
                "{:<12} best {:>7}  {}",
                mode.as_str(),
                best.score,
                format_age(best.timestamp, now)
            ),
            None => format!("{:<12} best {:>7}", mode.as_str(), "-"),
        }
    }

    /// Get the top score for a mode (if any)
    pub fn top_score(&self, mode: GameMode) -> Option<u64> {
        self.board(mode).next().map(|e| e.score)
    }

    /// Load high scores from the data directory
    pub fn load() -> Self {
        match persistence::load_json::<HighScores>(&platform::highscores_path()) {
            Some(scores) => {
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            None => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
        }
    }

    /// Save high scores to the data directory
    pub fn save(&self) {
        match persistence::save_json(&platform::highscores_path(), self) {
            Ok(()) => log::info!("High scores saved ({} entries)", self.entries.len()),
            Err(e) => log::warn!("Failed to save high scores: {}", e),
        }
    }
}

/// Current unix time in seconds
pub fn now_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Format a timestamp relative to `now` ("Just now", "3 mins ago", ...)
pub fn format_age(timestamp: u64, now: u64) -> String {
    let diff_secs = now.saturating_sub(timestamp);
    let diff_mins = diff_secs / 60;
    let diff_hours = diff_mins / 60;
    let diff_days = diff_hours / 24;

    if diff_days >= 1 {
        match diff_days {
            1 => "Yesterday".to_string(),
            d => format!("{} days ago", d),
        }
    } else if diff_hours >= 1 {
        match diff_hours {
            1 => "1 hour ago".to_string(),
            h => format!("{} hours ago", h),
        }
    } else if diff_mins >= 1 {
        match diff_mins {
            1 => "1 min ago".to_string(),
            m => format!("{} mins ago", m),
        }
    } else {
        "Just now".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_never_qualifies() {
        let scores = HighScores::new();
        assert!(!scores.qualifies(GameMode::Dodge, 0));
        assert!(scores.qualifies(GameMode::Dodge, 1));
    }

    #[test]
    fn test_entries_sorted_per_mode() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(GameMode::Dodge, 100, 10.0, 0), Some(1));
        assert_eq!(scores.add_score(GameMode::Conquest, 900, 40.0, 0), Some(1));
        assert_eq!(scores.add_score(GameMode::Dodge, 300, 30.0, 0), Some(1));
        assert_eq!(scores.add_score(GameMode::Dodge, 200, 20.0, 0), Some(2));

        let dodge: Vec<u64> = scores.board(GameMode::Dodge).map(|e| e.score).collect();
        assert_eq!(dodge, vec![300, 200, 100]);
        assert_eq!(scores.top_score(GameMode::Conquest), Some(900));
        assert_eq!(scores.top_score(GameMode::TimeAttack), None);
    }

    #[test]
    fn test_board_is_capped() {
        let mut scores = HighScores::new();
        for i in 1..=15 {
            scores.add_score(GameMode::TimeAttack, i * 10, 60.0, 0);
        }
        scores.add_score(GameMode::Dodge, 5, 1.0, 0);

        let board: Vec<u64> = scores.board(GameMode::TimeAttack).map(|e| e.score).collect();
        assert_eq!(board.len(), MAX_HIGH_SCORES);
        assert_eq!(board[0], 150);
        assert_eq!(board[9], 60);
        assert_eq!(scores.board(GameMode::Dodge).count(), 1);

        // Lower than the last entry of a full board
        assert_eq!(scores.add_score(GameMode::TimeAttack, 50, 60.0, 0), None);
        assert_eq!(scores.potential_rank(GameMode::TimeAttack, 155), Some(1));
    }

    #[test]
    fn test_best_line() {
        let mut scores = HighScores::new();
        assert_eq!(scores.best_line(GameMode::Dodge, 0), "Dodge        best       -");
        scores.add_score(GameMode::Dodge, 120, 12.0, 1000);
        assert_eq!(
            scores.best_line(GameMode::Dodge, 1180),
            "Dodge        best     120  3 mins ago"
        );
    }

    #[test]
    fn test_format_age() {
        assert_eq!(format_age(1000, 1010), "Just now");
        assert_eq!(format_age(1000, 1060), "1 min ago");
        assert_eq!(format_age(0, 3 * 3600), "3 hours ago");
        assert_eq!(format_age(0, 86_400), "Yesterday");
        assert_eq!(format_age(0, 5 * 86_400), "5 days ago");
        // Clock went backwards
        assert_eq!(format_age(5000, 10), "Just now");
    }
}
