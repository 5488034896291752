//! Stats module - end-of-run scoring and best-score bookkeeping
//!
//! The core hands over a [`RunSummary`] when a run ends. This crate turns it
//! into a final score, keeps the best score per level and persists the
//! totals as JSON.
//!
//! # Final Score
//!
//! | Part | Points |
//! |------|--------|
//! | Matches | base score from the run |
//! | Unused hints and shuffles | 50 each |
//! | Time left | 10 per second |
//! | Level | 100 per level number (1-based) |
//!
//! Lost runs count as a game played but never set a score.
//!
//! # Example
//!
//! ```
//! use tui_onet_core::RunSummary;
//! use tui_onet_stats::GameStats;
//!
//! let mut stats = GameStats::default();
//! let summary = RunSummary {
//!     level_id: "l1",
//!     level_index: 0,
//!     base_score: 120,
//!     hints_remaining: 10,
//!     shuffles_remaining: 3,
//!     time_left: 45,
//! };
//! let outcome = stats.record(&summary, true);
//! assert_eq!(outcome.final_score, 120 + 13 * 50 + 45 * 10 + 100);
//! assert!(outcome.new_record);
//! assert_eq!(stats.total_games, 1);
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use tui_onet_core::RunSummary;
use tui_onet_types::{LEVEL_BONUS_POINTS, PROPS_BONUS_POINTS, TIME_BONUS_POINTS};

/// Final score for a won run.
pub fn final_score(summary: &RunSummary) -> u32 {
    let props = summary
        .hints_remaining
        .saturating_add(summary.shuffles_remaining);
    let level_number = summary.level_index as u32 + 1;
    summary
        .base_score
        .saturating_add(props.saturating_mul(PROPS_BONUS_POINTS))
        .saturating_add(summary.time_left.saturating_mul(TIME_BONUS_POINTS))
        .saturating_add(level_number.saturating_mul(LEVEL_BONUS_POINTS))
}

/// Totals kept across runs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameStats {
    pub total_games: u32,
    /// Best final score per level id.
    pub high_scores: BTreeMap<String, u32>,
}

/// What recording a run changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecordOutcome {
    /// Final score of the run (0 for a lost run).
    pub final_score: u32,
    /// The run beat the previous best for its level.
    pub new_record: bool,
}

impl GameStats {
    pub fn best(&self, level_id: &str) -> Option<u32> {
        self.high_scores.get(level_id).copied()
    }

    /// Count the run and, when won, update the level's best score.
    pub fn record(&mut self, summary: &RunSummary, won: bool) -> RecordOutcome {
        self.total_games = self.total_games.saturating_add(1);
        if !won {
            return RecordOutcome::default();
        }

        let score = final_score(summary);
        let previous = self.best(summary.level_id).unwrap_or(0);
        let new_record = score > previous;
        if new_record {
            self.high_scores.insert(summary.level_id.to_string(), score);
        }
        RecordOutcome {
            final_score: score,
            new_record,
        }
    }
}

/// JSON file holding [`GameStats`].
#[derive(Debug, Clone)]
pub struct StatsStore {
    path: PathBuf,
}

impl StatsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stats file.
    ///
    /// A missing or unreadable file yields `GameStats::default()`; the failure
    /// is logged and never propagated.
    pub fn load(&self) -> GameStats {
        match self.try_load() {
            Ok(stats) => stats,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "using default stats");
                GameStats::default()
            }
        }
    }

    fn try_load(&self) -> Result<GameStats> {
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        let stats = serde_json::from_str(&raw)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(stats)
    }

    /// Sibling file a save is staged in before it replaces `path`.
    pub fn staging_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }

    /// Write the stats as pretty JSON, creating parent directories.
    ///
    /// The JSON goes to [`StatsStore::staging_path`] first and is renamed over
    /// the stats file, so an interrupted save leaves the old file intact.
    pub fn save(&self, stats: &GameStats) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
        }
        let json = serde_json::to_string_pretty(stats)?;
        let staging = self.staging_path();
        fs::write(&staging, json).with_context(|| format!("writing {}", staging.display()))?;
        if let Err(err) = fs::rename(&staging, &self.path) {
            let _ = fs::remove_file(&staging);
            return Err(err).with_context(|| format!("replacing {}", self.path.display()));
        }
        debug!(path = %self.path.display(), games = stats.total_games, "stats saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(level_index: usize, base_score: u32) -> RunSummary {
        RunSummary {
            level_id: "l2",
            level_index,
            base_score,
            hints_remaining: 0,
            shuffles_remaining: 0,
            time_left: 0,
        }
    }

    #[test]
    fn test_final_score_formula() {
        let s = RunSummary {
            level_id: "l3",
            level_index: 2,
            base_score: 500,
            hints_remaining: 4,
            shuffles_remaining: 1,
            time_left: 30,
        };
        assert_eq!(final_score(&s), 500 + 250 + 300 + 300);
    }

    #[test]
    fn test_lost_run_counts_without_score() {
        let mut stats = GameStats::default();
        let outcome = stats.record(&summary(1, 900), false);
        assert_eq!(outcome, RecordOutcome::default());
        assert_eq!(stats.total_games, 1);
        assert!(stats.high_scores.is_empty());
    }

    #[test]
    fn test_only_better_scores_replace_best() {
        let mut stats = GameStats::default();
        assert!(stats.record(&summary(1, 100), true).new_record);
        assert_eq!(stats.best("l2"), Some(300));

        let worse = stats.record(&summary(1, 50), true);
        assert_eq!(worse.final_score, 250);
        assert!(!worse.new_record);
        assert_eq!(stats.best("l2"), Some(300));

        let tie = stats.record(&summary(1, 100), true);
        assert!(!tie.new_record);
        assert_eq!(stats.total_games, 3);
    }

    #[test]
    fn test_json_field_names() {
        let mut stats = GameStats::default();
        stats.record(&summary(0, 0), true);
        let json = serde_json::to_string(&stats).unwrap();
        assert_eq!(json, r#"{"totalGames":1,"highScores":{"l2":100}}"#);
    }

    #[test]
    fn test_store_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let store = StatsStore::new(dir.path().join("nested/deeper/stats.json"));
        let mut stats = GameStats::default();
        stats.record(&summary(1, 40), true);
        store.save(&stats).unwrap();
        assert_eq!(store.load(), stats);
    }

    #[test]
    fn test_save_replaces_file_and_leaves_no_staging_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = StatsStore::new(dir.path().join("stats.json"));
        let mut stats = GameStats::default();
        stats.record(&summary(1, 40), true);
        store.save(&stats).unwrap();
        stats.record(&summary(1, 90), true);
        store.save(&stats).unwrap();

        assert_eq!(store.load(), stats);
        assert_eq!(store.staging_path(), dir.path().join("stats.json.tmp"));
        assert!(!store.staging_path().exists());
    }

    #[test]
    fn test_interrupted_save_keeps_previous_stats() {
        let dir = tempfile::tempdir().unwrap();
        let store = StatsStore::new(dir.path().join("stats.json"));
        let mut stats = GameStats::default();
        stats.record(&summary(1, 40), true);
        store.save(&stats).unwrap();

        // A save cut short leaves only a truncated staging file behind.
        fs::write(store.staging_path(), r#"{"totalGa"#).unwrap();
        assert_eq!(store.load(), stats);

        // The next save overwrites the leftover.
        stats.record(&summary(1, 0), false);
        store.save(&stats).unwrap();
        assert_eq!(store.load().total_games, 2);
        assert!(!store.staging_path().exists());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let stats: GameStats = serde_json::from_str(r#"{"totalGames":4}"#).unwrap();
        assert_eq!(stats.total_games, 4);
        assert!(stats.high_scores.is_empty());
    }
}
