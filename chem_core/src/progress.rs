//! # Progress Snapshots
//!
//! A `ProgressSnapshot` holds one player's counters for every game. The
//! scoring functions are pure over these values; loading and saving is up
//! to the caller (see [`crate::file_io`]).
//!
//! ```text
//! ProgressSnapshot
//! ├── meta: ProgressMetadata (version, player, timestamps)
//! └── games: BTreeMap<game id, GameProgress>
//!     ├── level1 / level2 / level3 counters
//!     └── composite_scores, total_steps (achievements input)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use chem_core::progress::ProgressSnapshot;
//!
//! let mut snapshot = ProgressSnapshot::new("Anna");
//! snapshot.game_mut("buffer").record_level1_answer(true, Some(0.8));
//! assert_eq!(snapshot.games["buffer"].level1.questions_answered, 1);
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::{
    check_achievements, check_level1_mastery, check_level2_mastery, check_level3_mastery, Achievement,
    Level1Progress, Level2Progress, Level3Progress, MasteryThresholds,
};

/// Current schema version for progress files
pub const SCHEMA_VERSION: &str = "0.1.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub meta: ProgressMetadata,
    #[serde(default)]
    pub games: BTreeMap<String, GameProgress>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,
    pub player: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl ProgressSnapshot {
    pub fn new(player: impl Into<String>) -> Self {
        let now = Utc::now();
        ProgressSnapshot {
            meta: ProgressMetadata {
                version: SCHEMA_VERSION.to_string(),
                player: player.into(),
                created: now,
                modified: now,
            },
            games: BTreeMap::new(),
        }
    }

    /// Progress for a game, created empty on first access.
    ///
    /// Marks the snapshot as modified.
    pub fn game_mut(&mut self, game_id: &str) -> &mut GameProgress {
        self.touch();
        self.games.entry(game_id.to_string()).or_default()
    }

    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }
}

/// Counters for one game
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameProgress {
    pub level1: Level1Progress,
    pub level2: Level2Progress,
    pub level3: Level3Progress,
    pub composite_scores: Vec<f64>,
    pub total_steps: u32,
}

/// Mastery state of the three levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelMastery {
    pub level1: bool,
    pub level2: bool,
    pub level3: bool,
}

impl GameProgress {
    pub fn record_level1_answer(&mut self, correct: bool, explanation_score: Option<f64>) {
        self.level1.questions_answered += 1;
        if correct {
            self.level1.questions_correct += 1;
        }
        if let Some(score) = explanation_score {
            self.level1.explanation_scores.push(score);
        }
    }

    pub fn record_level2_problem(&mut self, correct: bool, hints_used: u32) {
        self.level2.problems_attempted += 1;
        if correct {
            self.level2.problems_correct += 1;
        }
        self.level2.hints_used += hints_used;
    }

    /// Record a finished level 3 scenario with its composite score
    pub fn record_level3_scenario(&mut self, composite_score: f64, steps: u32) {
        self.level3.scenarios_completed += 1;
        self.level3.composite_scores.push(composite_score);
        self.composite_scores.push(composite_score);
        self.total_steps += steps;
    }

    pub fn mastery(&self, thresholds: &MasteryThresholds) -> LevelMastery {
        LevelMastery {
            level1: check_level1_mastery(&self.level1, &thresholds.level1),
            level2: check_level2_mastery(&self.level2, &thresholds.level2),
            level3: check_level3_mastery(&self.level3, &thresholds.level3),
        }
    }

    pub fn achievements(&self) -> Vec<Achievement> {
        check_achievements(&self.composite_scores, self.total_steps)
    }
}
