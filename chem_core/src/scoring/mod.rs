//! # Scoring and Mastery
//!
//! Shared scoring logic used by every game: the weighted composite score,
//! keyword-based explanation scoring, per-level mastery gates and
//! achievement badges. All functions are pure over values supplied by the
//! caller; nothing here touches storage.

pub mod achievements;
pub mod composite;
pub mod explanation;
pub mod mastery;

pub use achievements::{check_achievements, Achievement, MIN_SCORES_FOR_ACHIEVEMENTS};
pub use composite::{calculate_composite_score, ScoreWeights};
pub use explanation::{score_explanation, tokenize, DEFAULT_MIN_LENGTH};
pub use mastery::{
    check_level1_mastery, check_level2_mastery, check_level3_mastery, Level1Progress, Level1Thresholds,
    Level2Progress, Level2Thresholds, Level3Progress, Level3Thresholds, MasteryThresholds,
};
