//! # Level Mastery Gates
//!
//! Each game has three levels. A level is mastered when the accumulated
//! play counters pass fixed thresholds:
//!
//! - Level 1 (conceptual): enough questions answered and correct, and a high
//!   enough mean explanation score (mean is 1 when nothing was scored yet)
//! - Level 2 (calculation): enough problems solved at a target accuracy
//!   without leaning on hints
//! - Level 3 (application): enough scenarios completed with a high mean
//!   composite score

use serde::{Deserialize, Serialize};

use crate::errors::{ChemError, ChemResult};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Level1Progress {
    pub questions_answered: u32,
    pub questions_correct: u32,
    pub explanation_scores: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Level2Progress {
    pub problems_attempted: u32,
    pub problems_correct: u32,
    pub hints_used: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Level3Progress {
    pub scenarios_completed: u32,
    pub composite_scores: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Level1Thresholds {
    pub min_answered: u32,
    pub min_correct: u32,
    pub min_mean_explanation: f64,
}

impl Default for Level1Thresholds {
    fn default() -> Self {
        Level1Thresholds {
            min_answered: 10,
            min_correct: 8,
            min_mean_explanation: 0.7,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Level2Thresholds {
    pub min_attempted: u32,
    pub min_accuracy: f64,
    pub max_hints_per_problem: f64,
}

impl Default for Level2Thresholds {
    fn default() -> Self {
        Level2Thresholds {
            min_attempted: 10,
            min_accuracy: 0.8,
            max_hints_per_problem: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Level3Thresholds {
    pub min_completed: u32,
    pub min_mean_composite: f64,
}

impl Default for Level3Thresholds {
    fn default() -> Self {
        Level3Thresholds {
            min_completed: 5,
            min_mean_composite: 0.75,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MasteryThresholds {
    pub level1: Level1Thresholds,
    pub level2: Level2Thresholds,
    pub level3: Level3Thresholds,
}

fn check_fraction(field: &str, value: f64) -> ChemResult<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ChemError::invalid_input(field, value.to_string(), "Must be between 0 and 1"));
    }
    Ok(())
}

impl MasteryThresholds {
    pub fn validate(&self) -> ChemResult<()> {
        if self.level1.min_correct > self.level1.min_answered {
            return Err(ChemError::invalid_input(
                "mastery.level1.min_correct",
                self.level1.min_correct.to_string(),
                "Cannot exceed min_answered",
            ));
        }
        check_fraction("mastery.level1.min_mean_explanation", self.level1.min_mean_explanation)?;
        check_fraction("mastery.level2.min_accuracy", self.level2.min_accuracy)?;
        check_fraction("mastery.level3.min_mean_composite", self.level3.min_mean_composite)?;
        if !self.level2.max_hints_per_problem.is_finite() || self.level2.max_hints_per_problem < 0.0 {
            return Err(ChemError::invalid_input(
                "mastery.level2.max_hints_per_problem",
                self.level2.max_hints_per_problem.to_string(),
                "Must be a non-negative number",
            ));
        }
        Ok(())
    }
}

fn mean_or(values: &[f64], empty: f64) -> f64 {
    if values.is_empty() {
        empty
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

pub fn check_level1_mastery(progress: &Level1Progress, thresholds: &Level1Thresholds) -> bool {
    progress.questions_answered >= thresholds.min_answered
        && progress.questions_correct >= thresholds.min_correct
        && mean_or(&progress.explanation_scores, 1.0) >= thresholds.min_mean_explanation
}

pub fn check_level2_mastery(progress: &Level2Progress, thresholds: &Level2Thresholds) -> bool {
    if progress.problems_attempted < thresholds.min_attempted || progress.problems_attempted == 0 {
        return false;
    }
    let attempted = progress.problems_attempted as f64;
    progress.problems_correct as f64 / attempted >= thresholds.min_accuracy
        && progress.hints_used as f64 / attempted <= thresholds.max_hints_per_problem
}

pub fn check_level3_mastery(progress: &Level3Progress, thresholds: &Level3Thresholds) -> bool {
    progress.scenarios_completed >= thresholds.min_completed
        && !progress.composite_scores.is_empty()
        && mean_or(&progress.composite_scores, 0.0) >= thresholds.min_mean_composite
}
