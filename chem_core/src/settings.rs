//! # Settings
//!
//! Tunables for answer checking and scoring, loaded from a JSON file. Every
//! field is optional in the file; missing fields take their defaults.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "answer_tolerance_percent": 2.0,
//!   "score_weights": { "answer": 0.5, "method": 0.3, "explanation": 0.2, "efficiency": 0.0 },
//!   "mastery": { "level1": { "min_answered": 12 } },
//!   "teacher_allow_list": ["kennari@skoli.is"]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{ChemError, ChemResult};
use crate::numeric::DEFAULT_TOLERANCE_PERCENT;
use crate::scoring::{MasteryThresholds, ScoreWeights, DEFAULT_MIN_LENGTH};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub answer_tolerance_percent: f64,
    pub explanation_min_length: usize,
    pub score_weights: ScoreWeights,
    pub mastery: MasteryThresholds,
    pub teacher_allow_list: RoleAllowList,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            answer_tolerance_percent: DEFAULT_TOLERANCE_PERCENT,
            explanation_min_length: DEFAULT_MIN_LENGTH,
            score_weights: ScoreWeights::default(),
            mastery: MasteryThresholds::default(),
            teacher_allow_list: RoleAllowList::default(),
        }
    }
}

impl Settings {
    /// Read and validate settings from a JSON file
    pub fn load(path: &Path) -> ChemResult<Settings> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ChemError::file_error("read settings", path.display().to_string(), e.to_string()))?;
        let settings: Settings = serde_json::from_str(&contents).map_err(|e| ChemError::SerializationError {
            reason: format!("Invalid settings in {}: {}", path.display(), e),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> ChemResult<()> {
        if !self.answer_tolerance_percent.is_finite() || self.answer_tolerance_percent < 0.0 {
            return Err(ChemError::invalid_input(
                "answer_tolerance_percent",
                self.answer_tolerance_percent.to_string(),
                "Tolerance must be a non-negative number",
            ));
        }
        self.score_weights.validate()?;
        self.mastery.validate()
    }
}

/// Addresses allowed to use teacher features.
///
/// Built once from configuration and passed to whoever needs it; there is no
/// global list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct RoleAllowList {
    emails: Vec<String>,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl RoleAllowList {
    pub fn new<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut emails: Vec<String> = emails
            .into_iter()
            .map(|e| normalize_email(e.as_ref()))
            .filter(|e| !e.is_empty())
            .collect();
        emails.sort();
        emails.dedup();
        RoleAllowList { emails }
    }

    /// Case-insensitive, whitespace-trimmed membership check
    pub fn is_teacher(&self, email: &str) -> bool {
        self.emails.binary_search(&normalize_email(email)).is_ok()
    }

    pub fn len(&self) -> usize {
        self.emails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }
}

impl From<Vec<String>> for RoleAllowList {
    fn from(emails: Vec<String>) -> Self {
        RoleAllowList::new(emails)
    }
}

impl From<RoleAllowList> for Vec<String> {
    fn from(list: RoleAllowList) -> Self {
        list.emails
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.answer_tolerance_percent, 2.0);
        assert_eq!(settings.explanation_min_length, 10);
        assert_eq!(settings.score_weights.answer, 0.4);
        assert_eq!(settings.mastery.level1.min_correct, 8);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let settings: Settings = serde_json::from_str(
            r#"{"answer_tolerance_percent": 5.0, "teacher_allow_list": [" Kennari@Skoli.is "]}"#,
        )
        .unwrap();
        assert_eq!(settings.answer_tolerance_percent, 5.0);
        assert_eq!(settings.explanation_min_length, 10);
        assert!(settings.teacher_allow_list.is_teacher("kennari@skoli.is"));
    }

    #[test]
    fn test_allow_list() {
        let list = RoleAllowList::new(["a@school.is", "B@School.is", "a@school.is", "  "]);
        assert_eq!(list.len(), 2);
        assert!(list.is_teacher("  A@SCHOOL.IS"));
        assert!(list.is_teacher("b@school.is"));
        assert!(!list.is_teacher("student@school.is"));
        assert!(!RoleAllowList::default().is_teacher("a@school.is"));
    }

    #[test]
    fn test_validate_rejects_negative_weight() {
        let mut settings = Settings::default();
        settings.score_weights.efficiency = -0.5;
        assert!(settings.validate().is_err());
        let mut settings = Settings::default();
        settings.answer_tolerance_percent = -1.0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_load() {
        let path = temp_dir().join(format!("chem_core_settings_{}.json", std::process::id()));
        fs::write(&path, r#"{"mastery": {"level3": {"min_completed": 3}}}"#).unwrap();
        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.mastery.level3.min_completed, 3);
        let _ = fs::remove_file(&path);

        fs::write(&path, r#"{"score_weights": {"answer": -1.0}}"#).unwrap();
        assert_eq!(Settings::load(&path).unwrap_err().error_code(), "INVALID_INPUT");
        let _ = fs::remove_file(&path);
    }
}
