//! Achievement badges awarded over a finished set of problems.

use serde::{Deserialize, Serialize};

/// Fewer scores than this earn nothing
pub const MIN_SCORES_FOR_ACHIEVEMENTS: usize = 10;

/// Tier badges, highest first: (id, name, min mean score)
const TIERS: [(&str, &str, f64); 3] = [("gold", "Gold", 0.95), ("silver", "Silver", 0.85), ("bronze", "Bronze", 0.75)];

const EFFICIENT_MEAN_STEPS: f64 = 3.0;
const EXPLAINER_MIN_SCORE: f64 = 0.9;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl Achievement {
    fn new(id: &str, name: &str, description: String) -> Self {
        Achievement {
            id: id.to_string(),
            name: name.to_string(),
            description,
        }
    }
}

/// Badges earned for `scores` (composite, 0–1) and the steps taken across
/// all of them.
///
/// At most one tier badge is awarded. `efficiency` and `explainer` are
/// independent of the tier.
pub fn check_achievements(scores: &[f64], total_steps: u32) -> Vec<Achievement> {
    if scores.len() < MIN_SCORES_FOR_ACHIEVEMENTS {
        return Vec::new();
    }
    let count = scores.len() as f64;
    let mean = scores.iter().sum::<f64>() / count;
    let mut earned = Vec::new();

    if let Some((id, name, min)) = TIERS.iter().find(|(_, _, min)| mean >= *min) {
        earned.push(Achievement::new(
            id,
            name,
            format!("Average score of at least {:.0}%", min * 100.0),
        ));
    }

    let mean_steps = total_steps as f64 / count;
    if mean_steps < EFFICIENT_MEAN_STEPS {
        earned.push(Achievement::new(
            "efficiency",
            "Efficient",
            format!("Fewer than {} steps per problem on average", EFFICIENT_MEAN_STEPS),
        ));
    }

    if scores.iter().all(|s| *s >= EXPLAINER_MIN_SCORE) {
        earned.push(Achievement::new(
            "explainer",
            "Explainer",
            format!("Every score at least {:.0}%", EXPLAINER_MIN_SCORE * 100.0),
        ));
    }

    earned
}
