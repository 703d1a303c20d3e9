//! # Explanation Scoring
//!
//! Keywords are matched against a token stream, not raw text: the text is
//! lower-cased and split on every non-alphanumeric character, and a keyword
//! (which may span several words) matches only a contiguous run of whole
//! tokens. "mol" therefore does not match inside "molecule".
//!
//! Components:
//! - quality keywords: 0.15 per distinct keyword found, at most 0.3
//! - type-specific keywords: 0.4 × fraction found
//! - length bonus: 0.3 at ≥ 50 chars, 0.2 at ≥ 30, 0.1 at ≥ 20
//!
//! The total is capped at 1. Text shorter than the minimum length scores 0.

use std::collections::HashSet;

pub const DEFAULT_MIN_LENGTH: usize = 10;

const QUALITY_PER_HIT: f64 = 0.15;
const QUALITY_CAP: f64 = 0.3;
const TYPE_WEIGHT: f64 = 0.4;

/// Lower-cased alphanumeric tokens of `text`, in order
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .collect()
}

/// Tokens of a text, with a set for single-word lookups
struct TokenIndex {
    tokens: Vec<String>,
    set: HashSet<String>,
}

impl TokenIndex {
    fn new(text: &str) -> Self {
        let tokens = tokenize(text);
        let set = tokens.iter().cloned().collect();
        TokenIndex { tokens, set }
    }

    fn contains(&self, keyword: &str) -> bool {
        let needle = tokenize(keyword);
        match needle.len() {
            0 => false,
            1 => self.set.contains(&needle[0]),
            n => self.tokens.windows(n).any(|w| w == needle.as_slice()),
        }
    }
}

fn length_bonus(length: usize) -> f64 {
    match length {
        l if l >= 50 => 0.3,
        l if l >= 30 => 0.2,
        l if l >= 20 => 0.1,
        _ => 0.0,
    }
}

/// Score a free-text explanation in [0, 1].
pub fn score_explanation(text: &str, quality_keywords: &[&str], type_keywords: &[&str], min_length: usize) -> f64 {
    let trimmed = text.trim();
    let length = trimmed.chars().count();
    if length < min_length {
        return 0.0;
    }

    let index = TokenIndex::new(trimmed);
    let quality_hits = quality_keywords.iter().filter(|k| index.contains(k)).count();
    let quality = (quality_hits as f64 * QUALITY_PER_HIT).min(QUALITY_CAP);

    let type_score = if type_keywords.is_empty() {
        0.0
    } else {
        let found = type_keywords.iter().filter(|k| index.contains(k)).count();
        TYPE_WEIGHT * found as f64 / type_keywords.len() as f64
    };

    (quality + type_score + length_bonus(length)).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUALITY: &[&str] = &["because", "therefore", "so", "thus"];

    #[test]
    fn test_tokenize() {
        assert_eq!(tokenize("Le Chatelier's principle, ΔH<0!"), vec!["le", "chatelier", "s", "principle", "δh", "0"]);
        assert_eq!(tokenize("Jafnvægið hliðrast"), vec!["jafnvægið", "hliðrast"]);
    }

    #[test]
    fn test_short_text_scores_zero() {
        assert_eq!(score_explanation("   because   ", QUALITY, &["ratio"], 10), 0.0);
        assert_eq!(score_explanation("", QUALITY, &[], DEFAULT_MIN_LENGTH), 0.0);
    }

    #[test]
    fn test_components() {
        // 25 chars: length bonus 0.1; one quality hit; one of two type keywords
        let text = "pH rises because of base.";
        let score = score_explanation(text, QUALITY, &["base", "buffer"], 10);
        assert!((score - (0.1 + 0.15 + 0.2)).abs() < 1e-12);
    }

    #[test]
    fn test_quality_capped() {
        let text = "so thus because";
        let score = score_explanation(text, QUALITY, &[], 10);
        assert!((score - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_total_capped() {
        let text = "The ratio shifts because the buffer absorbs acid, therefore pH holds so well.";
        let score = score_explanation(text, QUALITY, &["ratio", "buffer", "acid"], 10);
        assert!((score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_no_substring_matches() {
        let text = "The molecules collide more often.";
        assert_eq!(score_explanation(text, &[], &["mol"], 10), 0.2);
        assert_eq!(score_explanation(text, &["so"], &[], 10), 0.2);
    }

    #[test]
    fn test_multi_word_keyword() {
        let text = "Adding a catalyst only changes the reaction rate.";
        let found = score_explanation(text, &[], &["reaction rate"], 10);
        let missing = score_explanation(text, &[], &["rate reaction"], 10);
        assert!((found - missing - 0.4).abs() < 1e-12);
    }
}
