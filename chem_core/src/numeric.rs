//! # Numeric Primitives
//!
//! Small arithmetic helpers shared by every game: GCD/LCM for coefficient
//! balancing, significant-figure counting, and the tolerance-based answer
//! checker used to grade free-form numeric answers.
//!
//! ## Example
//!
//! ```rust
//! use chem_core::numeric::{check_answer, count_significant_figures, lcm};
//!
//! assert_eq!(lcm(2, 3), 6);
//! assert_eq!(count_significant_figures("1.50"), 3);
//! assert!(check_answer(10.15, 10.0, 2.0));
//! ```

use log::warn;

/// Default relative tolerance (percent) for numeric answers
pub const DEFAULT_TOLERANCE_PERCENT: f64 = 2.0;

/// Absolute floor on the accepted deviation, so answers near zero are not
/// rejected by a vanishing relative window.
pub const ABSOLUTE_TOLERANCE_FLOOR: f64 = 0.01;

/// Greatest common divisor (Euclid).
///
/// Zero inputs are not rejected: `gcd(a, 0) == a`.
pub fn gcd(a: u64, b: u64) -> u64 {
    let (mut a, mut b) = (a, b);
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

/// Least common multiple, `a*b / gcd(a, b)`.
///
/// Returns 0 if either argument is 0.
pub fn lcm(a: u64, b: u64) -> u64 {
    let g = gcd(a, b);
    if g == 0 {
        return 0;
    }
    a / g * b
}

/// Count the significant figures in a number as the student typed it.
///
/// # Rules
/// - Whitespace is trimmed and a leading `-` ignored.
/// - Scientific notation: only the mantissa counts (`"1.08e12"` → 3).
/// - Without a decimal point, leading zeros are dropped and the remaining
///   digits count (`"00456"` → 3, `"100"` → 3). A literal zero counts as 1.
/// - With a decimal point, leading zeros of the whole part are dropped and
///   every digit after the point counts (`"10.00"` → 4, `"0.0045"` → 4).
///
/// The result is never below 1.
pub fn count_significant_figures(num_str: &str) -> usize {
    let trimmed = num_str.trim();
    let mantissa = match trimmed.find(['e', 'E']) {
        Some(idx) => &trimmed[..idx],
        None => trimmed,
    };
    let unsigned = mantissa.strip_prefix('-').unwrap_or(mantissa);

    let count = match unsigned.split_once('.') {
        None => digit_count(unsigned.trim_start_matches('0')),
        Some((whole, decimal)) => digit_count(whole.trim_start_matches('0')) + digit_count(decimal),
    };

    count.max(1)
}

fn digit_count(s: &str) -> usize {
    s.chars().filter(|c| c.is_ascii_digit()).count()
}

/// Check that an answer string carries the expected number of significant figures
pub fn check_sig_figs(answer: &str, expected: usize) -> bool {
    count_significant_figures(answer) == expected
}

/// Tolerance-based answer check.
///
/// Accepts when `|user - correct| <= max(correct * tolerance / 100, 0.01)`.
///
/// # Example
/// ```rust
/// use chem_core::numeric::check_answer;
///
/// assert!(check_answer(0.005, 0.0, 2.0));
/// assert!(!check_answer(0.02, 0.0, 2.0));
/// ```
pub fn check_answer(user_answer: f64, correct_answer: f64, tolerance_percent: f64) -> bool {
    let window = (correct_answer * tolerance_percent / 100.0).max(ABSOLUTE_TOLERANCE_FLOOR);
    (user_answer - correct_answer).abs() <= window
}

/// Percentage error of an answer relative to the correct value.
///
/// Exactly 0 when the values are equal. When `correct_answer` is 0 the
/// result is Infinity (or NaN); callers must pass a nonzero reference.
pub fn calculate_error(user_answer: f64, correct_answer: f64) -> f64 {
    if user_answer == correct_answer {
        return 0.0;
    }
    if correct_answer == 0.0 {
        warn!("percentage error requested against a zero reference value");
    }
    (user_answer - correct_answer).abs() / correct_answer * 100.0
}

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gcd_lcm() {
        assert_eq!(gcd(12, 8), 4);
        assert_eq!(lcm(2, 3), 6);
        assert_eq!(lcm(4, 6), 12);
        for (a, b) in [(12u64, 8u64), (2, 3), (9, 6), (7, 7), (1, 13)] {
            assert_eq!(gcd(a, b) * lcm(a, b), a * b);
        }
    }

    #[test]
    fn test_gcd_zero_is_not_rejected() {
        assert_eq!(gcd(5, 0), 5);
        assert_eq!(lcm(0, 0), 0);
    }

    #[test]
    fn test_significant_figures() {
        let cases = [
            ("123", 3),
            ("00456", 3),
            ("1.50", 3),
            ("0.0045", 4),
            ("1.08e12", 3),
            ("2.5E8", 2),
            ("-3.14", 3),
            ("10.00", 4),
            ("100", 3),
            ("5", 1),
            ("0", 1),
            ("  42  ", 2),
        ];
        for (input, expected) in cases {
            assert_eq!(count_significant_figures(input), expected, "input {input:?}");
        }
    }

    #[test]
    fn test_check_sig_figs() {
        assert!(check_sig_figs("2.50", 3));
        assert!(!check_sig_figs("2.5", 3));
    }

    #[test]
    fn test_check_answer_tolerance() {
        assert!(check_answer(10.15, 10.0, DEFAULT_TOLERANCE_PERCENT));
        assert!(!check_answer(10.25, 10.0, DEFAULT_TOLERANCE_PERCENT));
        assert!(check_answer(0.005, 0.0, 2.0));
        assert!(!check_answer(0.02, 0.0, 2.0));
    }

    #[test]
    fn test_calculate_error() {
        assert_eq!(calculate_error(5.0, 5.0), 0.0);
        assert!((calculate_error(11.0, 10.0) - 10.0).abs() < 1e-9);
        assert!((calculate_error(9.0, 10.0) - 10.0).abs() < 1e-9);
        assert!(!calculate_error(1.0, 0.0).is_finite());
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.23456, 2), 1.23);
        assert_eq!(round_to(2.5, 0), 3.0);
    }
}
