//! Scoring helpers shared by per-question and overall metrics

use std::collections::HashSet;

use crate::search::tokenize;

/// `|tokens(question) ∩ tokens(answer)| / |tokens(question)|` over distinct
/// tokens; zero when the question has no tokens.
pub fn completeness_score(question: &str, answer: &str) -> f64 {
    let question_tokens: HashSet<String> = tokenize(question).into_iter().collect();
    if question_tokens.is_empty() {
        return 0.0;
    }
    let answer_tokens: HashSet<String> = tokenize(answer).into_iter().collect();
    let shared = question_tokens.intersection(&answer_tokens).count();
    shared as f64 / question_tokens.len() as f64
}

/// Round to two decimal places, halves to even (`0.125` becomes `0.12`)
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// `count / total` rounded to two decimals, zero when `total` is zero
pub fn rate(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(count as f64 / total as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completeness_distinct_tokens() {
        // question tokens {hours, hours} collapse to one
        assert_eq!(completeness_score("hours hours", "Our hours are 9-5"), 1.0);
        assert_eq!(completeness_score("What is your pricing?", "NOT FOUND"), 0.0);
        assert_eq!(completeness_score("What is your pricing?", "Your pricing is $10"), 0.75);
    }

    #[test]
    fn test_completeness_empty_question() {
        assert_eq!(completeness_score("???", "anything"), 0.0);
    }

    #[test]
    fn test_rate_and_rounding() {
        assert_eq!(rate(1, 3), 0.33);
        assert_eq!(rate(2, 3), 0.67);
        assert_eq!(rate(0, 0), 0.0);
        assert_eq!(rate(5, 5), 1.0);
        assert_eq!(round2(0.125_1), 0.13);
    }

    #[test]
    fn test_round2_halves_to_even() {
        assert_eq!(round2(0.125), 0.12);
        assert_eq!(round2(0.375), 0.38);
        assert_eq!(round2(0.0625), 0.06);
        // one answered out of eight
        assert_eq!(rate(1, 8), 0.12);
        assert_eq!(rate(3, 8), 0.38);
    }
}
