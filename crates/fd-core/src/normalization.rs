//! Typed-answer normalization.
//!
//! A typed answer is compared against the back of a card and its accepted
//! answers. The comparison forgives casing, accents, punctuation and spacing,
//! but not a different word.

use unicode_normalization::UnicodeNormalization;

/// Normalize a string before comparing a typed answer with a card.
///
/// Lowercases, expands `ß`/`æ`/`œ`, strips combining marks after NFD
/// decomposition, drops punctuation and collapses whitespace.
///
/// ```
/// use fd_core::normalization::normalize_for_comparison;
///
/// assert_eq!(normalize_for_comparison("  Café  au lait! "), "cafe au lait");
/// ```
pub fn normalize_for_comparison(s: &str) -> String {
    s.to_lowercase()
        .replace('ß', "ss")
        .replace('æ', "ae")
        .replace('œ', "oe")
        .nfd()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether `answer` matches `expected` once both are normalized.
///
/// An answer that normalizes to nothing never matches.
pub fn answers_match(answer: &str, expected: &str) -> bool {
    let answer = normalize_for_comparison(answer);
    !answer.is_empty() && answer == normalize_for_comparison(expected)
}
