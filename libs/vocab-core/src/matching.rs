//! Answer matching for quiz and review responses.

/// Normalize an answer: trim, collapse internal whitespace, lowercase.
pub fn normalize_answer(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Compare a submitted answer to the expected one under normalization.
pub fn check_answer(submitted: &str, expected: &str) -> bool {
    normalize_answer(submitted) == normalize_answer(expected)
}

/// A card whose front and back coincide under normalization is useless to
/// quiz on ("cat" → "Cat") and is excluded from random selection.
pub fn is_trivial_pair(front: &str, back: &str) -> bool {
    normalize_answer(front) == normalize_answer(back)
}
