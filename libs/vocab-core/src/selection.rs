//! Due-card selection strategies.
//!
//! Both strategies read scheduling state without mutating it. An empty
//! result is not an error; it means there is nothing to review.

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::matching::is_trivial_pair;
use crate::types::{Card, RepetitionState};

/// Cards due at `now` (boundary inclusive), earliest-overdue first,
/// truncated to `limit`.
pub fn by_due_date<'a>(
    pairs: &'a [(Card, RepetitionState)],
    now: DateTime<Utc>,
    limit: usize,
) -> Vec<&'a Card> {
    let mut due: Vec<&(Card, RepetitionState)> = pairs
        .iter()
        .filter(|(_, state)| state.next_review <= now)
        .collect();
    due.sort_by_key(|(_, state)| state.next_review);
    due.into_iter().take(limit).map(|(card, _)| card).collect()
}

/// Uniformly random card whose front and back actually differ.
///
/// Trivial pairs (front == back under case-insensitive, whitespace-trimmed
/// comparison) are excluded; quizzing "cat → cat" proves nothing.
pub fn random_nontrivial<'a, R: Rng + ?Sized>(cards: &'a [Card], rng: &mut R) -> Option<&'a Card> {
    let valid: Vec<&Card> = cards
        .iter()
        .filter(|card| !is_trivial_pair(&card.front_text, &card.back_text))
        .collect();
    valid.choose(rng).copied()
}
