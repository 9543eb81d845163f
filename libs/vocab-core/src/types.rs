//! Core types for the vocabulary trainer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::language::Script;

/// Recall quality for one review event, validated to the SM-2 range 0..=5.
///
/// 0 is a total failure, 5 is perfect recall. Out-of-range values are
/// rejected at construction rather than clamped, so a caller bug in
/// translating UI input cannot silently skew the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Quality(u8);

impl Quality {
    /// Create a quality score, rejecting values outside 0..=5.
    pub fn new(value: u8) -> Result<Self, CoreError> {
        if value <= 5 {
            Ok(Self(value))
        } else {
            Err(CoreError::InvalidQuality { value })
        }
    }

    /// Map a binary correct/incorrect answer to 5 (correct) or 1 (incorrect).
    pub fn from_correct(correct: bool) -> Self {
        if correct {
            Self(5)
        } else {
            Self(1)
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// A review counts as a success at quality 3 and above.
    pub fn is_success(self) -> bool {
        self.0 >= 3
    }
}

impl TryFrom<u8> for Quality {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, CoreError> {
        Self::new(value)
    }
}

impl From<Quality> for u8 {
    fn from(quality: Quality) -> u8 {
        quality.0
    }
}

/// Difficulty tag on a card. Informational only, never used by scheduling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Beginner
    }
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "beginner" => Some(Self::Beginner),
            "intermediate" => Some(Self::Intermediate),
            "advanced" => Some(Self::Advanced),
            _ => None,
        }
    }
}

/// A learnable word pair.
///
/// Immutable once created except for `back_text` correction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub id: i64,
    /// Opaque user identifier.
    pub owner: String,
    /// Original-language word or phrase.
    pub front_text: String,
    /// Translation.
    pub back_text: String,
    /// Script of the front text, used to pick voices.
    pub source_script: Script,
    pub difficulty: Difficulty,
    pub created_at: DateTime<Utc>,
}

/// Per-card scheduling record, 1:1 with a card for its entire lifetime.
///
/// Read by the due-card selector, mutated only by the scheduler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepetitionState {
    /// When the card becomes due.
    pub next_review: DateTime<Utc>,
    /// Days until next review after a success.
    pub interval: u32,
    /// SM-2 E-Factor; never drops below 1.3.
    pub easiness: f64,
    /// Consecutive successful reviews; resets to 0 on failure.
    pub repetition_streak: u32,
    /// Lifetime review count, never reset.
    pub review_count: u32,
    /// Whether the most recent review was a success.
    pub last_result: bool,
}

impl RepetitionState {
    /// Fresh state for a newly created card: due immediately.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            next_review: now,
            interval: 0,
            easiness: 2.5,
            repetition_streak: 0,
            review_count: 0,
            last_result: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_accepts_full_range() {
        for v in 0..=5 {
            assert!(Quality::new(v).is_ok());
        }
    }

    #[test]
    fn quality_rejects_out_of_range() {
        assert_eq!(
            Quality::new(6),
            Err(CoreError::InvalidQuality { value: 6 })
        );
        assert!(Quality::new(255).is_err());
    }

    #[test]
    fn quality_from_correct() {
        assert_eq!(Quality::from_correct(true).value(), 5);
        assert_eq!(Quality::from_correct(false).value(), 1);
        assert!(Quality::from_correct(true).is_success());
        assert!(!Quality::from_correct(false).is_success());
    }

    #[test]
    fn success_threshold_is_three() {
        assert!(!Quality::new(2).unwrap().is_success());
        assert!(Quality::new(3).unwrap().is_success());
    }

    #[test]
    fn fresh_state_is_due_immediately() {
        let now = Utc::now();
        let state = RepetitionState::new(now);
        assert_eq!(state.next_review, now);
        assert_eq!(state.interval, 0);
        assert_eq!(state.easiness, 2.5);
        assert_eq!(state.repetition_streak, 0);
        assert_eq!(state.review_count, 0);
        assert!(state.last_result);
    }
}
