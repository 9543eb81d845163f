//! SM-2 spaced repetition scheduling.
//!
//! Variant of SuperMemo 2: a graded quality score (0..=5) updates the ease
//! factor and the review interval; failures reset the spacing to one day.

use chrono::{DateTime, Duration, Utc};

use crate::types::{Quality, RepetitionState};

/// SM-2 scheduler with configurable parameters.
#[derive(Debug, Clone, Copy)]
pub struct Sm2 {
    pub initial_ease: f64,
    pub minimum_ease: f64,
    /// Interval after the first successful repetition (or first after a failure).
    pub first_interval: u32,
    /// Interval after the second consecutive success.
    pub second_interval: u32,
}

impl Default for Sm2 {
    fn default() -> Self {
        Self {
            initial_ease: 2.5,
            minimum_ease: 1.3,
            first_interval: 1,
            second_interval: 6,
        }
    }
}

impl Sm2 {
    /// State for a newly created card: due immediately, interval 0.
    pub fn initial_state(&self, now: DateTime<Utc>) -> RepetitionState {
        RepetitionState {
            next_review: now,
            interval: 0,
            easiness: self.initial_ease,
            repetition_streak: 0,
            review_count: 0,
            last_result: true,
        }
    }

    /// Compute the next state from one graded answer.
    ///
    /// Pure function: `now` is captured once by the caller, and the returned
    /// state is fully updated or not at all. The ease adjustment applies on
    /// both branches; geometric interval growth uses the updated ease and
    /// rounds to the nearest whole day (fractional days are not observable
    /// to the learner).
    pub fn schedule(
        &self,
        state: &RepetitionState,
        quality: Quality,
        now: DateTime<Utc>,
    ) -> RepetitionState {
        let shortfall = (5 - quality.value()) as f64;
        let easiness = (state.easiness + (0.1 - shortfall * (0.08 + shortfall * 0.02)))
            .max(self.minimum_ease);

        let (interval, repetition_streak) = if quality.is_success() {
            let interval = match state.repetition_streak {
                0 => self.first_interval,
                1 => self.second_interval,
                _ => (state.interval as f64 * easiness).round() as u32,
            };
            (interval, state.repetition_streak + 1)
        } else {
            (self.first_interval, 0)
        };

        RepetitionState {
            next_review: now + Duration::days(i64::from(interval)),
            interval,
            easiness,
            repetition_streak,
            review_count: state.review_count + 1,
            last_result: quality.is_success(),
        }
    }
}
