//! Per-conversation state machine for the quiz and review flows.
//!
//! One tagged variant per conversation replaces the ad-hoc per-user state
//! dictionary, and one handler grades answers for both the quiz-from-scratch
//! flow and the scheduled review flow.

use serde::{Deserialize, Serialize};

use crate::matching::check_answer;
use crate::types::Quality;

/// What the trainer is currently waiting for from a learner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ConversationState {
    /// Learner pressed "enter a word"; the next message is a new word.
    AwaitingWord,
    /// Quiz started from a random card; no scheduling update on answer.
    AwaitingQuizAnswer {
        word: String,
        correct_answer: String,
    },
    /// Scheduled review of a specific card; the answer reschedules it.
    AwaitingReviewAnswer {
        card_id: i64,
        word: String,
        correct_answer: String,
    },
}

/// Result of grading one answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    /// 5 for a correct answer, 1 for an incorrect one.
    pub quality: Quality,
    /// The word that was prompted.
    pub word: String,
    pub correct_answer: String,
    /// Card to reschedule, present only in the review flow.
    pub card_id: Option<i64>,
}

/// Grade a submitted answer against the active conversation state.
///
/// Returns `None` when the state is not an answer state.
pub fn grade_answer(state: &ConversationState, submitted: &str) -> Option<AnswerOutcome> {
    let (word, correct_answer, card_id) = match state {
        ConversationState::AwaitingWord => return None,
        ConversationState::AwaitingQuizAnswer {
            word,
            correct_answer,
        } => (word, correct_answer, None),
        ConversationState::AwaitingReviewAnswer {
            card_id,
            word,
            correct_answer,
        } => (word, correct_answer, Some(*card_id)),
    };

    let correct = check_answer(submitted, correct_answer);
    Some(AnswerOutcome {
        correct,
        quality: Quality::from_correct(correct),
        word: word.clone(),
        correct_answer: correct_answer.clone(),
        card_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn quiz_answer_has_no_card() {
        let state = ConversationState::AwaitingQuizAnswer {
            word: "hello".to_string(),
            correct_answer: "привет".to_string(),
        };

        let outcome = grade_answer(&state, " Привет ").unwrap();
        assert!(outcome.correct);
        assert_eq!(outcome.quality.value(), 5);
        assert_eq!(outcome.card_id, None);
        assert_eq!(outcome.word, "hello");
    }

    #[test]
    fn review_answer_carries_card_id() {
        let state = ConversationState::AwaitingReviewAnswer {
            card_id: 42,
            word: "собака".to_string(),
            correct_answer: "dog".to_string(),
        };

        let outcome = grade_answer(&state, "cat").unwrap();
        assert!(!outcome.correct);
        assert_eq!(outcome.quality.value(), 1);
        assert_eq!(outcome.card_id, Some(42));
        assert_eq!(outcome.correct_answer, "dog");
    }

    #[test]
    fn awaiting_word_is_not_an_answer_state() {
        assert_eq!(grade_answer(&ConversationState::AwaitingWord, "hello"), None);
    }

    #[test]
    fn grading_is_whitespace_and_case_tolerant() {
        let state = ConversationState::AwaitingReviewAnswer {
            card_id: 1,
            word: "кот".to_string(),
            correct_answer: "cat".to_string(),
        };
        assert!(grade_answer(&state, "  CAT ").unwrap().correct);
    }
}
