//! Database models and API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// Re-export shared types from vocab-core
pub use vocab_core::types::{Card, Difficulty, Quality, RepetitionState};
pub use vocab_core::Script;

// === Database Entity Types ===

/// Registered learner (one per Telegram account)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Learner {
    pub id: Uuid,
    pub telegram_id: i64,
    pub username: Option<String>,
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

/// Card stored in PostgreSQL
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbCard {
    pub id: i64,
    pub owner_id: Uuid,
    pub front_text: String,
    pub back_text: String,
    pub source_script: String,
    pub difficulty: String,
    pub created_at: DateTime<Utc>,
}

impl DbCard {
    /// Convert to the core card type
    pub fn to_core_card(&self) -> Card {
        Card {
            id: self.id,
            owner: self.owner_id.to_string(),
            front_text: self.front_text.clone(),
            back_text: self.back_text.clone(),
            source_script: Script::from_str(&self.source_script).unwrap_or(Script::Ambiguous),
            difficulty: Difficulty::from_str(&self.difficulty).unwrap_or_default(),
            created_at: self.created_at,
        }
    }
}

/// Repetition record in PostgreSQL, 1:1 with a card
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbRepetition {
    pub card_id: i64,
    pub next_review: DateTime<Utc>,
    pub interval_days: i32,
    pub easiness: f64,
    pub repetition_streak: i32,
    pub review_count: i32,
    pub last_result: bool,
    pub updated_at: DateTime<Utc>,
}

impl DbRepetition {
    /// Create from a core RepetitionState
    pub fn from_core_state(card_id: i64, state: &RepetitionState) -> Self {
        Self {
            card_id,
            next_review: state.next_review,
            interval_days: state.interval as i32,
            easiness: state.easiness,
            repetition_streak: state.repetition_streak as i32,
            review_count: state.review_count as i32,
            last_result: state.last_result,
            updated_at: Utc::now(),
        }
    }

    /// Convert to a core RepetitionState
    pub fn to_core_state(&self) -> RepetitionState {
        RepetitionState {
            next_review: self.next_review,
            interval: self.interval_days.max(0) as u32,
            easiness: self.easiness,
            repetition_streak: self.repetition_streak.max(0) as u32,
            review_count: self.review_count.max(0) as u32,
            last_result: self.last_result,
        }
    }
}

// === API Request/Response Types ===

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub telegram_id: i64,
    pub username: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub learner_id: Uuid,
    pub token: String,
    pub created: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LearnerStatusResponse {
    pub learner_id: Uuid,
    pub telegram_id: i64,
    pub username: Option<String>,
    pub last_seen_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitWordRequest {
    pub text: String,
    pub difficulty: Option<Difficulty>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WordResponse {
    pub id: i64,
    pub front_text: String,
    pub back_text: String,
    pub source_script: Script,
    /// Voice code for the front text.
    pub front_voice: String,
    /// Voice code for the translation.
    pub back_voice: String,
    pub difficulty: Difficulty,
    pub next_review: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WordListResponse {
    pub words: Vec<WordResponse>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CorrectWordRequest {
    pub back_text: String,
}

/// Which side of a card to pronounce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardSide {
    Front,
    Back,
}

impl Default for CardSide {
    fn default() -> Self {
        Self::Front
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AudioQuery {
    #[serde(default)]
    pub side: CardSide,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TranscribeQuery {
    pub lang: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TranscribeResponse {
    pub text: String,
}

/// A prompt to translate a word, voiced in the word's own script.
#[derive(Debug, Serialize, Deserialize)]
pub struct Prompt {
    pub word: String,
    pub voice_lang: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QuizStartResponse {
    /// None when the learner has no non-trivial cards to quiz on.
    pub prompt: Option<Prompt>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReviewNextResponse {
    /// None when nothing is due.
    pub prompt: Option<Prompt>,
    pub card_id: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReviewQueueQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DueCardInfo {
    pub card_id: i64,
    pub front_text: String,
    pub next_review: DateTime<Utc>,
    pub interval_days: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReviewQueueResponse {
    pub due: Vec<DueCardInfo>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnswerRequest {
    pub answer: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub correct: bool,
    pub word: String,
    pub correct_answer: String,
    pub your_answer: String,
    /// Updated scheduling state, present only for review answers.
    pub repetition: Option<RepetitionState>,
}
