//! Core vocabulary-training library shared by the backend service.
//!
//! Provides:
//! - SM-2 review scheduling (interval, ease factor, repetition streak)
//! - Due-card selection strategies (`by_due_date`, `random_nontrivial`)
//! - Answer matching for typed quiz answers
//! - Cyrillic/Latin script classification for voice selection
//! - The per-conversation quiz/review state machine
//! - Shared types (Card, RepetitionState, Quality, etc.)

pub mod error;
pub mod language;
pub mod matching;
pub mod scheduler;
pub mod selection;
pub mod session;
pub mod types;

pub use error::{CoreError, Result};
pub use language::{classify_script, Script};
pub use matching::{check_answer, is_trivial_pair, normalize_answer};
pub use scheduler::Sm2;
pub use selection::{by_due_date, random_nontrivial};
pub use session::{grade_answer, AnswerOutcome, ConversationState};
pub use types::{Card, Difficulty, Quality, RepetitionState};
