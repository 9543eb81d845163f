//! Quiz and review endpoints.
//!
//! Each started quiz or review stores one pending question in the session
//! store; the shared answer endpoint consumes it, so a learner can never
//! have both a quiz and a review answer outstanding.

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::Utc;

use vocab_core::{by_due_date, grade_answer, random_nontrivial, ConversationState};

use crate::error::{ApiError, Result};
use crate::models::{
    AnswerRequest, AnswerResponse, DueCardInfo, Prompt, QuizStartResponse, ReviewNextResponse,
    ReviewQueueQuery, ReviewQueueResponse,
};
use crate::routes::auth::AuthenticatedLearner;
use crate::AppState;

const DEFAULT_QUEUE_LIMIT: usize = 10;

/// POST /api/quiz/start
/// Picks a random non-trivial card and asks for its translation.
pub async fn quiz_start(
    Extension(auth): Extension<AuthenticatedLearner>,
    State(state): State<AppState>,
) -> Result<Json<QuizStartResponse>> {
    let pairs = state.db.get_cards_with_state(auth.learner_id).await?;
    let cards: Vec<_> = pairs.iter().map(|(card, _)| card.to_core_card()).collect();

    let Some(card) = random_nontrivial(&cards, &mut rand::thread_rng()) else {
        return Ok(Json(QuizStartResponse { prompt: None }));
    };

    state.sessions.put(
        auth.learner_id,
        ConversationState::AwaitingQuizAnswer {
            word: card.front_text.clone(),
            correct_answer: card.back_text.clone(),
        },
    );

    Ok(Json(QuizStartResponse {
        prompt: Some(Prompt {
            word: card.front_text.clone(),
            voice_lang: card.source_script.voice_lang().to_string(),
        }),
    }))
}

/// POST /api/review/next
/// Serves the most overdue card, if any card is due.
pub async fn review_next(
    Extension(auth): Extension<AuthenticatedLearner>,
    State(state): State<AppState>,
) -> Result<Json<ReviewNextResponse>> {
    let pairs = load_core_pairs(&state, &auth).await?;
    let due = by_due_date(&pairs, Utc::now(), 1);

    let Some(card) = due.first() else {
        return Ok(Json(ReviewNextResponse {
            prompt: None,
            card_id: None,
        }));
    };

    state.sessions.put(
        auth.learner_id,
        ConversationState::AwaitingReviewAnswer {
            card_id: card.id,
            word: card.front_text.clone(),
            correct_answer: card.back_text.clone(),
        },
    );

    Ok(Json(ReviewNextResponse {
        prompt: Some(Prompt {
            word: card.front_text.clone(),
            voice_lang: card.source_script.voice_lang().to_string(),
        }),
        card_id: Some(card.id),
    }))
}

/// GET /api/review/queue?limit=N
/// Lists due cards in review order without starting a session.
pub async fn review_queue(
    Extension(auth): Extension<AuthenticatedLearner>,
    State(state): State<AppState>,
    Query(query): Query<ReviewQueueQuery>,
) -> Result<Json<ReviewQueueResponse>> {
    let limit = query.limit.unwrap_or(DEFAULT_QUEUE_LIMIT);
    let pairs = load_core_pairs(&state, &auth).await?;
    let selected = by_due_date(&pairs, Utc::now(), limit);

    let due = selected
        .iter()
        .filter_map(|card| {
            pairs
                .iter()
                .find(|(c, _)| c.id == card.id)
                .map(|(c, repetition)| DueCardInfo {
                    card_id: c.id,
                    front_text: c.front_text.clone(),
                    next_review: repetition.next_review,
                    interval_days: repetition.interval,
                })
        })
        .collect();

    Ok(Json(ReviewQueueResponse { due }))
}

/// POST /api/study/answer
/// Grades the pending quiz or review answer. Review answers also advance
/// the card's schedule; quiz answers never touch it.
pub async fn answer(
    Extension(auth): Extension<AuthenticatedLearner>,
    State(state): State<AppState>,
    Json(payload): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>> {
    let conversation = state
        .sessions
        .take(auth.learner_id)
        .ok_or_else(|| ApiError::BadRequest("No active quiz or review".to_string()))?;

    let outcome = grade_answer(&conversation, &payload.answer)
        .ok_or_else(|| ApiError::BadRequest("No answer expected right now".to_string()))?;

    let repetition = match outcome.card_id {
        Some(card_id) => Some(
            state
                .db
                .review_card(card_id, auth.learner_id, outcome.quality, &state.scheduler)
                .await?,
        ),
        None => None,
    };

    Ok(Json(AnswerResponse {
        correct: outcome.correct,
        word: outcome.word,
        correct_answer: outcome.correct_answer,
        your_answer: payload.answer,
        repetition,
    }))
}

async fn load_core_pairs(
    state: &AppState,
    auth: &AuthenticatedLearner,
) -> Result<Vec<(vocab_core::Card, vocab_core::RepetitionState)>> {
    let pairs = state.db.get_cards_with_state(auth.learner_id).await?;
    Ok(pairs
        .iter()
        .map(|(card, repetition)| (card.to_core_card(), repetition.to_core_state()))
        .collect())
}
