//! Word submission and card management endpoints

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    Extension, Json,
};

use vocab_core::classify_script;

use crate::error::{ApiError, Result};
use crate::models::{
    AudioQuery, CardSide, CorrectWordRequest, DbCard, DbRepetition, SubmitWordRequest,
    WordListResponse, WordResponse,
};
use crate::routes::auth::AuthenticatedLearner;
use crate::AppState;

fn word_response(card: &DbCard, repetition: &DbRepetition) -> WordResponse {
    let core = card.to_core_card();
    WordResponse {
        id: core.id,
        front_text: core.front_text,
        back_text: core.back_text,
        source_script: core.source_script,
        front_voice: core.source_script.voice_lang().to_string(),
        back_voice: core.source_script.translation_voice_lang().to_string(),
        difficulty: core.difficulty,
        next_review: repetition.next_review,
    }
}

/// POST /api/words
/// Translates the submitted word and stores it as a new card with a fresh
/// repetition record, due immediately.
pub async fn submit_word(
    Extension(auth): Extension<AuthenticatedLearner>,
    State(state): State<AppState>,
    Json(payload): Json<SubmitWordRequest>,
) -> Result<Json<WordResponse>> {
    let text = payload.text.trim();
    if text.is_empty() {
        return Err(ApiError::BadRequest("Word text cannot be empty".to_string()));
    }

    let script_hint = classify_script(text);
    let translation = state.translator.translate(text, script_hint).await?;

    let difficulty = payload.difficulty.unwrap_or_default();
    let (card, repetition) = state
        .db
        .insert_card(
            auth.learner_id,
            text,
            &translation.text,
            translation.detected_script.as_str(),
            difficulty.as_str(),
            &state.scheduler,
        )
        .await?;

    tracing::debug!(card_id = card.id, "Stored new word for {}", auth.learner_id);

    Ok(Json(word_response(&card, &repetition)))
}

/// GET /api/words
pub async fn list_words(
    Extension(auth): Extension<AuthenticatedLearner>,
    State(state): State<AppState>,
) -> Result<Json<WordListResponse>> {
    let pairs = state.db.get_cards_with_state(auth.learner_id).await?;
    let words = pairs
        .iter()
        .map(|(card, repetition)| word_response(card, repetition))
        .collect();

    Ok(Json(WordListResponse { words }))
}

/// PUT /api/words/:id
/// Corrects the stored translation; scheduling state is untouched.
pub async fn update_word(
    Extension(auth): Extension<AuthenticatedLearner>,
    State(state): State<AppState>,
    Path(card_id): Path<i64>,
    Json(payload): Json<CorrectWordRequest>,
) -> Result<Json<WordResponse>> {
    let back_text = payload.back_text.trim();
    if back_text.is_empty() {
        return Err(ApiError::BadRequest(
            "Corrected translation cannot be empty".to_string(),
        ));
    }

    let card = state
        .db
        .update_back_text(card_id, auth.learner_id, back_text)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Card {}", card_id)))?;

    let repetition = state
        .db
        .get_repetition(card_id, auth.learner_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Repetition state for card {}", card_id)))?;

    Ok(Json(word_response(&card, &repetition)))
}

/// DELETE /api/words/:id
pub async fn delete_word(
    Extension(auth): Extension<AuthenticatedLearner>,
    State(state): State<AppState>,
    Path(card_id): Path<i64>,
) -> Result<()> {
    let deleted = state.db.delete_card(card_id, auth.learner_id).await?;
    if !deleted {
        return Err(ApiError::NotFound(format!("Card {}", card_id)));
    }
    Ok(())
}

/// GET /api/words/:id/audio?side=front|back
/// Synthesizes pronunciation for one side of a card. The front is voiced in
/// the word's own script, the back in the opposite one.
pub async fn word_audio(
    Extension(auth): Extension<AuthenticatedLearner>,
    State(state): State<AppState>,
    Path(card_id): Path<i64>,
    Query(query): Query<AudioQuery>,
) -> Result<impl IntoResponse> {
    let card = state
        .db
        .get_card(card_id, auth.learner_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Card {}", card_id)))?
        .to_core_card();

    let (text, lang) = match query.side {
        CardSide::Front => (card.front_text, card.source_script.voice_lang()),
        CardSide::Back => (card.back_text, card.source_script.translation_voice_lang()),
    };

    let audio = state.synthesizer.synthesize(&text, lang).await?;

    Ok(([(header::CONTENT_TYPE, "audio/mpeg")], audio))
}
