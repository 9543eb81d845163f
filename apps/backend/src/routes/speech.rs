//! Voice-message transcription endpoint

use axum::{
    body::Bytes,
    extract::{Query, State},
    Extension, Json,
};

use crate::error::{ApiError, Result};
use crate::models::{TranscribeQuery, TranscribeResponse};
use crate::routes::auth::AuthenticatedLearner;
use crate::AppState;

/// POST /api/speech/transcribe?lang=ru
/// Body is raw audio bytes. Returns 503 when no recognizer is configured.
pub async fn transcribe(
    Extension(auth): Extension<AuthenticatedLearner>,
    State(state): State<AppState>,
    Query(query): Query<TranscribeQuery>,
    audio: Bytes,
) -> Result<Json<TranscribeResponse>> {
    let recognizer = state.recognizer.as_ref().ok_or_else(|| {
        ApiError::Unavailable("Speech recognition is not configured".to_string())
    })?;

    if audio.is_empty() {
        return Err(ApiError::BadRequest("Audio body is empty".to_string()));
    }

    let lang = query.lang.as_deref().unwrap_or("ru");
    let text = recognizer.transcribe(&audio, lang).await?;

    tracing::debug!("Transcribed voice message for {}", auth.learner_id);

    Ok(Json(TranscribeResponse { text }))
}
