//! Learner registration and status endpoints

use axum::{extract::State, Extension, Json};

use crate::error::{ApiError, Result};
use crate::models::{LearnerStatusResponse, RegisterRequest, RegisterResponse};
use crate::routes::auth::AuthenticatedLearner;
use crate::AppState;

/// POST /api/learners/register
/// Gets or creates the learner for a Telegram account and returns the token
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>> {
    let (learner, created) = state
        .db
        .register_learner(payload.telegram_id, payload.username.as_deref())
        .await?;

    if created {
        tracing::info!("Registered new learner: {}", learner.id);
    }

    Ok(Json(RegisterResponse {
        learner_id: learner.id,
        token: learner.token,
        created,
    }))
}

/// GET /api/learners/status
pub async fn status(
    Extension(auth): Extension<AuthenticatedLearner>,
    State(state): State<AppState>,
) -> Result<Json<LearnerStatusResponse>> {
    let learner = state
        .db
        .get_learner_by_token(&auth.token)
        .await?
        .ok_or_else(|| ApiError::NotFound("Learner not found".to_string()))?;

    Ok(Json(LearnerStatusResponse {
        learner_id: learner.id,
        telegram_id: learner.telegram_id,
        username: learner.username,
        last_seen_at: learner.last_seen_at,
    }))
}
