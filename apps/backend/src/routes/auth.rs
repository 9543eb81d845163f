//! Authentication middleware

use axum::{
    body::Body,
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::AppState;

/// Authenticated learner info stored in request extensions
#[derive(Clone, Debug)]
pub struct AuthenticatedLearner {
    pub learner_id: Uuid,
    pub token: String,
}

/// Auth middleware - extracts learner token from Authorization header
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response> {
    // Extract Bearer token
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized("Invalid Authorization format".to_string()))?
        .to_string();

    // Look up learner by token
    let learner = state
        .db
        .get_learner_by_token(&token)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid learner token".to_string()))?;

    // Update last_seen
    state.db.update_last_seen(learner.id).await?;

    // Store authenticated learner in request extensions
    request.extensions_mut().insert(AuthenticatedLearner {
        learner_id: learner.id,
        token,
    });

    Ok(next.run(request).await)
}
