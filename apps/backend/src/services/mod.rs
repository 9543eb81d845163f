//! External collaborators and in-process services.
//!
//! Translation, text-to-speech, and speech recognition are narrow trait
//! contracts; the HTTP implementations here are one possible backend and
//! the routes only ever see the traits.

pub mod sessions;
pub mod speech;
pub mod translate;

use thiserror::Error;

use crate::error::ApiError;

/// Errors from external service calls
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        ApiError::Upstream(err.to_string())
    }
}
