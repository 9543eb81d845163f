//! Vocabulary trainer backend service
//!
//! Axum HTTP API over the vocab-core scheduling library: learners register
//! with their Telegram ID, submit words that get translated and stored as
//! flashcards, and study them through quiz and spaced-repetition review
//! endpoints.

pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vocab_core::Sm2;

use crate::db::Database;
use crate::services::sessions::SessionStore;
use crate::services::speech::{
    HttpRecognizer, HttpSynthesizer, SpeechRecognizer, SpeechSynthesizer,
};
use crate::services::translate::{HttpTranslator, Translator};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub scheduler: Sm2,
    pub translator: Arc<dyn Translator>,
    pub synthesizer: Arc<dyn SpeechSynthesizer>,
    /// None when no ASR service is configured; the transcription endpoint
    /// then answers 503.
    pub recognizer: Option<Arc<dyn SpeechRecognizer>>,
    pub sessions: Arc<SessionStore>,
}

/// Build the application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/api/learners/status", get(routes::learners::status))
        .route(
            "/api/words",
            post(routes::words::submit_word).get(routes::words::list_words),
        )
        .route(
            "/api/words/:id",
            put(routes::words::update_word).delete(routes::words::delete_word),
        )
        .route("/api/words/:id/audio", get(routes::words::word_audio))
        .route("/api/speech/transcribe", post(routes::speech::transcribe))
        .route("/api/quiz/start", post(routes::study::quiz_start))
        .route("/api/review/next", post(routes::study::review_next))
        .route("/api/review/queue", get(routes::study::review_queue))
        .route("/api/study/answer", post(routes::study::answer))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            routes::auth::auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/api/learners/register", post(routes::learners::register))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Run the backend server
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vocab_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;

    tracing::info!("Connecting to database...");
    let db = Database::connect(&database_url).await?;

    tracing::info!("Running migrations...");
    db.run_migrations().await?;

    let translator: Arc<dyn Translator> =
        Arc::new(HttpTranslator::from_env().map_err(anyhow::Error::msg)?);
    let synthesizer: Arc<dyn SpeechSynthesizer> =
        Arc::new(HttpSynthesizer::from_env().map_err(anyhow::Error::msg)?);
    let recognizer: Option<Arc<dyn SpeechRecognizer>> = HttpRecognizer::from_env()
        .map(|r| Arc::new(r) as Arc<dyn SpeechRecognizer>);
    if recognizer.is_none() {
        tracing::warn!("ASR_URL not set; voice transcription disabled");
    }

    let state = AppState {
        db,
        scheduler: Sm2::default(),
        translator,
        synthesizer,
        recognizer,
        sessions: Arc::new(SessionStore::with_default_ttl()),
    };

    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", host, port);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, create_router(state)).await?;

    Ok(())
}
