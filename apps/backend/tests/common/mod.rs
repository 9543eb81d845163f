//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext for setting up test environment with database
//! - Stub translation/speech services so no external HTTP is needed
//! - Helper functions for creating test data
//!
//! # Requirements
//! Integration tests require a PostgreSQL database (set DATABASE_URL).

pub mod fixtures;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use uuid::Uuid;

use vocab_backend::db::Database;
use vocab_backend::routes;
use vocab_backend::services::speech::{SpeechRecognizer, SpeechSynthesizer};
use vocab_backend::services::translate::{Translation, Translator};
use vocab_backend::services::sessions::SessionStore;
use vocab_backend::services::ServiceError;
use vocab_backend::AppState;
use vocab_core::{classify_script, Script, Sm2};

/// Deterministic translator: prefixes the text instead of calling out.
pub struct StubTranslator;

#[async_trait]
impl Translator for StubTranslator {
    async fn translate(&self, text: &str, source: Script) -> Result<Translation, ServiceError> {
        let detected_script = match source {
            Script::Ambiguous => classify_script(text),
            resolved => resolved,
        };
        Ok(Translation {
            text: format!("перевод-{}", text.to_lowercase()),
            detected_script,
        })
    }
}

/// Synthesizer stub returning a fixed byte pattern.
pub struct StubSynthesizer;

#[async_trait]
impl SpeechSynthesizer for StubSynthesizer {
    async fn synthesize(&self, _text: &str, _lang: &str) -> Result<Vec<u8>, ServiceError> {
        Ok(vec![0x49, 0x44, 0x33, 0x04])
    }
}

/// Recognizer stub returning a fixed transcription.
pub struct StubRecognizer;

#[async_trait]
impl SpeechRecognizer for StubRecognizer {
    async fn transcribe(&self, _audio: &[u8], _lang_hint: &str) -> Result<String, ServiceError> {
        Ok("привет".to_string())
    }
}

/// Test context containing database connection and test server.
///
/// Requires DATABASE_URL environment variable to be set.
pub struct TestContext {
    pub db: Database,
    app: Router,
}

impl TestContext {
    /// Create a new test context with all stub services wired in.
    ///
    /// # Panics
    /// Panics if DATABASE_URL is not set or database connection fails.
    pub async fn new() -> Self {
        Self::build(Some(Arc::new(StubRecognizer))).await
    }

    /// Create a test context with no speech recognizer configured.
    pub async fn new_without_recognizer() -> Self {
        Self::build(None).await
    }

    async fn build(recognizer: Option<Arc<dyn SpeechRecognizer>>) -> Self {
        dotenvy::dotenv().ok();

        let database_url =
            std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests");

        let db = Database::connect(&database_url)
            .await
            .expect("Failed to connect to test database");

        db.run_migrations()
            .await
            .expect("Failed to run migrations");

        let state = AppState {
            db: db.clone(),
            scheduler: Sm2::default(),
            translator: Arc::new(StubTranslator),
            synthesizer: Arc::new(StubSynthesizer),
            recognizer,
            sessions: Arc::new(SessionStore::with_default_ttl()),
        };

        let app = build_test_router(state);

        Self { db, app }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    /// Create a test learner and return its ID and token.
    pub async fn create_test_learner(&self) -> (Uuid, String) {
        let telegram_id = rand::random::<i32>().abs() as i64;
        let (learner, _) = self
            .db
            .register_learner(telegram_id, Some("testuser"))
            .await
            .expect("Failed to create test learner");
        (learner.id, learner.token)
    }

    /// Format authorization header value.
    pub fn auth_header_value(token: &str) -> String {
        format!("Bearer {}", token)
    }

    /// Force a card's next review into the past so it shows up as due.
    pub async fn make_card_overdue(&self, card_id: i64) {
        sqlx::query("UPDATE repetitions SET next_review = NOW() - INTERVAL '1 day' WHERE card_id = $1")
            .bind(card_id)
            .execute(self.db.pool())
            .await
            .expect("Failed to backdate repetition");
    }

    /// Clean up test data for a learner.
    ///
    /// Call this after tests to remove test data.
    pub async fn cleanup_learner(&self, learner_id: Uuid) {
        // Repetitions go with the cards (ON DELETE CASCADE)
        let _ = sqlx::query("DELETE FROM cards WHERE owner_id = $1")
            .bind(learner_id)
            .execute(self.db.pool())
            .await;

        let _ = sqlx::query("DELETE FROM learners WHERE id = $1")
            .bind(learner_id)
            .execute(self.db.pool())
            .await;
    }
}

/// Build the test router with all routes.
fn build_test_router(state: AppState) -> Router {
    let protected_routes = Router::new()
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
        .layer(middleware::from_fn_with_state(
            state.clone(),
            routes::auth::auth_middleware,
        ));

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/api/learners/register", post(routes::learners::register))
        .merge(protected_routes)
        .with_state(state)
}
