//! Learner registration and auth tests.
//!
//! These tests require a running PostgreSQL database.
//! Set DATABASE_URL before running.

mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use uuid::Uuid;

use common::fixtures;
use common::TestContext;

/// Test registering a new learner returns a token.
#[tokio::test]
#[ignore = "requires database"]
async fn test_register_creates_learner() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let telegram_id = rand::random::<i32>().abs() as i64;

    let response = server
        .post("/api/learners/register")
        .json(&fixtures::register_request(telegram_id))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();

    assert!(body["created"].as_bool().unwrap());
    assert!(!body["token"].as_str().unwrap().is_empty());

    let learner_id = Uuid::parse_str(body["learner_id"].as_str().unwrap()).unwrap();
    ctx.cleanup_learner(learner_id).await;
}

/// Test registering the same Telegram account twice is idempotent.
#[tokio::test]
#[ignore = "requires database"]
async fn test_register_is_idempotent() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let telegram_id = rand::random::<i32>().abs() as i64;

    let first: serde_json::Value = server
        .post("/api/learners/register")
        .json(&fixtures::register_request(telegram_id))
        .await
        .json();

    let second: serde_json::Value = server
        .post("/api/learners/register")
        .json(&fixtures::register_request(telegram_id))
        .await
        .json();

    assert!(first["created"].as_bool().unwrap());
    assert!(!second["created"].as_bool().unwrap());
    assert_eq!(first["learner_id"], second["learner_id"]);
    assert_eq!(first["token"], second["token"]);

    let learner_id = Uuid::parse_str(first["learner_id"].as_str().unwrap()).unwrap();
    ctx.cleanup_learner(learner_id).await;
}

/// Test status endpoint rejects missing auth.
#[tokio::test]
#[ignore = "requires database"]
async fn test_status_requires_auth() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server.get("/api/learners/status").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

/// Test status endpoint rejects an unknown token.
#[tokio::test]
#[ignore = "requires database"]
async fn test_status_rejects_bad_token() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server
        .get("/api/learners/status")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value("not-a-real-token"),
        )
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

/// Test status endpoint returns learner info with a valid token.
#[tokio::test]
#[ignore = "requires database"]
async fn test_status_with_valid_token() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let (learner_id, token) = ctx.create_test_learner().await;

    let response = server
        .get("/api/learners/status")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();

    assert_eq!(
        body["learner_id"].as_str().unwrap(),
        learner_id.to_string()
    );
    assert_eq!(body["username"].as_str().unwrap(), "testuser");

    ctx.cleanup_learner(learner_id).await;
}
