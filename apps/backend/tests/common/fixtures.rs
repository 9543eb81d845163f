//! Request body builders for integration tests.

use serde_json::{json, Value};

pub fn register_request(telegram_id: i64) -> Value {
    json!({
        "telegram_id": telegram_id,
        "username": "testuser",
    })
}

pub fn submit_word_request(text: &str) -> Value {
    json!({ "text": text })
}

pub fn submit_word_request_with_difficulty(text: &str, difficulty: &str) -> Value {
    json!({ "text": text, "difficulty": difficulty })
}

pub fn correct_word_request(back_text: &str) -> Value {
    json!({ "back_text": back_text })
}

pub fn answer_request(answer: &str) -> Value {
    json!({ "answer": answer })
}
