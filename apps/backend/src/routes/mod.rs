//! HTTP route handlers

pub mod auth;
pub mod learners;
pub mod speech;
pub mod study;
pub mod words;
