//! Shared fixtures: an app instance over a fresh in-memory database, plus
//! request helpers for registration, Basic credentials, and course setup.

use std::sync::Arc;

use axum::http::{HeaderValue, StatusCode};
use axum_test::TestServer;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;

use course_catalog::app::build_app;
use course_catalog::config::{AppConfig, RunMode};
use course_catalog::state::AppState;

/// Full app over a single-connection in-memory SQLite pool with migrations
/// applied. One connection keeps every request on the same database.
pub async fn test_server() -> TestServer {
    let db = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("open in-memory database");
    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .expect("run migrations");

    let config = Arc::new(AppConfig {
        host: "127.0.0.1".into(),
        port: 0,
        run_mode: RunMode::Test,
        database_url: "sqlite::memory:".into(),
    });

    TestServer::new(build_app(AppState::from_parts(db, config))).expect("start test server")
}

pub fn basic_auth(email: &str, password: &str) -> HeaderValue {
    let encoded = STANDARD.encode(format!("{email}:{password}"));
    HeaderValue::from_str(&format!("Basic {encoded}")).expect("header value")
}

/// Registers a user and returns the new id.
pub async fn register_user(server: &TestServer, first_name: &str, email: &str, password: &str) -> i64 {
    let response = server
        .post("/api/users")
        .json(&json!({
            "firstName": first_name,
            "lastName": "Tester",
            "emailAddress": email,
            "password": password,
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json::<Value>()["data"]["user"]["id"]
        .as_i64()
        .expect("created user id")
}

/// Creates a course as the given user and returns the new id.
pub async fn create_course(server: &TestServer, email: &str, password: &str, title: &str) -> i64 {
    let response = server
        .post("/api/courses")
        .add_header(axum::http::header::AUTHORIZATION, basic_auth(email, password))
        .json(&json!({
            "title": title,
            "description": "In this course, you'll learn how to write code like a pro!",
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json::<Value>()["data"]["course"]["id"]
        .as_i64()
        .expect("created course id")
}
