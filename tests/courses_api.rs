//! End-to-end tests for the course CRUD surface and ownership rules.

mod common;

use axum::http::{header, StatusCode};
use serde_json::{json, Value};

use common::{basic_auth, create_course, register_user, test_server};

#[tokio::test]
async fn listing_is_public_and_empty_at_first() {
    let server = test_server().await;

    let response = server.get("/api/courses").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["courses"], json!([]));
}

#[tokio::test]
async fn creating_a_course_requires_authentication() {
    let server = test_server().await;

    let response = server
        .post("/api/courses")
        .json(&json!({ "title": "T", "description": "D" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn created_course_belongs_to_the_caller_not_the_body() {
    let server = test_server().await;
    let joe_id = register_user(&server, "Joe", "joe@smith.com", "joepassword").await;

    let response = server
        .post("/api/courses")
        .add_header(header::AUTHORIZATION, basic_auth("joe@smith.com", "joepassword"))
        .json(&json!({
            "title": "Build a Basic Bookcase",
            "description": "High-end furniture projects",
            "estimatedTime": "12 hours",
            "userId": 9999,
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    let course = &body["data"]["course"];
    assert_eq!(course["userId"].as_i64().unwrap(), joe_id);
    assert_eq!(course["estimatedTime"], "12 hours");
    assert_eq!(course["materialsNeeded"], Value::Null);

    let id = course["id"].as_i64().unwrap();
    assert_eq!(
        response.header("location").to_str().unwrap(),
        format!("/api/courses/{id}")
    );
}

#[tokio::test]
async fn course_validation_reports_missing_fields() {
    let server = test_server().await;
    register_user(&server, "Joe", "joe@smith.com", "joepassword").await;

    let response = server
        .post("/api/courses")
        .add_header(header::AUTHORIZATION, basic_auth("joe@smith.com", "joepassword"))
        .json(&json!({ "description": "no title here" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "Validation failed.");
    assert_eq!(body["errors"]["title"][0], "Please enter a course title");
    assert!(body["errors"].get("description").is_none());
}

#[tokio::test]
async fn course_details_nest_the_owner_without_a_password() {
    let server = test_server().await;
    let joe_id = register_user(&server, "Joe", "joe@smith.com", "joepassword").await;
    let course_id = create_course(&server, "joe@smith.com", "joepassword", "Learn How to Program").await;

    let response = server.get(&format!("/api/courses/{course_id}")).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    let course = &body["data"]["course"];
    assert_eq!(course["id"].as_i64().unwrap(), course_id);
    assert_eq!(course["userId"].as_i64().unwrap(), joe_id);
    assert_eq!(course["user"]["firstName"], "Joe");
    assert_eq!(course["user"]["emailAddress"], "joe@smith.com");
    assert!(course["user"].get("password").is_none());
}

#[tokio::test]
async fn missing_course_is_not_found_and_bad_id_is_rejected() {
    let server = test_server().await;

    let response = server.get("/api/courses/12345").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Course Not Found");

    let response = server.get("/api/courses/abc").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "Invalid course ID format");
}

#[tokio::test]
async fn only_the_owner_can_update_a_course() {
    let server = test_server().await;
    register_user(&server, "Joe", "joe@smith.com", "joepassword").await;
    register_user(&server, "Sally", "sally@jones.com", "sallypassword").await;
    let course_id = create_course(&server, "joe@smith.com", "joepassword", "Learn How to Program").await;

    let response = server
        .put(&format!("/api/courses/{course_id}"))
        .add_header(header::AUTHORIZATION, basic_auth("sally@jones.com", "sallypassword"))
        .json(&json!({ "title": "Hijacked" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    let body: Value = response.json();
    assert_eq!(body["message"], "Forbidden: You do not own this course");

    let response = server
        .put("/api/courses/99999")
        .add_header(header::AUTHORIZATION, basic_auth("joe@smith.com", "joepassword"))
        .json(&json!({ "title": "Anything" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let response = server
        .put(&format!("/api/courses/{course_id}"))
        .add_header(header::AUTHORIZATION, basic_auth("joe@smith.com", "joepassword"))
        .json(&json!({ "title": "Learn How to Program, Second Edition" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(
        body["data"]["course"]["title"],
        "Learn How to Program, Second Edition"
    );
    // Untouched fields survive a partial update.
    assert_eq!(
        body["data"]["course"]["description"],
        "In this course, you'll learn how to write code like a pro!"
    );
}

#[tokio::test]
async fn only_the_owner_can_delete_a_course() {
    let server = test_server().await;
    register_user(&server, "Joe", "joe@smith.com", "joepassword").await;
    register_user(&server, "Sally", "sally@jones.com", "sallypassword").await;
    let course_id = create_course(&server, "joe@smith.com", "joepassword", "Learn How to Program").await;

    let response = server
        .delete(&format!("/api/courses/{course_id}"))
        .add_header(header::AUTHORIZATION, basic_auth("sally@jones.com", "sallypassword"))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let response = server
        .delete("/api/courses/99999")
        .add_header(header::AUTHORIZATION, basic_auth("joe@smith.com", "joepassword"))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let response = server
        .delete(&format!("/api/courses/{course_id}"))
        .add_header(header::AUTHORIZATION, basic_auth("joe@smith.com", "joepassword"))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["data"], json!({}));

    let response = server.get(&format!("/api/courses/{course_id}")).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_validation_runs_before_the_ownership_check() {
    let server = test_server().await;
    register_user(&server, "Joe", "joe@smith.com", "joepassword").await;
    let course_id = create_course(&server, "joe@smith.com", "joepassword", "Learn How to Program").await;

    let response = server
        .put(&format!("/api/courses/{course_id}"))
        .add_header(header::AUTHORIZATION, basic_auth("joe@smith.com", "joepassword"))
        .json(&json!({ "title": "" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["errors"]["title"][0], "Please enter a course title");
}
