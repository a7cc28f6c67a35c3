use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    routing::{get, post, put},
    Json, Router,
};
use serde_json::json;
use tracing::instrument;

use crate::auth::extractors::CurrentUser;
use crate::courses::dto::{
    CourseDetails, CourseResponse, CreateCourseRequest, UpdateCourseRequest,
};
use crate::courses::services;
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/courses", get(list_courses))
        .route("/courses/:id", get(get_course))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/courses", post(create_course))
        .route("/courses/:id", put(update_course).delete(delete_course))
}

fn parse_course_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest("Invalid course ID format".into()))
}

#[instrument(skip_all)]
pub async fn list_courses(State(state): State<AppState>) -> Result<Json<ApiResponse>, ApiError> {
    let courses: Vec<CourseResponse> = services::get_all_courses(&state.db)
        .await?
        .into_iter()
        .map(CourseResponse::from)
        .collect();

    Ok(Json(ApiResponse::new(
        "Courses fetched successfully",
        json!({ "courses": courses }),
    )))
}

#[instrument(skip_all, fields(id = %id))]
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse>, ApiError> {
    let id = parse_course_id(&id)?;

    let course = services::get_course_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Course Not Found".into()))?;

    Ok(Json(ApiResponse::new(
        "Course fetched successfully",
        json!({ "course": CourseDetails::from(course) }),
    )))
}

#[instrument(skip_all)]
pub async fn create_course(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<serde_json::Value>,
) -> Result<(StatusCode, HeaderMap, Json<ApiResponse>), ApiError> {
    let input = CreateCourseRequest::from_value(body)?.validate()?;
    let course = services::create_course(&state.db, user.id, input).await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::LOCATION,
        format!("/api/courses/{}", course.id).parse().unwrap(),
    );

    Ok((
        StatusCode::CREATED,
        headers,
        Json(ApiResponse::new(
            "Course created successfully",
            json!({ "course": CourseResponse::from(course) }),
        )),
    ))
}

#[instrument(skip_all, fields(id = %id))]
pub async fn update_course(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<ApiResponse>, ApiError> {
    let id = parse_course_id(&id)?;
    let changes = UpdateCourseRequest::from_value(body)?.validate()?;

    let existing = services::get_course_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Course Not Found".into()))?;

    if existing.user_id != user.id {
        return Err(ApiError::Forbidden("Forbidden: You do not own this course".into()));
    }

    // The row can vanish between the ownership check and the mutation; that
    // race resolves to a plain 404.
    let updated = services::update_course(&state.db, id, changes)
        .await?
        .ok_or_else(|| ApiError::NotFound("Course Not Found".into()))?;

    Ok(Json(ApiResponse::new(
        "Course updated successfully",
        json!({ "course": CourseResponse::from(updated) }),
    )))
}

#[instrument(skip_all, fields(id = %id))]
pub async fn delete_course(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse>, ApiError> {
    let id = parse_course_id(&id)?;

    let existing = services::get_course_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Course Not Found".into()))?;

    if existing.user_id != user.id {
        return Err(ApiError::Forbidden("Forbidden: You do not own this course".into()));
    }

    services::delete_course(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Course Not Found".into()))?;

    Ok(Json(ApiResponse::new("Course deleted successfully", json!({}))))
}
