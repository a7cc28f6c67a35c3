use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    routing::{get, put},
    Json, Router,
};
use serde_json::json;
use tracing::instrument;

use crate::auth::extractors::CurrentUser;
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::users::dto::{CreateUserRequest, ProfileResponse, UpdateUserRequest, UserResponse};
use crate::users::services;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(get_current_user).post(register))
        .route("/users/:id", put(update_user).delete(delete_user))
}

#[instrument(skip_all)]
pub async fn get_current_user(CurrentUser(user): CurrentUser) -> Json<ApiResponse> {
    Json(ApiResponse::new(
        "Authenticated user fetched successfully",
        json!({ "user": ProfileResponse::from(user) }),
    ))
}

#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Result<(StatusCode, HeaderMap, Json<ApiResponse>), ApiError> {
    let input = CreateUserRequest::from_value(body)?.validate()?;
    let user = services::create_user(&state.db, input).await?;

    let mut headers = HeaderMap::new();
    headers.insert(header::LOCATION, "/".parse().unwrap());

    Ok((
        StatusCode::CREATED,
        headers,
        Json(ApiResponse::new(
            "User registered successfully",
            json!({ "user": UserResponse::from(user) }),
        )),
    ))
}

#[instrument(skip_all, fields(id = %id))]
pub async fn update_user(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<ApiResponse>, ApiError> {
    let id: i64 = id
        .parse()
        .map_err(|_| ApiError::BadRequest("Invalid user ID provided".into()))?;

    // Ownership before payload validation: a foreign id is 403 no matter
    // what the body looks like.
    if user.id != id {
        return Err(ApiError::Forbidden(
            "Forbidden: You can only update your own user profile.".into(),
        ));
    }

    let update = UpdateUserRequest::from_value(body)?.validate()?;
    let updated = services::update_user(&state.db, id, update).await?;

    Ok(Json(ApiResponse::new(
        "User updated successfully",
        json!({ "user": UserResponse::from(updated) }),
    )))
}

#[instrument(skip_all, fields(id = %id))]
pub async fn delete_user(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse>, ApiError> {
    let id: i64 = id
        .parse()
        .map_err(|_| ApiError::BadRequest("Invalid user ID provided".into()))?;

    if user.id != id {
        return Err(ApiError::Forbidden(
            "Forbidden: You can only delete your own user profile.".into(),
        ));
    }

    services::delete_user(&state.db, id).await?;

    Ok(Json(ApiResponse::new("User deleted successfully", json!({}))))
}
