use std::collections::BTreeMap;
use std::sync::OnceLock;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Field name -> list of messages, as returned in the `errors` key of a 400.
pub type FieldErrors = BTreeMap<&'static str, Vec<String>>;

static EXPOSE_INTERNAL: OnceLock<bool> = OnceLock::new();

/// Set once at startup. When true (non-production), 500 responses carry the
/// real message and the error chain instead of a generic line.
pub fn set_expose_internal(expose: bool) {
    let _ = EXPOSE_INTERNAL.set(expose);
}

fn expose_internal() -> bool {
    EXPOSE_INTERNAL.get().copied().unwrap_or(false)
}

/// Domain error for the whole API. Services and handlers return this;
/// conversion to an HTTP response happens only here.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation failed.")]
    Validation(FieldErrors),
    #[error("{0}")]
    BadRequest(String),
    #[error("Invalid credentials")]
    Unauthorized,
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Every failure is logged server-side, whatever the client sees.
        match &self {
            ApiError::Internal(err) => error!(error = ?err, "request failed"),
            other => warn!(status = %status, message = %other, "request rejected"),
        }

        let mut body = json!({
            "success": false,
            "message": self.to_string(),
        });
        match self {
            ApiError::Validation(errors) => {
                body["errors"] = json!(errors);
            }
            ApiError::Internal(err) => {
                if expose_internal() {
                    body["stack"] = json!(format!("{err:?}"));
                } else {
                    body["message"] = json!("An unexpected server error occurred.");
                }
            }
            _ => {}
        }

        (status, Json(body)).into_response()
    }
}
