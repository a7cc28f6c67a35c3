use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::{error, warn};

use crate::auth::password::verify_password;
use crate::error::ApiError;
use crate::state::AppState;
use crate::users::repo::User;
use crate::users::services::find_user_by_email;

/// The authenticated caller, resolved from the `Authorization: Basic` header.
///
/// Every rejection is the same generic 401 regardless of cause; the cause is
/// only logged. Nothing here mutates stored state.
pub struct CurrentUser(pub User);

/// Split a `Basic` header value into (email, password). Splits on the first
/// `:` only, so passwords may contain colons.
fn decode_basic(header_value: &str) -> Option<(String, String)> {
    let encoded = header_value.strip_prefix("Basic ")?;
    let decoded = String::from_utf8(STANDARD.decode(encoded).ok()?).ok()?;
    let (email, password) = decoded.split_once(':')?;
    if email.is_empty() || password.is_empty() {
        return None;
    }
    Some((email.to_string(), password.to_string()))
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                warn!("missing Authorization header");
                ApiError::Unauthorized
            })?;

        let (email, password) = decode_basic(header_value).ok_or_else(|| {
            warn!("malformed Basic credentials");
            ApiError::Unauthorized
        })?;

        // Exact-match lookup; email is case-sensitive as stored.
        let user = match find_user_by_email(&state.db, &email).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                warn!("authentication with unknown email");
                return Err(ApiError::Unauthorized);
            }
            Err(err) => {
                error!(error = ?err, "user lookup failed during authentication");
                return Err(ApiError::Unauthorized);
            }
        };

        match verify_password(&password, &user.password) {
            Ok(true) => Ok(CurrentUser(user)),
            Ok(false) => {
                warn!(user_id = user.id, "authentication with wrong password");
                Err(ApiError::Unauthorized)
            }
            Err(err) => {
                error!(error = ?err, user_id = user.id, "password verification failed");
                Err(ApiError::Unauthorized)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(creds: &str) -> String {
        format!("Basic {}", STANDARD.encode(creds))
    }

    #[test]
    fn decodes_well_formed_credentials() {
        let (email, password) = decode_basic(&encode("joe@smith.com:joepassword")).unwrap();
        assert_eq!(email, "joe@smith.com");
        assert_eq!(password, "joepassword");
    }

    #[test]
    fn splits_on_first_colon_only() {
        let (email, password) = decode_basic(&encode("joe@smith.com:pass:word")).unwrap();
        assert_eq!(email, "joe@smith.com");
        assert_eq!(password, "pass:word");
    }

    #[test]
    fn rejects_wrong_scheme() {
        assert!(decode_basic("Bearer abcdef").is_none());
    }

    #[test]
    fn rejects_invalid_base64() {
        assert!(decode_basic("Basic $$$not-base64$$$").is_none());
    }

    #[test]
    fn rejects_missing_or_empty_parts() {
        assert!(decode_basic(&encode("no-colon-here")).is_none());
        assert!(decode_basic(&encode(":password")).is_none());
        assert!(decode_basic(&encode("email@example.com:")).is_none());
    }
}
