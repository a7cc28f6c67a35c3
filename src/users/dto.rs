use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, FieldErrors};
use crate::users::repo::User;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string())
}

/// Registration body. Fields are optional at the serde layer so that missing
/// ones surface as field-level validation messages, not a parse failure.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email_address: Option<String>,
    pub password: Option<String>,
}

/// A registration body that passed validation.
#[derive(Debug)]
pub struct ValidUser {
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub password: String,
}

impl CreateUserRequest {
    pub fn from_value(value: serde_json::Value) -> Result<Self, ApiError> {
        serde_json::from_value(value)
            .map_err(|_| ApiError::BadRequest("Invalid request body".into()))
    }

    pub fn validate(self) -> Result<ValidUser, ApiError> {
        let mut errors = FieldErrors::new();

        let first_name = trimmed(self.first_name).filter(|v| !v.is_empty());
        if first_name.is_none() {
            errors.insert("firstName", vec!["First name is required".into()]);
        }

        let last_name = trimmed(self.last_name).filter(|v| !v.is_empty());
        if last_name.is_none() {
            errors.insert("lastName", vec!["Last name is required".into()]);
        }

        let email_address = trimmed(self.email_address).filter(|v| !v.is_empty());
        match &email_address {
            None => {
                errors.insert("emailAddress", vec!["An email address is required".into()]);
            }
            Some(email) if !is_valid_email(email) => {
                errors.insert(
                    "emailAddress",
                    vec!["Please enter a valid email address".into()],
                );
            }
            Some(_) => {}
        }

        let password = trimmed(self.password).filter(|v| !v.is_empty());
        if password.is_none() {
            errors.insert("password", vec!["Password is required".into()]);
        }

        match (first_name, last_name, email_address, password) {
            (Some(first_name), Some(last_name), Some(email_address), Some(password))
                if errors.is_empty() =>
            {
                Ok(ValidUser {
                    first_name,
                    last_name,
                    email_address,
                    password,
                })
            }
            _ => Err(ApiError::Validation(errors)),
        }
    }
}

/// Partial self-service update; absent fields stay untouched, present fields
/// must still pass the registration rules.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email_address: Option<String>,
    pub password: Option<String>,
}

/// Validated partial update; `password` is still plaintext here, the service
/// hashes it.
#[derive(Debug, Default)]
pub struct UserUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email_address: Option<String>,
    pub password: Option<String>,
}

impl UpdateUserRequest {
    pub fn from_value(value: serde_json::Value) -> Result<Self, ApiError> {
        serde_json::from_value(value)
            .map_err(|_| ApiError::BadRequest("Invalid request body".into()))
    }

    pub fn validate(self) -> Result<UserUpdate, ApiError> {
        let mut errors = FieldErrors::new();

        let first_name = trimmed(self.first_name);
        if matches!(&first_name, Some(v) if v.is_empty()) {
            errors.insert("firstName", vec!["First name is required".into()]);
        }

        let last_name = trimmed(self.last_name);
        if matches!(&last_name, Some(v) if v.is_empty()) {
            errors.insert("lastName", vec!["Last name is required".into()]);
        }

        let email_address = trimmed(self.email_address);
        match &email_address {
            Some(email) if email.is_empty() => {
                errors.insert("emailAddress", vec!["An email address is required".into()]);
            }
            Some(email) if !is_valid_email(email) => {
                errors.insert(
                    "emailAddress",
                    vec!["Please enter a valid email address".into()],
                );
            }
            _ => {}
        }

        let password = trimmed(self.password);
        if matches!(&password, Some(v) if v.is_empty()) {
            errors.insert("password", vec!["Password is required".into()]);
        }

        if !errors.is_empty() {
            return Err(ApiError::Validation(errors));
        }

        Ok(UserUpdate {
            first_name,
            last_name,
            email_address,
            password,
        })
    }
}

/// Public user fields returned after registration and updates.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email_address: user.email_address,
        }
    }
}

/// Shape of `GET /api/users`, kept without the id.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
}

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        Self {
            first_name: user.first_name,
            last_name: user.last_name,
            email_address: user.email_address,
        }
    }
}
