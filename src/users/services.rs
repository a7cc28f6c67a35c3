use sqlx::SqlitePool;
use tracing::info;

use crate::auth::password::hash_password;
use crate::error::ApiError;
use crate::users::dto::{UserUpdate, ValidUser};
use crate::users::repo::{self, User, UserChanges};

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db_err| db_err.is_unique_violation())
        .unwrap_or(false)
}

/// Register a new user. The duplicate-email pre-check gives the friendly 409;
/// the UNIQUE constraint stays the source of truth, so losing the
/// registration race maps to the same 409 instead of a 500.
pub async fn create_user(db: &SqlitePool, input: ValidUser) -> Result<User, ApiError> {
    if repo::find_by_email(db, &input.email_address).await?.is_some() {
        return Err(ApiError::Conflict("Email already exists, try logging in".into()));
    }

    let hash = hash_password(&input.password)?;

    match repo::insert(
        db,
        &input.first_name,
        &input.last_name,
        &input.email_address,
        &hash,
    )
    .await
    {
        Ok(user) => {
            info!(user_id = user.id, email = %user.email_address, "user registered");
            Ok(user)
        }
        Err(err) if is_unique_violation(&err) => {
            Err(ApiError::Conflict("Email already exists, try logging in".into()))
        }
        Err(err) => Err(anyhow::Error::from(err).into()),
    }
}

/// Apply a partial update to the caller's own row. Identity enforcement is
/// the routing layer's job; this trusts the id it is given.
pub async fn update_user(db: &SqlitePool, id: i64, update: UserUpdate) -> Result<User, ApiError> {
    let existing = get_user_by_id(db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    let mut changes = UserChanges {
        first_name: update.first_name,
        last_name: update.last_name,
        ..UserChanges::default()
    };

    if let Some(email) = update.email_address {
        if email != existing.email_address {
            if repo::find_by_email(db, &email).await?.is_some() {
                return Err(ApiError::Conflict(
                    "Email address already in use by another account".into(),
                ));
            }
            changes.email_address = Some(email);
        }
    }

    if let Some(plain) = update.password {
        changes.password = Some(hash_password(&plain)?);
    }

    match repo::update(db, id, changes).await {
        Ok(Some(user)) => {
            info!(user_id = user.id, "user updated");
            Ok(user)
        }
        Ok(None) => Err(anyhow::anyhow!("user {id} vanished during update").into()),
        Err(err) if is_unique_violation(&err) => Err(ApiError::Conflict(
            "Email address already in use by another account".into(),
        )),
        Err(err) => Err(anyhow::Error::from(err).into()),
    }
}

/// Delete the caller's own row; their courses go with it via the cascade.
/// Returns the deleted row for confirmation.
pub async fn delete_user(db: &SqlitePool, id: i64) -> Result<User, ApiError> {
    get_user_by_id(db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    match repo::delete(db, id).await? {
        Some(user) => {
            info!(user_id = user.id, email = %user.email_address, "user deleted");
            Ok(user)
        }
        None => Err(anyhow::anyhow!("user {id} vanished during delete").into()),
    }
}

pub async fn find_user_by_email(db: &SqlitePool, email: &str) -> anyhow::Result<Option<User>> {
    repo::find_by_email(db, email).await
}

pub async fn get_user_by_id(db: &SqlitePool, id: i64) -> anyhow::Result<Option<User>> {
    repo::find_by_id(db, id).await
}
