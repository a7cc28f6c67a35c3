use sqlx::{FromRow, SqlitePool};

/// User row as stored. `password` is the argon2 hash; it never leaves the
/// process through a response DTO.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub password: String,
}

/// Columns touched by a partial update; `None` leaves the column unchanged.
/// `password` must already be hashed by the caller.
#[derive(Debug, Default)]
pub struct UserChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email_address: Option<String>,
    pub password: Option<String>,
}

pub async fn find_by_email(db: &SqlitePool, email: &str) -> anyhow::Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, first_name, last_name, email_address, password
        FROM users
        WHERE email_address = ?1
        "#,
    )
    .bind(email)
    .fetch_optional(db)
    .await?;
    Ok(user)
}

pub async fn find_by_id(db: &SqlitePool, id: i64) -> anyhow::Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, first_name, last_name, email_address, password
        FROM users
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(user)
}

pub async fn insert(
    db: &SqlitePool,
    first_name: &str,
    last_name: &str,
    email_address: &str,
    password_hash: &str,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (first_name, last_name, email_address, password)
        VALUES (?1, ?2, ?3, ?4)
        RETURNING id, first_name, last_name, email_address, password
        "#,
    )
    .bind(first_name)
    .bind(last_name)
    .bind(email_address)
    .bind(password_hash)
    .fetch_one(db)
    .await
}

pub async fn update(
    db: &SqlitePool,
    id: i64,
    changes: UserChanges,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET first_name = COALESCE(?1, first_name),
            last_name = COALESCE(?2, last_name),
            email_address = COALESCE(?3, email_address),
            password = COALESCE(?4, password)
        WHERE id = ?5
        RETURNING id, first_name, last_name, email_address, password
        "#,
    )
    .bind(changes.first_name)
    .bind(changes.last_name)
    .bind(changes.email_address)
    .bind(changes.password)
    .bind(id)
    .fetch_optional(db)
    .await
}

/// Deletes the user row; dependent courses go with it via the FK cascade.
pub async fn delete(db: &SqlitePool, id: i64) -> anyhow::Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        r#"
        DELETE FROM users
        WHERE id = ?1
        RETURNING id, first_name, last_name, email_address, password
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(user)
}
