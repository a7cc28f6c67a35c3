use sqlx::{FromRow, SqlitePool};

#[derive(Debug, Clone, FromRow)]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
    pub user_id: i64,
}

/// Flat row for the course-with-owner join; the DTO layer folds the owner
/// columns into a nested object.
#[derive(Debug, Clone, FromRow)]
pub struct CourseWithOwnerRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
    pub user_id: i64,
    pub owner_first_name: String,
    pub owner_last_name: String,
    pub owner_email_address: String,
}

/// Validated insert payload; the owner id travels separately since it comes
/// from the authenticated context, never the body.
#[derive(Debug)]
pub struct NewCourse {
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
}

/// Columns touched by a partial update; `None` leaves the column unchanged.
/// The owner column is absent on purpose: it is set once at creation.
#[derive(Debug, Default)]
pub struct CourseChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
}

pub async fn insert(db: &SqlitePool, owner_id: i64, course: NewCourse) -> anyhow::Result<Course> {
    let row = sqlx::query_as::<_, Course>(
        r#"
        INSERT INTO courses (title, description, estimated_time, materials_needed, user_id)
        VALUES (?1, ?2, ?3, ?4, ?5)
        RETURNING id, title, description, estimated_time, materials_needed, user_id
        "#,
    )
    .bind(course.title)
    .bind(course.description)
    .bind(course.estimated_time)
    .bind(course.materials_needed)
    .bind(owner_id)
    .fetch_one(db)
    .await?;
    Ok(row)
}

pub async fn all(db: &SqlitePool) -> anyhow::Result<Vec<Course>> {
    let rows = sqlx::query_as::<_, Course>(
        r#"
        SELECT id, title, description, estimated_time, materials_needed, user_id
        FROM courses
        "#,
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn find_with_owner(
    db: &SqlitePool,
    id: i64,
) -> anyhow::Result<Option<CourseWithOwnerRow>> {
    let row = sqlx::query_as::<_, CourseWithOwnerRow>(
        r#"
        SELECT c.id, c.title, c.description, c.estimated_time, c.materials_needed, c.user_id,
               u.first_name AS owner_first_name,
               u.last_name AS owner_last_name,
               u.email_address AS owner_email_address
        FROM courses c
        JOIN users u ON u.id = c.user_id
        WHERE c.id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn list_by_owner(db: &SqlitePool, user_id: i64) -> anyhow::Result<Vec<Course>> {
    let rows = sqlx::query_as::<_, Course>(
        r#"
        SELECT id, title, description, estimated_time, materials_needed, user_id
        FROM courses
        WHERE user_id = ?1
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn update(
    db: &SqlitePool,
    id: i64,
    changes: CourseChanges,
) -> anyhow::Result<Option<Course>> {
    let row = sqlx::query_as::<_, Course>(
        r#"
        UPDATE courses
        SET title = COALESCE(?1, title),
            description = COALESCE(?2, description),
            estimated_time = COALESCE(?3, estimated_time),
            materials_needed = COALESCE(?4, materials_needed)
        WHERE id = ?5
        RETURNING id, title, description, estimated_time, materials_needed, user_id
        "#,
    )
    .bind(changes.title)
    .bind(changes.description)
    .bind(changes.estimated_time)
    .bind(changes.materials_needed)
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn delete(db: &SqlitePool, id: i64) -> anyhow::Result<Option<Course>> {
    let row = sqlx::query_as::<_, Course>(
        r#"
        DELETE FROM courses
        WHERE id = ?1
        RETURNING id, title, description, estimated_time, materials_needed, user_id
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}
