use sqlx::SqlitePool;
use tracing::info;

use crate::courses::repo::{self, Course, CourseChanges, CourseWithOwnerRow, NewCourse};

/// Create a course owned by `owner_id` (the authenticated caller; client
/// input never reaches this value).
pub async fn create_course(
    db: &SqlitePool,
    owner_id: i64,
    input: NewCourse,
) -> anyhow::Result<Course> {
    let course = repo::insert(db, owner_id, input).await?;
    info!(course_id = course.id, owner_id, "course created");
    Ok(course)
}

/// Every course row, unfiltered and unpaginated.
pub async fn get_all_courses(db: &SqlitePool) -> anyhow::Result<Vec<Course>> {
    repo::all(db).await
}

/// A course joined with its owner's public fields. Absence is a normal
/// `None`, not an error.
pub async fn get_course_by_id(
    db: &SqlitePool,
    id: i64,
) -> anyhow::Result<Option<CourseWithOwnerRow>> {
    repo::find_with_owner(db, id).await
}

pub async fn get_courses_by_user(db: &SqlitePool, user_id: i64) -> anyhow::Result<Vec<Course>> {
    repo::list_by_owner(db, user_id).await
}

/// Unconditional mutation. Ownership has already been verified by the
/// routing layer; a `None` here means the row vanished in the race window.
pub async fn update_course(
    db: &SqlitePool,
    id: i64,
    changes: CourseChanges,
) -> anyhow::Result<Option<Course>> {
    let updated = repo::update(db, id, changes).await?;
    if let Some(course) = &updated {
        info!(course_id = course.id, "course updated");
    }
    Ok(updated)
}

/// Unconditional delete, same contract as [`update_course`].
pub async fn delete_course(db: &SqlitePool, id: i64) -> anyhow::Result<Option<Course>> {
    let deleted = repo::delete(db, id).await?;
    if let Some(course) = &deleted {
        info!(course_id = course.id, "course deleted");
    }
    Ok(deleted)
}
