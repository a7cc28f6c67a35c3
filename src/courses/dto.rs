use serde::{Deserialize, Serialize};

use crate::courses::repo::{Course, CourseChanges, CourseWithOwnerRow, NewCourse};
use crate::error::{ApiError, FieldErrors};

fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string())
}

/// Creation body. Any `userId` in the body is ignored; the owner comes from
/// the authenticated context.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateCourseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
}

impl CreateCourseRequest {
    pub fn from_value(value: serde_json::Value) -> Result<Self, ApiError> {
        serde_json::from_value(value)
            .map_err(|_| ApiError::BadRequest("Invalid request body".into()))
    }

    pub fn validate(self) -> Result<NewCourse, ApiError> {
        let mut errors = FieldErrors::new();

        let title = trimmed(self.title).filter(|v| !v.is_empty());
        if title.is_none() {
            errors.insert("title", vec!["Please enter a course title".into()]);
        }

        let description = trimmed(self.description).filter(|v| !v.is_empty());
        if description.is_none() {
            errors.insert("description", vec!["A course description is required".into()]);
        }

        match (title, description) {
            (Some(title), Some(description)) if errors.is_empty() => Ok(NewCourse {
                title,
                description,
                estimated_time: trimmed(self.estimated_time),
                materials_needed: trimmed(self.materials_needed),
            }),
            _ => Err(ApiError::Validation(errors)),
        }
    }
}

/// Partial update; absent fields stay untouched. No owner field exists here,
/// so ownership can never change through this path.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateCourseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
}

impl UpdateCourseRequest {
    pub fn from_value(value: serde_json::Value) -> Result<Self, ApiError> {
        serde_json::from_value(value)
            .map_err(|_| ApiError::BadRequest("Invalid request body".into()))
    }

    pub fn validate(self) -> Result<CourseChanges, ApiError> {
        let mut errors = FieldErrors::new();

        let title = trimmed(self.title);
        if matches!(&title, Some(v) if v.is_empty()) {
            errors.insert("title", vec!["Please enter a course title".into()]);
        }

        let description = trimmed(self.description);
        if matches!(&description, Some(v) if v.is_empty()) {
            errors.insert("description", vec!["A course description is required".into()]);
        }

        if !errors.is_empty() {
            return Err(ApiError::Validation(errors));
        }

        Ok(CourseChanges {
            title,
            description,
            estimated_time: trimmed(self.estimated_time),
            materials_needed: trimmed(self.materials_needed),
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
    pub user_id: i64,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self {
            id: course.id,
            title: course.title,
            description: course.description,
            estimated_time: course.estimated_time,
            materials_needed: course.materials_needed,
            user_id: course.user_id,
        }
    }
}

/// Owner fields nested under a course detail; the password column never
/// reaches this type.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseOwner {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetails {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
    pub user_id: i64,
    pub user: CourseOwner,
}

impl From<CourseWithOwnerRow> for CourseDetails {
    fn from(row: CourseWithOwnerRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            estimated_time: row.estimated_time,
            materials_needed: row.materials_needed,
            user_id: row.user_id,
            user: CourseOwner {
                id: row.user_id,
                first_name: row.owner_first_name,
                last_name: row.owner_last_name,
                email_address: row.owner_email_address,
            },
        }
    }
}
