use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A course offered by the institute.
///
/// Courses appear in the public catalog and in the site navigation, sorted
/// by the explicit `order` field (lower comes first). The slug is derived
/// from the title on creation and used in public URLs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub teaser: Option<String>,
    pub description: Option<String>,
    pub order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCourseInput {
    pub title: String,
    pub teaser: Option<String>,
    pub description: Option<String>,
    /// Sort position in listings. Defaults to 99 (end of the list).
    pub order: Option<i64>,
}

/// Input for updating an existing course. All fields are optional for
/// partial updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCourseInput {
    pub title: Option<String>,
    pub teaser: Option<String>,
    pub description: Option<String>,
    pub order: Option<i64>,
}
