use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A CMS page.
///
/// Pages carry freeform content and belong to zero or more categories.
/// The categories named "header" and "footer" decide which pages show up
/// in the site navigation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A named page grouping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
}

/// Input for creating a new page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePageInput {
    pub title: String,
    pub content: Option<String>,
    /// Categories the page belongs to. Unknown ids are rejected.
    #[serde(default)]
    pub category_ids: Vec<Uuid>,
}

/// Input for updating an existing page. `category_ids`, when present,
/// replaces the page's memberships wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePageInput {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category_ids: Option<Vec<Uuid>>,
}

/// Input for creating a new category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCategoryInput {
    pub name: String,
}
