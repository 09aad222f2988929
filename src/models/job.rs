use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A job posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new job posting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateJobInput {
    pub title: String,
    pub description: Option<String>,
    /// Defaults to active.
    pub active: Option<bool>,
}

/// Input for updating an existing job posting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateJobInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub active: Option<bool>,
}
