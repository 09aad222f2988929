use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A lead submitted through the contact form.
///
/// Besides the visitor's message, the form ships tracking metadata: the URL
/// the modal was opened from (`track`), UTM parameters collected on the
/// landing page, the course the visitor asked about, and whether they come
/// through a job center.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub message: Option<String>,
    pub course: Option<String>,
    pub jobcenter: bool,
    pub track: Option<String>,
    pub utm_params: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a contact lead (the contact form POST body).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateContactInput {
    pub name: String,
    pub email: String,
    pub message: Option<String>,
    pub course: Option<String>,
    #[serde(default)]
    pub jobcenter: bool,
    pub track: Option<String>,
    pub utm_params: Option<serde_json::Value>,
}

/// Newsletter signup POST body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsletterSignupInput {
    pub email: String,
}

/// Newsletter signup result, in the `{code, message}` shape the frontend
/// script switches on (200 for new subscribers, 422 for duplicates).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsletterResponse {
    pub code: u16,
    pub message: String,
}
