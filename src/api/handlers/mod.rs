use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AppState;
use crate::models::*;
use crate::nav::NavData;
use crate::quiz::{AnswerTrail, GraphError, QuestionGraph, Walker};

// ============================================================
// Error Handling
// ============================================================

/// Log an internal error and return a sanitized response to the client.
/// The full error is logged server-side for debugging, but clients only
/// see a generic message to avoid leaking internal details.
///
/// Known validation errors (e.g. "Category not found: ...") are safe to
/// expose and come back as BAD_REQUEST.
fn internal_error(e: impl std::fmt::Display) -> (StatusCode, String) {
    let msg = e.to_string();

    if msg.contains("not found") {
        tracing::warn!("Validation error: {}", msg);
        return (StatusCode::BAD_REQUEST, msg);
    }

    tracing::error!("Internal error: {}", msg);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".to_string(),
    )
}

/// A rejected question diagram. The message is descriptive on purpose:
/// the admin editing the diagram needs to know what to fix.
fn malformed_graph(e: GraphError) -> (StatusCode, String) {
    tracing::warn!("Question graph rejected: {}", e);
    (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Navigation
// ============================================================

pub async fn get_nav(Extension(nav): Extension<Arc<NavData>>) -> Json<NavData> {
    Json((*nav).clone())
}

// ============================================================
// Catalog
// ============================================================

pub async fn list_courses(
    State(state): State<AppState>,
) -> Result<Json<Vec<Course>>, (StatusCode, String)> {
    state.db.get_all_courses().map(Json).map_err(internal_error)
}

pub async fn get_course(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Course>, (StatusCode, String)> {
    state
        .db
        .get_course_by_slug(&slug)
        .map_err(internal_error)?
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Course not found".to_string()))
}

pub async fn list_locations(
    State(state): State<AppState>,
) -> Result<Json<Vec<Location>>, (StatusCode, String)> {
    state
        .db
        .get_all_locations()
        .map(Json)
        .map_err(internal_error)
}

pub async fn get_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Page>, (StatusCode, String)> {
    state
        .db
        .get_page_by_slug(&slug)
        .map_err(internal_error)?
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Page not found".to_string()))
}

pub async fn list_jobs(
    State(state): State<AppState>,
) -> Result<Json<Vec<Job>>, (StatusCode, String)> {
    state.db.get_active_jobs().map(Json).map_err(internal_error)
}

// ============================================================
// Intake
// ============================================================

pub async fn create_contact(
    State(state): State<AppState>,
    Json(input): Json<CreateContactInput>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let contact = state.db.create_contact(input).map_err(internal_error)?;
    tracing::info!("New contact lead from {}", contact.email);

    // The ajax form reads response.message from this envelope.
    Ok(Json(serde_json::json!({
        "response": {
            "message": "Thanks for reaching out, we will get back to you shortly."
        }
    })))
}

pub async fn newsletter_signup(
    State(state): State<AppState>,
    Json(input): Json<NewsletterSignupInput>,
) -> Result<Json<NewsletterResponse>, (StatusCode, String)> {
    let added = state
        .db
        .add_subscriber(&input.email)
        .map_err(internal_error)?;

    let response = if added {
        NewsletterResponse {
            code: 200,
            message: "Thank you for subscribing, please check your inbox to confirm.".to_string(),
        }
    } else {
        NewsletterResponse {
            code: 422,
            message: "User already in list".to_string(),
        }
    };

    Ok(Json(response))
}

// ============================================================
// Questionnaire
// ============================================================

/// The stored diagram, verbatim, for clients that walk the graph
/// themselves.
pub async fn fetch_questions(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    state
        .db
        .get_latest_question_diagram()
        .map_err(internal_error)?
        .map(Json)
        .ok_or((
            StatusCode::NOT_FOUND,
            "No question diagram stored".to_string(),
        ))
}

/// HTML fragment for the start question.
pub async fn start_questions(
    State(state): State<AppState>,
) -> Result<Html<String>, (StatusCode, String)> {
    let graph = load_graph(&state)?;
    let walker = Walker::start(&graph);
    Ok(Html(walker.render()))
}

#[derive(Debug, Deserialize)]
pub struct AnswerInput {
    /// Display name of the question being answered.
    pub question: String,
    /// Node id of the chosen answer.
    pub answer: String,
    /// The trail as the client last saw it.
    #[serde(default)]
    pub trail: AnswerTrail,
}

#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    /// Fragment for the next question, or the thanks message.
    pub html: String,
    /// Updated trail for the client to persist.
    pub trail: AnswerTrail,
}

/// Apply one answer selection and return the next fragment plus the
/// updated trail.
pub async fn answer_question(
    State(state): State<AppState>,
    Json(input): Json<AnswerInput>,
) -> Result<Json<AnswerResponse>, (StatusCode, String)> {
    let graph = load_graph(&state)?;
    let mut trail = input.trail;

    let mut walker = Walker::resume(&graph, &input.question).map_err(malformed_graph)?;
    walker
        .select(&input.answer, &mut trail)
        .map_err(malformed_graph)?;

    Ok(Json(AnswerResponse {
        html: walker.render(),
        trail,
    }))
}

fn load_graph(state: &AppState) -> Result<QuestionGraph, (StatusCode, String)> {
    let payload = state
        .db
        .get_latest_question_diagram()
        .map_err(internal_error)?
        .ok_or((
            StatusCode::NOT_FOUND,
            "No question diagram stored".to_string(),
        ))?;

    QuestionGraph::from_value(&payload).map_err(malformed_graph)
}

// ============================================================
// Admin: Courses
// ============================================================

pub async fn admin_list_courses(
    State(state): State<AppState>,
) -> Result<Json<Vec<Course>>, (StatusCode, String)> {
    state.db.get_all_courses().map(Json).map_err(internal_error)
}

pub async fn admin_create_course(
    State(state): State<AppState>,
    Json(input): Json<CreateCourseInput>,
) -> Result<(StatusCode, Json<Course>), (StatusCode, String)> {
    state
        .db
        .create_course(input)
        .map(|c| (StatusCode::CREATED, Json(c)))
        .map_err(internal_error)
}

pub async fn admin_update_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateCourseInput>,
) -> Result<Json<Course>, (StatusCode, String)> {
    state
        .db
        .update_course(id, input)
        .map_err(internal_error)?
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Course not found".to_string()))
}

pub async fn admin_delete_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    if state.db.delete_course(id).map_err(internal_error)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err((StatusCode::NOT_FOUND, "Course not found".to_string()))
    }
}

// ============================================================
// Admin: Locations
// ============================================================

pub async fn admin_list_locations(
    State(state): State<AppState>,
) -> Result<Json<Vec<Location>>, (StatusCode, String)> {
    state
        .db
        .get_all_locations()
        .map(Json)
        .map_err(internal_error)
}

pub async fn admin_create_location(
    State(state): State<AppState>,
    Json(input): Json<CreateLocationInput>,
) -> Result<(StatusCode, Json<Location>), (StatusCode, String)> {
    state
        .db
        .create_location(input)
        .map(|l| (StatusCode::CREATED, Json(l)))
        .map_err(internal_error)
}

pub async fn admin_update_location(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateLocationInput>,
) -> Result<Json<Location>, (StatusCode, String)> {
    state
        .db
        .update_location(id, input)
        .map_err(internal_error)?
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Location not found".to_string()))
}

pub async fn admin_delete_location(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    if state.db.delete_location(id).map_err(internal_error)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err((StatusCode::NOT_FOUND, "Location not found".to_string()))
    }
}

// ============================================================
// Admin: Categories
// ============================================================

pub async fn admin_list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, (StatusCode, String)> {
    state
        .db
        .get_all_categories()
        .map(Json)
        .map_err(internal_error)
}

pub async fn admin_create_category(
    State(state): State<AppState>,
    Json(input): Json<CreateCategoryInput>,
) -> Result<(StatusCode, Json<Category>), (StatusCode, String)> {
    state
        .db
        .create_category(input)
        .map(|c| (StatusCode::CREATED, Json(c)))
        .map_err(internal_error)
}

pub async fn admin_delete_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    if state.db.delete_category(id).map_err(internal_error)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err((StatusCode::NOT_FOUND, "Category not found".to_string()))
    }
}

// ============================================================
// Admin: Pages
// ============================================================

pub async fn admin_list_pages(
    State(state): State<AppState>,
) -> Result<Json<Vec<Page>>, (StatusCode, String)> {
    state.db.get_all_pages().map(Json).map_err(internal_error)
}

pub async fn admin_create_page(
    State(state): State<AppState>,
    Json(input): Json<CreatePageInput>,
) -> Result<(StatusCode, Json<Page>), (StatusCode, String)> {
    state
        .db
        .create_page(input)
        .map(|p| (StatusCode::CREATED, Json(p)))
        .map_err(internal_error)
}

pub async fn admin_update_page(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdatePageInput>,
) -> Result<Json<Page>, (StatusCode, String)> {
    state
        .db
        .update_page(id, input)
        .map_err(internal_error)?
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Page not found".to_string()))
}

pub async fn admin_delete_page(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    if state.db.delete_page(id).map_err(internal_error)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err((StatusCode::NOT_FOUND, "Page not found".to_string()))
    }
}

// ============================================================
// Admin: Jobs
// ============================================================

pub async fn admin_list_jobs(
    State(state): State<AppState>,
) -> Result<Json<Vec<Job>>, (StatusCode, String)> {
    state.db.get_all_jobs().map(Json).map_err(internal_error)
}

pub async fn admin_create_job(
    State(state): State<AppState>,
    Json(input): Json<CreateJobInput>,
) -> Result<(StatusCode, Json<Job>), (StatusCode, String)> {
    state
        .db
        .create_job(input)
        .map(|j| (StatusCode::CREATED, Json(j)))
        .map_err(internal_error)
}

pub async fn admin_update_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateJobInput>,
) -> Result<Json<Job>, (StatusCode, String)> {
    state
        .db
        .update_job(id, input)
        .map_err(internal_error)?
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Job not found".to_string()))
}

pub async fn admin_delete_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    if state.db.delete_job(id).map_err(internal_error)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err((StatusCode::NOT_FOUND, "Job not found".to_string()))
    }
}

// ============================================================
// Admin: Contacts
// ============================================================

pub async fn admin_list_contacts(
    State(state): State<AppState>,
) -> Result<Json<Vec<Contact>>, (StatusCode, String)> {
    state
        .db
        .get_all_contacts()
        .map(Json)
        .map_err(internal_error)
}

// ============================================================
// Admin: Questions
// ============================================================

/// Store a new question diagram. The diagram is validated before it is
/// stored so a broken graph never reaches visitors.
pub async fn admin_save_questions(
    State(state): State<AppState>,
    Json(payload): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<serde_json::Value>), (StatusCode, String)> {
    QuestionGraph::from_value(&payload).map_err(malformed_graph)?;

    let id = state
        .db
        .save_question_diagram(&payload)
        .map_err(internal_error)?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "id": id.to_string() })),
    ))
}
