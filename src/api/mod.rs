mod handlers;
mod middleware;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::cache::NavCache;
use crate::db::Database;

/// Shared application state: the database handle and the navigation cache.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub cache: NavCache,
}

pub fn create_router(db: Database, cache: NavCache) -> Router {
    let state = AppState { db, cache };

    let api = Router::new()
        // Navigation
        .route("/nav", get(handlers::get_nav))
        // Catalog
        .route("/courses", get(handlers::list_courses))
        .route("/courses/{slug}", get(handlers::get_course))
        .route("/locations", get(handlers::list_locations))
        .route("/pages/{slug}", get(handlers::get_page))
        .route("/jobs", get(handlers::list_jobs))
        // Intake
        .route("/contact", post(handlers::create_contact))
        .route("/newsletter-signup", post(handlers::newsletter_signup))
        // Questionnaire
        .route("/questions/fetch", get(handlers::fetch_questions))
        .route("/questions/start", get(handlers::start_questions))
        .route("/questions/answer", post(handlers::answer_question))
        // Admin back-office
        .route("/admin/courses", get(handlers::admin_list_courses))
        .route("/admin/courses", post(handlers::admin_create_course))
        .route("/admin/courses/{id}", put(handlers::admin_update_course))
        .route("/admin/courses/{id}", delete(handlers::admin_delete_course))
        .route("/admin/locations", get(handlers::admin_list_locations))
        .route("/admin/locations", post(handlers::admin_create_location))
        .route("/admin/locations/{id}", put(handlers::admin_update_location))
        .route(
            "/admin/locations/{id}",
            delete(handlers::admin_delete_location),
        )
        .route("/admin/categories", get(handlers::admin_list_categories))
        .route("/admin/categories", post(handlers::admin_create_category))
        .route(
            "/admin/categories/{id}",
            delete(handlers::admin_delete_category),
        )
        .route("/admin/pages", get(handlers::admin_list_pages))
        .route("/admin/pages", post(handlers::admin_create_page))
        .route("/admin/pages/{id}", put(handlers::admin_update_page))
        .route("/admin/pages/{id}", delete(handlers::admin_delete_page))
        .route("/admin/jobs", get(handlers::admin_list_jobs))
        .route("/admin/jobs", post(handlers::admin_create_job))
        .route("/admin/jobs/{id}", put(handlers::admin_update_job))
        .route("/admin/jobs/{id}", delete(handlers::admin_delete_job))
        .route("/admin/contacts", get(handlers::admin_list_contacts))
        .route("/admin/questions", post(handlers::admin_save_questions))
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api/v1", api)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::load_navigation,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
