//! Request middleware.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};

use super::AppState;
use crate::nav;

/// Resolve the navigation payload for this request (cache-aside) and stash
/// it in request extensions for handlers to pick up.
///
/// A cache problem is not fatal: the loader falls back to the database. A
/// database failure is, and fails the request.
pub async fn load_navigation(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let nav = nav::load_nav_data(&state.db, &state.cache)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load navigation data: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    request.extensions_mut().insert(Arc::new(nav));
    Ok(next.run(request).await)
}
