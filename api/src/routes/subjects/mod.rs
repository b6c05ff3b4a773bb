//! Subject reference-data routes (admin only).

use axum::{
    Router,
    routing::{get, post},
};
use util::state::AppState;

pub mod get;
pub mod post;

use get::get_subjects;
use post::create_subject;

/// Builds and returns the `/subjects` route group.
///
/// Routes:
/// - `POST /subjects` → Create a subject under a department
/// - `GET  /subjects` → List subjects, optionally by department
pub fn subjects_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_subject))
        .route("/", get(get_subjects))
}
