//! Teacher-assignment routes nested under `/exams/{exam_id}/assignments`.

use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};
use util::state::AppState;

pub mod get;
pub mod post;

use crate::auth::guards::{allow_admin, allow_teacher};
use get::get_assignments;
use post::create_assignment;

/// Builds and returns the `/assignments` route group for one exam.
///
/// Routes:
/// - `POST /` → Assign a teacher to a question range (admin only)
/// - `GET  /` → List assignments for the exam (teachers and admins)
pub fn assignment_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_assignment).route_layer(from_fn(allow_admin)))
        .route("/", get(get_assignments).route_layer(from_fn(allow_teacher)))
}
