//! Annotation routes nested under `/sheets/{sheet_id}/annotations`.
//!
//! Annotations are advisory page notes; they never affect marks and never
//! gate a grading or grievance transition.

use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};
use util::state::AppState;

pub mod get;
pub mod post;

use crate::auth::guards::allow_teacher;
use get::get_annotations;
use post::create_annotation;

/// Builds and returns the `/annotations` route group for one sheet.
///
/// Routes:
/// - `POST /` → Append an annotation (teachers)
/// - `GET  /` → List the sheet's annotations (any authenticated user)
pub fn annotation_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(create_annotation).route_layer(from_fn(allow_teacher)),
        )
        .route("/", get(get_annotations))
}
