//! Department reference-data routes (admin only).

use axum::{
    Router,
    routing::{get, post},
};
use util::state::AppState;

pub mod get;
pub mod post;

use get::get_departments;
use post::create_department;

/// Builds and returns the `/departments` route group.
///
/// Routes:
/// - `POST /departments` → Create a department
/// - `GET  /departments` → List departments
pub fn departments_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_department))
        .route("/", get(get_departments))
}
