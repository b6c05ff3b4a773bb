//! `/me` routes: role-filtered views for the calling user.

use axum::{Router, middleware::from_fn, routing::get};
use util::state::AppState;

pub mod grievances;
pub mod pending_papers;
pub mod sheets;

use crate::auth::guards::allow_teacher;
use grievances::get_my_grievances;
use pending_papers::get_my_pending_papers;
use sheets::get_my_sheets;

/// Builds and returns the `/me` route group.
///
/// Routes:
/// - `GET /me/sheets`         → The caller's answer sheets (students)
/// - `GET /me/grievances`     → Grievances visible to the caller's role
/// - `GET /me/pending-papers` → The caller's ungraded-paper queue (teachers)
pub fn me_routes() -> Router<AppState> {
    Router::new()
        .route("/sheets", get(get_my_sheets))
        .route("/grievances", get(get_my_grievances))
        .route(
            "/pending-papers",
            get(get_my_pending_papers).route_layer(from_fn(allow_teacher)),
        )
}
