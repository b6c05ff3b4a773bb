//! Admin dashboard routes.

use axum::{Router, routing::get};
use util::state::AppState;

pub mod get;

use get::get_overview;

/// Builds and returns the `/dashboard` route group.
///
/// Routes:
/// - `GET /dashboard/overview` → Aggregate counts and department breakdown
pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/overview", get(get_overview))
}
