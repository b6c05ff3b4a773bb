//! Grievance submission nested under `/sheets/{sheet_id}/grievances`
//! (students only; review transitions live under `/grievances`).

use axum::{Router, routing::post};
use util::state::AppState;

pub mod post;

use post::submit_grievance;

/// Builds and returns the `/grievances` route group for one sheet.
///
/// Routes:
/// - `POST /` → File a grievance against one question of the sheet
pub fn sheet_grievance_routes() -> Router<AppState> {
    Router::new().route("/", post(submit_grievance))
}
