//! Sheet-scoped routes: detail, grading, annotations, grievance submission.
//!
//! ## Structure
//! - `get.rs` — sheet detail with its per-question marks
//! - `put.rs` — the grading operation
//! - `annotations/` — advisory PDF annotations (append + list)
//! - `grievances/` — student grievance submission against one question

use axum::{
    Router,
    middleware::from_fn,
    routing::{get, put},
};
use util::state::AppState;

pub mod annotations;
pub mod get;
pub mod grievances;
pub mod put;

use crate::auth::guards::{allow_student, allow_teacher};
use annotations::annotation_routes;
use get::get_sheet;
use grievances::sheet_grievance_routes;
use put::grade_sheet;

/// Builds and returns the `/sheets` route group.
///
/// Routes:
/// - `GET /sheets/{sheet_id}`        → Sheet detail (owner, teachers, admins)
/// - `PUT /sheets/{sheet_id}/grade`  → Grade the sheet (teachers)
///
/// Nested routes:
/// - `/sheets/{sheet_id}/annotations` → annotation routes
/// - `/sheets/{sheet_id}/grievances`  → grievance submission (students)
pub fn sheets_routes() -> Router<AppState> {
    Router::new()
        .route("/{sheet_id}", get(get_sheet))
        .route(
            "/{sheet_id}/grade",
            put(grade_sheet).route_layer(from_fn(allow_teacher)),
        )
        .nest("/{sheet_id}/annotations", annotation_routes())
        .nest(
            "/{sheet_id}/grievances",
            sheet_grievance_routes().route_layer(from_fn(allow_student)),
        )
}
