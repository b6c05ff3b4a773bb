//! Grievance review routes.
//!
//! Submission lives under `/sheets/{sheet_id}/grievances`; this group holds
//! the reviewer-side transitions. Each transition re-checks the reviewer's
//! question assignment and the grievance's current status inside a
//! transaction, so terminal grievances can never move again.

use axum::{Router, routing::put};
use util::state::AppState;

pub mod put;

use put::{begin_review, reject_grievance, resolve_grievance};

/// Builds and returns the `/grievances` route group.
///
/// Routes:
/// - `PUT /grievances/{grievance_id}/review`  → pending → under_review
/// - `PUT /grievances/{grievance_id}/resolve` → close with a mark correction
/// - `PUT /grievances/{grievance_id}/reject`  → close, marks untouched
pub fn grievances_routes() -> Router<AppState> {
    Router::new()
        .route("/{grievance_id}/review", put(begin_review))
        .route("/{grievance_id}/resolve", put(resolve_grievance))
        .route("/{grievance_id}/reject", put(reject_grievance))
}
