//! Exam routes module.
//!
//! ## Structure
//! - `post.rs` — POST handlers (create exam, upload question paper)
//! - `get.rs` — GET handlers (list exams, exam detail)
//! - `assignments/` — nested teacher-assignment routes
//! - `sheets/` — nested answer-sheet upload/listing routes

use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};
use util::state::AppState;

pub mod assignments;
pub mod get;
pub mod post;
pub mod sheets;

use crate::auth::guards::{allow_admin, allow_teacher};
use assignments::assignment_routes;
use get::{get_exam, get_exams};
use post::{create_exam, upload_question_paper};
use sheets::exam_sheet_routes;

/// Builds and returns the `/exams` route group.
///
/// Routes:
/// - `POST /exams`                         → Create an exam (admin only)
/// - `GET  /exams`                         → List exams (role-filtered)
/// - `GET  /exams/{exam_id}`               → Exam detail
/// - `POST /exams/{exam_id}/question-paper`→ Upload the question paper PDF (admin only)
///
/// Nested routes:
/// - `/exams/{exam_id}/assignments` → teacher-assignment routes
/// - `/exams/{exam_id}/sheets`      → answer-sheet upload/list (teachers)
pub fn exams_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_exam).route_layer(from_fn(allow_admin)))
        .route("/", get(get_exams))
        .route("/{exam_id}", get(get_exam))
        .route(
            "/{exam_id}/question-paper",
            post(upload_question_paper).route_layer(from_fn(allow_admin)),
        )
        .nest("/{exam_id}/assignments", assignment_routes())
        .nest(
            "/{exam_id}/sheets",
            exam_sheet_routes().route_layer(from_fn(allow_teacher)),
        )
}
