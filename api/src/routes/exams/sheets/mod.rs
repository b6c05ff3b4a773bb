//! Answer-sheet routes nested under `/exams/{exam_id}/sheets` (teachers).

use axum::{
    Router,
    routing::{get, post},
};
use util::state::AppState;

pub mod get;
pub mod post;

use get::get_exam_sheets;
use post::upload_sheet;

/// Builds and returns the `/sheets` route group for one exam.
///
/// Routes:
/// - `POST /` → Upload a student's answer sheet PDF (multipart)
/// - `GET  /` → List the exam's sheets
pub fn exam_sheet_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(upload_sheet))
        .route("/", get(get_exam_sheets))
}
