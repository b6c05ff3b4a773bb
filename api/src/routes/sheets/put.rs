use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::answer_sheet::{MarkEntry, Model as SheetModel};
use serde::Deserialize;
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::domain_error;
use crate::routes::exams::sheets::post::SheetResponse;

#[derive(Debug, Deserialize)]
pub struct GradeSheetRequest {
    pub marks: Vec<MarkEntry>,
}

/// PUT /api/sheets/{sheet_id}/grade
///
/// Record per-question marks for the sheet and mark grading completed.
/// The caller must hold the exam's teacher assignment for every question in
/// the payload; a completed sheet may only be re-graded by its original
/// grader. Teachers (and admins holding an assignment).
///
/// ### Request Body
/// ```json
/// {
///   "marks": [
///     { "question_number": 1, "max_marks": 10, "obtained_marks": 6, "comments": "partial" },
///     { "question_number": 2, "max_marks": 10, "obtained_marks": 7 }
///   ]
/// }
/// ```
///
/// ### Responses
/// - `200 OK` with the updated sheet (obtained marks = ledger total)
/// - `400 Bad Request` (marks out of range)
/// - `403 Forbidden` (question outside the caller's assignment)
/// - `404 Not Found` (unknown sheet)
/// - `409 Conflict` (sheet already graded by someone else)
pub async fn grade_sheet(
    State(app_state): State<AppState>,
    Path(sheet_id): Path<i64>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<GradeSheetRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    match SheetModel::grade(db, sheet_id, claims.sub, &req.marks).await {
        Ok(sheet) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                SheetResponse::from(sheet),
                "Answer sheet graded successfully",
            )),
        ),
        Err(e) => domain_error(e),
    }
}
