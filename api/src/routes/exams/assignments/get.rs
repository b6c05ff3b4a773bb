use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::exam_teacher_assignment::Model as AssignmentModel;
use util::state::AppState;

use crate::response::ApiResponse;
use crate::routes::common::domain_error;
use crate::routes::exams::assignments::post::AssignmentResponse;

/// GET /api/exams/{exam_id}/assignments
///
/// List the teacher assignments for an exam. Teachers and admins.
pub async fn get_assignments(
    State(app_state): State<AppState>,
    Path(exam_id): Path<i64>,
) -> impl IntoResponse {
    let db = app_state.db();

    match AssignmentModel::find_for_exam(db, exam_id).await {
        Ok(assignments) => {
            let assignments: Vec<AssignmentResponse> = assignments
                .into_iter()
                .map(AssignmentResponse::from)
                .collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    assignments,
                    "Assignments retrieved successfully",
                )),
            )
        }
        Err(e) => domain_error(e),
    }
}
