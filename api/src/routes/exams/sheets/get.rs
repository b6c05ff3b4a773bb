use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::answer_sheet::Model as SheetModel;
use util::state::AppState;

use crate::response::ApiResponse;
use crate::routes::exams::sheets::post::SheetResponse;

/// GET /api/exams/{exam_id}/sheets
///
/// List every answer sheet uploaded for the exam. Teachers and admins.
pub async fn get_exam_sheets(
    State(app_state): State<AppState>,
    Path(exam_id): Path<i64>,
) -> impl IntoResponse {
    let db = app_state.db();

    match SheetModel::find_for_exam(db, exam_id).await {
        Ok(sheets) => {
            let sheets: Vec<SheetResponse> = sheets.into_iter().map(SheetResponse::from).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    sheets,
                    "Answer sheets retrieved successfully",
                )),
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to list answer sheets");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Vec<SheetResponse>>::error(
                    "Something went wrong, please try again",
                )),
            )
        }
    }
}
