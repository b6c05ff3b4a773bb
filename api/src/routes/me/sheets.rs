use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use db::models::answer_sheet::Model as SheetModel;
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::exams::sheets::post::SheetResponse;

/// GET /api/me/sheets
///
/// List the caller's own answer sheets across every exam.
pub async fn get_my_sheets(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> impl IntoResponse {
    let db = app_state.db();

    match SheetModel::find_for_student(db, claims.sub).await {
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
            tracing::error!(error = %e, "Failed to list own sheets");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Vec<SheetResponse>>::error(
                    "Something went wrong, please try again",
                )),
            )
        }
    }
}
