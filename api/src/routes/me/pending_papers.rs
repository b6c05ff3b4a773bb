use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use db::dashboard;
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::domain_error;
use crate::routes::exams::sheets::post::SheetResponse;

/// GET /api/me/pending-papers
///
/// The caller's grading queue: pending sheets on exams the caller is
/// assigned to, oldest upload first. Teachers.
pub async fn get_my_pending_papers(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> impl IntoResponse {
    let db = app_state.db();

    match dashboard::pending_papers_for(db, claims.sub).await {
        Ok(sheets) => {
            let sheets: Vec<SheetResponse> = sheets.into_iter().map(SheetResponse::from).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    sheets,
                    "Pending papers retrieved successfully",
                )),
            )
        }
        Err(e) => domain_error(e),
    }
}
