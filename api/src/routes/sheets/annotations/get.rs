use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::annotation::Model as AnnotationModel;
use util::state::AppState;

use crate::response::ApiResponse;
use crate::routes::sheets::annotations::post::AnnotationResponse;

/// GET /api/sheets/{sheet_id}/annotations
///
/// List the sheet's annotations in page order.
pub async fn get_annotations(
    State(app_state): State<AppState>,
    Path(sheet_id): Path<i64>,
) -> impl IntoResponse {
    let db = app_state.db();

    match AnnotationModel::find_for_sheet(db, sheet_id).await {
        Ok(annotations) => {
            let annotations: Vec<AnnotationResponse> = annotations
                .into_iter()
                .map(AnnotationResponse::from)
                .collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    annotations,
                    "Annotations retrieved successfully",
                )),
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to list annotations");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Vec<AnnotationResponse>>::error(
                    "Something went wrong, please try again",
                )),
            )
        }
    }
}
