use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use common::format_validation_errors;
use db::models::grievance::Model as GrievanceModel;
use serde::Deserialize;
use util::state::AppState;
use validator::Validate;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::domain_error;
use crate::routes::sheets::grievances::post::GrievanceResponse;

#[derive(Debug, Deserialize, Validate)]
pub struct ResolveGrievanceRequest {
    #[validate(length(min = 1, message = "A response to the student is required"))]
    pub response: String,

    pub updated_marks: i64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RejectGrievanceRequest {
    #[validate(length(min = 1, message = "A response to the student is required"))]
    pub response: String,
}

/// PUT /api/grievances/{grievance_id}/review
///
/// Take a pending grievance under review. The caller must hold the exam's
/// teacher assignment for the disputed question.
///
/// ### Responses
/// - `200 OK` with the grievance in `under_review`
/// - `403 Forbidden` (question outside the caller's assignment)
/// - `404 Not Found` (unknown grievance)
/// - `409 Conflict` (not currently `pending`)
pub async fn begin_review(
    State(app_state): State<AppState>,
    Path(grievance_id): Path<i64>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> impl IntoResponse {
    let db = app_state.db();

    match GrievanceModel::begin_review(db, grievance_id, claims.sub).await {
        Ok(grievance) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                GrievanceResponse::from(grievance),
                "Grievance taken under review",
            )),
        ),
        Err(e) => domain_error(e),
    }
}

/// PUT /api/grievances/{grievance_id}/resolve
///
/// Resolve the grievance in the student's favor: overwrite the question's
/// marks with `updated_marks`, recompute the sheet total, and close the
/// grievance — atomically. If the mark correction fails, the grievance
/// stays open.
///
/// ### Request Body
/// ```json
/// {
///   "response": "Agreed, the back page was missed",
///   "updated_marks": 9
/// }
/// ```
///
/// ### Responses
/// - `200 OK` with the resolved grievance (`updated_marks` set)
/// - `400 Bad Request` (marks outside `[0, max]` for the question)
/// - `403 Forbidden` (question outside the caller's assignment)
/// - `404 Not Found` (unknown grievance, or the question's ledger entry is
///   missing)
/// - `409 Conflict` (grievance already resolved or rejected)
pub async fn resolve_grievance(
    State(app_state): State<AppState>,
    Path(grievance_id): Path<i64>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<ResolveGrievanceRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        let error_message = format_validation_errors(&validation_errors);
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<GrievanceResponse>::error(error_message)),
        );
    }

    let db = app_state.db();

    match GrievanceModel::resolve(db, grievance_id, claims.sub, &req.response, req.updated_marks)
        .await
    {
        Ok(grievance) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                GrievanceResponse::from(grievance),
                "Grievance resolved successfully",
            )),
        ),
        Err(e) => domain_error(e),
    }
}

/// PUT /api/grievances/{grievance_id}/reject
///
/// Reject the grievance with a response to the student. Marks are untouched.
///
/// ### Responses
/// - `200 OK` with the rejected grievance
/// - `403 Forbidden` (question outside the caller's assignment)
/// - `404 Not Found` (unknown grievance)
/// - `409 Conflict` (grievance already resolved or rejected)
pub async fn reject_grievance(
    State(app_state): State<AppState>,
    Path(grievance_id): Path<i64>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<RejectGrievanceRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        let error_message = format_validation_errors(&validation_errors);
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<GrievanceResponse>::error(error_message)),
        );
    }

    let db = app_state.db();

    match GrievanceModel::reject(db, grievance_id, claims.sub, &req.response).await {
        Ok(grievance) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                GrievanceResponse::from(grievance),
                "Grievance rejected",
            )),
        ),
        Err(e) => domain_error(e),
    }
}
