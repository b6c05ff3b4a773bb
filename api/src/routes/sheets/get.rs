use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::answer_sheet;
use db::models::question_mark::Model as QuestionMarkModel;
use db::models::user::Role;
use sea_orm::EntityTrait;
use serde::Serialize;
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::exams::sheets::post::SheetResponse;

#[derive(Debug, Serialize, Default)]
pub struct QuestionMarkResponse {
    pub question_number: i64,
    pub max_marks: i64,
    pub obtained_marks: i64,
    pub comments: Option<String>,
    pub graded_by: i64,
    pub graded_at: String,
}

#[derive(Debug, Serialize, Default)]
pub struct SheetDetailResponse {
    #[serde(flatten)]
    pub sheet: SheetResponse,
    pub question_marks: Vec<QuestionMarkResponse>,
}

/// GET /api/sheets/{sheet_id}
///
/// Fetch one answer sheet together with its per-question marks. Students may
/// only fetch their own sheets; teachers and admins may fetch any.
///
/// ### Responses
/// - `200 OK` with the sheet and its ledger entries
/// - `403 Forbidden` (student requesting someone else's sheet)
/// - `404 Not Found`
pub async fn get_sheet(
    State(app_state): State<AppState>,
    Path(sheet_id): Path<i64>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> impl IntoResponse {
    let db = app_state.db();

    let sheet = match answer_sheet::Entity::find_by_id(sheet_id).one(db).await {
        Ok(Some(sheet)) => sheet,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<SheetDetailResponse>::error(
                    "Answer sheet not found",
                )),
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch answer sheet");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<SheetDetailResponse>::error(
                    "Something went wrong, please try again",
                )),
            );
        }
    };

    if claims.role == Role::Student && sheet.student_id != claims.sub {
        return (
            StatusCode::FORBIDDEN,
            Json(ApiResponse::<SheetDetailResponse>::error(
                "You may only view your own answer sheets",
            )),
        );
    }

    let marks = match QuestionMarkModel::find_for_sheet(db, sheet_id).await {
        Ok(marks) => marks,
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch question marks");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<SheetDetailResponse>::error(
                    "Something went wrong, please try again",
                )),
            );
        }
    };

    let response = SheetDetailResponse {
        sheet: SheetResponse::from(sheet),
        question_marks: marks
            .into_iter()
            .map(|m| QuestionMarkResponse {
                question_number: m.question_number,
                max_marks: m.max_marks,
                obtained_marks: m.obtained_marks,
                comments: m.comments,
                graded_by: m.graded_by,
                graded_at: m.graded_at.to_rfc3339(),
            })
            .collect(),
    };

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            response,
            "Answer sheet retrieved successfully",
        )),
    )
}
