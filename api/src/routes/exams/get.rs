use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::user::Role;
use db::models::{exam, subject, user};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::exams::post::ExamResponse;

/// GET /api/exams
///
/// List exams. Admins and teachers see every exam; students see only exams
/// whose subject belongs to their own department.
pub async fn get_exams(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> impl IntoResponse {
    let db = app_state.db();

    let query = exam::Entity::find().order_by_desc(exam::Column::ExamDate);

    let result = match claims.role {
        Role::Admin | Role::Teacher => query.all(db).await,
        Role::Student => {
            let department_id = match user::Entity::find_by_id(claims.sub).one(db).await {
                Ok(Some(u)) => u.department_id,
                Ok(None) => None,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to look up user");
                    return (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(ApiResponse::<Vec<ExamResponse>>::error(
                            "Something went wrong, please try again",
                        )),
                    );
                }
            };

            match department_id {
                Some(dept) => {
                    let subject_ids: Vec<i64> = match subject::Entity::find()
                        .filter(subject::Column::DepartmentId.eq(dept))
                        .all(db)
                        .await
                    {
                        Ok(subjects) => subjects.iter().map(|s| s.id).collect(),
                        Err(e) => {
                            tracing::error!(error = %e, "Failed to list subjects");
                            return (
                                StatusCode::INTERNAL_SERVER_ERROR,
                                Json(ApiResponse::<Vec<ExamResponse>>::error(
                                    "Something went wrong, please try again",
                                )),
                            );
                        }
                    };
                    query
                        .filter(exam::Column::SubjectId.is_in(subject_ids))
                        .all(db)
                        .await
                }
                None => Ok(vec![]),
            }
        }
    };

    match result {
        Ok(exams) => {
            let exams: Vec<ExamResponse> = exams.into_iter().map(ExamResponse::from).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(exams, "Exams retrieved successfully")),
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to list exams");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Vec<ExamResponse>>::error(
                    "Something went wrong, please try again",
                )),
            )
        }
    }
}

/// GET /api/exams/{exam_id}
///
/// Fetch a single exam by id.
pub async fn get_exam(
    State(app_state): State<AppState>,
    Path(exam_id): Path<i64>,
) -> impl IntoResponse {
    let db = app_state.db();

    match exam::Entity::find_by_id(exam_id).one(db).await {
        Ok(Some(exam)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                ExamResponse::from(exam),
                "Exam retrieved successfully",
            )),
        ),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<ExamResponse>::error("Exam not found")),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch exam");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<ExamResponse>::error(
                    "Something went wrong, please try again",
                )),
            )
        }
    }
}
