use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::subject;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::Deserialize;
use util::state::AppState;

use crate::response::ApiResponse;
use crate::routes::subjects::post::SubjectResponse;

#[derive(Debug, Deserialize)]
pub struct SubjectFilter {
    pub department_id: Option<i64>,
}

/// GET /api/subjects
///
/// List subjects, optionally filtered by department. Admin only.
pub async fn get_subjects(
    State(app_state): State<AppState>,
    Query(filter): Query<SubjectFilter>,
) -> impl IntoResponse {
    let db = app_state.db();

    let mut query = subject::Entity::find().order_by_asc(subject::Column::Code);
    if let Some(department_id) = filter.department_id {
        query = query.filter(subject::Column::DepartmentId.eq(department_id));
    }

    match query.all(db).await {
        Ok(subjects) => {
            let subjects: Vec<SubjectResponse> =
                subjects.into_iter().map(SubjectResponse::from).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    subjects,
                    "Subjects retrieved successfully",
                )),
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to list subjects");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Vec<SubjectResponse>>::error(
                    "Something went wrong, please try again",
                )),
            )
        }
    }
}
