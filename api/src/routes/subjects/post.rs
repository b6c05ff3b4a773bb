use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use common::format_validation_errors;
use db::models::{department, subject::Model as SubjectModel};
use sea_orm::EntityTrait;
use serde::{Deserialize, Serialize};
use util::state::AppState;
use validator::Validate;

use crate::response::ApiResponse;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateSubjectRequest {
    pub department_id: i64,

    #[validate(length(min = 2, message = "Subject name must be at least 2 characters"))]
    pub name: String,

    #[validate(length(min = 2, max = 12, message = "Subject code must be 2-12 characters"))]
    pub code: String,

    #[validate(length(min = 1, message = "Semester is required"))]
    pub semester: String,
}

#[derive(Debug, Serialize, Default)]
pub struct SubjectResponse {
    pub id: i64,
    pub department_id: i64,
    pub name: String,
    pub code: String,
    pub semester: String,
}

impl From<SubjectModel> for SubjectResponse {
    fn from(s: SubjectModel) -> Self {
        Self {
            id: s.id,
            department_id: s.department_id,
            name: s.name,
            code: s.code,
            semester: s.semester,
        }
    }
}

/// POST /api/subjects
///
/// Create a subject under an existing department. Admin only.
///
/// ### Responses
/// - `201 Created` with the created subject
/// - `400 Bad Request` (validation failure)
/// - `404 Not Found` (unknown department)
pub async fn create_subject(
    State(app_state): State<AppState>,
    Json(req): Json<CreateSubjectRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        let error_message = format_validation_errors(&validation_errors);
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<SubjectResponse>::error(error_message)),
        );
    }

    let db = app_state.db();

    match department::Entity::find_by_id(req.department_id).one(db).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<SubjectResponse>::error("Department not found")),
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to look up department");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<SubjectResponse>::error(
                    "Something went wrong, please try again",
                )),
            );
        }
    }

    match SubjectModel::create(db, req.department_id, &req.name, &req.code, &req.semester).await {
        Ok(subject) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                SubjectResponse::from(subject),
                "Subject created successfully",
            )),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to create subject");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<SubjectResponse>::error(
                    "Something went wrong, please try again",
                )),
            )
        }
    }
}
