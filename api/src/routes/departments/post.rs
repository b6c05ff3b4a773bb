use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use common::format_validation_errors;
use db::models::department::Model as DepartmentModel;
use serde::{Deserialize, Serialize};
use util::state::AppState;
use validator::Validate;

use crate::response::ApiResponse;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateDepartmentRequest {
    #[validate(length(min = 2, message = "Department name must be at least 2 characters"))]
    pub name: String,

    #[validate(length(min = 2, max = 8, message = "Department code must be 2-8 characters"))]
    pub code: String,
}

#[derive(Debug, Serialize, Default)]
pub struct DepartmentResponse {
    pub id: i64,
    pub name: String,
    pub code: String,
}

impl From<DepartmentModel> for DepartmentResponse {
    fn from(d: DepartmentModel) -> Self {
        Self {
            id: d.id,
            name: d.name,
            code: d.code,
        }
    }
}

/// POST /api/departments
///
/// Create a department. Admin only.
///
/// ### Responses
/// - `201 Created` with the created department
/// - `400 Bad Request` (validation failure)
/// - `409 Conflict` (duplicate code)
pub async fn create_department(
    State(app_state): State<AppState>,
    Json(req): Json<CreateDepartmentRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        let error_message = format_validation_errors(&validation_errors);
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<DepartmentResponse>::error(error_message)),
        );
    }

    let db = app_state.db();

    match DepartmentModel::create(db, &req.name, &req.code).await {
        Ok(department) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                DepartmentResponse::from(department),
                "Department created successfully",
            )),
        ),
        Err(e) if e.to_string().contains("UNIQUE") => (
            StatusCode::CONFLICT,
            Json(ApiResponse::<DepartmentResponse>::error(
                "A department with this code already exists",
            )),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to create department");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<DepartmentResponse>::error(
                    "Something went wrong, please try again",
                )),
            )
        }
    }
}
