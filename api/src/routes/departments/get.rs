use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use db::models::department;
use sea_orm::{EntityTrait, QueryOrder};
use util::state::AppState;

use crate::response::ApiResponse;
use crate::routes::departments::post::DepartmentResponse;

/// GET /api/departments
///
/// List all departments, ordered by name. Admin only.
pub async fn get_departments(State(app_state): State<AppState>) -> impl IntoResponse {
    let db = app_state.db();

    match department::Entity::find()
        .order_by_asc(department::Column::Name)
        .all(db)
        .await
    {
        Ok(departments) => {
            let departments: Vec<DepartmentResponse> = departments
                .into_iter()
                .map(DepartmentResponse::from)
                .collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    departments,
                    "Departments retrieved successfully",
                )),
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to list departments");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Vec<DepartmentResponse>>::error(
                    "Something went wrong, please try again",
                )),
            )
        }
    }
}
