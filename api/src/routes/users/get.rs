use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::user::{self, Role};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::Deserialize;
use util::state::AppState;

use crate::response::ApiResponse;
use crate::routes::users::post::UserResponse;

#[derive(Debug, Deserialize)]
pub struct UserFilter {
    pub role: Option<Role>,
    pub department_id: Option<i64>,
}

/// GET /api/users
///
/// List user accounts, optionally filtered by role and/or department.
/// Admin only.
///
/// ### Query Parameters
/// - `role` (optional): `admin`, `teacher`, or `student`
/// - `department_id` (optional)
///
/// ### Responses
///
/// - `200 OK` with the matching users
/// - `500 Internal Server Error`
pub async fn get_users(
    State(app_state): State<AppState>,
    Query(filter): Query<UserFilter>,
) -> impl IntoResponse {
    let db = app_state.db();

    let mut query = user::Entity::find().order_by_asc(user::Column::Username);
    if let Some(role) = filter.role {
        query = query.filter(user::Column::Role.eq(role));
    }
    if let Some(department_id) = filter.department_id {
        query = query.filter(user::Column::DepartmentId.eq(department_id));
    }

    match query.all(db).await {
        Ok(users) => {
            let users: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(users, "Users retrieved successfully")),
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to list users");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Vec<UserResponse>>::error(
                    "Something went wrong, please try again",
                )),
            )
        }
    }
}
