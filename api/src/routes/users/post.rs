use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use common::format_validation_errors;
use db::models::user::{Model as UserModel, Role};
use serde::{Deserialize, Serialize};
use util::state::AppState;
use validator::Validate;

use crate::response::ApiResponse;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, message = "Username must be at least 3 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    pub role: Role,
    pub department_id: Option<i64>,
}

#[derive(Debug, Serialize, Default)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: String,
    pub department_id: Option<i64>,
}

impl From<UserModel> for UserResponse {
    fn from(user: UserModel) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role.to_string(),
            department_id: user.department_id,
        }
    }
}

/// POST /api/users
///
/// Create a user account with an explicit role claim. Admin only.
///
/// ### Request Body
/// ```json
/// {
///   "username": "teacher1",
///   "email": "teacher1@example.com",
///   "password": "strongpassword",
///   "role": "teacher",
///   "department_id": 2
/// }
/// ```
///
/// ### Responses
///
/// - `201 Created` with the created user
/// - `400 Bad Request` (validation failure)
/// - `409 Conflict` (duplicate username or email)
/// - `500 Internal Server Error`
pub async fn create_user(
    State(app_state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        let error_message = format_validation_errors(&validation_errors);
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<UserResponse>::error(error_message)),
        );
    }

    let db = app_state.db();

    match UserModel::create(
        db,
        &req.username,
        &req.email,
        &req.password,
        req.role,
        req.department_id,
    )
    .await
    {
        Ok(user) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                UserResponse::from(user),
                "User created successfully",
            )),
        ),
        Err(e) if e.to_string().contains("UNIQUE") => (
            StatusCode::CONFLICT,
            Json(ApiResponse::<UserResponse>::error(
                "A user with this username or email already exists",
            )),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to create user");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<UserResponse>::error(
                    "Something went wrong, please try again",
                )),
            )
        }
    }
}
