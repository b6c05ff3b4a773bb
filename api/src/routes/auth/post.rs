use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use common::format_validation_errors;
use db::models::user::Model as UserModel;
use serde::{Deserialize, Serialize};
use util::state::AppState;
use validator::Validate;

use crate::auth::generate_jwt;
use crate::response::ApiResponse;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, Default)]
pub struct LoginResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: String,
    pub department_id: Option<i64>,
    pub token: String,
    pub expires_at: String,
}

/// POST /auth/login
///
/// Verify a user's credentials and issue a JWT carrying the authoritative
/// role claim.
///
/// ### Request Body
/// ```json
/// {
///   "email": "user@example.com",
///   "password": "strongpassword"
/// }
/// ```
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "id": 1,
///     "username": "teacher1",
///     "email": "user@example.com",
///     "role": "teacher",
///     "department_id": 2,
///     "token": "jwt_token_here",
///     "expires_at": "2026-07-01T11:00:00Z"
///   },
///   "message": "Login successful"
/// }
/// ```
///
/// - `400 Bad Request` (validation failure)
/// ```json
/// {
///   "success": false,
///   "message": "Invalid email format"
/// }
/// ```
///
/// - `401 Unauthorized` (unknown email or wrong password)
/// ```json
/// {
///   "success": false,
///   "message": "Invalid email or password"
/// }
/// ```
pub async fn login(
    State(app_state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        let error_message = format_validation_errors(&validation_errors);
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<LoginResponse>::error(error_message)),
        );
    }

    let db = app_state.db();

    match UserModel::verify_credentials(db, &req.email, &req.password).await {
        Ok(Some(user)) => {
            let (token, expires_at) = generate_jwt(user.id, user.role);
            let response = LoginResponse {
                id: user.id,
                username: user.username,
                email: user.email,
                role: user.role.to_string(),
                department_id: user.department_id,
                token,
                expires_at,
            };
            (
                StatusCode::OK,
                Json(ApiResponse::success(response, "Login successful")),
            )
        }
        Ok(None) => (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::<LoginResponse>::error(
                "Invalid email or password",
            )),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Database error during login");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<LoginResponse>::error(
                    "Something went wrong, please try again",
                )),
            )
        }
    }
}
