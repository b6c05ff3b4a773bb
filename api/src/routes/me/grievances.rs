use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use db::dashboard;
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::domain_error;
use crate::routes::sheets::grievances::post::GrievanceResponse;

/// GET /api/me/grievances
///
/// List the grievances visible to the caller: students see their own,
/// teachers see those on exams they are assigned to, admins see all.
pub async fn get_my_grievances(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> impl IntoResponse {
    let db = app_state.db();

    match dashboard::grievances_for(db, claims.sub, claims.role).await {
        Ok(grievances) => {
            let grievances: Vec<GrievanceResponse> = grievances
                .into_iter()
                .map(GrievanceResponse::from)
                .collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    grievances,
                    "Grievances retrieved successfully",
                )),
            )
        }
        Err(e) => domain_error(e),
    }
}
