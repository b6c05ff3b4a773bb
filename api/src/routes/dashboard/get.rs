use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use db::dashboard::{self, DepartmentSheetCount, OverviewCounts};
use serde::Serialize;
use util::state::AppState;

use crate::response::ApiResponse;
use crate::routes::common::domain_error;

#[derive(Debug, Serialize, Default)]
pub struct OverviewResponse {
    pub counts: Option<OverviewCounts>,
    pub department_breakdown: Vec<DepartmentSheetCount>,
}

/// GET /api/dashboard/overview
///
/// Aggregate statistics for the admin landing page: exam/sheet/grievance
/// totals plus sheet volume per department. Admin only.
///
/// ### Response
/// ```json
/// {
///   "success": true,
///   "data": {
///     "counts": {
///       "exams": 4,
///       "answer_sheets": 120,
///       "pending_sheets": 17,
///       "grievances_pending": 3,
///       "grievances_under_review": 1,
///       "grievances_resolved": 9,
///       "grievances_rejected": 2
///     },
///     "department_breakdown": [
///       { "department_id": 1, "department": "Computer Science", "sheets": 80 }
///     ]
///   },
///   "message": "Overview retrieved successfully"
/// }
/// ```
pub async fn get_overview(State(app_state): State<AppState>) -> impl IntoResponse {
    let db = app_state.db();

    let counts = match dashboard::overview_counts(db).await {
        Ok(counts) => counts,
        Err(e) => return domain_error(e),
    };

    let department_breakdown = match dashboard::department_breakdown(db).await {
        Ok(breakdown) => breakdown,
        Err(e) => return domain_error(e),
    };

    let response = OverviewResponse {
        counts: Some(counts),
        department_breakdown,
    };

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            response,
            "Overview retrieved successfully",
        )),
    )
}
