use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use common::format_validation_errors;
use db::models::grievance::Model as GrievanceModel;
use serde::{Deserialize, Serialize};
use util::state::AppState;
use validator::Validate;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::domain_error;

#[derive(Debug, Deserialize, Validate)]
pub struct SubmitGrievanceRequest {
    #[validate(range(min = 1, message = "Question number must be positive"))]
    pub question_number: i64,

    pub sub_question: Option<String>,

    #[validate(length(min = 10, message = "Please describe the grievance in at least 10 characters"))]
    pub grievance_text: String,

    /// The marks the student currently sees for the question. Checked
    /// against the ledger so a dispute can never be filed on a stale basis.
    pub current_marks: i64,
}

#[derive(Debug, Serialize, Default)]
pub struct GrievanceResponse {
    pub id: i64,
    pub student_id: i64,
    pub answer_sheet_id: i64,
    pub question_number: i64,
    pub sub_question: Option<String>,
    pub grievance_text: String,
    pub current_marks: i64,
    pub updated_marks: Option<i64>,
    pub status: String,
    pub reviewer_id: Option<i64>,
    pub teacher_response: Option<String>,
    pub submission_date: String,
    pub reviewed_at: Option<String>,
}

impl From<GrievanceModel> for GrievanceResponse {
    fn from(g: GrievanceModel) -> Self {
        Self {
            id: g.id,
            student_id: g.student_id,
            answer_sheet_id: g.answer_sheet_id,
            question_number: g.question_number,
            sub_question: g.sub_question,
            grievance_text: g.grievance_text,
            current_marks: g.current_marks,
            updated_marks: g.updated_marks,
            status: g.status.to_string(),
            reviewer_id: g.reviewer_id,
            teacher_response: g.teacher_response,
            submission_date: g.submission_date.to_rfc3339(),
            reviewed_at: g.reviewed_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// POST /api/sheets/{sheet_id}/grievances
///
/// File a grievance against one question of the caller's own, already-graded
/// answer sheet. Students only.
///
/// ### Request Body
/// ```json
/// {
///   "question_number": 3,
///   "sub_question": "b",
///   "grievance_text": "Part (b) continues on the back page and was not marked",
///   "current_marks": 6
/// }
/// ```
///
/// ### Responses
/// - `201 Created` with the grievance in `pending` state
/// - `400 Bad Request` (validation failure, or `current_marks` does not match
///   the ledger)
/// - `403 Forbidden` (sheet belongs to another student)
/// - `404 Not Found` (unknown sheet, or question never graded)
/// - `409 Conflict` (sheet not graded yet, or an open grievance already
///   exists for the question)
pub async fn submit_grievance(
    State(app_state): State<AppState>,
    Path(sheet_id): Path<i64>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<SubmitGrievanceRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        let error_message = format_validation_errors(&validation_errors);
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<GrievanceResponse>::error(error_message)),
        );
    }

    let db = app_state.db();

    match GrievanceModel::submit(
        db,
        claims.sub,
        sheet_id,
        req.question_number,
        req.sub_question.as_deref(),
        &req.grievance_text,
        req.current_marks,
    )
    .await
    {
        Ok(grievance) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                GrievanceResponse::from(grievance),
                "Grievance submitted successfully",
            )),
        ),
        Err(e) => domain_error(e),
    }
}
