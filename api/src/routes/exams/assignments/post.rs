use std::collections::{BTreeMap, BTreeSet};

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::exam_teacher_assignment::Model as AssignmentModel;
use db::models::user::{self, Role};
use db::models::exam;
use sea_orm::EntityTrait;
use serde::{Deserialize, Serialize};
use util::state::AppState;

use crate::response::ApiResponse;
use crate::routes::common::domain_error;

#[derive(Debug, Deserialize)]
pub struct AssignTeacherRequest {
    pub teacher_id: i64,
    pub questions: BTreeSet<i64>,
    pub marks_per_question: BTreeMap<i64, i64>,
}

#[derive(Debug, Serialize, Default)]
pub struct AssignmentResponse {
    pub id: i64,
    pub exam_id: i64,
    pub teacher_id: i64,
    pub questions: Vec<i64>,
    pub marks_per_question: BTreeMap<i64, i64>,
}

impl From<AssignmentModel> for AssignmentResponse {
    fn from(a: AssignmentModel) -> Self {
        Self {
            id: a.id,
            exam_id: a.exam_id,
            teacher_id: a.teacher_id,
            questions: a.question_set().into_iter().collect(),
            marks_per_question: a.marks_map(),
        }
    }
}

/// POST /api/exams/{exam_id}/assignments
///
/// Assign a teacher to a set of questions on the exam, with the maximum
/// marks per question. Re-assigning the same teacher replaces their range;
/// assigning a question already held by a different teacher is rejected.
/// Admin only.
///
/// ### Request Body
/// ```json
/// {
///   "teacher_id": 7,
///   "questions": [1, 2, 3],
///   "marks_per_question": { "1": 10, "2": 10, "3": 10 }
/// }
/// ```
///
/// ### Responses
/// - `201 Created` with the stored assignment
/// - `400 Bad Request` (malformed question/marks sets)
/// - `404 Not Found` (unknown exam or teacher)
/// - `409 Conflict` (question overlap with another teacher)
pub async fn create_assignment(
    State(app_state): State<AppState>,
    Path(exam_id): Path<i64>,
    Json(req): Json<AssignTeacherRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    match exam::Entity::find_by_id(exam_id).one(db).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<AssignmentResponse>::error("Exam not found")),
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to look up exam");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<AssignmentResponse>::error(
                    "Something went wrong, please try again",
                )),
            );
        }
    }

    // The assignee must exist and actually be a teacher.
    match user::Entity::find_by_id(req.teacher_id).one(db).await {
        Ok(Some(u)) if u.role == Role::Teacher => {}
        Ok(_) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<AssignmentResponse>::error("Teacher not found")),
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to look up teacher");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<AssignmentResponse>::error(
                    "Something went wrong, please try again",
                )),
            );
        }
    }

    match AssignmentModel::assign(
        db,
        exam_id,
        req.teacher_id,
        &req.questions,
        &req.marks_per_question,
    )
    .await
    {
        Ok(assignment) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                AssignmentResponse::from(assignment),
                "Teacher assigned successfully",
            )),
        ),
        Err(e) => domain_error(e),
    }
}
