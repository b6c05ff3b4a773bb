use axum::{
    Extension, Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use common::format_validation_errors;
use db::models::{exam::Model as ExamModel, subject};
use sea_orm::EntityTrait;
use serde::{Deserialize, Serialize};
use util::{paths, state::AppState};
use validator::Validate;

use crate::auth::AuthUser;
use crate::response::ApiResponse;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateExamRequest {
    pub subject_id: i64,

    #[validate(length(min = 2, message = "Exam name must be at least 2 characters"))]
    pub name: String,

    pub exam_date: DateTime<Utc>,

    #[validate(range(min = 1, message = "Duration must be at least 1 minute"))]
    pub duration_minutes: i32,

    #[validate(range(min = 1, message = "Total marks must be positive"))]
    pub total_marks: i64,
}

#[derive(Debug, Serialize, Default)]
pub struct ExamResponse {
    pub id: i64,
    pub subject_id: i64,
    pub name: String,
    pub exam_date: String,
    pub duration_minutes: i32,
    pub total_marks: i64,
    pub question_paper_path: Option<String>,
    pub created_by: i64,
}

impl From<ExamModel> for ExamResponse {
    fn from(e: ExamModel) -> Self {
        Self {
            id: e.id,
            subject_id: e.subject_id,
            name: e.name,
            exam_date: e.exam_date.to_rfc3339(),
            duration_minutes: e.duration_minutes,
            total_marks: e.total_marks,
            question_paper_path: e.question_paper_path,
            created_by: e.created_by,
        }
    }
}

/// POST /api/exams
///
/// Create an exam for a subject. Admin only.
///
/// ### Request Body
/// ```json
/// {
///   "subject_id": 2,
///   "name": "Midsem 2026",
///   "exam_date": "2026-07-15T09:00:00Z",
///   "duration_minutes": 120,
///   "total_marks": 30
/// }
/// ```
///
/// ### Responses
/// - `201 Created` with the created exam
/// - `400 Bad Request` (validation failure)
/// - `404 Not Found` (unknown subject)
pub async fn create_exam(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<CreateExamRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        let error_message = format_validation_errors(&validation_errors);
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<ExamResponse>::error(error_message)),
        );
    }

    let db = app_state.db();

    match subject::Entity::find_by_id(req.subject_id).one(db).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<ExamResponse>::error("Subject not found")),
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to look up subject");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<ExamResponse>::error(
                    "Something went wrong, please try again",
                )),
            );
        }
    }

    match ExamModel::create(
        db,
        req.subject_id,
        &req.name,
        req.exam_date,
        req.duration_minutes,
        req.total_marks,
        claims.sub,
    )
    .await
    {
        Ok(exam) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                ExamResponse::from(exam),
                "Exam created successfully",
            )),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to create exam");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<ExamResponse>::error(
                    "Something went wrong, please try again",
                )),
            )
        }
    }
}

/// POST /api/exams/{exam_id}/question-paper
///
/// Upload the question paper PDF for an exam as a multipart `file` field.
/// The bytes land under the storage root; only the relative reference is
/// persisted on the exam row. Admin only.
///
/// ### Responses
/// - `200 OK` with the updated exam
/// - `400 Bad Request` (no file field)
/// - `404 Not Found` (unknown exam)
pub async fn upload_question_paper(
    State(app_state): State<AppState>,
    Path(exam_id): Path<i64>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let db = app_state.db();

    let mut saved: Option<String> = None;
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field
            .file_name()
            .map(str::to_owned)
            .unwrap_or_else(|| "question_paper.pdf".to_owned());
        let bytes = match field.bytes().await {
            Ok(b) => b,
            Err(_) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::<ExamResponse>::error(
                        "Failed to read uploaded file",
                    )),
                );
            }
        };

        let dest = paths::question_paper_path(exam_id, &filename);
        if paths::ensure_parent_dir(&dest).is_err() || std::fs::write(&dest, &bytes).is_err() {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<ExamResponse>::error(
                    "Failed to store question paper",
                )),
            );
        }
        saved = Some(format!("exam_{exam_id}/question_paper/{filename}"));
    }

    let Some(rel_path) = saved else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<ExamResponse>::error(
                "A 'file' field with the question paper is required",
            )),
        );
    };

    match ExamModel::set_question_paper(db, exam_id, &rel_path).await {
        Ok(exam) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                ExamResponse::from(exam),
                "Question paper uploaded successfully",
            )),
        ),
        Err(e) if matches!(e, sea_orm::DbErr::RecordNotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<ExamResponse>::error("Exam not found")),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to record question paper");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<ExamResponse>::error(
                    "Something went wrong, please try again",
                )),
            )
        }
    }
}
