use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::answer_sheet::Model as SheetModel;
use db::models::user::{self, Role};
use db::models::exam;
use sea_orm::EntityTrait;
use serde::Serialize;
use util::{paths, state::AppState};

use crate::response::ApiResponse;
use crate::routes::common::domain_error;

#[derive(Debug, Serialize, Default)]
pub struct SheetResponse {
    pub id: i64,
    pub exam_id: i64,
    pub student_id: i64,
    pub file_path: String,
    pub upload_date: String,
    pub grading_status: String,
    pub graded_by: Option<i64>,
    pub graded_at: Option<String>,
    pub total_marks: i64,
    pub obtained_marks: i64,
    pub remarks: Option<String>,
}

impl From<SheetModel> for SheetResponse {
    fn from(s: SheetModel) -> Self {
        Self {
            id: s.id,
            exam_id: s.exam_id,
            student_id: s.student_id,
            file_path: s.file_path,
            upload_date: s.upload_date.to_rfc3339(),
            grading_status: s.grading_status.to_string(),
            graded_by: s.graded_by,
            graded_at: s.graded_at.map(|t| t.to_rfc3339()),
            total_marks: s.total_marks,
            obtained_marks: s.obtained_marks,
            remarks: s.remarks,
        }
    }
}

/// POST /api/exams/{exam_id}/sheets
///
/// Upload a student's scanned answer sheet as multipart form data with a
/// `student_id` field and a `file` field holding the PDF. The bytes are
/// written under the storage root; the sheet row records only the relative
/// reference and starts out `pending`. Teachers and admins.
///
/// ### Responses
/// - `201 Created` with the registered sheet
/// - `400 Bad Request` (missing fields)
/// - `404 Not Found` (unknown exam or student)
pub async fn upload_sheet(
    State(app_state): State<AppState>,
    Path(exam_id): Path<i64>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let db = app_state.db();

    let exam = match exam::Entity::find_by_id(exam_id).one(db).await {
        Ok(Some(exam)) => exam,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<SheetResponse>::error("Exam not found")),
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to look up exam");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<SheetResponse>::error(
                    "Something went wrong, please try again",
                )),
            );
        }
    };

    let mut student_id: Option<i64> = None;
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        match field.name() {
            Some("student_id") => {
                student_id = field
                    .text()
                    .await
                    .ok()
                    .and_then(|t| t.trim().parse::<i64>().ok());
            }
            Some("file") => {
                let filename = field
                    .file_name()
                    .map(str::to_owned)
                    .unwrap_or_else(|| "answer_sheet.pdf".to_owned());
                match field.bytes().await {
                    Ok(bytes) => file = Some((filename, bytes.to_vec())),
                    Err(_) => {
                        return (
                            StatusCode::BAD_REQUEST,
                            Json(ApiResponse::<SheetResponse>::error(
                                "Failed to read uploaded file",
                            )),
                        );
                    }
                }
            }
            _ => {}
        }
    }

    let Some(student_id) = student_id else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<SheetResponse>::error(
                "A numeric 'student_id' field is required",
            )),
        );
    };
    let Some((filename, bytes)) = file else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<SheetResponse>::error(
                "A 'file' field with the answer sheet is required",
            )),
        );
    };

    match user::Entity::find_by_id(student_id).one(db).await {
        Ok(Some(u)) if u.role == Role::Student => {}
        Ok(_) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<SheetResponse>::error("Student not found")),
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to look up student");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<SheetResponse>::error(
                    "Something went wrong, please try again",
                )),
            );
        }
    }

    // Register the sheet first so its id names the storage folder.
    let sheet = match SheetModel::upload(db, exam_id, student_id, "", exam.total_marks).await {
        Ok(sheet) => sheet,
        Err(e) => return domain_error(e),
    };

    let dest = paths::answer_sheet_path(exam_id, sheet.id, &filename);
    if paths::ensure_parent_dir(&dest).is_err() || std::fs::write(&dest, &bytes).is_err() {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<SheetResponse>::error(
                "Failed to store answer sheet",
            )),
        );
    }

    let rel_path = paths::answer_sheet_rel_path(exam_id, sheet.id, &filename);
    match SheetModel::set_file_path(db, sheet.id, &rel_path).await {
        Ok(sheet) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                SheetResponse::from(sheet),
                "Answer sheet uploaded successfully",
            )),
        ),
        Err(e) => domain_error(e),
    }
}
