use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::annotation::{AnnotationType, Model as AnnotationModel};
use db::models::answer_sheet;
use sea_orm::EntityTrait;
use serde::{Deserialize, Serialize};
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiResponse;

#[derive(Debug, Deserialize)]
pub struct CreateAnnotationRequest {
    pub page_number: i32,
    pub x: f64,
    pub y: f64,
    pub annotation_type: AnnotationType,
    #[serde(default)]
    pub content: String,
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_color() -> String {
    "#ff0000".to_owned()
}

#[derive(Debug, Serialize, Default)]
pub struct AnnotationResponse {
    pub id: i64,
    pub answer_sheet_id: i64,
    pub page_number: i32,
    pub x: f64,
    pub y: f64,
    pub annotation_type: String,
    pub content: String,
    pub color: String,
    pub created_by: i64,
    pub created_at: String,
}

impl From<AnnotationModel> for AnnotationResponse {
    fn from(a: AnnotationModel) -> Self {
        Self {
            id: a.id,
            answer_sheet_id: a.answer_sheet_id,
            page_number: a.page_number,
            x: a.x,
            y: a.y,
            annotation_type: a.annotation_type.to_string(),
            content: a.content,
            color: a.color,
            created_by: a.created_by,
            created_at: a.created_at.to_rfc3339(),
        }
    }
}

/// POST /api/sheets/{sheet_id}/annotations
///
/// Append a visual annotation at a page position of the sheet's PDF.
/// Annotations are purely advisory; grading is unaffected. Teachers.
///
/// ### Request Body
/// ```json
/// {
///   "page_number": 2,
///   "x": 120.5,
///   "y": 340.25,
///   "annotation_type": "comment",
///   "content": "Show your working here",
///   "color": "#0000ff"
/// }
/// ```
///
/// ### Responses
/// - `201 Created` with the stored annotation
/// - `404 Not Found` (unknown sheet)
pub async fn create_annotation(
    State(app_state): State<AppState>,
    Path(sheet_id): Path<i64>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<CreateAnnotationRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    match answer_sheet::Entity::find_by_id(sheet_id).one(db).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<AnnotationResponse>::error(
                    "Answer sheet not found",
                )),
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to look up answer sheet");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<AnnotationResponse>::error(
                    "Something went wrong, please try again",
                )),
            );
        }
    }

    match AnnotationModel::create(
        db,
        sheet_id,
        req.page_number,
        req.x,
        req.y,
        req.annotation_type,
        &req.content,
        &req.color,
        claims.sub,
    )
    .await
    {
        Ok(annotation) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                AnnotationResponse::from(annotation),
                "Annotation created successfully",
            )),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to create annotation");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<AnnotationResponse>::error(
                    "Something went wrong, please try again",
                )),
            )
        }
    }
}
