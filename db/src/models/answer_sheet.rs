use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::DeriveActiveEnum;
use sea_orm::QueryFilter;
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, DatabaseConnection, IntoActiveModel, TransactionTrait};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::DomainError;
use crate::models::exam_teacher_assignment::Model as AssignmentModel;
use crate::models::question_mark::Model as QuestionMarkModel;

/// Represents one student's uploaded answer sheet for one exam.
///
/// `obtained_marks` is always the sum of the sheet's question-mark ledger;
/// it changes only through [`Model::grade`] and grievance resolution, both of
/// which recompute it from the ledger inside the same transaction.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "answer_sheets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub exam_id: i64,
    pub student_id: i64,

    /// Opaque storage reference; the PDF bytes live in the object store.
    pub file_path: String,
    pub upload_date: DateTime<Utc>,

    pub grading_status: GradingStatus,
    pub graded_by: Option<i64>,
    pub graded_at: Option<DateTime<Utc>>,

    pub total_marks: i64,
    pub obtained_marks: i64,
    pub remarks: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "grading_status")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum GradingStatus {
    #[sea_orm(string_value = "pending")]
    Pending,

    #[sea_orm(string_value = "completed")]
    Completed,
}

/// One entry of a grading payload: the marks a teacher awards for a single
/// question in one pass over the sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkEntry {
    pub question_number: i64,
    pub max_marks: i64,
    pub obtained_marks: i64,
    pub comments: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::exam::Entity",
        from = "Column::ExamId",
        to = "super::exam::Column::Id"
    )]
    Exam,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::StudentId",
        to = "super::user::Column::Id"
    )]
    Student,

    #[sea_orm(has_many = "super::question_mark::Entity")]
    QuestionMark,

    #[sea_orm(has_many = "super::grievance::Entity")]
    Grievance,
}

impl Related<super::exam::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Exam.def()
    }
}

impl Related<super::question_mark::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::QuestionMark.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Registers an uploaded sheet in `pending` state. The caller has already
    /// written the PDF to storage; only the reference is recorded here.
    pub async fn upload(
        db: &DatabaseConnection,
        exam_id: i64,
        student_id: i64,
        file_path: &str,
        total_marks: i64,
    ) -> Result<Model, DomainError> {
        let now = Utc::now();

        let active = ActiveModel {
            exam_id: Set(exam_id),
            student_id: Set(student_id),
            file_path: Set(file_path.to_owned()),
            upload_date: Set(now),
            grading_status: Set(GradingStatus::Pending),
            graded_by: Set(None),
            graded_at: Set(None),
            total_marks: Set(total_marks),
            obtained_marks: Set(0),
            remarks: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        Ok(active.insert(db).await?)
    }

    /// Points the sheet at its stored file once the upload has landed.
    pub async fn set_file_path(
        db: &DatabaseConnection,
        sheet_id: i64,
        file_path: &str,
    ) -> Result<Model, DomainError> {
        let sheet = Entity::find_by_id(sheet_id)
            .one(db)
            .await?
            .ok_or(DomainError::NotFound("answer sheet"))?;

        let mut active = sheet.into_active_model();
        active.file_path = Set(file_path.to_owned());
        active.updated_at = Set(Utc::now());
        Ok(active.update(db).await?)
    }

    /// Grades the sheet in one pass: writes every entry through the mark
    /// ledger, recomputes the obtained total, and marks grading completed —
    /// all inside a single transaction.
    ///
    /// The grader must hold an assignment covering every question in the
    /// payload ([`DomainError::UnauthorizedReviewer`]). A completed sheet may
    /// only be re-graded by its original grader; anyone else fails with
    /// [`DomainError::AlreadyGraded`]. Re-grades overwrite ledger entries,
    /// never duplicate them.
    pub async fn grade(
        db: &DatabaseConnection,
        sheet_id: i64,
        grader_id: i64,
        entries: &[MarkEntry],
    ) -> Result<Model, DomainError> {
        if entries.is_empty() {
            return Err(DomainError::InvalidAssignment(
                "at least one question mark must be supplied".into(),
            ));
        }

        let txn = db.begin().await.map_err(DomainError::Db)?;

        let sheet = Entity::find_by_id(sheet_id)
            .one(&txn)
            .await?
            .ok_or(DomainError::NotFound("answer sheet"))?;

        let authorized =
            AssignmentModel::authorized_questions(&txn, sheet.exam_id, grader_id).await?;
        if authorized.is_empty() {
            return Err(DomainError::UnauthorizedReviewer {
                reviewer_id: grader_id,
            });
        }
        for entry in entries {
            if !authorized.contains(&entry.question_number) {
                return Err(DomainError::UnauthorizedReviewer {
                    reviewer_id: grader_id,
                });
            }
        }

        if sheet.grading_status == GradingStatus::Completed && sheet.graded_by != Some(grader_id) {
            return Err(DomainError::AlreadyGraded { sheet_id });
        }

        for entry in entries {
            QuestionMarkModel::record_mark(
                &txn,
                sheet_id,
                entry.question_number,
                entry.max_marks,
                entry.obtained_marks,
                entry.comments.as_deref(),
                grader_id,
            )
            .await?;
        }

        let total = QuestionMarkModel::total_for(&txn, sheet_id).await?;
        let now = Utc::now();

        let mut active = sheet.into_active_model();
        active.obtained_marks = Set(total);
        active.grading_status = Set(GradingStatus::Completed);
        active.graded_by = Set(Some(grader_id));
        active.graded_at = Set(Some(now));
        active.updated_at = Set(now);
        let updated = active.update(&txn).await?;

        txn.commit().await.map_err(DomainError::Db)?;
        tracing::info!(sheet_id, grader_id, total, "Answer sheet graded");
        Ok(updated)
    }

    /// Grading status derived from the ledger rather than the stored column:
    /// a sheet with no entries is pending. Drives the "pending papers" queue.
    pub async fn derive_status(
        db: &DatabaseConnection,
        sheet_id: i64,
    ) -> Result<GradingStatus, DomainError> {
        Entity::find_by_id(sheet_id)
            .one(db)
            .await?
            .ok_or(DomainError::NotFound("answer sheet"))?;

        let entries = QuestionMarkModel::find_for_sheet(db, sheet_id).await?;
        if entries.is_empty() {
            Ok(GradingStatus::Pending)
        } else {
            Ok(GradingStatus::Completed)
        }
    }

    pub async fn find_for_exam(
        db: &DatabaseConnection,
        exam_id: i64,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::ExamId.eq(exam_id))
            .all(db)
            .await
    }

    pub async fn find_for_student(
        db: &DatabaseConnection,
        student_id: i64,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::StudentId.eq(student_id))
            .all(db)
            .await
    }
}
