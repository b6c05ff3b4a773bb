use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::DeriveActiveEnum;
use sea_orm::QueryFilter;
use sea_orm::entity::prelude::*;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DatabaseTransaction, IntoActiveModel, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::DomainError;
use crate::models::answer_sheet::{
    Entity as SheetEntity, GradingStatus, Model as SheetModel,
};
use crate::models::exam_teacher_assignment::Model as AssignmentModel;
use crate::models::question_mark::Model as QuestionMarkModel;

/// A student-initiated dispute over the marks awarded for one question.
///
/// Lifecycle: `pending → under_review → {resolved, rejected}`; review may
/// also resolve or reject straight from `pending`. The two terminal states
/// are absorbing — once reached, no transition is ever permitted again.
///
/// `current_marks` snapshots the ledger at submission time and is never
/// rewritten afterwards; it preserves the basis of the dispute even if the
/// sheet is re-graded while the grievance is open.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "grievances")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub student_id: i64,
    pub answer_sheet_id: i64,

    pub question_number: i64,
    pub sub_question: Option<String>,

    pub grievance_text: String,
    pub current_marks: i64,
    pub updated_marks: Option<i64>,

    pub status: GrievanceStatus,

    pub reviewer_id: Option<i64>,
    pub teacher_response: Option<String>,

    pub submission_date: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "grievance_status")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum GrievanceStatus {
    #[sea_orm(string_value = "pending")]
    Pending,

    #[sea_orm(string_value = "under_review")]
    UnderReview,

    #[sea_orm(string_value = "resolved")]
    Resolved,

    #[sea_orm(string_value = "rejected")]
    Rejected,
}

impl GrievanceStatus {
    /// Terminal states permit no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, GrievanceStatus::Resolved | GrievanceStatus::Rejected)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::answer_sheet::Entity",
        from = "Column::AnswerSheetId",
        to = "super::answer_sheet::Column::Id"
    )]
    AnswerSheet,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::StudentId",
        to = "super::user::Column::Id"
    )]
    Student,
}

impl Related<super::answer_sheet::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AnswerSheet.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Files a grievance against one question of the student's own,
    /// already-graded answer sheet.
    ///
    /// Rejected when the sheet is still pending (`SheetNotGraded`), belongs
    /// to a different student (`NotSheetOwner`), the question has no ledger
    /// entry (`MarkNotFound`), an open grievance already exists for the same
    /// question and sub-question (`DuplicateGrievance`), or the student's
    /// claimed marks disagree with the ledger (`StaleMarks`).
    pub async fn submit(
        db: &DatabaseConnection,
        student_id: i64,
        answer_sheet_id: i64,
        question_number: i64,
        sub_question: Option<&str>,
        grievance_text: &str,
        claimed_current_marks: i64,
    ) -> Result<Model, DomainError> {
        let sheet = SheetEntity::find_by_id(answer_sheet_id)
            .one(db)
            .await?
            .ok_or(DomainError::NotFound("answer sheet"))?;

        if sheet.student_id != student_id {
            return Err(DomainError::NotSheetOwner);
        }

        if sheet.grading_status != GradingStatus::Completed {
            return Err(DomainError::SheetNotGraded);
        }

        let entry = QuestionMarkModel::find_entry(db, answer_sheet_id, question_number)
            .await?
            .ok_or(DomainError::MarkNotFound {
                sheet_id: answer_sheet_id,
                question_number,
            })?;

        if entry.obtained_marks != claimed_current_marks {
            return Err(DomainError::StaleMarks {
                claimed: claimed_current_marks,
                actual: entry.obtained_marks,
            });
        }

        let mut open = Entity::find()
            .filter(Column::AnswerSheetId.eq(answer_sheet_id))
            .filter(Column::QuestionNumber.eq(question_number))
            .all(db)
            .await?;
        open.retain(|g| g.sub_question.as_deref() == sub_question && !g.status.is_terminal());
        if !open.is_empty() {
            return Err(DomainError::DuplicateGrievance);
        }

        let now = Utc::now();
        let active = ActiveModel {
            student_id: Set(student_id),
            answer_sheet_id: Set(answer_sheet_id),
            question_number: Set(question_number),
            sub_question: Set(sub_question.map(str::to_owned)),
            grievance_text: Set(grievance_text.to_owned()),
            current_marks: Set(entry.obtained_marks),
            updated_marks: Set(None),
            status: Set(GrievanceStatus::Pending),
            reviewer_id: Set(None),
            teacher_response: Set(None),
            submission_date: Set(now),
            reviewed_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        Ok(active.insert(db).await?)
    }

    /// `pending → under_review`. Assigns the reviewer; no other side effect.
    pub async fn begin_review(
        db: &DatabaseConnection,
        grievance_id: i64,
        reviewer_id: i64,
    ) -> Result<Model, DomainError> {
        let txn = db.begin().await.map_err(DomainError::Db)?;

        let (grievance, _sheet) = Self::load_for_review(&txn, grievance_id, reviewer_id).await?;

        if grievance.status != GrievanceStatus::Pending {
            return Err(DomainError::InvalidTransition {
                from: grievance.status,
            });
        }

        let mut active = grievance.into_active_model();
        active.status = Set(GrievanceStatus::UnderReview);
        active.reviewer_id = Set(Some(reviewer_id));
        active.updated_at = Set(Utc::now());
        let updated = active.update(&txn).await?;

        txn.commit().await.map_err(DomainError::Db)?;
        Ok(updated)
    }

    /// `{pending, under_review} → resolved`.
    ///
    /// Applies the mark correction through the ledger, recomputes the sheet's
    /// obtained total, and records the resolution — all in one transaction.
    /// If the correction fails for any reason the transaction is rolled back
    /// and the grievance remains non-terminal.
    pub async fn resolve(
        db: &DatabaseConnection,
        grievance_id: i64,
        reviewer_id: i64,
        response_text: &str,
        new_marks: i64,
    ) -> Result<Model, DomainError> {
        let txn = db.begin().await.map_err(DomainError::Db)?;

        let (grievance, sheet) = Self::load_for_review(&txn, grievance_id, reviewer_id).await?;

        if grievance.status.is_terminal() {
            return Err(DomainError::InvalidTransition {
                from: grievance.status,
            });
        }

        QuestionMarkModel::apply_grievance_correction(
            &txn,
            grievance.answer_sheet_id,
            grievance.question_number,
            new_marks,
            reviewer_id,
        )
        .await?;

        let total = QuestionMarkModel::total_for(&txn, grievance.answer_sheet_id).await?;
        let now = Utc::now();

        let mut sheet_active = sheet.into_active_model();
        sheet_active.obtained_marks = Set(total);
        sheet_active.updated_at = Set(now);
        sheet_active.update(&txn).await?;

        let mut active = grievance.into_active_model();
        active.status = Set(GrievanceStatus::Resolved);
        active.reviewer_id = Set(Some(reviewer_id));
        active.updated_marks = Set(Some(new_marks));
        active.teacher_response = Set(Some(response_text.to_owned()));
        active.reviewed_at = Set(Some(now));
        active.updated_at = Set(now);
        let updated = active.update(&txn).await?;

        txn.commit().await.map_err(DomainError::Db)?;
        tracing::info!(grievance_id, reviewer_id, new_marks, "Grievance resolved");
        Ok(updated)
    }

    /// `{pending, under_review} → rejected`. Marks are untouched.
    pub async fn reject(
        db: &DatabaseConnection,
        grievance_id: i64,
        reviewer_id: i64,
        response_text: &str,
    ) -> Result<Model, DomainError> {
        let txn = db.begin().await.map_err(DomainError::Db)?;

        let (grievance, _sheet) = Self::load_for_review(&txn, grievance_id, reviewer_id).await?;

        if grievance.status.is_terminal() {
            return Err(DomainError::InvalidTransition {
                from: grievance.status,
            });
        }

        let now = Utc::now();
        let mut active = grievance.into_active_model();
        active.status = Set(GrievanceStatus::Rejected);
        active.reviewer_id = Set(Some(reviewer_id));
        active.teacher_response = Set(Some(response_text.to_owned()));
        active.reviewed_at = Set(Some(now));
        active.updated_at = Set(now);
        let updated = active.update(&txn).await?;

        txn.commit().await.map_err(DomainError::Db)?;
        tracing::info!(grievance_id, reviewer_id, "Grievance rejected");
        Ok(updated)
    }

    /// Loads the grievance and its sheet inside the caller's transaction and
    /// checks that the reviewer's exam assignment covers the disputed
    /// question. Re-reading under the transaction serializes concurrent
    /// review attempts on the same grievance.
    async fn load_for_review(
        txn: &DatabaseTransaction,
        grievance_id: i64,
        reviewer_id: i64,
    ) -> Result<(Model, SheetModel), DomainError> {
        let grievance = Entity::find_by_id(grievance_id)
            .one(txn)
            .await?
            .ok_or(DomainError::NotFound("grievance"))?;

        let sheet = SheetEntity::find_by_id(grievance.answer_sheet_id)
            .one(txn)
            .await?
            .ok_or(DomainError::NotFound("answer sheet"))?;

        let authorized =
            AssignmentModel::authorized_questions(txn, sheet.exam_id, reviewer_id).await?;
        if !authorized.contains(&grievance.question_number) {
            return Err(DomainError::UnauthorizedReviewer { reviewer_id });
        }

        Ok((grievance, sheet))
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
