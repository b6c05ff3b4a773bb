use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::QueryFilter;
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, ConnectionTrait, IntoActiveModel, QueryOrder};
use serde::Serialize;

use crate::error::DomainError;

/// One ledger entry: the marks awarded for a single question on a single
/// answer sheet. Keyed by `(answer_sheet_id, question_number)`; grading the
/// same question twice overwrites the entry rather than adding a second row.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "question_marks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub answer_sheet_id: i64,
    pub question_number: i64,

    pub max_marks: i64,
    pub obtained_marks: i64,
    pub comments: Option<String>,

    pub graded_by: i64,
    pub graded_at: DateTime<Utc>,
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
        from = "Column::GradedBy",
        to = "super::user::Column::Id"
    )]
    Grader,
}

impl Related<super::answer_sheet::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AnswerSheet.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Grader.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Records (or overwrites) the marks for one question on one sheet.
    ///
    /// Fails with [`DomainError::InvalidMarks`] when `obtained_marks` falls
    /// outside `[0, max_marks]`. Re-grading the same question replaces the
    /// existing entry, so the ledger never holds duplicates.
    pub async fn record_mark<C: ConnectionTrait>(
        db: &C,
        answer_sheet_id: i64,
        question_number: i64,
        max_marks: i64,
        obtained_marks: i64,
        comments: Option<&str>,
        grader_id: i64,
    ) -> Result<Model, DomainError> {
        if obtained_marks < 0 || obtained_marks > max_marks {
            return Err(DomainError::InvalidMarks {
                got: obtained_marks,
                max: max_marks,
            });
        }

        let now = Utc::now();
        let existing = Self::find_entry(db, answer_sheet_id, question_number).await?;

        match existing {
            Some(row) => {
                let mut active = row.into_active_model();
                active.max_marks = Set(max_marks);
                active.obtained_marks = Set(obtained_marks);
                active.comments = Set(comments.map(str::to_owned));
                active.graded_by = Set(grader_id);
                active.graded_at = Set(now);
                Ok(active.update(db).await?)
            }
            None => {
                let active = ActiveModel {
                    answer_sheet_id: Set(answer_sheet_id),
                    question_number: Set(question_number),
                    max_marks: Set(max_marks),
                    obtained_marks: Set(obtained_marks),
                    comments: Set(comments.map(str::to_owned)),
                    graded_by: Set(grader_id),
                    graded_at: Set(now),
                    ..Default::default()
                };
                Ok(active.insert(db).await?)
            }
        }
    }

    /// Sum of obtained marks across every entry for the sheet. A sheet with
    /// no entries yet totals 0; that is not an error.
    pub async fn total_for<C: ConnectionTrait>(
        db: &C,
        answer_sheet_id: i64,
    ) -> Result<i64, DbErr> {
        let entries = Entity::find()
            .filter(Column::AnswerSheetId.eq(answer_sheet_id))
            .all(db)
            .await?;

        Ok(entries.iter().map(|e| e.obtained_marks).sum())
    }

    /// Overwrites the obtained marks for an already-graded question as the
    /// outcome of a resolved grievance. This is the only path by which a mark
    /// changes once the sheet's grading is completed.
    ///
    /// Fails with [`DomainError::MarkNotFound`] when the question was never
    /// graded, and [`DomainError::InvalidMarks`] when `new_marks` falls
    /// outside `[0, max_marks]` for the entry.
    pub async fn apply_grievance_correction<C: ConnectionTrait>(
        db: &C,
        answer_sheet_id: i64,
        question_number: i64,
        new_marks: i64,
        grader_id: i64,
    ) -> Result<Model, DomainError> {
        let entry = Self::find_entry(db, answer_sheet_id, question_number)
            .await?
            .ok_or(DomainError::MarkNotFound {
                sheet_id: answer_sheet_id,
                question_number,
            })?;

        if new_marks < 0 || new_marks > entry.max_marks {
            return Err(DomainError::InvalidMarks {
                got: new_marks,
                max: entry.max_marks,
            });
        }

        let mut active = entry.into_active_model();
        active.obtained_marks = Set(new_marks);
        active.graded_by = Set(grader_id);
        active.graded_at = Set(Utc::now());
        Ok(active.update(db).await?)
    }

    pub async fn find_entry<C: ConnectionTrait>(
        db: &C,
        answer_sheet_id: i64,
        question_number: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::AnswerSheetId.eq(answer_sheet_id))
            .filter(Column::QuestionNumber.eq(question_number))
            .one(db)
            .await
    }

    pub async fn find_for_sheet<C: ConnectionTrait>(
        db: &C,
        answer_sheet_id: i64,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::AnswerSheetId.eq(answer_sheet_id))
            .order_by_asc(Column::QuestionNumber)
            .all(db)
            .await
    }
}
