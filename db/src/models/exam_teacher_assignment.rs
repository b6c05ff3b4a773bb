use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::QueryFilter;
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, ConnectionTrait, IntoActiveModel};
use serde::Serialize;

use crate::error::DomainError;

/// Maps a teacher to the question range they grade on one exam.
///
/// `assigned_questions` is a JSON array of question numbers and
/// `marks_per_question` a JSON object mapping question number to the maximum
/// marks for that question. The two key sets are kept identical by
/// [`Model::assign`]; rows created anywhere else bypass that invariant and
/// have no place in this schema.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "exam_teacher_assignments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub exam_id: i64,
    pub teacher_id: i64,

    pub assigned_questions: Json,
    pub marks_per_question: Json,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
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
        from = "Column::TeacherId",
        to = "super::user::Column::Id"
    )]
    Teacher,
}

impl Related<super::exam::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Exam.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// The question numbers this row covers, as a typed set.
    pub fn question_set(&self) -> BTreeSet<i64> {
        self.assigned_questions
            .as_array()
            .map(|arr| arr.iter().filter_map(|v| v.as_i64()).collect())
            .unwrap_or_default()
    }

    /// The per-question maximum marks, as a typed map.
    pub fn marks_map(&self) -> BTreeMap<i64, i64> {
        self.marks_per_question
            .as_object()
            .map(|obj| {
                obj.iter()
                    .filter_map(|(k, v)| Some((k.parse::<i64>().ok()?, v.as_i64()?)))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Creates or replaces a teacher's assignment for an exam.
    ///
    /// Validates that `questions` and the keys of `marks_per_question` are
    /// identical sets of positive question numbers, and that no question is
    /// already held by a *different* teacher on the same exam. Re-assigning
    /// the same teacher replaces their question set wholesale.
    pub async fn assign<C: ConnectionTrait>(
        db: &C,
        exam_id: i64,
        teacher_id: i64,
        questions: &BTreeSet<i64>,
        marks_per_question: &BTreeMap<i64, i64>,
    ) -> Result<Model, DomainError> {
        if questions.is_empty() {
            return Err(DomainError::InvalidAssignment(
                "at least one question must be assigned".into(),
            ));
        }

        if let Some(&q) = questions.iter().find(|&&q| q <= 0) {
            return Err(DomainError::InvalidAssignment(format!(
                "question numbers must be positive, got {q}"
            )));
        }

        let mark_keys: BTreeSet<i64> = marks_per_question.keys().copied().collect();
        if mark_keys != *questions {
            return Err(DomainError::InvalidAssignment(
                "assigned questions and marks-per-question keys must match".into(),
            ));
        }

        if let Some((&q, &max)) = marks_per_question.iter().find(|&(_, &max)| max <= 0) {
            return Err(DomainError::InvalidAssignment(format!(
                "maximum marks for question {q} must be positive, got {max}"
            )));
        }

        // A question may be covered by at most one teacher on an exam.
        let existing = Entity::find()
            .filter(Column::ExamId.eq(exam_id))
            .all(db)
            .await?;

        for row in &existing {
            if row.teacher_id == teacher_id {
                continue;
            }
            if let Some(&q) = row.question_set().intersection(questions).next() {
                return Err(DomainError::Overlap {
                    question_number: q,
                    teacher_id: row.teacher_id,
                });
            }
        }

        let now = Utc::now();
        let questions_json = serde_json::json!(questions.iter().collect::<Vec<_>>());
        let marks_json = serde_json::Value::Object(
            marks_per_question
                .iter()
                .map(|(k, v)| (k.to_string(), serde_json::Value::from(*v)))
                .collect(),
        );

        match existing.into_iter().find(|r| r.teacher_id == teacher_id) {
            Some(row) => {
                let mut active = row.into_active_model();
                active.assigned_questions = Set(questions_json);
                active.marks_per_question = Set(marks_json);
                active.updated_at = Set(now);
                Ok(active.update(db).await?)
            }
            None => {
                let active = ActiveModel {
                    exam_id: Set(exam_id),
                    teacher_id: Set(teacher_id),
                    assigned_questions: Set(questions_json),
                    marks_per_question: Set(marks_json),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };
                Ok(active.insert(db).await?)
            }
        }
    }

    /// The question set a teacher may grade (and review grievances for) on an
    /// exam. Empty when the teacher holds no assignment.
    pub async fn authorized_questions<C: ConnectionTrait>(
        db: &C,
        exam_id: i64,
        teacher_id: i64,
    ) -> Result<BTreeSet<i64>, DomainError> {
        let row = Entity::find()
            .filter(Column::ExamId.eq(exam_id))
            .filter(Column::TeacherId.eq(teacher_id))
            .one(db)
            .await?;

        Ok(row.map(|r| r.question_set()).unwrap_or_default())
    }

    /// Maximum marks configured for a question on an exam, across all
    /// teachers' assignments. `None` when no assignment covers the question.
    pub async fn max_marks_for<C: ConnectionTrait>(
        db: &C,
        exam_id: i64,
        question_number: i64,
    ) -> Result<Option<i64>, DomainError> {
        let rows = Entity::find()
            .filter(Column::ExamId.eq(exam_id))
            .all(db)
            .await?;

        Ok(rows
            .iter()
            .find_map(|r| r.marks_map().get(&question_number).copied()))
    }

    pub async fn find_for_exam<C: ConnectionTrait>(
        db: &C,
        exam_id: i64,
    ) -> Result<Vec<Model>, DomainError> {
        Ok(Entity::find()
            .filter(Column::ExamId.eq(exam_id))
            .all(db)
            .await?)
    }

    pub async fn find_for_teacher<C: ConnectionTrait>(
        db: &C,
        teacher_id: i64,
    ) -> Result<Vec<Model>, DomainError> {
        Ok(Entity::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .all(db)
            .await?)
    }
}
