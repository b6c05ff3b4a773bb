use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::Serialize;

/// An examination sitting for one subject.
///
/// `total_marks` is the paper total; individual answer sheets copy it at
/// upload time so re-structuring an exam later never rewrites history.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "exams")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub subject_id: i64,

    pub name: String,
    pub exam_date: DateTime<Utc>,
    pub duration_minutes: i32,
    pub total_marks: i64,

    /// Opaque storage reference to the uploaded question paper, if any.
    pub question_paper_path: Option<String>,

    pub created_by: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subject::Entity",
        from = "Column::SubjectId",
        to = "super::subject::Column::Id"
    )]
    Subject,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatedBy",
        to = "super::user::Column::Id"
    )]
    Creator,

    #[sea_orm(has_many = "super::answer_sheet::Entity")]
    AnswerSheet,

    #[sea_orm(has_many = "super::exam_teacher_assignment::Entity")]
    TeacherAssignment,
}

impl Related<super::subject::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl Related<super::answer_sheet::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AnswerSheet.def()
    }
}

impl Related<super::exam_teacher_assignment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TeacherAssignment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        db: &DbConn,
        subject_id: i64,
        name: &str,
        exam_date: DateTime<Utc>,
        duration_minutes: i32,
        total_marks: i64,
        created_by: i64,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();

        let active_model = ActiveModel {
            subject_id: Set(subject_id),
            name: Set(name.to_owned()),
            exam_date: Set(exam_date),
            duration_minutes: Set(duration_minutes),
            total_marks: Set(total_marks),
            question_paper_path: Set(None),
            created_by: Set(created_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        active_model.insert(db).await
    }

    pub async fn set_question_paper(
        db: &DbConn,
        exam_id: i64,
        path: &str,
    ) -> Result<Model, DbErr> {
        let model = Entity::find_by_id(exam_id).one(db).await?;

        let model = match model {
            Some(m) => m,
            None => return Err(DbErr::RecordNotFound("Exam not found".to_string())),
        };

        let mut active_model: ActiveModel = model.into();
        active_model.question_paper_path = Set(Some(path.to_owned()));
        active_model.updated_at = Set(Utc::now());
        active_model.update(db).await
    }
}
