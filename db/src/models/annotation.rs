use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::DeriveActiveEnum;
use sea_orm::QueryFilter;
use sea_orm::entity::prelude::*;
use sea_orm::QueryOrder;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A visual note pinned to a page position of an answer sheet PDF.
///
/// Annotations are append-only and advisory: they never feed into marks and
/// never gate a grading or grievance transition.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "annotations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub answer_sheet_id: i64,

    pub page_number: i32,
    pub x: f64,
    pub y: f64,

    pub annotation_type: AnnotationType,
    pub content: String,
    pub color: String,

    pub created_by: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "annotation_type")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AnnotationType {
    #[sea_orm(string_value = "mark")]
    Mark,

    #[sea_orm(string_value = "comment")]
    Comment,

    #[sea_orm(string_value = "highlight")]
    Highlight,
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
        from = "Column::CreatedBy",
        to = "super::user::Column::Id"
    )]
    Author,
}

impl Related<super::answer_sheet::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AnswerSheet.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        db: &DbConn,
        answer_sheet_id: i64,
        page_number: i32,
        x: f64,
        y: f64,
        annotation_type: AnnotationType,
        content: &str,
        color: &str,
        created_by: i64,
    ) -> Result<Model, DbErr> {
        let active = ActiveModel {
            answer_sheet_id: Set(answer_sheet_id),
            page_number: Set(page_number),
            x: Set(x),
            y: Set(y),
            annotation_type: Set(annotation_type),
            content: Set(content.to_owned()),
            color: Set(color.to_owned()),
            created_by: Set(created_by),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        active.insert(db).await
    }

    pub async fn find_for_sheet(
        db: &DbConn,
        answer_sheet_id: i64,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::AnswerSheetId.eq(answer_sheet_id))
            .order_by_asc(Column::PageNumber)
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }
}
