use crate::seed::Seeder;
use chrono::{Duration, Utc};
use db::error::DomainError;
use db::models::exam::Model as ExamModel;
use db::models::subject;
use db::models::user::{self, Role};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use std::future::Future;
use std::pin::Pin;

pub struct ExamSeeder;

impl Seeder for ExamSeeder {
    fn seed<'a>(
        &'a self,
        db: &'a DatabaseConnection,
    ) -> Pin<Box<dyn Future<Output = Result<(), DomainError>> + Send + 'a>> {
        Box::pin(async move {
            let admin = user::Entity::find()
                .filter(user::Column::Role.eq(Role::Admin))
                .one(db)
                .await?
                .expect("UserSeeder must run before ExamSeeder");

            let subjects = subject::Entity::find().all(db).await?;

            for (i, subject) in subjects.iter().enumerate() {
                let exam_date = Utc::now() + Duration::days(7 + i as i64);
                ExamModel::create(
                    db,
                    subject.id,
                    &format!("{} Midsem 2026", subject.code),
                    exam_date,
                    120,
                    30,
                    admin.id,
                )
                .await?;
            }
            Ok(())
        })
    }
}
