use crate::seed::Seeder;
use db::error::DomainError;
use db::models::department::Model as DepartmentModel;
use sea_orm::DatabaseConnection;
use std::future::Future;
use std::pin::Pin;

pub struct DepartmentSeeder;

impl Seeder for DepartmentSeeder {
    fn seed<'a>(
        &'a self,
        db: &'a DatabaseConnection,
    ) -> Pin<Box<dyn Future<Output = Result<(), DomainError>> + Send + 'a>> {
        Box::pin(async move {
            for (name, code) in [
                ("Computer Science", "CS"),
                ("Mathematics", "MATH"),
                ("Physics", "PHY"),
            ] {
                DepartmentModel::create(db, name, code).await?;
            }
            Ok(())
        })
    }
}
