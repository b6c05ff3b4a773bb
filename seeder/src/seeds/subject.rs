use crate::seed::Seeder;
use db::error::DomainError;
use db::models::department;
use db::models::subject::Model as SubjectModel;
use sea_orm::{DatabaseConnection, EntityTrait};
use std::future::Future;
use std::pin::Pin;

pub struct SubjectSeeder;

const SUBJECTS: &[(&str, &str, &str)] = &[
    ("CS", "Data Structures", "CS201"),
    ("CS", "Operating Systems", "CS301"),
    ("MATH", "Linear Algebra", "MATH210"),
    ("MATH", "Real Analysis", "MATH320"),
    ("PHY", "Classical Mechanics", "PHY110"),
    ("PHY", "Electromagnetism", "PHY220"),
];

impl Seeder for SubjectSeeder {
    fn seed<'a>(
        &'a self,
        db: &'a DatabaseConnection,
    ) -> Pin<Box<dyn Future<Output = Result<(), DomainError>> + Send + 'a>> {
        Box::pin(async move {
            let departments = department::Entity::find().all(db).await?;

            for (dept_code, name, code) in SUBJECTS {
                let Some(dept) = departments.iter().find(|d| d.code == *dept_code) else {
                    continue;
                };
                SubjectModel::create(db, dept.id, name, code, "S1").await?;
            }
            Ok(())
        })
    }
}
