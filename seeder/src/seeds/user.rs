use crate::seed::Seeder;
use db::error::DomainError;
use db::models::department;
use db::models::user::{Model as UserModel, Role};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sea_orm::{DatabaseConnection, EntityTrait};
use std::future::Future;
use std::pin::Pin;

pub struct UserSeeder;

impl Seeder for UserSeeder {
    fn seed<'a>(
        &'a self,
        db: &'a DatabaseConnection,
    ) -> Pin<Box<dyn Future<Output = Result<(), DomainError>> + Send + 'a>> {
        Box::pin(async move {
            let mut rng = StdRng::seed_from_u64(42);
            let departments = department::Entity::find().all(db).await?;

            UserModel::create(
                db,
                "controller",
                "controller@regrade.test",
                "password123",
                Role::Admin,
                None,
            )
            .await?;

            for i in 1..=6 {
                let dept = &departments[rng.gen_range(0..departments.len())];
                UserModel::create(
                    db,
                    &format!("teacher{i}"),
                    &format!("teacher{i}@regrade.test"),
                    "password123",
                    Role::Teacher,
                    Some(dept.id),
                )
                .await?;
            }

            for i in 1..=30 {
                let dept = &departments[rng.gen_range(0..departments.len())];
                UserModel::create(
                    db,
                    &format!("student{i}"),
                    &format!("student{i}@regrade.test"),
                    "password123",
                    Role::Student,
                    Some(dept.id),
                )
                .await?;
            }

            Ok(())
        })
    }
}
