use crate::seed::Seeder;
use db::error::DomainError;
use db::models::exam;
use db::models::exam_teacher_assignment::Model as AssignmentModel;
use db::models::user::{self, Role};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use std::collections::{BTreeMap, BTreeSet};
use std::future::Future;
use std::pin::Pin;

pub struct AssignmentSeeder;

impl Seeder for AssignmentSeeder {
    fn seed<'a>(
        &'a self,
        db: &'a DatabaseConnection,
    ) -> Pin<Box<dyn Future<Output = Result<(), DomainError>> + Send + 'a>> {
        Box::pin(async move {
            let mut rng = StdRng::seed_from_u64(7);

            let teachers = user::Entity::find()
                .filter(user::Column::Role.eq(Role::Teacher))
                .all(db)
                .await?;
            let exams = exam::Entity::find().all(db).await?;

            // Two graders per exam: questions 1-3 and 4-6, five marks each.
            for exam in &exams {
                let mut pool: Vec<_> = teachers.iter().collect();
                pool.shuffle(&mut rng);

                let front: BTreeSet<i64> = BTreeSet::from([1, 2, 3]);
                let back: BTreeSet<i64> = BTreeSet::from([4, 5, 6]);
                let marks = |qs: &BTreeSet<i64>| -> BTreeMap<i64, i64> {
                    qs.iter().map(|&q| (q, 5)).collect()
                };

                AssignmentModel::assign(db, exam.id, pool[0].id, &front, &marks(&front)).await?;
                AssignmentModel::assign(db, exam.id, pool[1].id, &back, &marks(&back)).await?;
            }
            Ok(())
        })
    }
}
