use crate::seed::Seeder;
use db::error::DomainError;
use db::models::answer_sheet::{MarkEntry, Model as SheetModel};
use db::models::exam;
use db::models::exam_teacher_assignment::Model as AssignmentModel;
use db::models::grievance::Model as GrievanceModel;
use db::models::user::{self, Role};
use fake::Fake;
use fake::faker::lorem::en::Sentence;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use std::future::Future;
use std::pin::Pin;

pub struct AnswerSheetSeeder;

impl Seeder for AnswerSheetSeeder {
    fn seed<'a>(
        &'a self,
        db: &'a DatabaseConnection,
    ) -> Pin<Box<dyn Future<Output = Result<(), DomainError>> + Send + 'a>> {
        Box::pin(async move {
            let mut rng = StdRng::seed_from_u64(99);

            let students = user::Entity::find()
                .filter(user::Column::Role.eq(Role::Student))
                .all(db)
                .await?;
            let exams = exam::Entity::find().all(db).await?;

            for exam in &exams {
                let mut pool: Vec<_> = students.iter().collect();
                pool.shuffle(&mut rng);

                // A handful of sheets per exam; roughly half get graded so
                // both dashboard queues have content.
                for student in pool.iter().take(6) {
                    let sheet = SheetModel::upload(
                        db,
                        exam.id,
                        student.id,
                        &format!("exam_{}/sheet_{}.pdf", exam.id, student.id),
                        exam.total_marks,
                    )
                    .await?;

                    if !rng.gen_bool(0.5) {
                        continue;
                    }

                    // A completed sheet has one grader of record, so only the
                    // front-half assignment grades here.
                    let assignments = AssignmentModel::find_for_exam(db, exam.id).await?;
                    let Some(assignment) = assignments
                        .iter()
                        .find(|a| a.question_set().contains(&3))
                    else {
                        continue;
                    };
                    let entries: Vec<MarkEntry> = assignment
                        .marks_map()
                        .into_iter()
                        .map(|(q, max)| MarkEntry {
                            question_number: q,
                            max_marks: max,
                            obtained_marks: rng.gen_range(0..=max),
                            comments: None,
                        })
                        .collect();
                    SheetModel::grade(db, sheet.id, assignment.teacher_id, &entries).await?;

                    // The occasional dispute on a graded paper.
                    if rng.gen_bool(0.3) {
                        let marks =
                            db::models::question_mark::Model::find_entry(db, sheet.id, 3).await?;
                        if let Some(entry) = marks {
                            let text: String = Sentence(8..16).fake();
                            GrievanceModel::submit(
                                db,
                                student.id,
                                sheet.id,
                                3,
                                None,
                                &text,
                                entry.obtained_marks,
                            )
                            .await?;
                        }
                    }
                }
            }
            Ok(())
        })
    }
}
