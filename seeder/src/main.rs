use crate::seed::{Seeder, run_seeder};
use crate::seeds::{
    answer_sheet::AnswerSheetSeeder, assignment::AssignmentSeeder, department::DepartmentSeeder,
    exam::ExamSeeder, subject::SubjectSeeder, user::UserSeeder,
};

mod seed;
mod seeds;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let db = db::connect().await;

    for (seeder, name) in [
        (
            Box::new(DepartmentSeeder) as Box<dyn Seeder + Send + Sync>,
            "Department",
        ),
        (Box::new(UserSeeder), "User"),
        (Box::new(SubjectSeeder), "Subject"),
        (Box::new(ExamSeeder), "Exam"),
        (Box::new(AssignmentSeeder), "Assignment"),
        (Box::new(AnswerSheetSeeder), "AnswerSheet"),
    ] {
        run_seeder(&*seeder, name, &db).await;
    }
}
