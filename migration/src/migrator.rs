use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202607010001_create_departments::Migration),
            Box::new(migrations::m202607010002_create_users::Migration),
            Box::new(migrations::m202607010003_create_subjects::Migration),
            Box::new(migrations::m202607010004_create_exams::Migration),
            Box::new(migrations::m202607010005_create_exam_teacher_assignments::Migration),
            Box::new(migrations::m202607010006_create_answer_sheets::Migration),
            Box::new(migrations::m202607010007_create_question_marks::Migration),
            Box::new(migrations::m202607010008_create_annotations::Migration),
            Box::new(migrations::m202607010009_create_grievances::Migration),
        ]
    }
}
