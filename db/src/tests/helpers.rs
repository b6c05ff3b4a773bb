use std::collections::{BTreeMap, BTreeSet};

use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::models::answer_sheet::{MarkEntry, Model as SheetModel};
use crate::models::department::Model as DepartmentModel;
use crate::models::exam::Model as ExamModel;
use crate::models::exam_teacher_assignment::Model as AssignmentModel;
use crate::models::subject::Model as SubjectModel;
use crate::models::user::{Model as UserModel, Role};
use crate::test_utils::setup_test_db;

/// A populated world for workflow tests: one department/subject/exam, a
/// grader assigned to questions 1-3 (10 marks each), and one uploaded sheet.
pub struct Fixture {
    pub db: DatabaseConnection,
    pub admin: UserModel,
    pub teacher: UserModel,
    pub other_teacher: UserModel,
    pub student: UserModel,
    pub other_student: UserModel,
    pub department: DepartmentModel,
    pub subject: SubjectModel,
    pub exam: ExamModel,
    pub sheet: SheetModel,
}

pub async fn fixture() -> Fixture {
    let db = setup_test_db().await;

    let department = DepartmentModel::create(&db, "Computer Science", "CS")
        .await
        .unwrap();

    let admin = UserModel::create(&db, "admin1", "admin1@test.com", "password", Role::Admin, None)
        .await
        .unwrap();
    let teacher = UserModel::create(
        &db,
        "teacher1",
        "teacher1@test.com",
        "password",
        Role::Teacher,
        Some(department.id),
    )
    .await
    .unwrap();
    let other_teacher = UserModel::create(
        &db,
        "teacher2",
        "teacher2@test.com",
        "password",
        Role::Teacher,
        Some(department.id),
    )
    .await
    .unwrap();
    let student = UserModel::create(
        &db,
        "student1",
        "student1@test.com",
        "password",
        Role::Student,
        Some(department.id),
    )
    .await
    .unwrap();
    let other_student = UserModel::create(
        &db,
        "student2",
        "student2@test.com",
        "password",
        Role::Student,
        Some(department.id),
    )
    .await
    .unwrap();

    let subject = SubjectModel::create(&db, department.id, "Data Structures", "CS201", "S1")
        .await
        .unwrap();

    let exam = ExamModel::create(
        &db,
        subject.id,
        "Midsem 2026",
        Utc::now(),
        120,
        30,
        admin.id,
    )
    .await
    .unwrap();

    AssignmentModel::assign(
        &db,
        exam.id,
        teacher.id,
        &BTreeSet::from([1, 2, 3]),
        &BTreeMap::from([(1, 10), (2, 10), (3, 10)]),
    )
    .await
    .unwrap();

    let sheet = SheetModel::upload(
        &db,
        exam.id,
        student.id,
        "exam_1/sheet_1/answer.pdf",
        exam.total_marks,
    )
    .await
    .unwrap();

    Fixture {
        db,
        admin,
        teacher,
        other_teacher,
        student,
        other_student,
        department,
        subject,
        exam,
        sheet,
    }
}

/// Standard three-question grading payload summing to `6 + 7 + 8 = 21`.
pub fn standard_marks() -> Vec<MarkEntry> {
    vec![
        MarkEntry {
            question_number: 1,
            max_marks: 10,
            obtained_marks: 6,
            comments: Some("partial credit".into()),
        },
        MarkEntry {
            question_number: 2,
            max_marks: 10,
            obtained_marks: 7,
            comments: None,
        },
        MarkEntry {
            question_number: 3,
            max_marks: 10,
            obtained_marks: 8,
            comments: None,
        },
    ]
}
