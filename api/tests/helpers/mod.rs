use std::collections::{BTreeMap, BTreeSet};

use api::routes::routes;
use axum::{
    Router,
    body::Body,
    http::{Request, header},
};
use chrono::Utc;
use db::models::answer_sheet::Model as SheetModel;
use db::models::department::Model as DepartmentModel;
use db::models::exam::Model as ExamModel;
use db::models::exam_teacher_assignment::Model as AssignmentModel;
use db::models::subject::Model as SubjectModel;
use db::models::user::{Model as UserModel, Role};
use sea_orm::DatabaseConnection;
use util::{config::AppConfig, state::AppState};

/// Points the global config at harmless test values before anything reads it.
/// Safe to call from every test; later calls just overwrite the same fields.
pub fn init_test_config() {
    unsafe {
        std::env::set_var("DATABASE_PATH", "data/test.db");
        std::env::set_var("SHEET_STORAGE_ROOT", "data/sheets");
        std::env::set_var("JWT_SECRET", "test-secret-key");
    }
    AppConfig::set_jwt_secret("test-secret-key");
    AppConfig::set_jwt_duration_minutes(60);
}

pub fn make_app(db: DatabaseConnection) -> Router {
    Router::new().nest("/api", routes(AppState::new(db)))
}

/// Standard world for route tests: one department/subject/exam, a teacher
/// assigned to questions 1-3 (10 marks each), and one pending sheet.
pub struct TestData {
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

pub async fn setup_test_data(db: &DatabaseConnection) -> TestData {
    let department = DepartmentModel::create(db, "Computer Science", "CS")
        .await
        .unwrap();

    let admin = UserModel::create(db, "admin1", "admin1@test.com", "password", Role::Admin, None)
        .await
        .unwrap();
    let teacher = UserModel::create(
        db,
        "teacher1",
        "teacher1@test.com",
        "password",
        Role::Teacher,
        Some(department.id),
    )
    .await
    .unwrap();
    let other_teacher = UserModel::create(
        db,
        "teacher2",
        "teacher2@test.com",
        "password",
        Role::Teacher,
        Some(department.id),
    )
    .await
    .unwrap();
    let student = UserModel::create(
        db,
        "student1",
        "student1@test.com",
        "password",
        Role::Student,
        Some(department.id),
    )
    .await
    .unwrap();
    let other_student = UserModel::create(
        db,
        "student2",
        "student2@test.com",
        "password",
        Role::Student,
        Some(department.id),
    )
    .await
    .unwrap();

    let subject = SubjectModel::create(db, department.id, "Data Structures", "CS201", "S1")
        .await
        .unwrap();
    let exam = ExamModel::create(db, subject.id, "Midsem 2026", Utc::now(), 120, 30, admin.id)
        .await
        .unwrap();

    AssignmentModel::assign(
        db,
        exam.id,
        teacher.id,
        &BTreeSet::from([1, 2, 3]),
        &BTreeMap::from([(1, 10), (2, 10), (3, 10)]),
    )
    .await
    .unwrap();

    let sheet = SheetModel::upload(
        db,
        exam.id,
        student.id,
        "exam_1/sheet_1/answer.pdf",
        exam.total_marks,
    )
    .await
    .unwrap();

    TestData {
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

/// Builds a GET request with a Bearer token.
pub fn authed_get(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

/// Builds a JSON request with a Bearer token.
pub fn authed_json(
    method: &str,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
