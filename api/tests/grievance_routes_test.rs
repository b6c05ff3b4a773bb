mod helpers;

use api::auth::generate_jwt;
use axum::http::StatusCode;
use db::models::answer_sheet::{MarkEntry, Model as SheetModel};
use db::test_utils::setup_test_db;
use helpers::{TestData, authed_json, init_test_config, make_app, response_json, setup_test_data};
use sea_orm::DatabaseConnection;
use tower::ServiceExt;

async fn graded_world() -> (DatabaseConnection, TestData) {
    let db = setup_test_db().await;
    let data = setup_test_data(&db).await;

    let marks = vec![
        MarkEntry {
            question_number: 1,
            max_marks: 10,
            obtained_marks: 6,
            comments: None,
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
    ];
    SheetModel::grade(&db, data.sheet.id, data.teacher.id, &marks)
        .await
        .unwrap();

    (db, data)
}

fn submit_payload() -> serde_json::Value {
    serde_json::json!({
        "question_number": 3,
        "grievance_text": "The back page of question 3 was not marked",
        "current_marks": 8
    })
}

#[tokio::test]
async fn submitting_against_an_ungraded_sheet_conflicts() {
    init_test_config();
    let db = setup_test_db().await;
    let data = setup_test_data(&db).await;

    let app = make_app(db.clone());
    let (token, _) = generate_jwt(data.student.id, data.student.role);

    let response = app
        .oneshot(authed_json(
            "POST",
            &format!("/api/sheets/{}/grievances", data.sheet.id),
            &token,
            submit_payload(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn submitting_on_someone_elses_sheet_is_forbidden() {
    init_test_config();
    let (db, data) = graded_world().await;

    let app = make_app(db.clone());
    let (token, _) = generate_jwt(data.other_student.id, data.other_student.role);

    let response = app
        .oneshot(authed_json(
            "POST",
            &format!("/api/sheets/{}/grievances", data.sheet.id),
            &token,
            submit_payload(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn a_stale_marks_claim_is_a_bad_request() {
    init_test_config();
    let (db, data) = graded_world().await;

    let app = make_app(db.clone());
    let (token, _) = generate_jwt(data.student.id, data.student.role);

    let response = app
        .oneshot(authed_json(
            "POST",
            &format!("/api/sheets/{}/grievances", data.sheet.id),
            &token,
            serde_json::json!({
                "question_number": 3,
                "grievance_text": "The back page of question 3 was not marked",
                "current_marks": 5
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = response_json(response).await;
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn duplicate_open_grievances_conflict() {
    init_test_config();
    let (db, data) = graded_world().await;

    let app = make_app(db.clone());
    let (token, _) = generate_jwt(data.student.id, data.student.role);

    let response = app
        .clone()
        .oneshot(authed_json(
            "POST",
            &format!("/api/sheets/{}/grievances", data.sheet.id),
            &token,
            submit_payload(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(authed_json(
            "POST",
            &format!("/api/sheets/{}/grievances", data.sheet.id),
            &token,
            submit_payload(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn resolution_by_an_unassigned_reviewer_is_forbidden() {
    init_test_config();
    let (db, data) = graded_world().await;

    let app = make_app(db.clone());
    let (student_token, _) = generate_jwt(data.student.id, data.student.role);
    let (other_token, _) = generate_jwt(data.other_teacher.id, data.other_teacher.role);

    let response = app
        .clone()
        .oneshot(authed_json(
            "POST",
            &format!("/api/sheets/{}/grievances", data.sheet.id),
            &student_token,
            submit_payload(),
        ))
        .await
        .unwrap();
    let grievance_id = response_json(response).await["data"]["id"].as_i64().unwrap();

    let response = app
        .oneshot(authed_json(
            "PUT",
            &format!("/api/grievances/{grievance_id}/resolve"),
            &other_token,
            serde_json::json!({ "response": "mine now", "updated_marks": 9 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn transitions_on_an_unknown_grievance_are_not_found() {
    init_test_config();
    let (db, data) = graded_world().await;

    let app = make_app(db.clone());
    let (token, _) = generate_jwt(data.teacher.id, data.teacher.role);

    let response = app
        .oneshot(authed_json(
            "PUT",
            "/api/grievances/424242/reject",
            &token,
            serde_json::json!({ "response": "no such dispute" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
