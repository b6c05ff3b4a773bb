mod helpers;

use api::auth::generate_jwt;
use axum::http::StatusCode;
use db::test_utils::setup_test_db;
use helpers::{authed_get, authed_json, init_test_config, make_app, response_json, setup_test_data};
use tower::ServiceExt;

#[tokio::test]
async fn assigning_and_listing_round_trips() {
    init_test_config();
    let db = setup_test_db().await;
    let data = setup_test_data(&db).await;

    let app = make_app(db.clone());
    let (admin_token, _) = generate_jwt(data.admin.id, data.admin.role);

    let response = app
        .clone()
        .oneshot(authed_json(
            "POST",
            &format!("/api/exams/{}/assignments", data.exam.id),
            &admin_token,
            serde_json::json!({
                "teacher_id": data.other_teacher.id,
                "questions": [4, 5, 6],
                "marks_per_question": { "4": 10, "5": 10, "6": 10 }
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = response_json(response).await;
    assert_eq!(json["data"]["questions"], serde_json::json!([4, 5, 6]));

    let (teacher_token, _) = generate_jwt(data.teacher.id, data.teacher.role);
    let response = app
        .oneshot(authed_get(
            &format!("/api/exams/{}/assignments", data.exam.id),
            &teacher_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn overlapping_assignments_conflict() {
    init_test_config();
    let db = setup_test_db().await;
    let data = setup_test_data(&db).await;

    let app = make_app(db.clone());
    let (admin_token, _) = generate_jwt(data.admin.id, data.admin.role);

    // Question 3 already belongs to the fixture teacher.
    let response = app
        .oneshot(authed_json(
            "POST",
            &format!("/api/exams/{}/assignments", data.exam.id),
            &admin_token,
            serde_json::json!({
                "teacher_id": data.other_teacher.id,
                "questions": [3, 4],
                "marks_per_question": { "3": 10, "4": 10 }
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn assignment_creation_is_admin_only() {
    init_test_config();
    let db = setup_test_db().await;
    let data = setup_test_data(&db).await;

    let app = make_app(db.clone());
    let (teacher_token, _) = generate_jwt(data.teacher.id, data.teacher.role);

    let response = app
        .oneshot(authed_json(
            "POST",
            &format!("/api/exams/{}/assignments", data.exam.id),
            &teacher_token,
            serde_json::json!({
                "teacher_id": data.teacher.id,
                "questions": [7],
                "marks_per_question": { "7": 10 }
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn exams_can_be_created_by_admins_over_http() {
    init_test_config();
    let db = setup_test_db().await;
    let data = setup_test_data(&db).await;

    let app = make_app(db.clone());
    let (admin_token, _) = generate_jwt(data.admin.id, data.admin.role);

    let response = app
        .oneshot(authed_json(
            "POST",
            "/api/exams",
            &admin_token,
            serde_json::json!({
                "subject_id": data.subject.id,
                "name": "Endsem 2026",
                "exam_date": "2026-11-20T09:00:00Z",
                "duration_minutes": 180,
                "total_marks": 60
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = response_json(response).await;
    assert_eq!(json["data"]["name"], "Endsem 2026");
    assert_eq!(json["data"]["total_marks"], 60);
}
