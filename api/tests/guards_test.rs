mod helpers;

use api::auth::generate_jwt;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use db::test_utils::setup_test_db;
use helpers::{authed_get, init_test_config, make_app, setup_test_data};
use tower::ServiceExt;

#[tokio::test]
async fn missing_token_is_unauthorized() {
    init_test_config();
    let db = setup_test_db().await;
    let _data = setup_test_data(&db).await;

    let app = make_app(db.clone());
    let req = Request::builder()
        .uri("/api/me/grievances")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn garbage_token_is_unauthorized() {
    init_test_config();
    let db = setup_test_db().await;
    let _data = setup_test_data(&db).await;

    let app = make_app(db.clone());
    let response = app
        .oneshot(authed_get("/api/me/grievances", "not-a-jwt"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_routes_reject_teachers_and_students() {
    init_test_config();
    let db = setup_test_db().await;
    let data = setup_test_data(&db).await;

    let app = make_app(db.clone());

    for user in [&data.teacher, &data.student] {
        let (token, _) = generate_jwt(user.id, user.role);
        let response = app
            .clone()
            .oneshot(authed_get("/api/users", &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    let (token, _) = generate_jwt(data.admin.id, data.admin.role);
    let response = app.oneshot(authed_get("/api/users", &token)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn grievance_review_routes_reject_students() {
    init_test_config();
    let db = setup_test_db().await;
    let data = setup_test_data(&db).await;

    let app = make_app(db.clone());
    let (token, _) = generate_jwt(data.student.id, data.student.role);

    let req = helpers::authed_json(
        "PUT",
        "/api/grievances/1/reject",
        &token,
        serde_json::json!({ "response": "no" }),
    );
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn grievance_submission_rejects_teachers() {
    init_test_config();
    let db = setup_test_db().await;
    let data = setup_test_data(&db).await;

    let app = make_app(db.clone());
    let (token, _) = generate_jwt(data.teacher.id, data.teacher.role);

    let req = helpers::authed_json(
        "POST",
        &format!("/api/sheets/{}/grievances", data.sheet.id),
        &token,
        serde_json::json!({
            "question_number": 1,
            "grievance_text": "teachers cannot file grievances",
            "current_marks": 0
        }),
    );
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
