mod helpers;

use axum::http::StatusCode;
use db::test_utils::setup_test_db;
use helpers::{init_test_config, make_app, response_json, setup_test_data};
use tower::ServiceExt;

#[tokio::test]
async fn login_returns_a_token_and_the_role_claim() {
    init_test_config();
    let db = setup_test_db().await;
    let data = setup_test_data(&db).await;

    let app = make_app(db.clone());
    let req = helpers::authed_json(
        "POST",
        "/api/auth/login",
        "",
        serde_json::json!({ "email": "teacher1@test.com", "password": "password" }),
    );

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["role"], "teacher");
    assert_eq!(json["data"]["id"], data.teacher.id);
    assert!(json["data"]["token"].as_str().unwrap().len() > 20);
}

#[tokio::test]
async fn login_with_a_wrong_password_is_unauthorized() {
    init_test_config();
    let db = setup_test_db().await;
    let _data = setup_test_data(&db).await;

    let app = make_app(db.clone());
    let req = helpers::authed_json(
        "POST",
        "/api/auth/login",
        "",
        serde_json::json!({ "email": "teacher1@test.com", "password": "nope" }),
    );

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = response_json(response).await;
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn login_validates_the_email_format() {
    init_test_config();
    let db = setup_test_db().await;

    let app = make_app(db.clone());
    let req = helpers::authed_json(
        "POST",
        "/api/auth/login",
        "",
        serde_json::json!({ "email": "not-an-email", "password": "password" }),
    );

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
