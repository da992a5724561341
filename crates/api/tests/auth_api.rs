//! Integration tests for login, logout and role-gated navigation.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, get_as, post_as, put_as, send, ADMIN_PASSWORD};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn student_logs_in_without_password(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = send(
        &app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({ "role": "student" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["role"], "student");
    assert_eq!(json["data"]["active_view"], "form");
    assert_eq!(json["data"]["allowed_views"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"]["project_count"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_login_lands_on_analytics(pool: PgPool) {
    let app = common::build_test_app(pool);
    let session = common::login_admin(&app).await;

    let json = body_json(get_as(&app, "/api/v1/session", &session).await).await;
    assert_eq!(json["data"]["role"], "admin");
    assert_eq!(json["data"]["active_view"], "analytics");
    assert_eq!(json["data"]["allowed_views"].as_array().unwrap().len(), 4);
    assert_eq!(json["data"]["allowed_views"][0]["label"], "Dashboard");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_wrong_password_is_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = send(
        &app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({ "role": "admin", "password": "guess" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");

    // Retrying with the right password works.
    common::login_admin(&app).await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_login_without_configured_hash_is_500(pool: PgPool) {
    let mut config = common::test_config();
    config.admin_password_hash = None;
    let app = common::build_test_app_with_config(pool, config);

    let response = send(
        &app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({ "role": "admin", "password": ADMIN_PASSWORD })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFIGURATION_ERROR");
    assert_eq!(json["error"], "Server configuration error");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_role_is_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = send(
        &app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({ "role": "coordinator" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_or_bogus_session_is_401(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = send(&app, Method::GET, "/api/v1/session", None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_as(&app, "/api/v1/session", "not-a-uuid").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_as(&app, "/api/v1/session", &uuid::Uuid::new_v4().to_string()).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn logout_closes_session(pool: PgPool) {
    let app = common::build_test_app(pool);
    let session = common::login_student(&app).await;

    let response = post_as(&app, "/api/v1/auth/logout", &session, None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_as(&app, "/api/v1/session", &session).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn student_cannot_switch_to_admin_views(pool: PgPool) {
    let app = common::build_test_app(pool);
    let session = common::login_student(&app).await;

    let response = put_as(&app, "/api/v1/session/view", &session, json!({ "view": "analytics" })).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    for uri in ["/api/v1/analytics", "/api/v1/projects/history", "/api/v1/approvals"] {
        let response = get_as(&app, uri, &session).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "{uri}");
    }

    let json = body_json(get_as(&app, "/api/v1/session", &session).await).await;
    assert_eq!(json["data"]["active_view"], "form");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_switches_views(pool: PgPool) {
    let app = common::build_test_app(pool);
    let session = common::login_admin(&app).await;

    let response = put_as(&app, "/api/v1/session/view", &session, json!({ "view": "history" })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["active_view"], "history");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn idle_session_key_is_401(pool: PgPool) {
    let mut config = common::test_config();
    config.session_idle_timeout_secs = 0;
    let app = common::build_test_app_with_config(pool, config);
    let session = common::login_student(&app).await;

    let response = get_as(&app, "/api/v1/session", &session).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}
