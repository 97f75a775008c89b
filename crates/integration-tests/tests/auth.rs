//! Login, logout, and session guard behavior.

use reqwest::StatusCode;
use serde_json::Value;

use salon_admin_integration_tests::{ADMIN_EMAIL, ADMIN_PASSWORD, TestApp};

#[tokio::test]
async fn login_returns_admin_without_password() {
    let app = TestApp::spawn().await;
    app.seed_admin(ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let response = app.login(ADMIN_EMAIL, ADMIN_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["email"], ADMIN_EMAIL);
    assert!(body["data"]["id"].is_string());
    assert!(
        body["data"].get("password").is_none(),
        "hash must never leave the server"
    );
}

#[tokio::test]
async fn wrong_password_and_unknown_email_are_indistinguishable() {
    let app = TestApp::spawn().await;
    app.seed_admin(ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let wrong_password = app.login(ADMIN_EMAIL, "not-the-password").await;
    let unknown_email = app.login("ghost@email.com", ADMIN_PASSWORD).await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);

    let a: Value = wrong_password.json().await.unwrap();
    let b: Value = unknown_email.json().await.unwrap();
    assert_eq!(a, b, "failure responses must not reveal which half failed");
    assert_eq!(a["error"]["kind"], "invalid_credentials");
}

#[tokio::test]
async fn malformed_email_is_rejected_before_authentication() {
    let app = TestApp::spawn().await;

    let response = app.login("not-an-email", "whatever").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"]["kind"], "validation_error");
    assert_eq!(body["error"]["details"][0]["field"], "email");
}

#[tokio::test]
async fn guarded_routes_require_a_session() {
    let app = TestApp::spawn().await;

    for path in ["/api/v1/user", "/api/v1/event"] {
        let response = app.client.get(app.url(path)).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"]["kind"], "unauthenticated");
    }
}

#[tokio::test]
async fn logout_ends_the_session() {
    let app = TestApp::spawn().await;
    app.login_as_admin().await;

    // Session works before logout
    let before = app.client.get(app.url("/api/v1/user")).send().await.unwrap();
    assert_eq!(before.status(), StatusCode::OK);

    let logout = app
        .client
        .post(app.url("/api/v1/auth/logout"))
        .send()
        .await
        .unwrap();
    assert_eq!(logout.status(), StatusCode::OK);

    let after = app.client.get(app.url("/api/v1/user")).send().await.unwrap();
    assert_eq!(after.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn deleting_the_admin_revokes_the_session() {
    let app = TestApp::spawn().await;
    let admin_id = app.login_as_admin().await;

    sqlx::query("DELETE FROM admins WHERE id = ?")
        .bind(admin_id.as_str())
        .execute(&app.pool)
        .await
        .unwrap();

    let response = app.client.get(app.url("/api/v1/user")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"]["kind"], "unauthenticated");
}

#[tokio::test]
async fn health_endpoints_are_public() {
    let app = TestApp::spawn().await;

    let live = app.client.get(app.url("/health")).send().await.unwrap();
    assert_eq!(live.status(), StatusCode::OK);

    let ready = app.client.get(app.url("/health/ready")).send().await.unwrap();
    assert_eq!(ready.status(), StatusCode::OK);
}
