//! Staff member CRUD over the HTTP surface.

use reqwest::StatusCode;
use serde_json::{Value, json};

use salon_admin_integration_tests::TestApp;

#[tokio::test]
async fn create_returns_the_new_member_with_empty_events() {
    let app = TestApp::spawn().await;
    app.login_as_admin().await;

    let body = app.create_user("Ana").await;
    assert_eq!(body["data"]["name"], "Ana");
    assert!(body["data"]["id"].is_string());
    assert!(body["data"]["picturePath"].is_null());
    assert_eq!(body["data"]["events"], json!([]));
    assert_eq!(body["message"], "User created successfully");
}

#[tokio::test]
async fn empty_name_is_rejected_with_field_details_and_no_write() {
    let app = TestApp::spawn().await;
    app.login_as_admin().await;

    let response = app
        .client
        .post(app.url("/api/v1/user"))
        .json(&json!({ "name": "" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"]["kind"], "validation_error");
    assert_eq!(body["error"]["details"][0]["field"], "name");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn list_paginates_from_the_second_page() {
    let app = TestApp::spawn().await;
    app.login_as_admin().await;

    for name in ["Ana", "Bia", "Caio", "Duda", "Enzo"] {
        app.create_user(name).await;
    }

    let response = app
        .client
        .get(app.url("/api/v1/user"))
        .query(&[
            ("sortBy", "name"),
            ("sortOrder", "asc"),
            ("limit", "2"),
            ("page", "2"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Caio", "Duda"]);
}

#[tokio::test]
async fn search_matches_name_substrings() {
    let app = TestApp::spawn().await;
    app.login_as_admin().await;

    app.create_user("Mariana").await;
    app.create_user("Marcos").await;
    app.create_user("Pedro").await;

    let response = app
        .client
        .get(app.url("/api/v1/user"))
        .query(&[("search", "Mar")])
        .send()
        .await
        .unwrap();

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn malformed_query_strings_use_the_error_envelope() {
    let app = TestApp::spawn().await;
    app.login_as_admin().await;

    for params in [("page", "abc"), ("sortOrder", "up"), ("limit", "many")] {
        let response = app
            .client
            .get(app.url("/api/v1/user"))
            .query(&[params])
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // Must be the uniform envelope, never axum's plain-text default
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"]["kind"], "validation_error");
        assert!(body["error"]["message"].is_string());
    }
}

#[tokio::test]
async fn out_of_range_page_numbers_are_rejected() {
    let app = TestApp::spawn().await;
    app.login_as_admin().await;

    for page in ["9223372036854775807", "0", "-1"] {
        let response = app
            .client
            .get(app.url("/api/v1/user"))
            .query(&[("page", page), ("limit", "10")])
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"]["kind"], "validation_error");
    }
}

#[tokio::test]
async fn unknown_sort_key_is_rejected() {
    let app = TestApp::spawn().await;
    app.login_as_admin().await;

    let response = app
        .client
        .get(app.url("/api/v1/user"))
        .query(&[("sortBy", "password")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"]["kind"], "validation_error");
}

#[tokio::test]
async fn get_missing_member_is_null_data_not_an_error() {
    let app = TestApp::spawn().await;
    app.login_as_admin().await;

    let response = app
        .client
        .get(app.url("/api/v1/user/no-such-id"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn update_changes_only_the_sent_fields() {
    let app = TestApp::spawn().await;
    app.login_as_admin().await;

    let created = app.create_user("Ana").await;
    let id = created["data"]["id"].as_str().unwrap();

    let response = app
        .client
        .put(app.url(&format!("/api/v1/user/{id}")))
        .json(&json!({ "picturePath": "/img/ana.png" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["name"], "Ana");
    assert_eq!(body["data"]["picturePath"], "/img/ana.png");

    // Explicit null clears the picture again
    let cleared = app
        .client
        .put(app.url(&format!("/api/v1/user/{id}")))
        .json(&json!({ "picturePath": null }))
        .send()
        .await
        .unwrap();
    let body: Value = cleared.json().await.unwrap();
    assert!(body["data"]["picturePath"].is_null());
}

#[tokio::test]
async fn update_of_a_missing_member_is_not_found() {
    let app = TestApp::spawn().await;
    app.login_as_admin().await;

    let response = app
        .client
        .put(app.url("/api/v1/user/no-such-id"))
        .json(&json!({ "name": "Ghost" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"]["kind"], "not_found");
}

#[tokio::test]
async fn delete_orphans_events_instead_of_deleting_them() {
    let app = TestApp::spawn().await;
    app.login_as_admin().await;

    let created = app.create_user("Ana").await;
    let user_id = created["data"]["id"].as_str().unwrap().to_owned();
    let event = app.create_event("Haircut", &user_id).await;
    let event_id = event["data"]["id"].as_str().unwrap().to_owned();

    let response = app
        .client
        .delete(app.url(&format!("/api/v1/user/{user_id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["id"], user_id);

    // The event row survives with its owner cleared
    let event = app
        .client
        .get(app.url(&format!("/api/v1/event/{event_id}")))
        .send()
        .await
        .unwrap();
    let body: Value = event.json().await.unwrap();
    assert_eq!(body["data"]["title"], "Haircut");
    assert!(body["data"]["userId"].is_null());
    assert!(body["data"]["user"].is_null());
}

#[tokio::test]
async fn delete_of_a_missing_member_is_not_found() {
    let app = TestApp::spawn().await;
    app.login_as_admin().await;

    let response = app
        .client
        .delete(app.url("/api/v1/user/no-such-id"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn member_reads_embed_events_ordered_by_start_date() {
    let app = TestApp::spawn().await;
    app.login_as_admin().await;

    let created = app.create_user("Ana").await;
    let user_id = created["data"]["id"].as_str().unwrap().to_owned();

    for (title, start) in [
        ("Later", "2025-06-02T10:00:00Z"),
        ("Earlier", "2025-06-01T08:00:00Z"),
    ] {
        let response = app
            .client
            .post(app.url("/api/v1/event"))
            .json(&json!({
                "title": title,
                "description": "scheduled appointment",
                "startDate": start,
                "endDate": "2025-06-02T11:00:00Z",
                "userId": user_id,
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .client
        .get(app.url(&format!("/api/v1/user/{user_id}")))
        .send()
        .await
        .unwrap();
    let body: Value = response.json().await.unwrap();
    let titles: Vec<&str> = body["data"]["events"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Earlier", "Later"]);
}
