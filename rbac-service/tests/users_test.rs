mod common;

use common::{as_records, TestApp};
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn create_user_appends_with_next_id() {
    let app = TestApp::spawn().await;

    let (status, alice) = app
        .post(
            "/users",
            json!({ "name": "Alice", "role": "Admin", "email": "alice@example.com", "phone": null }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        alice,
        json!({ "id": 1, "name": "Alice", "role": "Admin", "email": "alice@example.com", "phone": null })
    );

    let (_, bob) = app.post("/users", json!({ "name": "Bob", "role": "Viewer" })).await;
    assert_eq!(bob["id"], 2);

    let (status, list) = app.get("/users").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([alice, bob]));
}

#[tokio::test]
async fn create_user_accepts_body_without_fields() {
    let app = TestApp::spawn().await;

    let (status, body) = app.post("/users", json!({})).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "id": 1 }));

    let response = app
        .client
        .post(app.url("/users"))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CREATED);

    let (_, list) = app.get("/users").await;
    assert_eq!(as_records(&list).len(), 2);
}

#[tokio::test]
async fn create_user_rejects_non_object_body() {
    let app = TestApp::spawn().await;

    let (status, body) = app.post("/users", json!(["Alice"])).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Request body must be a JSON object");

    let (_, list) = app.get("/users").await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn users_have_no_update_route() {
    let app = TestApp::spawn().await;
    app.post("/users", json!({ "name": "Alice" })).await;

    let (status, _) = app.put("/users/1", json!({ "name": "Eve" })).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
