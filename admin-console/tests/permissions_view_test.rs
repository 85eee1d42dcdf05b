mod common;

use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn adding_a_permission_starts_with_all_actions_off() {
    let app = TestApp::spawn().await;

    let (status, body) = app.submit("/permissions", &[("name", "Edit")]).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Edit"));
    assert_eq!(
        app.api("/permissions").await,
        json!([{ "id": 1, "name": "Edit", "actions": { "read": false, "write": false, "delete": false } }])
    );
}

#[tokio::test]
async fn legacy_permissions_render_unchecked() {
    let app = TestApp::spawn().await;
    app.seed("/permissions", json!({ "name": "Legacy", "actions": null }))
        .await;

    let (status, body) = app.page("/permissions").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Legacy"));
    assert_eq!(body.matches("checked>").count(), 0);
}

#[tokio::test]
async fn toggling_an_action_updates_the_permission() {
    let app = TestApp::spawn().await;
    app.seed("/permissions", json!({ "name": "Edit" })).await;

    let fragment = app.toggle("/permissions/1/actions/write/toggle").await;

    assert_eq!(fragment.status, StatusCode::OK);
    assert!(fragment.body.contains(r#"id="permissions-table""#));
    assert_eq!(fragment.checked_boxes(), 1);
    assert_eq!(
        app.api("/permissions").await[0]["actions"],
        json!({ "read": false, "write": true, "delete": false })
    );
}

#[tokio::test]
async fn unknown_action_is_not_found() {
    let app = TestApp::spawn().await;
    app.seed("/permissions", json!({ "name": "Edit" })).await;

    let fragment = app.toggle("/permissions/1/actions/execute/toggle").await;

    assert_eq!(fragment.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn failed_toggle_reverts_and_reports() {
    let app = TestApp::spawn().await;
    app.seed("/permissions", json!({ "name": "Edit" })).await;

    app.backend.set_fail_writes(true);
    let fragment = app.toggle("/permissions/1/actions/read/toggle").await;

    assert_eq!(fragment.checked_boxes(), 0);
    assert!(fragment.body.contains("Failed to update permission"));
    assert_eq!(
        app.api("/permissions").await[0]["actions"]["read"],
        json!(false)
    );
}

#[tokio::test]
async fn nested_toggle_updates_the_role_copy_only() {
    let app = TestApp::spawn().await;
    app.seed("/permissions", json!({ "name": "Edit" })).await;
    app.seed(
        "/roles",
        json!({
            "name": "Editor",
            "permissions": [{ "id": 1, "actions": { "read": false, "write": false, "delete": false } }]
        }),
    )
    .await;

    let fragment = app
        .toggle("/roles/1/permissions/1/actions/delete/toggle")
        .await;

    assert_eq!(fragment.status, StatusCode::OK);
    assert!(fragment.body.contains(r#"id="role-grants-1""#));
    assert_eq!(fragment.checked_boxes(), 1);
    assert_eq!(
        app.api("/roles").await[0]["permissions"][0]["actions"],
        json!({ "read": false, "write": false, "delete": true })
    );
    assert_eq!(
        app.api("/permissions").await[0]["actions"]["delete"],
        json!(false)
    );
}

#[tokio::test]
async fn nested_toggle_on_unreferenced_permission_is_a_no_op() {
    let app = TestApp::spawn().await;
    app.seed("/permissions", json!({ "name": "Edit" })).await;
    app.seed("/roles", json!({ "name": "Viewer" })).await;

    let fragment = app
        .toggle("/roles/1/permissions/1/actions/read/toggle")
        .await;

    assert_eq!(fragment.status, StatusCode::OK);
    assert_eq!(fragment.checked_boxes(), 0);
    assert_eq!(app.api("/roles").await[0]["permissions"], json!([]));
}

#[tokio::test]
async fn nested_toggle_on_unknown_role_reports() {
    let app = TestApp::spawn().await;

    let fragment = app
        .toggle("/roles/7/permissions/1/actions/read/toggle")
        .await;

    assert_eq!(fragment.headers["hx-reswap"], "none");
    assert!(fragment.body.contains("Role is not found"));
}

#[tokio::test]
async fn direct_toggle_on_unknown_permission_reports() {
    let app = TestApp::spawn().await;
    app.seed("/permissions", json!({ "name": "Edit" })).await;

    let fragment = app.toggle("/permissions/9/actions/read/toggle").await;

    assert_eq!(fragment.headers["hx-reswap"], "none");
    assert!(fragment.body.contains("Permission is not found"));
    assert_eq!(app.api("/permissions").await[0]["actions"]["read"], false);
}
