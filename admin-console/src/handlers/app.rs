use askama::Template;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {}

pub async fn dashboard() -> impl IntoResponse {
    DashboardTemplate {}
}

pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "ok", "service": "admin-console" }))
}

pub async fn stylesheet() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        include_str!("../../static/console.css"),
    )
}
