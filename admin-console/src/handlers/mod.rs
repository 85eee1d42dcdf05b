pub mod app;
pub mod metrics;
pub mod permissions;
pub mod roles;
pub mod users;

use askama::Template;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

/// Standalone error banner, swapped out-of-band into the current view.
#[derive(Template)]
#[template(path = "partials/error_banner.html")]
pub struct ErrorBannerTemplate {
    pub error: Option<String>,
}

/// Report `message` in the banner and leave the swap target untouched.
pub fn banner_only(message: impl Into<String>) -> Response {
    let mut response = ErrorBannerTemplate {
        error: Some(message.into()),
    }
    .into_response();
    response.headers_mut().insert(
        HeaderName::from_static("hx-reswap"),
        HeaderValue::from_static("none"),
    );
    response
}

/// Status for a full page render: upstream failures surface as 502 with the
/// banner still rendered.
pub fn page_status(error: &Option<String>) -> StatusCode {
    if error.is_some() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::OK
    }
}
