use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use service_core::error::AppError;

use super::record_from_body;
use crate::models::{Record, Resource};
use crate::AppState;

/// GET /api/users
pub async fn list_users(State(state): State<AppState>) -> Json<Vec<Record>> {
    Json(state.store.list(Resource::Users).await)
}

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Record>), AppError> {
    let body = record_from_body(&body)?;
    let user = state.store.create(Resource::Users, body).await?;
    Ok((StatusCode::CREATED, Json(user)))
}
