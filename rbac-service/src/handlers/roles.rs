use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use service_core::error::AppError;

use super::{parse_id, record_from_body};
use crate::models::{Record, Resource};
use crate::AppState;

/// GET /api/roles
pub async fn list_roles(State(state): State<AppState>) -> Json<Vec<Record>> {
    Json(state.store.list(Resource::Roles).await)
}

/// POST /api/roles
pub async fn create_role(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Record>), AppError> {
    let body = record_from_body(&body)?;
    let role = state.store.create(Resource::Roles, body).await?;
    Ok((StatusCode::CREATED, Json(role)))
}

/// PUT /api/roles/:roleId
///
/// The console sends the whole role, including its `permissions` list, so a
/// permission assignment is a wholesale replacement of that list.
pub async fn update_role(
    State(state): State<AppState>,
    Path(role_id): Path<String>,
    body: Bytes,
) -> Result<Json<Record>, AppError> {
    let id = parse_id(&role_id, Resource::Roles)?;
    let patch = record_from_body(&body)?;
    let role = state.store.update(Resource::Roles, id, patch).await?;
    Ok(Json(role))
}
