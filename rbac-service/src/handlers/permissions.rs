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

/// GET /api/permissions
pub async fn list_permissions(State(state): State<AppState>) -> Json<Vec<Record>> {
    Json(state.store.list(Resource::Permissions).await)
}

/// POST /api/permissions
pub async fn create_permission(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Record>), AppError> {
    let body = record_from_body(&body)?;
    let permission = state.store.create(Resource::Permissions, body).await?;
    Ok((StatusCode::CREATED, Json(permission)))
}

/// PUT /api/permissions/:id
pub async fn update_permission(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Record>, AppError> {
    let id = parse_id(&id, Resource::Permissions)?;
    let patch = record_from_body(&body)?;
    let permission = state.store.update(Resource::Permissions, id, patch).await?;
    Ok(Json(permission))
}

/// DELETE /api/permissions/:id
pub async fn delete_permission(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Record>, AppError> {
    let id = parse_id(&id, Resource::Permissions)?;
    let permission = state.store.delete(Resource::Permissions, id).await?;
    Ok(Json(permission))
}
