//! HTTP handlers for the `/api` routes.

pub mod health;
pub mod permissions;
pub mod roles;
pub mod users;

pub use health::{health_check, metrics, readiness_check};
pub use permissions::{create_permission, delete_permission, list_permissions, update_permission};
pub use roles::{create_role, list_roles, update_role};
pub use users::{create_user, list_users};

use crate::models::{parse_body, Record, Resource};
use service_core::error::AppError;

/// Parse a request body into a partial record, mapping failures to 400.
pub(crate) fn record_from_body(body: &[u8]) -> Result<Record, AppError> {
    parse_body(body).map_err(|e| AppError::BadRequest(anyhow::Error::new(e)))
}

/// Parse an id path segment. A segment that is not an integer can never match
/// a record, so it is reported as the resource's not-found error.
pub(crate) fn parse_id(raw: &str, resource: Resource) -> Result<i64, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::NotFound(anyhow::anyhow!(resource.not_found_message())))
}
