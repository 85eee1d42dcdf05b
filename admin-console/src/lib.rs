pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

use services::rbac_client::RbacClient;
use std::sync::Arc;

/// Shared application state containing the rbac-service client
#[derive(Clone)]
pub struct AppState {
    pub rbac: Arc<RbacClient>,
}

impl AppState {
    pub fn new(rbac: Arc<RbacClient>) -> Self {
        Self { rbac }
    }
}
