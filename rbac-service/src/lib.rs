pub mod config;
pub mod handlers;
pub mod models;
pub mod startup;
pub mod store;

use crate::store::RbacStore;
use std::sync::Arc;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RbacStore>,
}
