use crate::config::ConsoleConfig;
use crate::handlers::{
    app::{dashboard, health_check, stylesheet},
    metrics::metrics,
    permissions::{
        create_permission, permissions_page, toggle_permission_action,
        toggle_role_permission_action,
    },
    roles::{create_role, roles_page, toggle_role_permission},
    users::{create_user, users_page},
};
use crate::services::rbac_client::RbacClient;
use crate::AppState;
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::middleware::{
    metrics::metrics_middleware,
    security_headers::security_headers_middleware,
    tracing::{make_request_span, request_id_middleware},
};
use service_core::shutdown::shutdown_signal;
use std::future::IntoFuture;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route("/static/console.css", get(stylesheet))
        .route("/users", get(users_page).post(create_user))
        .route("/roles", get(roles_page).post(create_role))
        .route(
            "/roles/:roleId/permissions/:permissionId/toggle",
            post(toggle_role_permission),
        )
        .route(
            "/roles/:roleId/permissions/:permissionId/actions/:action/toggle",
            post(toggle_role_permission_action),
        )
        .route("/permissions", get(permissions_page).post(create_permission))
        .route(
            "/permissions/:id/actions/:action/toggle",
            post(toggle_permission_action),
        )
        .with_state(state)
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
}

impl Application {
    pub async fn build(config: ConsoleConfig) -> anyhow::Result<Self> {
        let rbac = Arc::new(RbacClient::new(config.rbac_service.clone())?);
        let state = AppState::new(rbac);
        let app = build_router(state);

        let address = config.server.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", address, e);
            anyhow::anyhow!("Failed to bind to address {}: {}", address, e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(
            rbac_service = %config.rbac_service.url,
            "admin-console listening on port {}",
            port
        );

        let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}
