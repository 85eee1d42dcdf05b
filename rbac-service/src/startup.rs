use crate::config::{RbacConfig, StorageBackend};
use crate::handlers;
use crate::store::{CollectionBackend, JsonFileBackend, MemoryBackend, RbacStore};
use crate::AppState;
use axum::{
    http::{header, Method},
    middleware::from_fn,
    routing::{get, put},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware,
    security_headers::security_headers_middleware,
    tracing::{make_request_span, request_id_middleware},
};
use service_core::shutdown::shutdown_signal;
use std::future::IntoFuture;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Open the configured backend.
pub async fn open_backend(config: &RbacConfig) -> Result<Arc<dyn CollectionBackend>, AppError> {
    let backend: Arc<dyn CollectionBackend> = match config.storage.backend {
        StorageBackend::File => Arc::new(
            JsonFileBackend::new(&config.storage.data_dir)
                .await
                .map_err(|e| {
                    tracing::error!(
                        "Failed to initialize data directory {}: {}",
                        config.storage.data_dir.display(),
                        e
                    );
                    AppError::from(e)
                })?,
        ),
        StorageBackend::Memory => Arc::new(MemoryBackend::new()),
    };
    Ok(backend)
}

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/users",
            get(handlers::list_users).post(handlers::create_user),
        )
        .route(
            "/roles",
            get(handlers::list_roles).post(handlers::create_role),
        )
        .route("/roles/:roleId", put(handlers::update_role))
        .route(
            "/permissions",
            get(handlers::list_permissions).post(handlers::create_permission),
        )
        .route(
            "/permissions/:id",
            put(handlers::update_permission).delete(handlers::delete_permission),
        );

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics))
        .nest("/api", api)
        .with_state(state)
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE]),
        )
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
}

impl Application {
    /// Open the configured backend and bind the listener.
    pub async fn build(config: RbacConfig) -> Result<Self, AppError> {
        let backend = open_backend(&config).await?;
        Self::build_with_backend(config, backend).await
    }

    /// Bind with an explicit backend; used by tests to inject a `MemoryBackend`.
    pub async fn build_with_backend(
        config: RbacConfig,
        backend: Arc<dyn CollectionBackend>,
    ) -> Result<Self, AppError> {
        let store = RbacStore::open(backend).await.map_err(|e| {
            tracing::error!("Failed to load RBAC collections: {}", e);
            AppError::from(e)
        })?;

        let state = AppState { store: Arc::new(store) };

        let app = build_router(state);

        let address = config.server.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", address, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("rbac-service listening on port {}", port);

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
