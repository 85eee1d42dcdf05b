//! Test helpers for admin-console integration tests.
//!
//! Each `TestApp` runs a real rbac-service on an in-memory backend and a real
//! console pointed at it, both on random ports.

#![allow(dead_code)]

use admin_console::config::ConsoleConfig;
use admin_console::startup::Application;
use rbac_service::config::{RbacConfig, StorageBackend};
use rbac_service::store::MemoryBackend;
use reqwest::{header::HeaderMap, Client, StatusCode};
use serde_json::Value;
use std::sync::Arc;

pub struct TestApp {
    pub address: String,
    pub api_address: String,
    pub client: Client,
    pub backend: Arc<MemoryBackend>,
}

pub struct Fragment {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl Fragment {
    pub fn checked_boxes(&self) -> usize {
        self.body.matches("checked>").count()
    }
}

async fn spawn_rbac_service(backend: Arc<MemoryBackend>) -> String {
    let mut config = RbacConfig::default();
    config.server.host = "127.0.0.1".to_string();
    config.server.port = 0;
    config.storage.backend = StorageBackend::Memory;

    let app = rbac_service::startup::Application::build_with_backend(config, backend)
        .await
        .expect("Failed to build rbac-service");
    let port = app.port();
    tokio::spawn(async move {
        app.run_until_stopped().await.ok();
    });
    format!("http://127.0.0.1:{}/api", port)
}

async fn spawn_console(api_address: &str) -> String {
    let mut config = ConsoleConfig::default();
    config.server.host = "127.0.0.1".to_string();
    config.server.port = 0;
    config.rbac_service.url = api_address.to_string();
    config.rbac_service.timeout_secs = 5;

    let app = Application::build(config)
        .await
        .expect("Failed to build admin-console");
    let port = app.port();
    tokio::spawn(async move {
        app.run_until_stopped().await.ok();
    });
    format!("http://127.0.0.1:{}", port)
}

impl TestApp {
    pub async fn spawn() -> Self {
        let backend = Arc::new(MemoryBackend::new());
        let api_address = spawn_rbac_service(backend.clone()).await;
        let address = spawn_console(&api_address).await;

        Self {
            address,
            api_address,
            client: Client::new(),
            backend,
        }
    }

    /// A console whose rbac-service is not listening.
    pub async fn spawn_without_service() -> Self {
        let api_address = "http://127.0.0.1:9/api".to_string();
        let address = spawn_console(&api_address).await;

        Self {
            address,
            api_address,
            client: Client::new(),
            backend: Arc::new(MemoryBackend::new()),
        }
    }

    pub async fn page(&self, path: &str) -> (StatusCode, String) {
        let response = self
            .client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request");
        let status = response.status();
        (status, response.text().await.expect("Failed to read body"))
    }

    /// Post a form; redirects are followed.
    pub async fn submit(&self, path: &str, form: &[(&str, &str)]) -> (StatusCode, String) {
        let response = self
            .client
            .post(format!("{}{}", self.address, path))
            .form(form)
            .send()
            .await
            .expect("Failed to execute request");
        let status = response.status();
        (status, response.text().await.expect("Failed to read body"))
    }

    /// Click a checkbox the way htmx does.
    pub async fn toggle(&self, path: &str) -> Fragment {
        let response = self
            .client
            .post(format!("{}{}", self.address, path))
            .header("HX-Request", "true")
            .send()
            .await
            .expect("Failed to execute request");
        Fragment {
            status: response.status(),
            headers: response.headers().clone(),
            body: response.text().await.expect("Failed to read body"),
        }
    }

    /// Read a collection straight from rbac-service.
    pub async fn api(&self, path: &str) -> Value {
        self.client
            .get(format!("{}{}", self.api_address, path))
            .send()
            .await
            .expect("Failed to execute request")
            .json()
            .await
            .expect("Failed to parse JSON")
    }

    /// Create a record straight through rbac-service.
    pub async fn seed(&self, path: &str, body: Value) -> Value {
        self.client
            .post(format!("{}{}", self.api_address, path))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request")
            .json()
            .await
            .expect("Failed to parse JSON")
    }
}
