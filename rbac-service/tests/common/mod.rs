//! Test helpers for rbac-service integration tests.
//!
//! Each `TestApp` runs the real application on a random port with its own data
//! directory (or an in-memory backend).

#![allow(dead_code)]

use rbac_service::config::{RbacConfig, StorageBackend, StorageConfig};
use rbac_service::models::{Record, Resource};
use rbac_service::startup::Application;
use rbac_service::store::{JsonFileBackend, MemoryBackend, RbacStore};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub client: Client,
    pub data_dir: Option<TempDir>,
    pub memory: Option<Arc<MemoryBackend>>,
}

fn test_config(backend: StorageBackend, data_dir: PathBuf) -> RbacConfig {
    let mut config = RbacConfig::default();
    config.server.host = "127.0.0.1".to_string();
    config.server.port = 0;
    config.storage = StorageConfig { backend, data_dir };
    config
}

impl TestApp {
    /// Spawn against a fresh temporary data directory.
    pub async fn spawn() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let app = Self::spawn_in(dir.path()).await;
        Self {
            data_dir: Some(dir),
            ..app
        }
    }

    /// Spawn against an existing data directory, e.g. to simulate a restart.
    pub async fn spawn_in(data_dir: &Path) -> Self {
        let config = test_config(StorageBackend::File, data_dir.to_path_buf());
        let app = Application::build(config)
            .await
            .expect("Failed to build test application");
        Self::run(app, None).await
    }

    /// Spawn with an in-memory backend the test can inspect and break.
    pub async fn spawn_in_memory(backend: Arc<MemoryBackend>) -> Self {
        let config = test_config(StorageBackend::Memory, PathBuf::from("unused"));
        let app = Application::build_with_backend(config, backend.clone())
            .await
            .expect("Failed to build test application");
        Self::run(app, Some(backend)).await
    }

    async fn run(app: Application, memory: Option<Arc<MemoryBackend>>) -> Self {
        let port = app.port();
        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        Self {
            address: format!("http://127.0.0.1:{}", port),
            port,
            client: Client::new(),
            data_dir: None,
            memory,
        }
    }

    pub fn data_path(&self) -> &Path {
        self.data_dir.as_ref().expect("file-backed app").path()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.address, path)
    }

    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to execute request");
        decode(response).await
    }

    pub async fn post(&self, path: &str, body: Value) -> (StatusCode, Value) {
        let response = self
            .client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request");
        decode(response).await
    }

    pub async fn put(&self, path: &str, body: Value) -> (StatusCode, Value) {
        let response = self
            .client
            .put(self.url(path))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request");
        decode(response).await
    }

    pub async fn delete(&self, path: &str) -> (StatusCode, Value) {
        let response = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .expect("Failed to execute request");
        decode(response).await
    }

    /// Collection as a freshly started process would load it from disk.
    pub async fn reload(&self, resource: Resource) -> Vec<Record> {
        let backend = JsonFileBackend::new(self.data_path())
            .await
            .expect("Failed to open data dir");
        RbacStore::open(Arc::new(backend))
            .await
            .expect("Failed to reload store")
            .list(resource)
            .await
    }

    /// Raw file contents for `resource`.
    pub fn read_file(&self, resource: Resource) -> Value {
        let raw = std::fs::read_to_string(self.data_path().join(resource.file_name()))
            .expect("Failed to read data file");
        serde_json::from_str(&raw).expect("Data file is not JSON")
    }
}

async fn decode(response: reqwest::Response) -> (StatusCode, Value) {
    let status = response.status();
    let text = response.text().await.expect("Failed to read body");
    let body = if text.is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&text).unwrap_or(Value::String(text))
    };
    (status, body)
}

pub fn as_records(value: &Value) -> Vec<Record> {
    value
        .as_array()
        .expect("expected a JSON array")
        .iter()
        .map(|v| v.as_object().cloned().expect("expected JSON objects"))
        .collect()
}
