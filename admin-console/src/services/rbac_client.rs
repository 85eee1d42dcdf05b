use crate::config::RbacServiceSettings;
use crate::models::{Permission, Role, User};
use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use service_core::observability::{TracedClientExt, TracedRequest};

/// HTTP client for the rbac-service API.
///
/// Every call carries the current trace context. Failures are reported with
/// the same short messages the console shows in its error banner.
pub struct RbacClient {
    client: Client,
    settings: RbacServiceSettings,
}

impl RbacClient {
    pub fn new(settings: RbacServiceSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.timeout())
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, settings })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.settings.url.trim_end_matches('/'), path)
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.fetch("/users", "Failed to fetch users").await
    }

    pub async fn list_roles(&self) -> Result<Vec<Role>> {
        self.fetch("/roles", "Failed to fetch roles").await
    }

    pub async fn list_permissions(&self) -> Result<Vec<Permission>> {
        self.fetch("/permissions", "Failed to fetch permissions").await
    }

    pub async fn create_user(&self, body: &serde_json::Value) -> Result<User> {
        let request = self.client.traced_post(&self.url("/users")).json(body);
        send(request, "Failed to add user").await
    }

    pub async fn create_role(&self, name: &str) -> Result<Role> {
        let body = serde_json::json!({ "name": name, "permissions": [] });
        let request = self.client.traced_post(&self.url("/roles")).json(&body);
        send(request, "Failed to create role").await
    }

    pub async fn create_permission(&self, name: &str) -> Result<Permission> {
        let body = serde_json::json!({
            "name": name,
            "actions": { "read": false, "write": false, "delete": false },
        });
        let request = self.client.traced_post(&self.url("/permissions")).json(&body);
        send(request, "Failed to add permission").await
    }

    /// PUT the whole role; `failure` is the message reported on error.
    pub async fn update_role(&self, role: &Role, failure: &str) -> Result<Role> {
        self.put(&format!("/roles/{}", role.id), role, failure).await
    }

    pub async fn update_permission(&self, permission: &Permission) -> Result<Permission> {
        self.put(
            &format!("/permissions/{}", permission.id),
            permission,
            "Failed to update permission",
        )
        .await
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str, failure: &str) -> Result<T> {
        send(self.client.traced_get(&self.url(path)), failure).await
    }

    async fn put<B, T>(&self, path: &str, body: &B, failure: &str) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        send(self.client.traced_put(&self.url(path)).json(body), failure).await
    }
}

async fn send<T: DeserializeOwned>(request: TracedRequest, failure: &str) -> Result<T> {
    let response = request.send().await.map_err(|e| {
        tracing::error!(error = %e, "rbac-service request failed");
        anyhow!("{}", failure)
    })?;

    let status = response.status();
    if !status.is_success() {
        tracing::warn!(%status, "rbac-service returned an error");
        return Err(anyhow!("{}", failure));
    }

    response.json::<T>().await.map_err(|e| {
        tracing::error!(error = %e, "Unreadable rbac-service response");
        anyhow!("{}", failure)
    })
}
