//! The RBAC store: three record collections held in memory and mirrored to a
//! [`CollectionBackend`] after every mutation.
//!
//! Each collection sits behind its own async mutex. A mutation holds that lock
//! across the in-memory change and the backend write, so writes to one
//! collection are applied in lock order and the backend always receives the
//! collection as it is in memory. When the backend write fails the in-memory
//! change is undone before the error is returned.
//!
//! Ids come from a persisted per-collection counter (see [`Sequences`]). The
//! counter is written before the collection, so a failed collection write can
//! leave a gap in the ids but never a reused one.

mod backend;
mod error;
mod file;
mod memory;

pub use backend::{CollectionBackend, Sequences};
pub use error::StoreError;
pub use file::JsonFileBackend;
pub use memory::MemoryBackend;

use crate::models::record::ID_FIELD;
use crate::models::{record_id, shallow_merge, Record, Resource};
use metrics::counter;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{instrument, Span};

pub struct RbacStore {
    backend: Arc<dyn CollectionBackend>,
    users: Mutex<Vec<Record>>,
    roles: Mutex<Vec<Record>>,
    permissions: Mutex<Vec<Record>>,
    sequences: Mutex<Sequences>,
}

impl RbacStore {
    /// Load every collection from `backend`.
    pub async fn open(backend: Arc<dyn CollectionBackend>) -> Result<Self, StoreError> {
        let mut sequences = backend.load_sequences().await?;
        let users = load_collection(backend.as_ref(), Resource::Users, &mut sequences).await?;
        let roles = load_collection(backend.as_ref(), Resource::Roles, &mut sequences).await?;
        let permissions =
            load_collection(backend.as_ref(), Resource::Permissions, &mut sequences).await?;

        tracing::info!(
            users = users.len(),
            roles = roles.len(),
            permissions = permissions.len(),
            "Loaded RBAC collections"
        );

        Ok(Self {
            backend,
            users: Mutex::new(users),
            roles: Mutex::new(roles),
            permissions: Mutex::new(permissions),
            sequences: Mutex::new(sequences),
        })
    }

    fn collection(&self, resource: Resource) -> &Mutex<Vec<Record>> {
        match resource {
            Resource::Users => &self.users,
            Resource::Roles => &self.roles,
            Resource::Permissions => &self.permissions,
        }
    }

    /// The whole collection, in insertion order.
    pub async fn list(&self, resource: Resource) -> Vec<Record> {
        self.collection(resource).lock().await.clone()
    }

    /// Append `body` under a freshly allocated id and persist the collection.
    ///
    /// No field is required. A client-sent `id` is ignored.
    #[instrument(skip(self, body), fields(collection = %resource, id))]
    pub async fn create(&self, resource: Resource, body: Record) -> Result<Record, StoreError> {
        let mut records = self.collection(resource).lock().await;
        let id = self.allocate_id(resource).await?;
        Span::current().record("id", id);

        let mut record = Record::new();
        record.insert(ID_FIELD.to_string(), Value::from(id));
        shallow_merge(&mut record, body);
        resource.apply_defaults(&mut record);

        records.push(record.clone());
        if let Err(e) = self.backend.persist(resource, &records).await {
            records.pop();
            tracing::error!(error = %e, "Failed to persist created record");
            return Err(e);
        }

        record_mutation(resource, "create");
        tracing::info!("Created record");
        Ok(record)
    }

    /// Shallow-merge `patch` over the first record with `id`.
    #[instrument(skip(self, patch), fields(collection = %resource))]
    pub async fn update(
        &self,
        resource: Resource,
        id: i64,
        patch: Record,
    ) -> Result<Record, StoreError> {
        let mut records = self.collection(resource).lock().await;
        let index = position(&records, id).ok_or(StoreError::NotFound(resource))?;

        let previous = records[index].clone();
        shallow_merge(&mut records[index], patch);

        if let Err(e) = self.backend.persist(resource, &records).await {
            records[index] = previous;
            tracing::error!(error = %e, "Failed to persist updated record");
            return Err(e);
        }

        record_mutation(resource, "update");
        tracing::info!("Updated record");
        Ok(records[index].clone())
    }

    /// Remove the first record with `id` and return it.
    #[instrument(skip(self), fields(collection = %resource))]
    pub async fn delete(&self, resource: Resource, id: i64) -> Result<Record, StoreError> {
        let mut records = self.collection(resource).lock().await;
        let index = position(&records, id).ok_or(StoreError::NotFound(resource))?;

        let removed = records.remove(index);
        if let Err(e) = self.backend.persist(resource, &records).await {
            records.insert(index, removed);
            tracing::error!(error = %e, "Failed to persist deletion");
            return Err(e);
        }

        record_mutation(resource, "delete");
        tracing::info!("Deleted record");
        Ok(removed)
    }

    pub async fn health_check(&self) -> Result<(), StoreError> {
        self.backend.health_check().await
    }

    async fn allocate_id(&self, resource: Resource) -> Result<i64, StoreError> {
        let mut sequences = self.sequences.lock().await;
        let mut advanced = *sequences;
        let id = advanced.next(resource)?;
        self.backend.persist_sequences(&advanced).await?;
        *sequences = advanced;
        Ok(id)
    }
}

async fn load_collection(
    backend: &dyn CollectionBackend,
    resource: Resource,
    sequences: &mut Sequences,
) -> Result<Vec<Record>, StoreError> {
    let records = backend.load(resource).await?;
    if let Some(max_id) = records.iter().filter_map(record_id).max() {
        sequences.observe(resource, max_id);
    }
    Ok(records)
}

fn position(records: &[Record], id: i64) -> Option<usize> {
    records.iter().position(|r| record_id(r) == Some(id))
}

fn record_mutation(resource: Resource, op: &'static str) {
    counter!(
        "rbac_store_mutations_total",
        "collection" => resource.name(),
        "op" => op
    )
    .increment(1);
}
