use super::{CollectionBackend, Sequences, StoreError};
use crate::models::{Record, Resource};
use async_trait::async_trait;
use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// Process-local backend: nothing survives a restart.
///
/// Used for tests and for `storage_backend = "memory"` runs. Writes can be
/// made to fail on demand to exercise the store's rollback path.
#[derive(Default)]
pub struct MemoryBackend {
    collections: RwLock<HashMap<Resource, Vec<Record>>>,
    sequences: RwLock<Sequences>,
    fail_writes: AtomicBool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a collection as if it had been loaded from disk.
    pub fn with_records(mut self, resource: Resource, records: Vec<Record>) -> Self {
        self.collections.get_mut().insert(resource, records);
        self
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// What a fresh process would load for `resource`.
    pub async fn snapshot(&self, resource: Resource) -> Vec<Record> {
        self.collections
            .read()
            .await
            .get(&resource)
            .cloned()
            .unwrap_or_default()
    }

    fn check_writable(&self, target: &str) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(StoreError::Io {
                path: PathBuf::from(target),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "writes disabled"),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CollectionBackend for MemoryBackend {
    async fn load(&self, resource: Resource) -> Result<Vec<Record>, StoreError> {
        Ok(self.snapshot(resource).await)
    }

    async fn persist(&self, resource: Resource, records: &[Record]) -> Result<(), StoreError> {
        self.check_writable(&resource.file_name())?;
        self.collections
            .write()
            .await
            .insert(resource, records.to_vec());
        Ok(())
    }

    async fn load_sequences(&self) -> Result<Sequences, StoreError> {
        Ok(*self.sequences.read().await)
    }

    async fn persist_sequences(&self, sequences: &Sequences) -> Result<(), StoreError> {
        self.check_writable("sequences.json")?;
        *self.sequences.write().await = *sequences;
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
