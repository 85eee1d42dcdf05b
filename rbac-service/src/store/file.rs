use super::{CollectionBackend, Sequences, StoreError};
use crate::models::{Record, Resource};
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tokio::fs;

const SEQUENCES_FILE: &str = "sequences.json";

/// One pretty-printed JSON array per collection under `data_dir`.
///
/// Writes are a plain truncate-and-write of the whole file; a crash mid-write
/// can leave a truncated file behind.
pub struct JsonFileBackend {
    data_dir: PathBuf,
}

impl JsonFileBackend {
    pub async fn new(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)
            .await
            .map_err(|source| StoreError::Io {
                path: data_dir.clone(),
                source,
            })?;
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn path_for(&self, resource: Resource) -> PathBuf {
        self.data_dir.join(resource.file_name())
    }

    async fn read_json<T: DeserializeOwned + Default>(path: &Path) -> Result<T, StoreError> {
        let bytes = match fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(T::default());
        }

        serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
            path: path.to_path_buf(),
            source,
        })
    }

    async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(value)?;
        fs::write(path, bytes).await.map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[async_trait]
impl CollectionBackend for JsonFileBackend {
    async fn load(&self, resource: Resource) -> Result<Vec<Record>, StoreError> {
        Self::read_json(&self.path_for(resource)).await
    }

    async fn persist(&self, resource: Resource, records: &[Record]) -> Result<(), StoreError> {
        Self::write_json(&self.path_for(resource), records).await
    }

    async fn load_sequences(&self) -> Result<Sequences, StoreError> {
        Self::read_json(&self.data_dir.join(SEQUENCES_FILE)).await
    }

    async fn persist_sequences(&self, sequences: &Sequences) -> Result<(), StoreError> {
        Self::write_json(&self.data_dir.join(SEQUENCES_FILE), sequences).await
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        let metadata = fs::metadata(&self.data_dir)
            .await
            .map_err(|source| StoreError::Io {
                path: self.data_dir.clone(),
                source,
            })?;
        if metadata.is_dir() {
            Ok(())
        } else {
            Err(StoreError::Unavailable(format!(
                "{} is not a directory",
                self.data_dir.display()
            )))
        }
    }
}
