use crate::models::Resource;
use service_core::error::AppError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{}", .0.not_found_message())]
    NotFound(Resource),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed data in {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("No ids left to allocate for {0}")]
    IdsExhausted(Resource),

    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(resource) => {
                AppError::NotFound(anyhow::anyhow!(resource.not_found_message()))
            }
            StoreError::Unavailable(_) => AppError::ServiceUnavailable,
            other => AppError::StorageError(anyhow::Error::new(other)),
        }
    }
}
