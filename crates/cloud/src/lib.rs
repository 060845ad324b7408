//! Object storage for vehicle photos, store images and background overrides.
//!
//! [`StorageProvider`] is the seam the API and the processing pipeline
//! write through. Two backends implement it:
//!
//! - [`LocalStorage`]: files under a directory, served by the API's static
//!   file route. The default for local development.
//! - [`S3Storage`]: any S3-compatible bucket (AWS, MinIO, GCS interop).

pub mod config;
pub mod error;
pub mod local;
pub mod s3;

use std::sync::Arc;

use async_trait::async_trait;

pub use config::{StorageBackend, StorageConfig};
pub use error::StorageError;
pub use local::LocalStorage;
pub use s3::S3Storage;

/// Write/delete access to a public object store.
#[async_trait]
pub trait StorageProvider: Send + Sync {
    /// Store `bytes` at `path` and return its public URL.
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError>;

    /// Remove the object at `path`. Removing a missing object succeeds.
    async fn delete(&self, path: &str) -> Result<(), StorageError>;

    /// Prefix every public URL of this store starts with (no trailing slash).
    fn public_base_url(&self) -> &str;

    /// Public URL of the object at `path`.
    fn public_url(&self, path: &str) -> String {
        format!("{}/{}", self.public_base_url(), path.trim_start_matches('/'))
    }

    /// Object path of a URL previously returned by [`upload`](Self::upload),
    /// or `None` if the URL does not point into this store.
    fn path_from_url(&self, url: &str) -> Option<String> {
        let rest = url.strip_prefix(self.public_base_url())?;
        let path = rest.strip_prefix('/')?;
        (!path.is_empty()).then(|| path.to_string())
    }
}

/// Build the provider selected by `config`.
pub async fn build_storage(
    config: &StorageConfig,
) -> Result<Arc<dyn StorageProvider>, StorageError> {
    match &config.backend {
        StorageBackend::Local { root, public_base_url } => {
            tracing::info!(root = %root.display(), "Using local object storage");
            Ok(Arc::new(LocalStorage::new(root.clone(), public_base_url.clone())))
        }
        StorageBackend::S3 { .. } => {
            let storage = S3Storage::from_config(config).await?;
            tracing::info!(bucket = storage.bucket(), "Using S3 object storage");
            Ok(Arc::new(storage))
        }
    }
}

/// Reject paths that could escape the storage root or address nothing.
pub(crate) fn validate_object_path(path: &str) -> Result<(), StorageError> {
    let invalid = path.is_empty()
        || path.starts_with('/')
        || path.contains('\\')
        || path.split('/').any(|seg| seg.is_empty() || seg == "." || seg == "..");
    if invalid {
        return Err(StorageError::InvalidPath(path.to_string()));
    }
    Ok(())
}
