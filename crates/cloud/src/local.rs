//! Local-disk backend.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::StorageError;
use crate::{validate_object_path, StorageProvider};

/// Stores objects as files under `root`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root: PathBuf,
    public_base_url: String,
}

impl LocalStorage {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        let public_base_url: String = public_base_url.into();
        Self {
            root: root.into(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Directory the files live in.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn file_path(&self, path: &str) -> Result<PathBuf, StorageError> {
        validate_object_path(path)?;
        Ok(self.root.join(path))
    }
}

#[async_trait]
impl StorageProvider for LocalStorage {
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<String, StorageError> {
        let file = self.file_path(path)?;
        if let Some(parent) = file.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&file, &bytes).await?;
        tracing::debug!(path, size = bytes.len(), "Stored object on local disk");
        Ok(self.public_url(path))
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        let file = self.file_path(path)?;
        match tokio::fs::remove_file(&file).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn public_base_url(&self) -> &str {
        &self.public_base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn upload_then_delete() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path(), "http://localhost:3000/files/");

        let url = storage
            .upload("stores/1/store-image.png", vec![1, 2, 3], "image/png")
            .await
            .unwrap();
        assert_eq!(url, "http://localhost:3000/files/stores/1/store-image.png");
        let on_disk = dir.path().join("stores/1/store-image.png");
        assert_eq!(std::fs::read(&on_disk).unwrap(), vec![1, 2, 3]);

        assert_eq!(
            storage.path_from_url(&url).as_deref(),
            Some("stores/1/store-image.png")
        );
        storage.delete("stores/1/store-image.png").await.unwrap();
        assert!(!on_disk.exists());

        // Deleting again is not an error.
        storage.delete("stores/1/store-image.png").await.unwrap();
    }

    #[tokio::test]
    async fn rejects_escaping_paths() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path(), "http://localhost/files");
        let err = storage.upload("../outside.png", vec![0], "image/png").await;
        assert!(matches!(err, Err(StorageError::InvalidPath(_))));
    }

    #[test]
    fn foreign_urls_have_no_path() {
        let storage = LocalStorage::new("/tmp/x", "http://localhost/files");
        assert_eq!(storage.path_from_url("https://elsewhere.test/a.png"), None);
        assert_eq!(storage.path_from_url("http://localhost/files"), None);
        assert_eq!(storage.path_from_url("http://localhost/filesystem/a.png"), None);
    }
}
