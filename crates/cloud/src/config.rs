//! Storage backend selection from environment variables.

use std::path::PathBuf;

use crate::error::StorageError;

/// Backend-specific settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Local {
        root: PathBuf,
        public_base_url: String,
    },
    S3 {
        bucket: String,
        region: String,
        /// Custom endpoint for S3-compatible services; path-style addressing
        /// is used when set.
        endpoint: Option<String>,
        public_base_url: String,
        /// Static `(access_key_id, secret_access_key)`; the default AWS
        /// credential chain is used when absent.
        static_credentials: Option<(String, String)>,
    },
}

/// Object storage configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub backend: StorageBackend,
}

impl StorageConfig {
    /// Load from environment variables.
    ///
    /// | Env var                     | Default                        |
    /// |-----------------------------|--------------------------------|
    /// | `STORAGE_BACKEND`           | `local` (`local` or `s3`)      |
    /// | `STORAGE_LOCAL_ROOT`        | `./storage`                    |
    /// | `STORAGE_PUBLIC_BASE_URL`   | `http://localhost:3000/files` for local; derived from bucket/endpoint for s3 |
    /// | `STORAGE_BUCKET`            | required for s3                |
    /// | `STORAGE_REGION`            | `us-east-1`                    |
    /// | `STORAGE_ENDPOINT`          | none                           |
    /// | `STORAGE_ACCESS_KEY_ID`     | none                           |
    /// | `STORAGE_SECRET_ACCESS_KEY` | none                           |
    pub fn from_env() -> Result<Self, StorageError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary variable lookup.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, StorageError> {
        let backend = var("STORAGE_BACKEND").unwrap_or_else(|| "local".into());
        let public_base_url =
            var("STORAGE_PUBLIC_BASE_URL").map(|u| u.trim_end_matches('/').to_string());

        let backend = match backend.as_str() {
            "local" => StorageBackend::Local {
                root: var("STORAGE_LOCAL_ROOT")
                    .unwrap_or_else(|| "./storage".into())
                    .into(),
                public_base_url: public_base_url
                    .unwrap_or_else(|| "http://localhost:3000/files".into()),
            },
            "s3" => {
                let bucket = var("STORAGE_BUCKET").ok_or_else(|| {
                    StorageError::Config("STORAGE_BUCKET must be set for the s3 backend".into())
                })?;
                let region = var("STORAGE_REGION").unwrap_or_else(|| "us-east-1".into());
                let endpoint = var("STORAGE_ENDPOINT").map(|e| e.trim_end_matches('/').to_string());
                let public_base_url = public_base_url.unwrap_or_else(|| match &endpoint {
                    Some(endpoint) => format!("{endpoint}/{bucket}"),
                    None => format!("https://{bucket}.s3.{region}.amazonaws.com"),
                });
                let static_credentials =
                    match (var("STORAGE_ACCESS_KEY_ID"), var("STORAGE_SECRET_ACCESS_KEY")) {
                        (Some(id), Some(secret)) => Some((id, secret)),
                        (None, None) => None,
                        _ => {
                            return Err(StorageError::Config(
                                "STORAGE_ACCESS_KEY_ID and STORAGE_SECRET_ACCESS_KEY must be set together"
                                    .into(),
                            ))
                        }
                    };
                StorageBackend::S3 {
                    bucket,
                    region,
                    endpoint,
                    public_base_url,
                    static_credentials,
                }
            }
            other => {
                return Err(StorageError::Config(format!(
                    "Unknown STORAGE_BACKEND '{other}', expected 'local' or 's3'"
                )))
            }
        };
        Ok(Self { backend })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> Result<StorageConfig, StorageError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        StorageConfig::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_to_local() {
        let config = load(&[]).unwrap();
        assert_eq!(
            config.backend,
            StorageBackend::Local {
                root: PathBuf::from("./storage"),
                public_base_url: "http://localhost:3000/files".into(),
            }
        );
    }

    #[test]
    fn s3_requires_bucket() {
        assert!(matches!(
            load(&[("STORAGE_BACKEND", "s3")]),
            Err(StorageError::Config(_))
        ));
    }

    #[test]
    fn s3_public_url_follows_endpoint() {
        let config = load(&[
            ("STORAGE_BACKEND", "s3"),
            ("STORAGE_BUCKET", "photos"),
            ("STORAGE_ENDPOINT", "https://storage.googleapis.com/"),
        ])
        .unwrap();
        let StorageBackend::S3 { public_base_url, .. } = config.backend else {
            panic!("expected s3 backend");
        };
        assert_eq!(public_base_url, "https://storage.googleapis.com/photos");
    }

    #[test]
    fn half_credentials_rejected() {
        assert!(load(&[
            ("STORAGE_BACKEND", "s3"),
            ("STORAGE_BUCKET", "photos"),
            ("STORAGE_ACCESS_KEY_ID", "id"),
        ])
        .is_err());
        assert!(load(&[("STORAGE_BACKEND", "ftp")]).is_err());
    }
}
