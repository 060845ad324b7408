#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Invalid object path '{0}'")]
    InvalidPath(String),

    #[error("Storage configuration error: {0}")]
    Config(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage backend error: {0}")]
    Backend(String),
}
