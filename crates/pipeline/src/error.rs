use showroom_cloud::StorageError;
use showroom_compositor::CompositorError;
use showroom_core::image_type::ImageType;
use showroom_core::types::DbId;

/// Failure fetching the original photo.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("download returned HTTP {0}")]
    Status(u16),

    #[error("download failed: {0}")]
    Transport(String),
}

/// One variant per processing step.
#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("Image {0} not found")]
    ImageNotFound(DbId),

    #[error("Vehicle {0} not found")]
    VehicleNotFound(DbId),

    #[error("Database error: {0}")]
    Records(#[from] sqlx::Error),

    #[error("Failed to download original image: {0}")]
    Download(#[from] SourceError),

    #[error("No background template configured for image type {0}")]
    NoBackground(ImageType),

    #[error("AI compositing failed: {0}")]
    Composite(#[from] CompositorError),

    #[error("Failed to upload processed image: {0}")]
    Upload(#[from] StorageError),
}
