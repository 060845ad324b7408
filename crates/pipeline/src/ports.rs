//! Collaborators of the processor.

use async_trait::async_trait;
use showroom_compositor::{CompositeRequest, CompositorError};
use showroom_core::background::StoreBackgrounds;
use showroom_core::processing_status::ProcessingStatus;
use showroom_core::types::{DbId, Timestamp};
use showroom_db::models::vehicle_image::{ImageOwner, VehicleImage};

use crate::error::SourceError;

/// Persistence the processor reads from and writes to.
#[async_trait]
pub trait ImageRecords: Send + Sync {
    async fn find_owner(&self, image_id: DbId) -> Result<Option<ImageOwner>, sqlx::Error>;

    /// Background overrides uploaded by the store; empty if it has none.
    async fn store_backgrounds(&self, store_id: DbId) -> Result<StoreBackgrounds, sqlx::Error>;

    /// Record the composited image. Returns `false` if the row is gone.
    async fn mark_optimized(
        &self,
        image_id: DbId,
        optimized_url: &str,
        processed_at: Timestamp,
    ) -> Result<bool, sqlx::Error>;

    async fn set_vehicle_status(
        &self,
        vehicle_id: DbId,
        status: ProcessingStatus,
    ) -> Result<bool, sqlx::Error>;

    async fn list_key_images(&self, vehicle_id: DbId) -> Result<Vec<VehicleImage>, sqlx::Error>;
}

/// Fetches original photo bytes by URL.
#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, SourceError>;
}

/// The AI compositing call.
#[async_trait]
pub trait Compositor: Send + Sync {
    async fn composite(&self, request: &CompositeRequest) -> Result<Vec<u8>, CompositorError>;
}
