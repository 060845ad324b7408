//! Production implementations of the processor's collaborators.

use std::time::Duration;

use async_trait::async_trait;
use showroom_compositor::{CompositeRequest, CompositorApi, CompositorError};
use showroom_core::background::StoreBackgrounds;
use showroom_core::processing_status::ProcessingStatus;
use showroom_core::types::{DbId, Timestamp};
use showroom_db::models::vehicle_image::{ImageOwner, VehicleImage};
use showroom_db::repositories::{StoreRepo, VehicleImageRepo, VehicleRepo};
use sqlx::PgPool;

use crate::error::SourceError;
use crate::ports::{Compositor, ImageRecords, ImageSource};

/// [`ImageRecords`] backed by the repositories.
#[derive(Debug, Clone)]
pub struct PgImageRecords {
    pool: PgPool,
}

impl PgImageRecords {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ImageRecords for PgImageRecords {
    async fn find_owner(&self, image_id: DbId) -> Result<Option<ImageOwner>, sqlx::Error> {
        VehicleImageRepo::find_owner(&self.pool, image_id).await
    }

    async fn store_backgrounds(&self, store_id: DbId) -> Result<StoreBackgrounds, sqlx::Error> {
        Ok(StoreRepo::find_by_id(&self.pool, store_id)
            .await?
            .map(|store| store.backgrounds())
            .unwrap_or_default())
    }

    async fn mark_optimized(
        &self,
        image_id: DbId,
        optimized_url: &str,
        processed_at: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let row =
            VehicleImageRepo::mark_optimized(&self.pool, image_id, optimized_url, processed_at)
                .await?;
        Ok(row.is_some())
    }

    async fn set_vehicle_status(
        &self,
        vehicle_id: DbId,
        status: ProcessingStatus,
    ) -> Result<bool, sqlx::Error> {
        VehicleRepo::set_processing_status(&self.pool, vehicle_id, status).await
    }

    async fn list_key_images(&self, vehicle_id: DbId) -> Result<Vec<VehicleImage>, sqlx::Error> {
        VehicleImageRepo::list_key_images(&self.pool, vehicle_id).await
    }
}

/// [`ImageSource`] over plain HTTP(S) GETs.
#[derive(Debug, Clone)]
pub struct HttpImageSource {
    client: reqwest::Client,
}

impl HttpImageSource {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ImageSource for HttpImageSource {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, SourceError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SourceError::Transport(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|e| SourceError::Transport(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl Compositor for CompositorApi {
    async fn composite(&self, request: &CompositeRequest) -> Result<Vec<u8>, CompositorError> {
        CompositorApi::composite(self, request).await
    }
}
