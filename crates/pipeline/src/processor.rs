//! The processing orchestrator.
//!
//! Processing is a synchronous request/response cycle per image. Nothing is
//! retried or queued; every failure is logged and reported in the returned
//! [`ProcessingResult`]. Only the final step writes the image row, so a
//! failed run leaves it untouched.
//!
//! Two concurrent runs on the same image both upload a result and the last
//! one to persist wins `optimized_url`.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use showroom_cloud::StorageProvider;
use showroom_compositor::CompositeRequest;
use showroom_core::background::TemplateSelector;
use showroom_core::image_type::{should_process_image, ImageType};
use showroom_core::processing_status::{derive_status, ProcessingStatus};
use showroom_core::prompts::build_prompt;
use showroom_core::storage::{
    extension_for_content_type, sniff_content_type, vehicle_image_path, StorageCategory,
};
use showroom_core::types::{DbId, Timestamp};
use showroom_db::models::vehicle_image::ImageOwner;

use crate::error::ProcessingError;
use crate::ports::{Compositor, ImageRecords, ImageSource};

/// Content type assumed for composited bytes whose format cannot be sniffed.
const FALLBACK_CONTENT_TYPE: &str = "image/png";

/// Outcome of processing one image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimized_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<bool>,
}

impl ProcessingResult {
    pub fn skipped() -> Self {
        Self {
            success: true,
            optimized_url: None,
            processed_at: None,
            error: None,
            skipped: Some(true),
        }
    }

    pub fn succeeded(optimized_url: String, processed_at: Timestamp) -> Self {
        Self {
            success: true,
            optimized_url: Some(optimized_url),
            processed_at: Some(processed_at),
            error: None,
            skipped: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            optimized_url: None,
            processed_at: None,
            error: Some(error.into()),
            skipped: None,
        }
    }
}

/// Result for one image within a vehicle batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageProcessingOutcome {
    pub image_id: DbId,
    pub image_type: ImageType,
    #[serde(flatten)]
    pub result: ProcessingResult,
}

/// Result of processing every key image of a vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleProcessingSummary {
    pub vehicle_id: DbId,
    pub status: ProcessingStatus,
    pub results: Vec<ImageProcessingOutcome>,
}

/// Runs key images through the compositing pipeline.
#[derive(Clone)]
pub struct ImageProcessor {
    records: Arc<dyn ImageRecords>,
    source: Arc<dyn ImageSource>,
    compositor: Arc<dyn Compositor>,
    storage: Arc<dyn StorageProvider>,
    selector: TemplateSelector,
}

impl ImageProcessor {
    pub fn new(
        records: Arc<dyn ImageRecords>,
        source: Arc<dyn ImageSource>,
        compositor: Arc<dyn Compositor>,
        storage: Arc<dyn StorageProvider>,
        selector: TemplateSelector,
    ) -> Self {
        Self {
            records,
            source,
            compositor,
            storage,
            selector,
        }
    }

    pub fn selector(&self) -> &TemplateSelector {
        &self.selector
    }

    /// Replace the background of one image.
    ///
    /// Gallery images are skipped without touching any collaborator. For a
    /// key image the vehicle is marked `IN_PROGRESS` up front, and once the
    /// run ends, whatever its outcome, the vehicle's status is re-derived from
    /// the `is_optimized` flags of its key images. Re-processing an already
    /// processed image is allowed and replaces its `optimized_url`.
    pub async fn process_image(
        &self,
        image_id: DbId,
        original_url: &str,
        image_type: ImageType,
    ) -> ProcessingResult {
        if !should_process_image(image_type) {
            tracing::debug!(image_id, %image_type, "Skipping gallery image");
            return ProcessingResult::skipped();
        }

        tracing::info!(image_id, %image_type, "Processing image");
        let owner = match self.find_owner(image_id).await {
            Ok(owner) => owner,
            Err(e) => return failure(image_id, image_type, original_url, e),
        };

        self.write_status(owner.vehicle_id, ProcessingStatus::InProgress).await;
        let result = self.process_owned(&owner, original_url, image_type).await;
        self.refresh_status(owner.vehicle_id).await;
        result
    }

    /// Process every key image of a vehicle in turn.
    ///
    /// The vehicle is marked `IN_PROGRESS` first, then `COMPLETED` when every
    /// key image succeeded or `ERROR` otherwise. A vehicle with no key images
    /// goes back to `NOT_STARTED`.
    pub async fn process_vehicle(
        &self,
        vehicle_id: DbId,
    ) -> Result<VehicleProcessingSummary, ProcessingError> {
        if !self
            .records
            .set_vehicle_status(vehicle_id, ProcessingStatus::InProgress)
            .await?
        {
            return Err(ProcessingError::VehicleNotFound(vehicle_id));
        }

        let images = match self.records.list_key_images(vehicle_id).await {
            Ok(images) => images,
            Err(e) => {
                self.write_status(vehicle_id, ProcessingStatus::Error).await;
                return Err(e.into());
            }
        };

        let mut results = Vec::with_capacity(images.len());
        for image in &images {
            let image_type = image.kind();
            let result = match self.find_owner(image.id).await {
                Ok(owner) => self.process_owned(&owner, &image.original_url, image_type).await,
                Err(e) => failure(image.id, image_type, &image.original_url, e),
            };
            results.push(ImageProcessingOutcome {
                image_id: image.id,
                image_type,
                result,
            });
        }

        let status = if results.is_empty() {
            ProcessingStatus::NotStarted
        } else if results.iter().all(|r| r.result.success) {
            ProcessingStatus::Completed
        } else {
            ProcessingStatus::Error
        };
        self.write_status(vehicle_id, status).await;

        tracing::info!(
            vehicle_id,
            %status,
            processed = results.iter().filter(|r| r.result.success).count(),
            total = results.len(),
            "Vehicle processing finished",
        );
        Ok(VehicleProcessingSummary {
            vehicle_id,
            status,
            results,
        })
    }

    async fn find_owner(&self, image_id: DbId) -> Result<ImageOwner, ProcessingError> {
        self.records
            .find_owner(image_id)
            .await?
            .ok_or(ProcessingError::ImageNotFound(image_id))
    }

    async fn write_status(&self, vehicle_id: DbId, status: ProcessingStatus) {
        if let Err(e) = self.records.set_vehicle_status(vehicle_id, status).await {
            tracing::error!(vehicle_id, %status, error = %e, "Failed to update vehicle status");
        }
    }

    async fn refresh_status(&self, vehicle_id: DbId) {
        match self.records.list_key_images(vehicle_id).await {
            Ok(images) => {
                let status = derive_status(images.iter().map(|image| image.is_optimized));
                self.write_status(vehicle_id, status).await;
            }
            Err(e) => {
                tracing::error!(vehicle_id, error = %e, "Failed to load key images for status");
            }
        }
    }

    async fn process_owned(
        &self,
        owner: &ImageOwner,
        original_url: &str,
        image_type: ImageType,
    ) -> ProcessingResult {
        match self.run(owner, original_url, image_type).await {
            Ok((optimized_url, processed_at)) => {
                tracing::info!(
                    image_id = owner.image_id,
                    %image_type,
                    %optimized_url,
                    "Image processed",
                );
                ProcessingResult::succeeded(optimized_url, processed_at)
            }
            Err(e) => failure(owner.image_id, image_type, original_url, e),
        }
    }

    async fn run(
        &self,
        owner: &ImageOwner,
        original_url: &str,
        image_type: ImageType,
    ) -> Result<(String, Timestamp), ProcessingError> {
        let image_id = owner.image_id;
        let original = self.source.fetch(original_url).await?;
        tracing::debug!(image_id, size = original.len(), "Downloaded original");

        let backgrounds = self.records.store_backgrounds(owner.store_id).await?;
        let background = self
            .selector
            .select_for_store(image_type, &backgrounds)
            .ok_or(ProcessingError::NoBackground(image_type))?;
        let key = image_type
            .key()
            .ok_or(ProcessingError::NoBackground(image_type))?;

        let request = CompositeRequest::new(&original, &background.template_url, build_prompt(key));
        let processed = self.compositor.composite(&request).await?;
        tracing::debug!(
            image_id,
            template = %background.template_name,
            size = processed.len(),
            "Composite received",
        );

        let content_type = sniff_content_type(&processed).unwrap_or(FALLBACK_CONTENT_TYPE);
        let ext = extension_for_content_type(content_type).unwrap_or("png");
        let processed_at = Utc::now();
        let path = vehicle_image_path(
            owner.store_id,
            owner.vehicle_id,
            StorageCategory::Processed,
            processed_at,
            ext,
        );
        let optimized_url = self.storage.upload(&path, processed, content_type).await?;

        let persisted = self
            .records
            .mark_optimized(image_id, &optimized_url, processed_at)
            .await;
        match persisted {
            Ok(true) => Ok((optimized_url, processed_at)),
            Ok(false) => {
                self.discard(&path).await;
                Err(ProcessingError::ImageNotFound(image_id))
            }
            Err(e) => {
                self.discard(&path).await;
                Err(e.into())
            }
        }
    }

    /// Remove an uploaded composite that no row points to, best effort.
    async fn discard(&self, path: &str) {
        if let Err(e) = self.storage.delete(path).await {
            tracing::warn!(path, error = %e, "Failed to remove unreferenced composite");
        }
    }
}

fn failure(
    image_id: DbId,
    image_type: ImageType,
    original_url: &str,
    error: ProcessingError,
) -> ProcessingResult {
    tracing::error!(
        image_id,
        %image_type,
        original_url,
        error = %error,
        "Image processing failed",
    );
    ProcessingResult::failed(error.to_string())
}
