//! Vehicle image model, DTOs, and the request bodies of the reorder API.

use serde::{Deserialize, Serialize};
use showroom_core::categorization::{CategorizedImage, SortOrderUpdate};
use showroom_core::image_type::ImageType;
use showroom_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `vehicle_images` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VehicleImage {
    pub id: DbId,
    pub vehicle_id: DbId,
    pub image_type: String,
    pub original_url: String,
    pub processed_url: Option<String>,
    pub optimized_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub sort_order: i32,
    pub is_processed: bool,
    pub is_optimized: bool,
    pub processed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl VehicleImage {
    /// Parsed image type. Unknown strings fall back to the legacy
    /// uncategorized gallery bucket.
    pub fn kind(&self) -> ImageType {
        self.image_type.parse().unwrap_or(ImageType::GALLERY)
    }
}

impl CategorizedImage for VehicleImage {
    fn image_id(&self) -> DbId {
        self.id
    }

    fn image_type(&self) -> ImageType {
        self.kind()
    }

    fn sort_order(&self) -> i32 {
        self.sort_order
    }
}

/// DTO for inserting a new vehicle image.
#[derive(Debug, Clone)]
pub struct CreateVehicleImage {
    pub vehicle_id: DbId,
    pub image_type: ImageType,
    pub original_url: String,
    pub thumbnail_url: Option<String>,
    pub sort_order: i32,
}

/// Body of `PATCH /vehicles/{id}/images/reorder`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderImages {
    pub image_updates: Vec<SortOrderUpdate>,
}

/// Body of `PATCH /vehicles/{id}/images/{image_id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateImageType {
    pub image_type: ImageType,
}

/// Vehicle and store that own an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct ImageOwner {
    pub image_id: DbId,
    pub vehicle_id: DbId,
    pub store_id: DbId,
}
