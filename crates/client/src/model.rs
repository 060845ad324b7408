use serde::{Deserialize, Serialize};
use showroom_core::categorization::CategorizedImage;
use showroom_core::image_type::ImageType;
use showroom_core::types::DbId;

/// The fields of a vehicle image the gallery editor works with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub id: DbId,
    pub vehicle_id: DbId,
    pub image_type: ImageType,
    pub original_url: String,
    #[serde(default)]
    pub optimized_url: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    pub sort_order: i32,
}

impl CategorizedImage for GalleryImage {
    fn image_id(&self) -> DbId {
        self.id
    }

    fn image_type(&self) -> ImageType {
        self.image_type
    }

    fn sort_order(&self) -> i32 {
        self.sort_order
    }
}
