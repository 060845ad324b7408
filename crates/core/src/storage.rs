//! Object storage path conventions and content-type helpers.
//!
//! ```text
//! stores/{store_id}/vehicles/{vehicle_id}/{category}/{unique_id}_{timestamp}.{ext}
//! stores/{store_id}/store-image.{ext}
//! stores/{store_id}/backgrounds/bg-{type}.{ext}
//! ```

use crate::error::CoreError;
use crate::image_type::KeyImageType;
use crate::types::{DbId, Timestamp};

/// Which copy of a vehicle photo a path holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageCategory {
    Original,
    Processed,
    Thumbnail,
}

impl StorageCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::Processed => "processed",
            Self::Thumbnail => "thumbnails",
        }
    }
}

/// Accepted upload formats, as `(content_type, extension)`.
const IMAGE_FORMATS: &[(&str, &str)] = &[
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/webp", "webp"),
];

/// Fresh collision-resistant path for a vehicle photo.
///
/// The unique part is a random UUID; the timestamp (milliseconds) keeps
/// paths roughly sortable by upload time.
pub fn vehicle_image_path(
    store_id: DbId,
    vehicle_id: DbId,
    category: StorageCategory,
    now: Timestamp,
    ext: &str,
) -> String {
    let unique_id = uuid::Uuid::new_v4().simple();
    format!(
        "stores/{store_id}/vehicles/{vehicle_id}/{}/{unique_id}_{}.{ext}",
        category.as_str(),
        now.timestamp_millis()
    )
}

/// Path of a store's hero image. Re-uploads overwrite in place.
pub fn store_image_path(store_id: DbId, ext: &str) -> String {
    format!("stores/{store_id}/store-image.{ext}")
}

/// Path of a store's background override for one key type.
pub fn store_background_path(store_id: DbId, key: KeyImageType, ext: &str) -> String {
    format!("stores/{store_id}/backgrounds/bg-{}.{ext}", key.slug())
}

/// File extension for an accepted image content type.
pub fn extension_for_content_type(content_type: &str) -> Result<&'static str, CoreError> {
    let normalized = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    let normalized = if normalized == "image/jpg" {
        "image/jpeg".to_string()
    } else {
        normalized
    };
    IMAGE_FORMATS
        .iter()
        .find(|(ct, _)| *ct == normalized)
        .map(|(_, ext)| *ext)
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "Unsupported image content type '{content_type}'. Must be JPEG, PNG or WebP"
            ))
        })
}

/// Content type for a file extension (case-insensitive), if accepted.
pub fn content_type_for_extension(ext: &str) -> Option<&'static str> {
    let ext = ext.to_ascii_lowercase();
    let ext = if ext == "jpeg" { "jpg" } else { ext.as_str() };
    IMAGE_FORMATS
        .iter()
        .find(|(_, e)| *e == ext)
        .map(|(ct, _)| *ct)
}

/// Sniff the content type of image bytes from their header.
///
/// Returns `None` for anything that is not JPEG, PNG or WebP.
pub fn sniff_content_type(bytes: &[u8]) -> Option<&'static str> {
    match image::guess_format(bytes).ok()? {
        image::ImageFormat::Jpeg => Some("image/jpeg"),
        image::ImageFormat::Png => Some("image/png"),
        image::ImageFormat::WebP => Some("image/webp"),
        _ => None,
    }
}
