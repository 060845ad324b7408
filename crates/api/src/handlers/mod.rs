pub mod background;
pub mod processing;
pub mod store;
pub mod vehicle;
pub mod vehicle_image;

use showroom_cloud::StorageProvider;
use showroom_core::types::DbId;
use showroom_db::models::vehicle_image::VehicleImage;
use showroom_db::repositories::VehicleRepo;
use showroom_db::DbPool;

/// Delete the objects behind `urls`, best effort.
///
/// URLs that do not point into `storage` are skipped. Failures are logged
/// and otherwise ignored: the rows referencing them are already gone.
pub(crate) async fn remove_stored_objects<'a>(
    storage: &dyn StorageProvider,
    urls: impl IntoIterator<Item = &'a str>,
) {
    for url in urls {
        let Some(path) = storage.path_from_url(url) else {
            tracing::debug!(url, "Not a managed object, leaving in place");
            continue;
        };
        if let Err(e) = storage.delete(&path).await {
            tracing::warn!(path = %path, error = %e, "Failed to delete stored object");
        }
    }
}

/// Re-derive a vehicle's processing status after its key images changed.
///
/// The image write has already committed, so a failure here is only logged.
pub(crate) async fn refresh_vehicle_status(pool: &DbPool, vehicle_id: DbId) {
    match VehicleRepo::refresh_processing_status(pool, vehicle_id).await {
        Ok(Some(status)) => tracing::debug!(vehicle_id, %status, "Vehicle status refreshed"),
        Ok(None) => {}
        Err(e) => {
            tracing::warn!(vehicle_id, error = %e, "Failed to refresh vehicle processing status");
        }
    }
}

/// Every stored URL of an image row.
pub(crate) fn image_urls(image: &VehicleImage) -> Vec<String> {
    std::iter::once(Some(&image.original_url))
        .chain([
            image.processed_url.as_ref(),
            image.optimized_url.as_ref(),
            image.thumbnail_url.as_ref(),
        ])
        .flatten()
        .cloned()
        .collect()
}
