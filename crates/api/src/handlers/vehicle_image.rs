//! Handlers for `/vehicles/{vehicle_id}/images`: upload, gallery reorder,
//! recategorization and delete.
//!
//! Every write that moves gallery images keeps each bucket's `sort_order`
//! contiguous from 0 and runs in one transaction. Writes that add, remove or
//! move a key image re-derive the vehicle's processing status.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use showroom_core::categorization::{
    assign_upload_types, partition, plan_delete, plan_recategorize, validate_bucket_reorder,
    PartitionedImages, UploadAssignment,
};
use showroom_core::error::CoreError;
use showroom_core::image_type::{GalleryBucket, ImageType};
use showroom_core::storage::{vehicle_image_path, StorageCategory};
use showroom_core::types::DbId;
use showroom_db::models::vehicle_image::{
    CreateVehicleImage, ReorderImages, UpdateImageType, VehicleImage,
};
use showroom_db::repositories::VehicleImageRepo;

use super::vehicle::load_vehicle;
use super::{image_urls, refresh_vehicle_status, remove_stored_objects};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::upload::read_upload_form;

/// Multipart text field forcing one type for the uploaded file.
const FIELD_IMAGE_TYPE: &str = "imageType";
/// Multipart text field naming the gallery bucket for overflow uploads.
const FIELD_GALLERY_BUCKET: &str = "galleryBucket";

/// GET /api/v1/vehicles/{vehicle_id}/images
pub async fn list(
    user: AuthUser,
    State(state): State<AppState>,
    Path(vehicle_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<VehicleImage>>>> {
    load_vehicle(&state, &user, vehicle_id).await?;
    let images = VehicleImageRepo::list_by_vehicle(&state.pool, vehicle_id).await?;
    Ok(Json(DataResponse { data: images }))
}

/// Decide the type and position of each uploaded file.
///
/// - explicit key type: exactly one file, and the slot must be empty;
/// - explicit gallery type: every file is appended to that bucket;
/// - otherwise empty key slots fill first, in sequence order, and the rest
///   is appended to `bucket`.
fn plan_upload(
    existing: &PartitionedImages<VehicleImage>,
    explicit: Option<ImageType>,
    bucket: GalleryBucket,
    count: usize,
) -> AppResult<Vec<UploadAssignment>> {
    match explicit {
        Some(ImageType::Key(key)) => {
            if count != 1 {
                return Err(AppError::Core(CoreError::Validation(format!(
                    "An upload typed {key} must contain exactly one file, got {count}"
                ))));
            }
            if let Some(occupant) = existing.key_images.get(key) {
                return Err(AppError::Core(CoreError::Conflict(format!(
                    "Key slot {key} is already occupied by image {}",
                    occupant.id
                ))));
            }
            Ok(vec![UploadAssignment {
                image_type: ImageType::Key(key),
                sort_order: 0,
            }])
        }
        Some(ImageType::Gallery(bucket)) => Ok(assign_upload_types(
            &[],
            bucket,
            existing.gallery.bucket(bucket).len(),
            count,
        )),
        None => Ok(assign_upload_types(
            &existing.key_images.empty_slots(),
            bucket,
            existing.gallery.bucket(bucket).len(),
            count,
        )),
    }
}

/// POST /api/v1/vehicles/{vehicle_id}/images
///
/// Multipart with one or more image files. Optional text fields:
/// `imageType` (a single file of that type) and `galleryBucket`
/// (`exterior`, `interior` or `uncategorized`; default `exterior`).
pub async fn upload(
    user: AuthUser,
    State(state): State<AppState>,
    Path(vehicle_id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<Vec<VehicleImage>>>)> {
    let vehicle = load_vehicle(&state, &user, vehicle_id).await?;
    let form = read_upload_form(&mut multipart).await?;
    if form.images.is_empty() {
        return Err(AppError::BadRequest("No image files in upload".into()));
    }

    let explicit = form
        .field(FIELD_IMAGE_TYPE)
        .map(str::parse::<ImageType>)
        .transpose()?;
    let bucket = form
        .field(FIELD_GALLERY_BUCKET)
        .map(str::parse::<GalleryBucket>)
        .transpose()?
        .unwrap_or(GalleryBucket::Exterior);

    let existing = partition(VehicleImageRepo::list_by_vehicle(&state.pool, vehicle_id).await?);
    let assignments = plan_upload(&existing, explicit, bucket, form.images.len())?;

    let now = Utc::now();
    let uploads = form.images.into_iter().map(|image| {
        let storage = state.storage.clone();
        let path = vehicle_image_path(
            vehicle.store_id,
            vehicle_id,
            StorageCategory::Original,
            now,
            image.extension,
        );
        async move { storage.upload(&path, image.bytes, image.content_type).await }
    });

    let mut urls = Vec::with_capacity(assignments.len());
    let mut failure = None;
    for result in futures::future::join_all(uploads).await {
        match result {
            Ok(url) => urls.push(url),
            Err(e) => {
                failure.get_or_insert(e);
            }
        }
    }
    if let Some(e) = failure {
        remove_stored_objects(state.storage.as_ref(), urls.iter().map(String::as_str)).await;
        return Err(e.into());
    }

    let inputs: Vec<CreateVehicleImage> = assignments
        .iter()
        .zip(&urls)
        .map(|(assignment, url)| CreateVehicleImage {
            vehicle_id,
            image_type: assignment.image_type,
            original_url: url.clone(),
            thumbnail_url: None,
            sort_order: assignment.sort_order,
        })
        .collect();

    let created = match VehicleImageRepo::create_many(&state.pool, &inputs).await {
        Ok(created) => created,
        Err(e) => {
            remove_stored_objects(state.storage.as_ref(), urls.iter().map(String::as_str)).await;
            return Err(e.into());
        }
    };

    let key_images = created.iter().filter(|i| i.kind().is_key()).count();
    tracing::info!(
        vehicle_id,
        count = created.len(),
        key_images,
        "Vehicle images uploaded",
    );
    if key_images > 0 {
        refresh_vehicle_status(&state.pool, vehicle_id).await;
    }
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// PATCH /api/v1/vehicles/{vehicle_id}/images/reorder
///
/// Body `{"imageUpdates": [{"id", "sortOrder"}]}` naming every image of one
/// gallery bucket with orders `0..n-1`. Returns the vehicle's images.
pub async fn reorder(
    user: AuthUser,
    State(state): State<AppState>,
    Path(vehicle_id): Path<DbId>,
    Json(input): Json<ReorderImages>,
) -> AppResult<Json<DataResponse<Vec<VehicleImage>>>> {
    load_vehicle(&state, &user, vehicle_id).await?;
    let images = VehicleImageRepo::list_by_vehicle(&state.pool, vehicle_id).await?;

    let first = input.image_updates.first().ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "Reorder request contains no image updates".into(),
        ))
    })?;
    let anchor = images
        .iter()
        .find(|i| i.id == first.id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "VehicleImage",
            id: first.id,
        }))?;
    let bucket = anchor.kind().bucket().ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "Key images have no gallery order".into(),
        ))
    })?;

    let bucket_ids: Vec<DbId> = images
        .iter()
        .filter(|i| i.kind() == ImageType::Gallery(bucket))
        .map(|i| i.id)
        .collect();
    validate_bucket_reorder(&bucket_ids, &input.image_updates)?;

    VehicleImageRepo::apply_sort_orders(&state.pool, vehicle_id, &input.image_updates).await?;
    tracing::info!(
        vehicle_id,
        bucket = bucket.as_str(),
        count = input.image_updates.len(),
        "Gallery reordered",
    );

    let images = VehicleImageRepo::list_by_vehicle(&state.pool, vehicle_id).await?;
    Ok(Json(DataResponse { data: images }))
}

/// PATCH /api/v1/vehicles/{vehicle_id}/images/{image_id}
///
/// Body `{"imageType": "..."}`. Gallery destinations append the image; a
/// key destination must be empty (409 otherwise). The bucket the image left
/// is renumbered.
pub async fn update_type(
    user: AuthUser,
    State(state): State<AppState>,
    Path((vehicle_id, image_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateImageType>,
) -> AppResult<Json<DataResponse<VehicleImage>>> {
    load_vehicle(&state, &user, vehicle_id).await?;
    let images = VehicleImageRepo::list_by_vehicle(&state.pool, vehicle_id).await?;
    let plan = plan_recategorize(&images, image_id, input.image_type)?;

    if plan.is_noop() {
        let image = images
            .into_iter()
            .find(|i| i.id == image_id)
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "VehicleImage",
                id: image_id,
            }))?;
        return Ok(Json(DataResponse { data: image }));
    }

    let updated = VehicleImageRepo::recategorize(&state.pool, vehicle_id, &plan)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "VehicleImage",
            id: image_id,
        }))?;
    tracing::info!(
        vehicle_id,
        image_id,
        from = %plan.from,
        to = %plan.to,
        "Image recategorized",
    );
    if plan.from.is_key() || plan.to.is_key() {
        refresh_vehicle_status(&state.pool, vehicle_id).await;
    }
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/vehicles/{vehicle_id}/images/{image_id}
///
/// Closes the gap in the image's gallery bucket. Stored objects are removed
/// afterwards, best effort.
pub async fn delete(
    user: AuthUser,
    State(state): State<AppState>,
    Path((vehicle_id, image_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    load_vehicle(&state, &user, vehicle_id).await?;
    let images = VehicleImageRepo::list_by_vehicle(&state.pool, vehicle_id).await?;
    let plan = plan_delete(&images, image_id)?;

    let deleted = VehicleImageRepo::delete_with_renumber(&state.pool, vehicle_id, &plan)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "VehicleImage",
            id: image_id,
        }))?;
    tracing::info!(
        vehicle_id,
        image_id,
        image_type = %plan.image_type,
        renumbered = plan.sibling_updates.len(),
        "Image deleted",
    );
    if plan.image_type.is_key() {
        refresh_vehicle_status(&state.pool, vehicle_id).await;
    }

    let urls = image_urls(&deleted);
    remove_stored_objects(state.storage.as_ref(), urls.iter().map(String::as_str)).await;
    Ok(StatusCode::NO_CONTENT)
}
