//! Handlers for the `/stores` resource, including the store's hero image and
//! its per-slot background overrides.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use showroom_core::error::CoreError;
use showroom_core::storage::{store_background_path, store_image_path};
use showroom_core::types::DbId;
use showroom_db::models::store::{CreateStore, Store, UpdateStore};
use showroom_db::repositories::{StoreRepo, VehicleImageRepo, VehicleRepo};

use super::background::parse_key_type;
use super::{image_urls, remove_stored_objects};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireStoreScope};
use crate::response::DataResponse;
use crate::state::AppState;
use crate::upload::read_upload_form;

/// Load a store or fail with 404.
pub(crate) async fn find_store(state: &AppState, id: DbId) -> AppResult<Store> {
    StoreRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Store", id }))
}

fn validate_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Store name must not be empty".into(),
        )));
    }
    Ok(())
}

/// GET /api/v1/stores
///
/// Admins see every store; staff see the store in their token.
pub async fn list(
    RequireStoreScope(user): RequireStoreScope,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Store>>>> {
    let stores = match user.store_id {
        Some(store_id) if !user.is_admin() => StoreRepo::find_by_id(&state.pool, store_id)
            .await?
            .into_iter()
            .collect(),
        _ => StoreRepo::list(&state.pool).await?,
    };
    Ok(Json(DataResponse { data: stores }))
}

/// POST /api/v1/stores
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateStore>,
) -> AppResult<(StatusCode, Json<DataResponse<Store>>)> {
    validate_name(&input.name)?;
    let store = StoreRepo::create(&state.pool, &input).await?;
    tracing::info!(store_id = store.id, user_id = admin.user_id, "Store created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: store })))
}

/// GET /api/v1/stores/{id}
pub async fn get_by_id(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Store>>> {
    user.ensure_store_access(id)?;
    let store = find_store(&state, id).await?;
    Ok(Json(DataResponse { data: store }))
}

/// PUT /api/v1/stores/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStore>,
) -> AppResult<Json<DataResponse<Store>>> {
    if let Some(name) = &input.name {
        validate_name(name)?;
    }
    let store = StoreRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Store", id }))?;
    Ok(Json(DataResponse { data: store }))
}

/// DELETE /api/v1/stores/{id}
///
/// Vehicles and images cascade in the database; their stored objects are
/// removed afterwards, best effort.
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let store = find_store(&state, id).await?;

    let mut urls: Vec<String> = store.image_url.iter().cloned().collect();
    urls.extend(store.backgrounds().iter().map(|(_, url)| url.clone()));
    for vehicle in VehicleRepo::list_by_store(&state.pool, id).await? {
        for image in VehicleImageRepo::list_by_vehicle(&state.pool, vehicle.id).await? {
            urls.extend(image_urls(&image));
        }
    }

    if !StoreRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "Store", id }));
    }
    tracing::info!(
        store_id = id,
        user_id = admin.user_id,
        objects = urls.len(),
        "Store deleted",
    );

    remove_stored_objects(state.storage.as_ref(), urls.iter().map(String::as_str)).await;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/stores/{id}/image
///
/// Multipart with one image file. Replaces the store's hero image.
pub async fn upload_image(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<Json<DataResponse<Store>>> {
    user.ensure_store_access(id)?;
    let existing = find_store(&state, id).await?;
    let image = read_upload_form(&mut multipart).await?.into_single_image()?;

    let path = store_image_path(id, image.extension);
    let url = state
        .storage
        .upload(&path, image.bytes, image.content_type)
        .await?;

    let store = StoreRepo::set_image_url(&state.pool, id, &url)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Store", id }))?;

    if let Some(old) = existing.image_url.as_deref().filter(|old| *old != url) {
        remove_stored_objects(state.storage.as_ref(), [old]).await;
    }
    tracing::info!(store_id = id, %url, "Store image uploaded");
    Ok(Json(DataResponse { data: store }))
}

/// PUT /api/v1/stores/{id}/backgrounds/{image_type}
///
/// Multipart with one image file. The uploaded background is used instead
/// of the canned template when this store's images of that key type are
/// processed.
pub async fn upload_background(
    user: AuthUser,
    State(state): State<AppState>,
    Path((id, image_type)): Path<(DbId, String)>,
    mut multipart: Multipart,
) -> AppResult<Json<DataResponse<Store>>> {
    user.ensure_store_access(id)?;
    let key = parse_key_type(&image_type)?;
    let existing = find_store(&state, id).await?;
    let image = read_upload_form(&mut multipart).await?.into_single_image()?;

    let path = store_background_path(id, key, image.extension);
    let url = state
        .storage
        .upload(&path, image.bytes, image.content_type)
        .await?;

    let store = StoreRepo::set_background(&state.pool, id, key, Some(&url))
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Store", id }))?;

    if let Some(old) = existing.background_url(key).filter(|old| *old != url) {
        remove_stored_objects(state.storage.as_ref(), [old]).await;
    }
    tracing::info!(store_id = id, %key, %url, "Store background uploaded");
    Ok(Json(DataResponse { data: store }))
}

/// DELETE /api/v1/stores/{id}/backgrounds/{image_type}
///
/// Falls back to the canned template for that key type.
pub async fn clear_background(
    user: AuthUser,
    State(state): State<AppState>,
    Path((id, image_type)): Path<(DbId, String)>,
) -> AppResult<Json<DataResponse<Store>>> {
    user.ensure_store_access(id)?;
    let key = parse_key_type(&image_type)?;
    let existing = find_store(&state, id).await?;

    let store = StoreRepo::set_background(&state.pool, id, key, None)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Store", id }))?;

    if let Some(old) = existing.background_url(key) {
        remove_stored_objects(state.storage.as_ref(), [old]).await;
    }
    tracing::info!(store_id = id, %key, "Store background cleared");
    Ok(Json(DataResponse { data: store }))
}
