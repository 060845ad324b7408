//! Handlers for the `/vehicles` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use showroom_core::categorization::{partition, PartitionedImages};
use showroom_core::error::CoreError;
use showroom_core::types::DbId;
use showroom_db::models::vehicle::{CreateVehicle, UpdateVehicle, Vehicle};
use showroom_db::models::vehicle_image::VehicleImage;
use showroom_db::repositories::{VehicleImageRepo, VehicleRepo};

use super::store::find_store;
use super::{image_urls, remove_stored_objects};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStoreScope;
use crate::query::StoreScopeParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// A vehicle with its images split into key slots and gallery buckets.
#[derive(Debug, Serialize)]
pub struct VehicleDetail {
    #[serde(flatten)]
    pub vehicle: Vehicle,
    #[serde(flatten)]
    pub images: PartitionedImages<VehicleImage>,
}

/// Load a vehicle the caller may access, or fail with 404/403.
pub(crate) async fn load_vehicle(
    state: &AppState,
    user: &AuthUser,
    id: DbId,
) -> AppResult<Vehicle> {
    let vehicle = VehicleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Vehicle",
            id,
        }))?;
    user.ensure_store_access(vehicle.store_id)?;
    Ok(vehicle)
}

/// GET /api/v1/vehicles?store_id=
///
/// Without `store_id`, admins get every vehicle and staff get their store's.
pub async fn list(
    RequireStoreScope(user): RequireStoreScope,
    State(state): State<AppState>,
    Query(params): Query<StoreScopeParams>,
) -> AppResult<Json<DataResponse<Vec<Vehicle>>>> {
    let vehicles = match params.store_id.or(user.store_id) {
        Some(store_id) => {
            user.ensure_store_access(store_id)?;
            VehicleRepo::list_by_store(&state.pool, store_id).await?
        }
        None => VehicleRepo::list(&state.pool).await?,
    };
    Ok(Json(DataResponse { data: vehicles }))
}

/// POST /api/v1/vehicles
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateVehicle>,
) -> AppResult<(StatusCode, Json<DataResponse<Vehicle>>)> {
    user.ensure_store_access(input.store_id)?;
    find_store(&state, input.store_id).await?;

    let vehicle = VehicleRepo::create(&state.pool, &input).await?;
    tracing::info!(vehicle_id = vehicle.id, store_id = vehicle.store_id, "Vehicle created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: vehicle })))
}

/// GET /api/v1/vehicles/{id}
pub async fn get_by_id(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<VehicleDetail>>> {
    let vehicle = load_vehicle(&state, &user, id).await?;
    let images = VehicleImageRepo::list_by_vehicle(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: VehicleDetail {
            vehicle,
            images: partition(images),
        },
    }))
}

/// PUT /api/v1/vehicles/{id}
pub async fn update(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateVehicle>,
) -> AppResult<Json<DataResponse<Vehicle>>> {
    load_vehicle(&state, &user, id).await?;
    let vehicle = VehicleRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Vehicle",
            id,
        }))?;
    Ok(Json(DataResponse { data: vehicle }))
}

/// DELETE /api/v1/vehicles/{id}
///
/// Image rows cascade; their stored objects are removed afterwards, best
/// effort.
pub async fn delete(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    load_vehicle(&state, &user, id).await?;
    let urls: Vec<String> = VehicleImageRepo::list_by_vehicle(&state.pool, id)
        .await?
        .iter()
        .flat_map(image_urls)
        .collect();

    if !VehicleRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Vehicle",
            id,
        }));
    }
    tracing::info!(vehicle_id = id, objects = urls.len(), "Vehicle deleted");

    remove_stored_objects(state.storage.as_ref(), urls.iter().map(String::as_str)).await;
    Ok(StatusCode::NO_CONTENT)
}
