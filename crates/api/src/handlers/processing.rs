//! AI background replacement triggers.
//!
//! Processing runs inside the request. The orchestrator never fails the
//! request for a single image; its outcome is reported in the body and
//! mirrored in the status code (200 on success or skip, 502 when a step
//! failed).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use showroom_core::error::CoreError;
use showroom_core::types::DbId;
use showroom_db::repositories::VehicleImageRepo;
use showroom_pipeline::{ProcessingError, ProcessingResult, VehicleProcessingSummary};

use super::vehicle::load_vehicle;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/vehicles/{vehicle_id}/images/{image_id}/process
pub async fn process_image(
    user: AuthUser,
    State(state): State<AppState>,
    Path((vehicle_id, image_id)): Path<(DbId, DbId)>,
) -> AppResult<(StatusCode, Json<DataResponse<ProcessingResult>>)> {
    load_vehicle(&state, &user, vehicle_id).await?;
    let image = VehicleImageRepo::find_by_id(&state.pool, image_id)
        .await?
        .filter(|image| image.vehicle_id == vehicle_id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "VehicleImage",
            id: image_id,
        }))?;

    let result = state
        .processor
        .process_image(image.id, &image.original_url, image.kind())
        .await;

    let status = if result.success {
        StatusCode::OK
    } else {
        StatusCode::BAD_GATEWAY
    };
    Ok((status, Json(DataResponse { data: result })))
}

/// POST /api/v1/vehicles/{vehicle_id}/process
///
/// Processes every key image in turn and reports per-image results. The
/// vehicle ends `COMPLETED` or `ERROR`; partial failure is still a 200.
pub async fn process_vehicle(
    user: AuthUser,
    State(state): State<AppState>,
    Path(vehicle_id): Path<DbId>,
) -> AppResult<Json<DataResponse<VehicleProcessingSummary>>> {
    load_vehicle(&state, &user, vehicle_id).await?;

    let summary = state
        .processor
        .process_vehicle(vehicle_id)
        .await
        .map_err(|e| match e {
            ProcessingError::VehicleNotFound(id) => AppError::Core(CoreError::NotFound {
                entity: "Vehicle",
                id,
            }),
            ProcessingError::Records(err) => AppError::Database(err),
            other => AppError::InternalError(other.to_string()),
        })?;
    Ok(Json(DataResponse { data: summary }))
}
