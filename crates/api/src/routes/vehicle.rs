//! Route definitions for the `/vehicles` resource and its images.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::{processing, vehicle, vehicle_image};
use crate::state::AppState;

/// Routes mounted at `/vehicles`.
///
/// ```text
/// GET    /                          -> list (?store_id=)
/// POST   /                          -> create
/// GET    /{id}                      -> get_by_id (with partitioned images)
/// PUT    /{id}                      -> update
/// DELETE /{id}                      -> delete
///
/// GET    /{id}/images               -> list
/// POST   /{id}/images               -> upload (multipart)
/// PATCH  /{id}/images/reorder       -> reorder
/// PATCH  /{id}/images/{image_id}    -> update_type
/// DELETE /{id}/images/{image_id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(vehicle::list).post(vehicle::create))
        .route(
            "/{id}",
            get(vehicle::get_by_id)
                .put(vehicle::update)
                .delete(vehicle::delete),
        )
        .route(
            "/{id}/images",
            get(vehicle_image::list).post(vehicle_image::upload),
        )
        .route("/{id}/images/reorder", patch(vehicle_image::reorder))
        .route(
            "/{id}/images/{image_id}",
            patch(vehicle_image::update_type).delete(vehicle_image::delete),
        )
}

/// AI processing routes, with full `/vehicles/...` paths so they can carry
/// their own timeout.
///
/// ```text
/// POST   /vehicles/{id}/process                    -> process_vehicle
/// POST   /vehicles/{id}/images/{image_id}/process  -> process_image
/// ```
pub fn processing_router() -> Router<AppState> {
    Router::new()
        .route(
            "/vehicles/{id}/process",
            post(processing::process_vehicle),
        )
        .route(
            "/vehicles/{id}/images/{image_id}/process",
            post(processing::process_image),
        )
}
