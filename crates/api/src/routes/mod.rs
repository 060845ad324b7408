pub mod health;
pub mod store;
pub mod vehicle;

use axum::routing::get;
use axum::Router;

use crate::handlers::background;
use crate::state::AppState;

/// Build the `/api/v1` route tree, minus the processing routes (see
/// [`vehicle::processing_router`]).
///
/// ```text
/// /stores                                   list, create
/// /stores/{id}                              get, update, delete
/// /stores/{id}/image                        hero image upload
/// /stores/{id}/backgrounds/{image_type}     background override upload / clear
///
/// /backgrounds/{image_type}                 template preview (?store_id=)
///
/// /vehicles                                 list (?store_id=), create
/// /vehicles/{id}                            get (with images), update, delete
/// /vehicles/{id}/images                     list, upload
/// /vehicles/{id}/images/reorder             gallery bucket reorder
/// /vehicles/{id}/images/{image_id}          recategorize, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/stores", store::router())
        .nest("/vehicles", vehicle::router())
        .route("/backgrounds/{image_type}", get(background::preview))
}
