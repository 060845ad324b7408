//! Route definitions for the `/stores` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::store;
use crate::state::AppState;

/// Routes mounted at `/stores`.
///
/// ```text
/// GET    /                              -> list
/// POST   /                              -> create (admin)
/// GET    /{id}                          -> get_by_id
/// PUT    /{id}                          -> update (admin)
/// DELETE /{id}                          -> delete (admin)
/// POST   /{id}/image                    -> upload_image
/// PUT    /{id}/backgrounds/{image_type} -> upload_background
/// DELETE /{id}/backgrounds/{image_type} -> clear_background
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(store::list).post(store::create))
        .route(
            "/{id}",
            get(store::get_by_id)
                .put(store::update)
                .delete(store::delete),
        )
        .route("/{id}/image", post(store::upload_image))
        .route(
            "/{id}/backgrounds/{image_type}",
            put(store::upload_background).delete(store::clear_background),
        )
}
