//! Background template preview.

use axum::extract::{Path, Query, State};
use axum::Json;
use showroom_core::background::BackgroundTemplateResult;
use showroom_core::error::CoreError;
use showroom_core::image_type::{ImageType, KeyImageType};

use super::store::find_store;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::StoreScopeParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Parse a path segment naming one of the six key image types.
pub(crate) fn parse_key_type(raw: &str) -> AppResult<KeyImageType> {
    let image_type: ImageType = raw.parse()?;
    image_type.key().ok_or_else(|| {
        AppError::Core(CoreError::Validation(format!(
            "{image_type} is a gallery type; backgrounds apply to key image types only"
        )))
    })
}

/// GET /api/v1/backgrounds/{image_type}?store_id=
///
/// The background an image of this type would be composited onto. With a
/// `store_id`, that store's override wins over the canned template.
/// Gallery types have no background and yield `{"data": null}`.
pub async fn preview(
    user: AuthUser,
    State(state): State<AppState>,
    Path(image_type): Path<String>,
    Query(params): Query<StoreScopeParams>,
) -> AppResult<Json<DataResponse<Option<BackgroundTemplateResult>>>> {
    let image_type: ImageType = image_type.parse()?;
    let selector = state.processor.selector();

    let selection = match params.store_id {
        Some(store_id) => {
            user.ensure_store_access(store_id)?;
            let store = find_store(&state, store_id).await?;
            selector.select_for_store(image_type, &store.backgrounds())
        }
        None => selector.select(image_type),
    };
    Ok(Json(DataResponse { data: selection }))
}
