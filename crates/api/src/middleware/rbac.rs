//! Role and store-scope extractors.
//!
//! Both wrap [`AuthUser`]. Per-store checks that depend on the resource
//! (a vehicle's store, a path id) stay in the handlers via
//! [`AuthUser::ensure_store_access`].

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use showroom_core::error::CoreError;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn create_store(RequireAdmin(admin): RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_admin() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Requires an admin, or staff whose token names a store.
///
/// Staff tokens without a `store_id` claim can reach nothing, so they are
/// rejected up front with 403.
pub struct RequireStoreScope(pub AuthUser);

impl FromRequestParts<AppState> for RequireStoreScope {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_admin() && user.store_id.is_none() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Token is not scoped to a store".into(),
            )));
        }
        Ok(RequireStoreScope(user))
    }
}
