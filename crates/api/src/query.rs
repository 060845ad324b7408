//! Shared query parameter types for API handlers.

use serde::Deserialize;
use showroom_core::types::DbId;

/// Optional `?store_id=` scope, used by the vehicle list and the background
/// preview.
#[derive(Debug, Default, Deserialize)]
pub struct StoreScopeParams {
    pub store_id: Option<DbId>,
}
