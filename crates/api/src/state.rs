use std::sync::Arc;

use showroom_cloud::StorageProvider;
use showroom_pipeline::ImageProcessor;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything is behind `Arc` or is a pool handle.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: showroom_db::DbPool,
    /// Server configuration (JWT secret, limits).
    pub config: Arc<ServerConfig>,
    /// Object storage for uploads and composited images.
    pub storage: Arc<dyn StorageProvider>,
    /// AI background replacement orchestrator. Also owns the template
    /// selector used by the background preview.
    pub processor: Arc<ImageProcessor>,
}
