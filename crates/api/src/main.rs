use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use showroom_api::config::ServerConfig;
use showroom_api::router::build_app_router;
use showroom_api::state::AppState;
use showroom_cloud::{StorageBackend, StorageConfig};
use showroom_compositor::{CompositorApi, CompositorConfig};
use showroom_core::background::{TemplateConfig, TemplateSelector};
use showroom_pipeline::adapters::{HttpImageSource, PgImageRecords};
use showroom_pipeline::ImageProcessor;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "showroom_api=debug,showroom_pipeline=debug,showroom_cloud=debug,tower_http=debug"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = showroom_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    showroom_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    showroom_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Object storage ---
    let storage_config = StorageConfig::from_env().expect("Invalid storage configuration");
    let storage = showroom_cloud::build_storage(&storage_config)
        .await
        .expect("Failed to initialise object storage");
    let files_dir = match &storage_config.backend {
        StorageBackend::Local { root, .. } => Some(root.clone()),
        StorageBackend::S3 { .. } => None,
    };

    // --- AI processing ---
    let compositor_config =
        CompositorConfig::from_env().expect("Invalid AI compositor configuration");
    let compositor =
        CompositorApi::new(&compositor_config).expect("Failed to build AI compositor client");
    let source = HttpImageSource::new(Duration::from_secs(config.request_timeout_secs))
        .expect("Failed to build image download client");
    let templates =
        TemplateConfig::from_env().expect("Invalid background template configuration");
    tracing::info!(
        endpoint = %compositor_config.endpoint,
        background_base_url = templates.base_url(),
        "AI processing configured",
    );

    let processor = ImageProcessor::new(
        Arc::new(PgImageRecords::new(pool.clone())),
        Arc::new(source),
        Arc::new(compositor),
        Arc::clone(&storage),
        TemplateSelector::new(templates),
    );

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        storage,
        processor: Arc::new(processor),
    };

    let app = build_app_router(state, &config, files_dir.as_deref());

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    let shutdown = Arc::new(tokio::sync::Notify::new());
    let server = axum::serve(listener, app)
        .with_graceful_shutdown({
            let shutdown = Arc::clone(&shutdown);
            async move {
                shutdown_signal().await;
                shutdown.notify_one();
            }
        })
        .into_future();
    let drain_limit = Duration::from_secs(config.shutdown_timeout_secs);
    let drain_deadline = async {
        shutdown.notified().await;
        tokio::time::sleep(drain_limit).await;
    };

    tokio::select! {
        result = server => result.expect("Server error"),
        () = drain_deadline => {
            tracing::warn!(
                timeout_secs = config.shutdown_timeout_secs,
                "In-flight requests did not finish in time, exiting",
            );
        }
    }

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
