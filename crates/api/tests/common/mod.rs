#![allow(dead_code)]

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;

use showroom_api::auth::jwt::{generate_access_token, JwtConfig};
use showroom_api::config::ServerConfig;
use showroom_api::router::build_app_router;
use showroom_api::state::AppState;
use showroom_cloud::{LocalStorage, StorageProvider};
use showroom_compositor::{CompositeRequest, CompositorError};
use showroom_core::background::{TemplateConfig, TemplateSelector};
use showroom_core::roles::{ROLE_ADMIN, ROLE_USER};
use showroom_core::types::DbId;
use showroom_pipeline::adapters::PgImageRecords;
use showroom_pipeline::{Compositor, ImageProcessor, ImageSource, SourceError};

pub const TEMPLATE_BASE_URL: &str = "https://assets.test/backgrounds";
pub const FILES_BASE_URL: &str = "http://localhost:3000/files";

/// Smallest byte string the upload sniffer recognises as PNG.
pub const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];

const MULTIPART_BOUNDARY: &str = "showroom-test-boundary";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        processing_timeout_secs: 60,
        shutdown_timeout_secs: 30,
        max_upload_bytes: 5 * 1024 * 1024,
        jwt: JwtConfig {
            secret: "test-secret-do-not-use-in-production".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

fn files_dir() -> &'static TempDir {
    static DIR: OnceLock<TempDir> = OnceLock::new();
    DIR.get_or_init(|| tempfile::tempdir().expect("temp dir should be created"))
}

// ---------------------------------------------------------------------------
// Fake collaborators
// ---------------------------------------------------------------------------

/// Returns the same PNG bytes for every URL.
struct StaticSource;

#[async_trait]
impl ImageSource for StaticSource {
    async fn fetch(&self, _url: &str) -> Result<Vec<u8>, SourceError> {
        Ok(PNG_BYTES.to_vec())
    }
}

/// Echoes the original image back as the composited result.
struct EchoCompositor;

#[async_trait]
impl Compositor for EchoCompositor {
    async fn composite(&self, _request: &CompositeRequest) -> Result<Vec<u8>, CompositorError> {
        Ok(PNG_BYTES.to_vec())
    }
}

/// Build the full application router with the production middleware stack.
///
/// Object storage is a local directory shared by every test in the binary;
/// the AI compositor and the original-photo download are replaced by fakes.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let storage: Arc<dyn StorageProvider> =
        Arc::new(LocalStorage::new(files_dir().path(), FILES_BASE_URL));

    let processor = ImageProcessor::new(
        Arc::new(PgImageRecords::new(pool.clone())),
        Arc::new(StaticSource),
        Arc::new(EchoCompositor),
        Arc::clone(&storage),
        TemplateSelector::new(TemplateConfig::new(TEMPLATE_BASE_URL)),
    );

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        storage,
        processor: Arc::new(processor),
    };

    build_app_router(state, &config, Some(files_dir().path()))
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

pub fn admin_token() -> String {
    generate_access_token(1, ROLE_ADMIN, None, &test_config().jwt)
        .expect("token generation should succeed")
}

/// Token for dealership staff scoped to `store_id`.
pub fn user_token(store_id: DbId) -> String {
    generate_access_token(100 + store_id, ROLE_USER, Some(store_id), &test_config().jwt)
        .expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    content_type: Option<String>,
    body: Body,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    if let Some(content_type) = content_type {
        builder = builder.header("Content-Type", content_type);
    }
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, Method::GET, uri, token, None, Body::empty()).await
}

pub async fn delete(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None, Body::empty()).await
}

pub async fn post_empty(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), None, Body::empty()).await
}

async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    json: serde_json::Value,
) -> Response<Body> {
    send(
        app,
        method,
        uri,
        token,
        Some("application/json".to_string()),
        Body::from(json.to_string()),
    )
    .await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    token: Option<&str>,
    json: serde_json::Value,
) -> Response<Body> {
    send_json(app, Method::POST, uri, token, json).await
}

pub async fn put_json(
    app: Router,
    uri: &str,
    token: &str,
    json: serde_json::Value,
) -> Response<Body> {
    send_json(app, Method::PUT, uri, Some(token), json).await
}

pub async fn patch_json(
    app: Router,
    uri: &str,
    token: &str,
    json: serde_json::Value,
) -> Response<Body> {
    send_json(app, Method::PATCH, uri, Some(token), json).await
}

/// Multipart request carrying `file_count` PNG files plus text `fields`.
pub async fn send_images(
    app: Router,
    method: Method,
    uri: &str,
    token: &str,
    file_count: usize,
    fields: &[(&str, &str)],
) -> Response<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\n\
                 Content-Disposition: form-data; name=\"{name}\"\r\n\r\n\
                 {value}\r\n"
            )
            .as_bytes(),
        );
    }
    for i in 0..file_count {
        body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\n\
                 Content-Disposition: form-data; name=\"images\"; filename=\"photo-{i}.png\"\r\n\
                 Content-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(PNG_BYTES);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());

    send(
        app,
        method,
        uri,
        Some(token),
        Some(format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}")),
        Body::from(body),
    )
    .await
}

/// Collect the response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create a store as admin and return its id.
pub async fn create_store(pool: &PgPool, name: &str) -> DbId {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/stores",
        Some(&admin_token()),
        serde_json::json!({ "name": name, "brands": ["Toyota"] }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Create a vehicle in `store_id` and return its id.
///
/// Stock numbers are unique per store, so each call gets a fresh one.
pub async fn create_vehicle(pool: &PgPool, store_id: DbId) -> DbId {
    let stock_number = format!("STK-{}", uuid::Uuid::new_v4().simple());
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/vehicles",
        Some(&admin_token()),
        serde_json::json!({
            "store_id": store_id,
            "stock_number": stock_number,
            "year": 2024,
            "make": "Toyota",
            "model": "Camry",
        }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Upload `count` images to a vehicle with automatic type assignment.
pub async fn upload_images(pool: &PgPool, vehicle_id: DbId, count: usize) -> serde_json::Value {
    let response = send_images(
        build_test_app(pool.clone()),
        Method::POST,
        &format!("/api/v1/vehicles/{vehicle_id}/images"),
        &admin_token(),
        count,
        &[],
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"].clone()
}
