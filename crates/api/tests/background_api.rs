//! HTTP-level integration tests for `GET /api/v1/backgrounds/{image_type}`.

mod common;

use axum::http::{Method, StatusCode};
use common::{admin_token, body_json, create_store, get, send_images, user_token};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_front_uses_studio_white(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/backgrounds/FRONT", Some(&admin_token())).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["template_name"], "studio-white.jpg");
    assert_eq!(
        json["data"]["template_url"],
        format!(
            "{}/backgrounds/studio-white.jpg",
            common::TEMPLATE_BASE_URL
        )
    );
    assert_eq!(json["data"]["image_type"], "FRONT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_each_key_type_maps_to_its_template(pool: PgPool) {
    let cases = [
        ("FRONT_QUARTER", "studio-white.jpg"),
        ("BACK_QUARTER", "studio-gray.jpg"),
        ("BACK", "studio-gray.jpg"),
        ("DRIVER_SIDE", "gradient-blue.jpg"),
        ("PASSENGER_SIDE", "gradient-blue.jpg"),
    ];
    for (image_type, template) in cases {
        let app = common::build_test_app(pool.clone());
        let response = get(
            app,
            &format!("/api/v1/backgrounds/{image_type}"),
            Some(&admin_token()),
        )
        .await;
        let json = body_json(response).await;
        assert_eq!(json["data"]["template_name"], template, "{image_type}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_gallery_type_has_no_background(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(
        app,
        "/api/v1/backgrounds/GALLERY_INTERIOR",
        Some(&admin_token()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_type_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/backgrounds/ROOF", Some(&admin_token())).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_preview_requires_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/backgrounds/FRONT", None).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Store overrides
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_store_override_wins_over_template(pool: PgPool) {
    let store_id = create_store(&pool, "Custom Lot").await;

    let app = common::build_test_app(pool.clone());
    let response = send_images(
        app,
        Method::PUT,
        &format!("/api/v1/stores/{store_id}/backgrounds/DRIVER_SIDE"),
        &admin_token(),
        1,
        &[],
    )
    .await;
    let store = body_json(response).await;
    let override_url = store["data"]["bg_driver_side_url"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool.clone());
    let response = get(
        app,
        &format!("/api/v1/backgrounds/DRIVER_SIDE?store_id={store_id}"),
        Some(&user_token(store_id)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["template_url"], override_url);
    assert_eq!(json["data"]["template_name"], "bg-driver-side.png");

    // Other key types still use the canned templates.
    let app = common::build_test_app(pool);
    let response = get(
        app,
        &format!("/api/v1/backgrounds/PASSENGER_SIDE?store_id={store_id}"),
        Some(&user_token(store_id)),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["template_name"], "gradient-blue.jpg");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_preview_for_other_store_returns_403(pool: PgPool) {
    let north = create_store(&pool, "North").await;
    let south = create_store(&pool, "South").await;

    let app = common::build_test_app(pool);
    let response = get(
        app,
        &format!("/api/v1/backgrounds/FRONT?store_id={south}"),
        Some(&user_token(north)),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
