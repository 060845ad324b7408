//! HTTP-level integration tests for `/api/v1/vehicles`.

mod common;

use axum::http::StatusCode;
use common::{
    admin_token, body_json, create_store, create_vehicle, delete, get, post_json, put_json,
    upload_images, user_token,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Vehicle CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_vehicle_returns_201(pool: PgPool) {
    let store_id = create_store(&pool, "Lot").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/vehicles",
        Some(&user_token(store_id)),
        serde_json::json!({
            "store_id": store_id,
            "vin": "1HGCM82633A004352",
            "year": 2023,
            "make": "Honda",
            "model": "Accord",
            "trim_level": "EX-L",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["store_id"], store_id);
    assert_eq!(json["data"]["trim_level"], "EX-L");
    assert_eq!(json["data"]["processing_status"], "NOT_STARTED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_vehicle_in_unknown_store_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/vehicles",
        Some(&admin_token()),
        serde_json::json!({"store_id": 999999, "make": "Ghost"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_vehicle_in_other_store_returns_403(pool: PgPool) {
    let north = create_store(&pool, "North").await;
    let south = create_store(&pool, "South").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/vehicles",
        Some(&user_token(north)),
        serde_json::json!({"store_id": south, "make": "Ford"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_vehicle(pool: PgPool) {
    let store_id = create_store(&pool, "Lot").await;
    let vehicle_id = create_vehicle(&pool, store_id).await;

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/v1/vehicles/{vehicle_id}"),
        &user_token(store_id),
        serde_json::json!({"color": "Midnight Blue"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["color"], "Midnight Blue");
    assert_eq!(json["data"]["make"], "Toyota");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_vehicle_returns_204(pool: PgPool) {
    let store_id = create_store(&pool, "Lot").await;
    let vehicle_id = create_vehicle(&pool, store_id).await;
    upload_images(&pool, vehicle_id, 2).await;

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/vehicles/{vehicle_id}"), &admin_token()).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get(
        app,
        &format!("/api/v1/vehicles/{vehicle_id}"),
        Some(&admin_token()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Listing and scoping
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_staff_list_defaults_to_their_store(pool: PgPool) {
    let north = create_store(&pool, "North").await;
    let south = create_store(&pool, "South").await;
    create_vehicle(&pool, north).await;
    create_vehicle(&pool, north).await;
    create_vehicle(&pool, south).await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/vehicles", Some(&user_token(north))).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let vehicles = json["data"].as_array().unwrap();
    assert_eq!(vehicles.len(), 2);
    assert!(vehicles.iter().all(|v| v["store_id"] == north));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_list_filters_by_store_param(pool: PgPool) {
    let north = create_store(&pool, "North").await;
    let south = create_store(&pool, "South").await;
    create_vehicle(&pool, north).await;
    create_vehicle(&pool, south).await;

    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/v1/vehicles", Some(&admin_token())).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);

    let app = common::build_test_app(pool);
    let response = get(
        app,
        &format!("/api/v1/vehicles?store_id={south}"),
        Some(&admin_token()),
    )
    .await;
    let json = body_json(response).await;
    let vehicles = json["data"].as_array().unwrap();
    assert_eq!(vehicles.len(), 1);
    assert_eq!(vehicles[0]["store_id"], south);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_staff_list_other_store_returns_403(pool: PgPool) {
    let north = create_store(&pool, "North").await;
    let south = create_store(&pool, "South").await;

    let app = common::build_test_app(pool);
    let response = get(
        app,
        &format!("/api/v1/vehicles?store_id={south}"),
        Some(&user_token(north)),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Vehicle detail
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_vehicle_partitions_images(pool: PgPool) {
    let store_id = create_store(&pool, "Lot").await;
    let vehicle_id = create_vehicle(&pool, store_id).await;
    upload_images(&pool, vehicle_id, 8).await;

    let app = common::build_test_app(pool);
    let response = get(
        app,
        &format!("/api/v1/vehicles/{vehicle_id}"),
        Some(&user_token(store_id)),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["id"], vehicle_id);
    assert_eq!(data["make"], "Toyota");

    for slot in [
        "front_quarter",
        "front",
        "back_quarter",
        "back",
        "driver_side",
        "passenger_side",
    ] {
        assert!(
            data["key_images"][slot].is_object(),
            "key slot {slot} should be filled"
        );
    }
    assert_eq!(data["key_images"]["front"]["image_type"], "FRONT");

    let exterior = data["gallery"]["exterior"].as_array().unwrap();
    assert_eq!(exterior.len(), 2);
    assert_eq!(exterior[0]["sort_order"], 0);
    assert_eq!(exterior[1]["sort_order"], 1);
    assert!(data["gallery"]["interior"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_vehicle_of_other_store_returns_403(pool: PgPool) {
    let north = create_store(&pool, "North").await;
    let south = create_store(&pool, "South").await;
    let vehicle_id = create_vehicle(&pool, south).await;

    let app = common::build_test_app(pool);
    let response = get(
        app,
        &format!("/api/v1/vehicles/{vehicle_id}"),
        Some(&user_token(north)),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unscoped_staff_token_returns_403(pool: PgPool) {
    let token = showroom_api::auth::jwt::generate_access_token(
        55,
        showroom_core::roles::ROLE_USER,
        None,
        &common::test_config().jwt,
    )
    .unwrap();

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/vehicles", Some(&token)).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Token is not scoped to a store");
}
