//! Repository for the `stores` table.

use showroom_core::image_type::KeyImageType;
use showroom_core::types::DbId;
use sqlx::PgPool;

use crate::models::store::{background_column, CreateStore, Store, UpdateStore};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, address, brands, image_url, \
    bg_front_quarter_url, bg_front_url, bg_back_quarter_url, bg_back_url, \
    bg_driver_side_url, bg_passenger_side_url, created_at, updated_at";

/// Provides CRUD operations for stores.
pub struct StoreRepo;

impl StoreRepo {
    /// Insert a new store, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateStore) -> Result<Store, sqlx::Error> {
        let query = format!(
            "INSERT INTO stores (name, address, brands)
             VALUES ($1, $2, COALESCE($3, '{{}}'::TEXT[]))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Store>(&query)
            .bind(&input.name)
            .bind(&input.address)
            .bind(&input.brands)
            .fetch_one(pool)
            .await
    }

    /// Find a store by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Store>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stores WHERE id = $1");
        sqlx::query_as::<_, Store>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all stores ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Store>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stores ORDER BY name");
        sqlx::query_as::<_, Store>(&query).fetch_all(pool).await
    }

    /// Update a store. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateStore,
    ) -> Result<Option<Store>, sqlx::Error> {
        let query = format!(
            "UPDATE stores SET
                name = COALESCE($2, name),
                address = COALESCE($3, address),
                brands = COALESCE($4, brands)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Store>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.address)
            .bind(&input.brands)
            .fetch_optional(pool)
            .await
    }

    /// Delete a store by ID. Vehicles and their images cascade.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM stores WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Replace the store's hero image URL.
    pub async fn set_image_url(
        pool: &PgPool,
        id: DbId,
        image_url: &str,
    ) -> Result<Option<Store>, sqlx::Error> {
        let query = format!(
            "UPDATE stores SET image_url = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Store>(&query)
            .bind(id)
            .bind(image_url)
            .fetch_optional(pool)
            .await
    }

    /// Set or clear (`None`) the background override for one key slot.
    pub async fn set_background(
        pool: &PgPool,
        id: DbId,
        key: KeyImageType,
        url: Option<&str>,
    ) -> Result<Option<Store>, sqlx::Error> {
        let column = background_column(key);
        let query = format!("UPDATE stores SET {column} = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Store>(&query)
            .bind(id)
            .bind(url)
            .fetch_optional(pool)
            .await
    }
}
