//! Repository for the `vehicles` table.

use showroom_core::processing_status::{derive_status, ProcessingStatus};
use showroom_core::types::DbId;
use sqlx::PgPool;

use super::VehicleImageRepo;
use crate::models::vehicle::{CreateVehicle, UpdateVehicle, Vehicle};

const COLUMNS: &str = "id, store_id, stock_number, vin, year, make, model, trim_level, color, \
    processing_status, created_at, updated_at";

/// Provides CRUD operations for vehicles.
pub struct VehicleRepo;

impl VehicleRepo {
    /// Insert a new vehicle with status `NOT_STARTED`.
    pub async fn create(pool: &PgPool, input: &CreateVehicle) -> Result<Vehicle, sqlx::Error> {
        let query = format!(
            "INSERT INTO vehicles (store_id, stock_number, vin, year, make, model, trim_level, color)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vehicle>(&query)
            .bind(input.store_id)
            .bind(&input.stock_number)
            .bind(&input.vin)
            .bind(input.year)
            .bind(&input.make)
            .bind(&input.model)
            .bind(&input.trim_level)
            .bind(&input.color)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Vehicle>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM vehicles WHERE id = $1");
        sqlx::query_as::<_, Vehicle>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every vehicle, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Vehicle>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM vehicles ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Vehicle>(&query).fetch_all(pool).await
    }

    /// List the vehicles of one store, newest first.
    pub async fn list_by_store(
        pool: &PgPool,
        store_id: DbId,
    ) -> Result<Vec<Vehicle>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM vehicles
             WHERE store_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Vehicle>(&query)
            .bind(store_id)
            .fetch_all(pool)
            .await
    }

    /// Update vehicle metadata. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateVehicle,
    ) -> Result<Option<Vehicle>, sqlx::Error> {
        let query = format!(
            "UPDATE vehicles SET
                stock_number = COALESCE($2, stock_number),
                vin = COALESCE($3, vin),
                year = COALESCE($4, year),
                make = COALESCE($5, make),
                model = COALESCE($6, model),
                trim_level = COALESCE($7, trim_level),
                color = COALESCE($8, color)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vehicle>(&query)
            .bind(id)
            .bind(&input.stock_number)
            .bind(&input.vin)
            .bind(input.year)
            .bind(&input.make)
            .bind(&input.model)
            .bind(&input.trim_level)
            .bind(&input.color)
            .fetch_optional(pool)
            .await
    }

    /// Delete a vehicle by ID. Its image rows cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Overwrite the processing status. Returns `false` if the vehicle is gone.
    pub async fn set_processing_status(
        pool: &PgPool,
        id: DbId,
        status: ProcessingStatus,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE vehicles SET processing_status = $2 WHERE id = $1")
            .bind(id)
            .bind(status.as_str())
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Re-derive the status from the `is_optimized` flags of the vehicle's
    /// key images and store it. Returns `None` if the vehicle is gone.
    pub async fn refresh_processing_status(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProcessingStatus>, sqlx::Error> {
        let key_images = VehicleImageRepo::list_key_images(pool, id).await?;
        let status = derive_status(key_images.iter().map(|image| image.is_optimized));
        let updated = Self::set_processing_status(pool, id, status).await?;
        Ok(updated.then_some(status))
    }
}
