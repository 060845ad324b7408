//! Repository for the `vehicle_images` table.
//!
//! Multi-row writes (upload batches, bucket renumbering after a reorder,
//! recategorization or delete) run inside a single transaction.

use showroom_core::categorization::{DeletePlan, RecategorizePlan, SortOrderUpdate};
use showroom_core::image_type::KEY_IMAGE_SEQUENCE;
use showroom_core::types::{DbId, Timestamp};
use sqlx::{PgConnection, PgPool};

use crate::models::vehicle_image::{CreateVehicleImage, ImageOwner, VehicleImage};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, vehicle_id, image_type, original_url, processed_url, optimized_url, \
    thumbnail_url, sort_order, is_processed, is_optimized, processed_at, created_at, updated_at";

/// Provides CRUD and ordering operations for vehicle images.
pub struct VehicleImageRepo;

impl VehicleImageRepo {
    /// Insert a single image, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateVehicleImage,
    ) -> Result<VehicleImage, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        insert(&mut conn, input).await
    }

    /// Insert a batch of images atomically, in input order.
    pub async fn create_many(
        pool: &PgPool,
        inputs: &[CreateVehicleImage],
    ) -> Result<Vec<VehicleImage>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut rows = Vec::with_capacity(inputs.len());
        for input in inputs {
            rows.push(insert(&mut tx, input).await?);
        }
        tx.commit().await?;
        Ok(rows)
    }

    /// Find an image by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<VehicleImage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM vehicle_images WHERE id = $1");
        sqlx::query_as::<_, VehicleImage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every image of a vehicle, ordered by sort order then ID.
    pub async fn list_by_vehicle(
        pool: &PgPool,
        vehicle_id: DbId,
    ) -> Result<Vec<VehicleImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM vehicle_images
             WHERE vehicle_id = $1
             ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, VehicleImage>(&query)
            .bind(vehicle_id)
            .fetch_all(pool)
            .await
    }

    /// List the key-slot images of a vehicle.
    pub async fn list_key_images(
        pool: &PgPool,
        vehicle_id: DbId,
    ) -> Result<Vec<VehicleImage>, sqlx::Error> {
        let key_types: Vec<&str> = KEY_IMAGE_SEQUENCE.iter().map(|k| k.as_str()).collect();
        let query = format!(
            "SELECT {COLUMNS} FROM vehicle_images
             WHERE vehicle_id = $1 AND image_type = ANY($2)
             ORDER BY id"
        );
        sqlx::query_as::<_, VehicleImage>(&query)
            .bind(vehicle_id)
            .bind(&key_types)
            .fetch_all(pool)
            .await
    }

    /// Resolve the vehicle and store that own an image.
    pub async fn find_owner(
        pool: &PgPool,
        image_id: DbId,
    ) -> Result<Option<ImageOwner>, sqlx::Error> {
        sqlx::query_as::<_, ImageOwner>(
            "SELECT vi.id AS image_id, v.id AS vehicle_id, v.store_id
             FROM vehicle_images vi
             JOIN vehicles v ON v.id = vi.vehicle_id
             WHERE vi.id = $1",
        )
        .bind(image_id)
        .fetch_optional(pool)
        .await
    }

    /// Apply a set of sort orders to images of one vehicle in a single
    /// transaction. Returns the number of rows updated; ids that do not
    /// belong to `vehicle_id` are ignored.
    pub async fn apply_sort_orders(
        pool: &PgPool,
        vehicle_id: DbId,
        updates: &[SortOrderUpdate],
    ) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let affected = write_sort_orders(&mut tx, vehicle_id, updates).await?;
        tx.commit().await?;
        Ok(affected)
    }

    /// Change an image's type and position, then renumber the bucket it
    /// left. Returns `None` if the image does not belong to `vehicle_id`.
    ///
    /// Moving into an occupied key slot fails with a unique violation on
    /// `uq_vehicle_images_key_slot`.
    pub async fn recategorize(
        pool: &PgPool,
        vehicle_id: DbId,
        plan: &RecategorizePlan,
    ) -> Result<Option<VehicleImage>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE vehicle_images SET image_type = $3, sort_order = $4
             WHERE id = $1 AND vehicle_id = $2
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, VehicleImage>(&query)
            .bind(plan.image_id)
            .bind(vehicle_id)
            .bind(plan.to.as_str())
            .bind(plan.sort_order)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(updated) = updated else {
            return Ok(None);
        };
        write_sort_orders(&mut tx, vehicle_id, &plan.sibling_updates).await?;

        tx.commit().await?;
        Ok(Some(updated))
    }

    /// Delete an image and close the gap in its gallery bucket.
    ///
    /// Returns the deleted row so the caller can clean up stored objects,
    /// or `None` if the image does not belong to `vehicle_id`.
    pub async fn delete_with_renumber(
        pool: &PgPool,
        vehicle_id: DbId,
        plan: &DeletePlan,
    ) -> Result<Option<VehicleImage>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "DELETE FROM vehicle_images WHERE id = $1 AND vehicle_id = $2 RETURNING {COLUMNS}"
        );
        let deleted = sqlx::query_as::<_, VehicleImage>(&query)
            .bind(plan.image_id)
            .bind(vehicle_id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(deleted) = deleted else {
            return Ok(None);
        };
        write_sort_orders(&mut tx, vehicle_id, &plan.sibling_updates).await?;

        tx.commit().await?;
        Ok(Some(deleted))
    }

    /// Record a successful AI composite. `updated_at` is bumped explicitly.
    pub async fn mark_optimized(
        pool: &PgPool,
        image_id: DbId,
        optimized_url: &str,
        processed_at: Timestamp,
    ) -> Result<Option<VehicleImage>, sqlx::Error> {
        let query = format!(
            "UPDATE vehicle_images SET
                optimized_url = $2,
                is_optimized = true,
                processed_at = $3,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VehicleImage>(&query)
            .bind(image_id)
            .bind(optimized_url)
            .bind(processed_at)
            .fetch_optional(pool)
            .await
    }
}

async fn insert(
    conn: &mut PgConnection,
    input: &CreateVehicleImage,
) -> Result<VehicleImage, sqlx::Error> {
    let query = format!(
        "INSERT INTO vehicle_images (vehicle_id, image_type, original_url, thumbnail_url, sort_order)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING {COLUMNS}"
    );
    sqlx::query_as::<_, VehicleImage>(&query)
        .bind(input.vehicle_id)
        .bind(input.image_type.as_str())
        .bind(&input.original_url)
        .bind(&input.thumbnail_url)
        .bind(input.sort_order)
        .fetch_one(&mut *conn)
        .await
}

async fn write_sort_orders(
    conn: &mut PgConnection,
    vehicle_id: DbId,
    updates: &[SortOrderUpdate],
) -> Result<u64, sqlx::Error> {
    if updates.is_empty() {
        return Ok(0);
    }
    let ids: Vec<DbId> = updates.iter().map(|u| u.id).collect();
    let orders: Vec<i32> = updates.iter().map(|u| u.sort_order).collect();
    let result = sqlx::query(
        "UPDATE vehicle_images AS vi SET sort_order = u.sort_order
         FROM UNNEST($1::BIGINT[], $2::INT[]) AS u(id, sort_order)
         WHERE vi.id = u.id AND vi.vehicle_id = $3",
    )
    .bind(&ids)
    .bind(&orders)
    .bind(vehicle_id)
    .execute(&mut *conn)
    .await?;
    Ok(result.rows_affected())
}
