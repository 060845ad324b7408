//! Vehicle entity model and DTOs.

use serde::{Deserialize, Serialize};
use showroom_core::processing_status::ProcessingStatus;
use showroom_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `vehicles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Vehicle {
    pub id: DbId,
    pub store_id: DbId,
    pub stock_number: Option<String>,
    pub vin: Option<String>,
    pub year: Option<i32>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub trim_level: Option<String>,
    pub color: Option<String>,
    pub processing_status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Vehicle {
    /// Parsed processing status. The column is CHECK-constrained, so an
    /// unparseable value only shows up if the constraint was dropped.
    pub fn status(&self) -> ProcessingStatus {
        self.processing_status
            .parse()
            .unwrap_or(ProcessingStatus::NotStarted)
    }
}

/// DTO for creating a new vehicle.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVehicle {
    pub store_id: DbId,
    pub stock_number: Option<String>,
    pub vin: Option<String>,
    pub year: Option<i32>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub trim_level: Option<String>,
    pub color: Option<String>,
}

/// DTO for updating vehicle metadata. Processing status is not writable here.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateVehicle {
    pub stock_number: Option<String>,
    pub vin: Option<String>,
    pub year: Option<i32>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub trim_level: Option<String>,
    pub color: Option<String>,
}
