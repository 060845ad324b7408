//! Store entity model and DTOs.

use serde::{Deserialize, Serialize};
use showroom_core::background::StoreBackgrounds;
use showroom_core::image_type::KeyImageType;
use showroom_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `stores` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Store {
    pub id: DbId,
    pub name: String,
    pub address: Option<String>,
    pub brands: Vec<String>,
    pub image_url: Option<String>,
    pub bg_front_quarter_url: Option<String>,
    pub bg_front_url: Option<String>,
    pub bg_back_quarter_url: Option<String>,
    pub bg_back_url: Option<String>,
    pub bg_driver_side_url: Option<String>,
    pub bg_passenger_side_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Store {
    /// Background override URL configured for one key slot.
    pub fn background_url(&self, key: KeyImageType) -> Option<&str> {
        match key {
            KeyImageType::FrontQuarter => self.bg_front_quarter_url.as_deref(),
            KeyImageType::Front => self.bg_front_url.as_deref(),
            KeyImageType::BackQuarter => self.bg_back_quarter_url.as_deref(),
            KeyImageType::Back => self.bg_back_url.as_deref(),
            KeyImageType::DriverSide => self.bg_driver_side_url.as_deref(),
            KeyImageType::PassengerSide => self.bg_passenger_side_url.as_deref(),
        }
    }

    /// All background overrides, keyed by slot.
    pub fn backgrounds(&self) -> StoreBackgrounds {
        StoreBackgrounds {
            front_quarter: self.bg_front_quarter_url.clone(),
            front: self.bg_front_url.clone(),
            back_quarter: self.bg_back_quarter_url.clone(),
            back: self.bg_back_url.clone(),
            driver_side: self.bg_driver_side_url.clone(),
            passenger_side: self.bg_passenger_side_url.clone(),
        }
    }
}

/// Name of the `stores` column holding the background override for `key`.
pub fn background_column(key: KeyImageType) -> &'static str {
    match key {
        KeyImageType::FrontQuarter => "bg_front_quarter_url",
        KeyImageType::Front => "bg_front_url",
        KeyImageType::BackQuarter => "bg_back_quarter_url",
        KeyImageType::Back => "bg_back_url",
        KeyImageType::DriverSide => "bg_driver_side_url",
        KeyImageType::PassengerSide => "bg_passenger_side_url",
    }
}

/// DTO for creating a new store.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStore {
    pub name: String,
    pub address: Option<String>,
    pub brands: Option<Vec<String>>,
}

/// DTO for updating an existing store. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStore {
    pub name: Option<String>,
    pub address: Option<String>,
    pub brands: Option<Vec<String>>,
}
