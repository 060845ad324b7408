//! Row structs and request DTOs, one module per table.

pub mod store;
pub mod vehicle;
pub mod vehicle_image;
