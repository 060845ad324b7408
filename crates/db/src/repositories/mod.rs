//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod store_repo;
pub mod vehicle_image_repo;
pub mod vehicle_repo;

pub use store_repo::StoreRepo;
pub use vehicle_image_repo::VehicleImageRepo;
pub use vehicle_repo::VehicleRepo;
