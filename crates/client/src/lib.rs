//! Client side of the gallery editor.
//!
//! [`GalleryController`] turns drag gestures and deletes into optimistic
//! local updates plus REST calls, rolling back when the server rejects a
//! change. [`HttpGalleryApi`] is the `reqwest` implementation of the
//! [`GalleryApi`] it talks through.

pub mod api;
pub mod controller;
pub mod error;
pub mod model;

pub use api::{GalleryApi, HttpGalleryApi};
pub use controller::{BusyKind, DragOutcome, GalleryController};
pub use error::ClientError;
pub use model::GalleryImage;
