//! Client for the external AI compositing endpoint.
//!
//! The endpoint takes a base64 vehicle photo, a background template URL, an
//! instruction prompt and fixed parameters, and returns the composited image
//! as base64 in `processedImage`.

pub mod api;
pub mod config;
pub mod request;

pub use api::{CompositorApi, CompositorError};
pub use config::CompositorConfig;
pub use request::{CompositeRequest, CompositeResponse};
