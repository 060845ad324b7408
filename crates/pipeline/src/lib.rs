//! AI background replacement for key vehicle photos.
//!
//! [`ImageProcessor`] runs one image through download, background
//! selection, compositing, upload and persistence. Each step talks to a
//! collaborator behind a trait in [`ports`]; [`adapters`] holds the
//! PostgreSQL and HTTP implementations used by the server.

pub mod adapters;
pub mod error;
pub mod ports;
pub mod processor;

pub use error::{ProcessingError, SourceError};
pub use ports::{Compositor, ImageRecords, ImageSource};
pub use processor::{
    ImageProcessingOutcome, ImageProcessor, ProcessingResult, VehicleProcessingSummary,
};
