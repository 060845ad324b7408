//! Domain types and pure rules for the showroom backend.
//!
//! Everything in this crate is synchronous and side-effect free: image type
//! classification, gallery sort-order bookkeeping, background template
//! selection, prompt construction, storage path conventions, and drag
//! planning for the gallery reorder controller.

pub mod background;
pub mod categorization;
pub mod error;
pub mod image_type;
pub mod processing_status;
pub mod prompts;
pub mod reorder;
pub mod roles;
pub mod storage;
pub mod types;
