//! Vehicle-level processing status.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Aggregate AI-processing state of a vehicle's key images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessingStatus {
    NotStarted,
    InProgress,
    Completed,
    Error,
}

impl ProcessingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "NOT_STARTED",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Error => "ERROR",
        }
    }
}

impl FromStr for ProcessingStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NOT_STARTED" => Ok(Self::NotStarted),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "COMPLETED" => Ok(Self::Completed),
            "ERROR" => Ok(Self::Error),
            other => Err(CoreError::Validation(format!(
                "Unknown processing status '{other}'"
            ))),
        }
    }
}

impl fmt::Display for ProcessingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derive a vehicle's status from the processed flags of its key images.
///
/// - no key images, or none processed: `NOT_STARTED`
/// - every key image processed: `COMPLETED`
/// - otherwise: `IN_PROGRESS`
pub fn derive_status(key_images_processed: impl IntoIterator<Item = bool>) -> ProcessingStatus {
    let (mut total, mut processed) = (0usize, 0usize);
    for is_processed in key_images_processed {
        total += 1;
        if is_processed {
            processed += 1;
        }
    }
    match (total, processed) {
        (0, _) | (_, 0) => ProcessingStatus::NotStarted,
        (t, p) if t == p => ProcessingStatus::Completed,
        _ => ProcessingStatus::InProgress,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_from_flags() {
        assert_eq!(derive_status([]), ProcessingStatus::NotStarted);
        assert_eq!(derive_status([false, false]), ProcessingStatus::NotStarted);
        assert_eq!(derive_status([true, false]), ProcessingStatus::InProgress);
        assert_eq!(derive_status([true; 6]), ProcessingStatus::Completed);
    }

    #[test]
    fn round_trips_wire_names() {
        for status in [
            ProcessingStatus::NotStarted,
            ProcessingStatus::InProgress,
            ProcessingStatus::Completed,
            ProcessingStatus::Error,
        ] {
            assert_eq!(status.as_str().parse::<ProcessingStatus>().unwrap(), status);
        }
        assert!("DONE".parse::<ProcessingStatus>().is_err());
    }
}
