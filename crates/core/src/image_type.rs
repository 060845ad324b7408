//! Vehicle image type tags.
//!
//! A vehicle photo is either one of six fixed key angles (eligible for AI
//! background replacement) or a gallery photo in one of three buckets. The
//! database stores the tag as text (`FRONT_QUARTER`, `GALLERY_EXTERIOR`, ...);
//! everything above the repository layer works with [`ImageType`] so that a
//! new tag cannot be added without every `match` being revisited.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Key image types
// ---------------------------------------------------------------------------

/// One of the six fixed key photo angles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KeyImageType {
    FrontQuarter,
    Front,
    BackQuarter,
    Back,
    DriverSide,
    PassengerSide,
}

/// Upload order used to fill empty key slots.
pub const KEY_IMAGE_SEQUENCE: [KeyImageType; 6] = [
    KeyImageType::FrontQuarter,
    KeyImageType::Front,
    KeyImageType::BackQuarter,
    KeyImageType::Back,
    KeyImageType::DriverSide,
    KeyImageType::PassengerSide,
];

impl KeyImageType {
    /// Database / wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FrontQuarter => "FRONT_QUARTER",
            Self::Front => "FRONT",
            Self::BackQuarter => "BACK_QUARTER",
            Self::Back => "BACK",
            Self::DriverSide => "DRIVER_SIDE",
            Self::PassengerSide => "PASSENGER_SIDE",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::FrontQuarter => "Front Quarter",
            Self::Front => "Front",
            Self::BackQuarter => "Back Quarter",
            Self::Back => "Back",
            Self::DriverSide => "Driver Side",
            Self::PassengerSide => "Passenger Side",
        }
    }

    /// Lowercase, dash-separated form used in storage paths (`front-quarter`).
    pub fn slug(self) -> &'static str {
        match self {
            Self::FrontQuarter => "front-quarter",
            Self::Front => "front",
            Self::BackQuarter => "back-quarter",
            Self::Back => "back",
            Self::DriverSide => "driver-side",
            Self::PassengerSide => "passenger-side",
        }
    }

    /// Position of this type in [`KEY_IMAGE_SEQUENCE`].
    pub fn slot_index(self) -> usize {
        match self {
            Self::FrontQuarter => 0,
            Self::Front => 1,
            Self::BackQuarter => 2,
            Self::Back => 3,
            Self::DriverSide => 4,
            Self::PassengerSide => 5,
        }
    }
}

impl fmt::Display for KeyImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Gallery buckets
// ---------------------------------------------------------------------------

/// Gallery sub-category. Each bucket keeps its own contiguous sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GalleryBucket {
    Exterior,
    Interior,
    /// Legacy `GALLERY` tag from before the exterior/interior split.
    Uncategorized,
}

/// All gallery buckets, in display order.
pub const GALLERY_BUCKETS: [GalleryBucket; 3] = [
    GalleryBucket::Exterior,
    GalleryBucket::Interior,
    GalleryBucket::Uncategorized,
];

impl GalleryBucket {
    /// The image type tag stored for images in this bucket.
    pub fn image_type(self) -> ImageType {
        ImageType::Gallery(self)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exterior => "exterior",
            Self::Interior => "interior",
            Self::Uncategorized => "uncategorized",
        }
    }
}

impl FromStr for GalleryBucket {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exterior" => Ok(Self::Exterior),
            "interior" => Ok(Self::Interior),
            "uncategorized" => Ok(Self::Uncategorized),
            other => Err(CoreError::Validation(format!(
                "Unknown gallery bucket '{other}'. Must be one of: exterior, interior, uncategorized"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// ImageType
// ---------------------------------------------------------------------------

/// The full image type tag: a key slot or a gallery bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ImageType {
    Key(KeyImageType),
    Gallery(GalleryBucket),
}

impl ImageType {
    pub const FRONT_QUARTER: Self = Self::Key(KeyImageType::FrontQuarter);
    pub const FRONT: Self = Self::Key(KeyImageType::Front);
    pub const BACK_QUARTER: Self = Self::Key(KeyImageType::BackQuarter);
    pub const BACK: Self = Self::Key(KeyImageType::Back);
    pub const DRIVER_SIDE: Self = Self::Key(KeyImageType::DriverSide);
    pub const PASSENGER_SIDE: Self = Self::Key(KeyImageType::PassengerSide);
    pub const GALLERY_EXTERIOR: Self = Self::Gallery(GalleryBucket::Exterior);
    pub const GALLERY_INTERIOR: Self = Self::Gallery(GalleryBucket::Interior);
    pub const GALLERY: Self = Self::Gallery(GalleryBucket::Uncategorized);

    /// Database / wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Key(key) => key.as_str(),
            Self::Gallery(GalleryBucket::Exterior) => "GALLERY_EXTERIOR",
            Self::Gallery(GalleryBucket::Interior) => "GALLERY_INTERIOR",
            Self::Gallery(GalleryBucket::Uncategorized) => "GALLERY",
        }
    }

    pub fn is_key(self) -> bool {
        matches!(self, Self::Key(_))
    }

    pub fn is_gallery(self) -> bool {
        matches!(self, Self::Gallery(_))
    }

    /// The key slot, if this is a key type.
    pub fn key(self) -> Option<KeyImageType> {
        match self {
            Self::Key(key) => Some(key),
            Self::Gallery(_) => None,
        }
    }

    /// The gallery bucket, if this is a gallery type.
    pub fn bucket(self) -> Option<GalleryBucket> {
        match self {
            Self::Key(_) => None,
            Self::Gallery(bucket) => Some(bucket),
        }
    }
}

/// Whether an image of this type goes through AI background replacement.
///
/// Only the six key angles are processed; gallery photos never are.
pub fn should_process_image(image_type: ImageType) -> bool {
    image_type.is_key()
}

impl From<KeyImageType> for ImageType {
    fn from(key: KeyImageType) -> Self {
        Self::Key(key)
    }
}

impl From<GalleryBucket> for ImageType {
    fn from(bucket: GalleryBucket) -> Self {
        Self::Gallery(bucket)
    }
}

impl From<ImageType> for String {
    fn from(value: ImageType) -> Self {
        value.as_str().to_string()
    }
}

impl TryFrom<String> for ImageType {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl FromStr for ImageType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "FRONT_QUARTER" => Ok(Self::FRONT_QUARTER),
            "FRONT" => Ok(Self::FRONT),
            "BACK_QUARTER" => Ok(Self::BACK_QUARTER),
            "BACK" => Ok(Self::BACK),
            "DRIVER_SIDE" => Ok(Self::DRIVER_SIDE),
            "PASSENGER_SIDE" => Ok(Self::PASSENGER_SIDE),
            "GALLERY_EXTERIOR" => Ok(Self::GALLERY_EXTERIOR),
            "GALLERY_INTERIOR" => Ok(Self::GALLERY_INTERIOR),
            "GALLERY" => Ok(Self::GALLERY),
            other => Err(CoreError::Validation(format!(
                "Unknown image type '{other}'"
            ))),
        }
    }
}

impl fmt::Display for ImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
