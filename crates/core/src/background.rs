//! Background template selection for key image processing.
//!
//! Each key angle maps to one of three canned backdrops through an immutable
//! base table. A [`TemplateConfig`] built at startup may override the
//! template per key type, and a store may upload its own backdrop per key
//! type, which wins over both.

use std::collections::HashMap;

use serde::Serialize;

use crate::categorization::KeySlots;
use crate::error::CoreError;
use crate::image_type::{ImageType, KeyImageType};

/// Default prefix for template URLs when `BACKGROUND_BASE_URL` is unset.
pub const DEFAULT_TEMPLATE_BASE_URL: &str = "https://storage.googleapis.com/showroom-assets";

/// Store-uploaded background URLs, one optional entry per key type.
pub type StoreBackgrounds = KeySlots<String>;

/// The canned backdrops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundTemplate {
    StudioWhite,
    StudioGray,
    GradientBlue,
}

impl BackgroundTemplate {
    pub fn file_name(self) -> &'static str {
        match self {
            Self::StudioWhite => "studio-white.jpg",
            Self::StudioGray => "studio-gray.jpg",
            Self::GradientBlue => "gradient-blue.jpg",
        }
    }

    /// Base table: front-facing → white, rear-facing → gray, sides → blue.
    pub fn for_key(key: KeyImageType) -> Self {
        match key {
            KeyImageType::FrontQuarter | KeyImageType::Front => Self::StudioWhite,
            KeyImageType::BackQuarter | KeyImageType::Back => Self::StudioGray,
            KeyImageType::DriverSide | KeyImageType::PassengerSide => Self::GradientBlue,
        }
    }
}

/// Selected background for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackgroundTemplateResult {
    pub template_url: String,
    pub template_name: String,
    pub image_type: ImageType,
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Selector configuration: URL prefix plus per-type template overrides.
#[derive(Debug, Clone)]
pub struct TemplateConfig {
    base_url: String,
    overrides: HashMap<KeyImageType, String>,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE_BASE_URL)
    }
}

impl TemplateConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            overrides: HashMap::new(),
        }
    }

    /// Use `template_name` for `image_type` instead of the base table entry.
    ///
    /// Gallery types are never processed, so an override for one is a
    /// validation error. An empty template name is a configuration error.
    pub fn with_override(
        mut self,
        image_type: ImageType,
        template_name: impl Into<String>,
    ) -> Result<Self, CoreError> {
        let Some(key) = image_type.key() else {
            return Err(CoreError::Validation(format!(
                "Cannot set a background template for gallery image type {image_type}"
            )));
        };
        let template_name: String = template_name.into();
        if template_name.trim().is_empty() {
            return Err(CoreError::Configuration(format!(
                "Background template for {key} must not be empty"
            )));
        }
        self.overrides.insert(key, template_name.trim().to_string());
        Ok(self)
    }

    /// Load from the environment.
    ///
    /// | Env Var                          | Default                         |
    /// |----------------------------------|---------------------------------|
    /// | `BACKGROUND_BASE_URL`            | [`DEFAULT_TEMPLATE_BASE_URL`]   |
    /// | `BACKGROUND_TEMPLATE_{KEY_TYPE}` | base table entry                |
    ///
    /// e.g. `BACKGROUND_TEMPLATE_FRONT=studio-gray.jpg`.
    pub fn from_env() -> Result<Self, CoreError> {
        let base_url = std::env::var("BACKGROUND_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_TEMPLATE_BASE_URL.into());
        let mut config = Self::new(base_url);
        for key in crate::image_type::KEY_IMAGE_SEQUENCE {
            if let Ok(name) = std::env::var(format!("BACKGROUND_TEMPLATE_{}", key.as_str())) {
                config = config.with_override(key.into(), name)?;
            }
        }
        Ok(config)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

// ---------------------------------------------------------------------------
// Selector
// ---------------------------------------------------------------------------

/// Pure lookup from image type to background template.
#[derive(Debug, Clone, Default)]
pub struct TemplateSelector {
    config: TemplateConfig,
}

impl TemplateSelector {
    pub fn new(config: TemplateConfig) -> Self {
        Self { config }
    }

    /// Template file name for `key`: configured override, else base table.
    pub fn template_name(&self, key: KeyImageType) -> &str {
        self.config
            .overrides
            .get(&key)
            .map(String::as_str)
            .unwrap_or_else(|| BackgroundTemplate::for_key(key).file_name())
    }

    /// `{base_url}/backgrounds/{template_name}`.
    pub fn template_url(&self, template_name: &str) -> String {
        format!("{}/backgrounds/{template_name}", self.config.base_url)
    }

    /// Select the background for `image_type`. `None` for gallery types.
    pub fn select(&self, image_type: ImageType) -> Option<BackgroundTemplateResult> {
        let key = image_type.key()?;
        let template_name = self.template_name(key).to_string();
        Some(BackgroundTemplateResult {
            template_url: self.template_url(&template_name),
            template_name,
            image_type,
        })
    }

    /// Like [`select`](Self::select) but a store's own background for the
    /// key type takes precedence.
    pub fn select_for_store(
        &self,
        image_type: ImageType,
        store_backgrounds: &StoreBackgrounds,
    ) -> Option<BackgroundTemplateResult> {
        let key = image_type.key()?;
        match store_backgrounds.get(key).filter(|url| !url.trim().is_empty()) {
            Some(url) => Some(BackgroundTemplateResult {
                template_url: url.clone(),
                template_name: template_name_from_url(url),
                image_type,
            }),
            None => self.select(image_type),
        }
    }
}

/// Last path segment of `url`, without query string or fragment.
fn template_name_from_url(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(path)
        .to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::image_type::KEY_IMAGE_SEQUENCE;

    #[test]
    fn gallery_types_have_no_template() {
        let selector = TemplateSelector::default();
        assert!(selector.select(ImageType::GALLERY_EXTERIOR).is_none());
        assert!(selector.select(ImageType::GALLERY_INTERIOR).is_none());
        assert!(selector.select(ImageType::GALLERY).is_none());
    }

    #[test]
    fn front_uses_studio_white() {
        let result = TemplateSelector::default().select(ImageType::FRONT).unwrap();
        assert_eq!(result.template_name, "studio-white.jpg");
        assert_eq!(result.image_type, ImageType::FRONT);
        assert!(result.template_url.contains("studio-white.jpg"));
        assert_eq!(
            result.template_url,
            format!("{DEFAULT_TEMPLATE_BASE_URL}/backgrounds/studio-white.jpg")
        );
    }

    #[test]
    fn base_table_groups_angles() {
        let selector = TemplateSelector::default();
        let name = |t: ImageType| selector.select(t).unwrap().template_name;
        assert_eq!(name(ImageType::FRONT_QUARTER), "studio-white.jpg");
        assert_eq!(name(ImageType::BACK), "studio-gray.jpg");
        assert_eq!(name(ImageType::BACK_QUARTER), "studio-gray.jpg");
        assert_eq!(name(ImageType::DRIVER_SIDE), "gradient-blue.jpg");
        assert_eq!(name(ImageType::PASSENGER_SIDE), "gradient-blue.jpg");
    }

    #[test]
    fn selection_is_pure() {
        let selector = TemplateSelector::default();
        for key in KEY_IMAGE_SEQUENCE {
            assert_eq!(selector.select(key.into()), selector.select(key.into()));
        }
    }

    #[test]
    fn base_url_is_configurable() {
        let selector =
            TemplateSelector::new(TemplateConfig::new("https://cdn.example.com/assets/"));
        let result = selector.select(ImageType::BACK).unwrap();
        assert_eq!(
            result.template_url,
            "https://cdn.example.com/assets/backgrounds/studio-gray.jpg"
        );
    }

    #[test]
    fn override_replaces_base_entry_for_that_type_only() {
        let config = TemplateConfig::default()
            .with_override(ImageType::FRONT, "showroom-floor.jpg")
            .unwrap();
        let selector = TemplateSelector::new(config);
        assert_eq!(
            selector.select(ImageType::FRONT).unwrap().template_name,
            "showroom-floor.jpg"
        );
        assert_eq!(
            selector.select(ImageType::FRONT_QUARTER).unwrap().template_name,
            "studio-white.jpg"
        );
    }

    #[test]
    fn override_for_gallery_type_is_rejected() {
        assert_matches!(
            TemplateConfig::default().with_override(ImageType::GALLERY_INTERIOR, "x.jpg"),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn empty_override_is_configuration_error() {
        assert_matches!(
            TemplateConfig::default().with_override(ImageType::BACK, "  "),
            Err(CoreError::Configuration(_))
        );
    }

    #[test]
    fn store_background_wins() {
        let mut store = StoreBackgrounds::default();
        store.insert(
            KeyImageType::DriverSide,
            "https://cdn.example.com/stores/4/backgrounds/bg-driver-side.png?v=2".into(),
        );
        let selector = TemplateSelector::default();

        let side = selector
            .select_for_store(ImageType::DRIVER_SIDE, &store)
            .unwrap();
        assert_eq!(side.template_name, "bg-driver-side.png");
        assert!(side.template_url.starts_with("https://cdn.example.com/stores/4/"));

        let front = selector.select_for_store(ImageType::FRONT, &store).unwrap();
        assert_eq!(front.template_name, "studio-white.jpg");

        assert!(selector
            .select_for_store(ImageType::GALLERY, &store)
            .is_none());
    }
}
