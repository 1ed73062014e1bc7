//! Resizer options.
//!
//! Serializable knobs shared by every resize context of an editing surface.
//! Host-specific behaviour (which element to resize, custom aspect ratio)
//! is passed as closures in `wr-editor::HostConfig` instead.

use crate::error::ConfigError;
use crate::length::LengthUnit;
use serde::{Deserialize, Serialize};

/// Attribute the committed width is written to.
pub const DEFAULT_WIDTH_ATTRIBUTE: &str = "resizedWidth";

/// Smallest width/height a drag may propose, in pixels.
pub const DEFAULT_MIN_SIZE: f64 = 8.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResizerOptions {
    /// Unit of the committed width. `%` is relative to the host's parent.
    pub unit: LengthUnit,

    /// Name of the persisted width attribute.
    pub attribute: String,

    /// Minimum-size floor applied to both proposed dimensions.
    pub min_size: f64,

    /// Derive height from width and the drag's aspect ratio. When off, each
    /// axis follows its own pointer delta.
    pub lock_aspect_ratio: bool,

    /// How many ancestors of a pointer-down target are searched for a handle.
    pub handle_search_depth: usize,
}

impl Default for ResizerOptions {
    fn default() -> Self {
        Self {
            unit: LengthUnit::Px,
            attribute: DEFAULT_WIDTH_ATTRIBUTE.to_string(),
            min_size: DEFAULT_MIN_SIZE,
            lock_aspect_ratio: true,
            handle_search_depth: 3,
        }
    }
}

impl ResizerOptions {
    /// Parse and validate options from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min_size.is_finite() || self.min_size <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "minSize must be a positive number, got {}",
                self.min_size
            )));
        }
        if self.attribute.trim().is_empty() {
            return Err(ConfigError::Invalid("attribute must not be empty".into()));
        }
        if self.handle_search_depth == 0 {
            return Err(ConfigError::Invalid(
                "handleSearchDepth must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_json_gives_defaults() {
        let options = ResizerOptions::from_json("{}").unwrap();
        assert_eq!(options, ResizerOptions::default());
    }

    #[test]
    fn partial_json_overrides() {
        let options =
            ResizerOptions::from_json(r#"{ "unit": "%", "minSize": 20, "lockAspectRatio": false }"#)
                .unwrap();
        assert_eq!(options.unit, LengthUnit::Percent);
        assert_eq!(options.min_size, 20.0);
        assert!(!options.lock_aspect_ratio);
        assert_eq!(options.attribute, DEFAULT_WIDTH_ATTRIBUTE);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            ResizerOptions::from_json(r#"{ "minSize": 0 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            ResizerOptions::from_json(r#"{ "attribute": "  " }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            ResizerOptions::from_json(r#"{ "handleSearchDepth": 0 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            ResizerOptions::from_json(r#"{ "unit": "em" }"#),
            Err(ConfigError::Json(_))
        ));
    }
}
