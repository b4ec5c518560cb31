//! Visual options applied to an avatar before serialization.

use crate::{SvgError, SvgResult};
use serde::{Deserialize, Serialize};

/// Recognized avatar options. Every field is optional.
///
/// Values are not range-checked; out-of-range numbers are computed through.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct AvatarOptions {
    /// Overrides the root `width` attribute.
    pub width: Option<f64>,
    /// Overrides the root `height` attribute.
    pub height: Option<f64>,
    /// Inset in percent (0–100), applied with a scale + translate wrapper.
    pub margin: Option<f64>,
    /// Paint for a full-canvas background rect.
    pub background: Option<String>,
    /// Corner radius in percent of each axis (0–100), applied with a mask.
    pub radius: Option<f64>,
}

impl AvatarOptions {
    /// Parse options from a JSON object.
    pub fn from_json_str(json: &str) -> SvgResult<Self> {
        serde_json::from_str(json).map_err(|e| SvgError::InvalidOptions(e.to_string()))
    }

    /// Whether any option needs the root viewBox.
    pub fn needs_view_box(&self) -> bool {
        self.margin.is_some() || self.background.is_some() || self.radius.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Fill unset fields from `fallback`.
    pub fn or(self, fallback: AvatarOptions) -> Self {
        Self {
            width: self.width.or(fallback.width),
            height: self.height.or(fallback.height),
            margin: self.margin.or(fallback.margin),
            background: self.background.or(fallback.background),
            radius: self.radius.or(fallback.radius),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json() {
        let options = AvatarOptions::from_json_str(r##"{"margin": 10, "background": "#fff"}"##).unwrap();
        assert_eq!(options.margin, Some(10.0));
        assert_eq!(options.background.as_deref(), Some("#fff"));
        assert_eq!(options.width, None);
    }

    #[test]
    fn test_from_json_empty_object() {
        let options = AvatarOptions::from_json_str("{}").unwrap();
        assert!(options.is_empty());
        assert!(!options.needs_view_box());
    }

    #[test]
    fn test_from_json_rejects_unknown_keys() {
        let err = AvatarOptions::from_json_str(r#"{"radus": 5}"#).unwrap_err();
        assert!(matches!(err, SvgError::InvalidOptions(_)));
    }

    #[test]
    fn test_needs_view_box() {
        let size_only = AvatarOptions {
            width: Some(64.0),
            ..Default::default()
        };
        assert!(!size_only.needs_view_box());

        let radius = AvatarOptions {
            radius: Some(50.0),
            ..Default::default()
        };
        assert!(radius.needs_view_box());
    }

    #[test]
    fn test_or_prefers_self() {
        let cli = AvatarOptions {
            margin: Some(5.0),
            ..Default::default()
        };
        let file = AvatarOptions {
            margin: Some(20.0),
            radius: Some(10.0),
            ..Default::default()
        };
        let merged = cli.or(file);
        assert_eq!(merged.margin, Some(5.0));
        assert_eq!(merged.radius, Some(10.0));
    }
}
