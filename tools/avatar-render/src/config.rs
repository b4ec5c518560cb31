//! Render configuration file.

use avatarkit_common::{AvatarKitError, LogConfig, LogFormat, Result};
use avatarkit_svg::AvatarOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How rendered markup is written out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain SVG markup
    #[default]
    Markup,
    /// `data:image/svg+xml;base64,...`
    Base64,
    /// `data:image/svg+xml;utf8,...` (percent-encoded)
    Utf8,
}

/// Render configuration, loaded from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderConfig {
    /// Avatar options applied before serialization
    pub options: AvatarOptions,

    /// Output encoding
    pub output: OutputFormat,

    /// Emit `<tag/>` for childless elements
    pub self_close: bool,

    /// Logging settings
    pub log: LogSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Level or `EnvFilter` directive, e.g. "debug" or "avatarkit_svg=trace"
    pub level: String,

    /// "pretty", "compact" or "json"
    pub format: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            options: AvatarOptions::default(),
            output: OutputFormat::Markup,
            self_close: true,
            log: LogSettings::default(),
        }
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl RenderConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| AvatarKitError::config_with_source("invalid render config", e))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            AvatarKitError::config_with_source(format!("cannot read {}", path.display()), e)
        })?;
        Self::from_json_str(&json)
    }
}

impl LogSettings {
    /// Build a logging configuration.
    ///
    /// Any `-v` switches to the debug or trace preset, which ignores `level`
    /// but still honors `RUST_LOG`.
    pub fn to_log_config(&self, verbosity: u8) -> Result<LogConfig> {
        let format: LogFormat = self
            .format
            .parse()
            .map_err(AvatarKitError::config)?;

        let config = match verbosity {
            0 => LogConfig::default().with_filter(self.level.clone()),
            1 => LogConfig::debug(),
            _ => LogConfig::trace(),
        };

        Ok(config.with_format(format))
    }
}
