//! Surface configuration, loaded once at startup.
//!
//! ```toml
//! title = "inventory"
//! width = 1280
//! height = 720
//! background = [18, 18, 24]
//!
//! [theme]
//! accent = [245, 101, 101]
//! text = [255, 255, 255]
//! shape = "rounded"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{UiError, UiResult};
use crate::style::{Color, ShapeMode, Theme};

/// Window and theme settings for a [`Surface`](crate::Surface).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Window title.
    pub title: String,
    /// Initial window width in pixels.
    pub width: u32,
    /// Initial window height in pixels.
    pub height: u32,
    /// Whether the window can be resized.
    pub resizable: bool,
    /// Clear color behind every frame.
    pub background: Color,
    /// Session theme.
    pub theme: ThemeConfig,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            title: "umbra".to_owned(),
            width: 800,
            height: 600,
            resizable: true,
            background: Color::WHITE,
            theme: ThemeConfig::default(),
        }
    }
}

impl SurfaceConfig {
    /// Parses a configuration from TOML text. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the text is not valid TOML or a value has
    /// the wrong type.
    pub fn from_toml_str(text: &str) -> UiResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| UiError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the file can't be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> UiResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| UiError::InvalidConfig(format!("{}: {e}", path.display())))?;
        let config = Self::from_toml_str(&text)?;
        info!(path = %path.display(), title = %config.title, "loaded surface config");
        Ok(config)
    }

    fn validate(&self) -> UiResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(UiError::InvalidConfig(format!(
                "window size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

/// Palette the session theme is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Base color; layer and core shades are derived from it.
    pub accent: Color,
    /// Text color.
    pub text: Color,
    /// Shape mode for themed elements.
    pub shape: ShapeMode,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            accent: Color::rgb(245, 101, 101),
            text: Color::WHITE,
            shape: ShapeMode::Rounded,
        }
    }
}

impl From<&ThemeConfig> for Theme {
    fn from(config: &ThemeConfig) -> Self {
        Self::from_base(config.accent, config.text).with_shape(config.shape)
    }
}
