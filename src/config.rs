// filepath: src/config.rs
//! Configuration handling for surface-stride
//!
//! The defaults reproduce the original demonstration: a 31x24 RGB24
//! surface whose last byte is found through the naive buffer length.
//! A `config.toml` in the user config directory may override any field.

use crate::demo::MarkTarget;
use crate::format::PixelFormat;
use crate::surface::LengthModel;
use serde::{Deserialize, Serialize};
use std::{fs, io::ErrorKind, path::PathBuf};

/// The off-screen surface and the marker written into it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub width: u32,
    pub height: u32,
    pub bits_per_pixel: u32,
    pub format: PixelFormat,
    pub length_model: LengthModel,
    pub target: MarkTarget,
    pub marker: u8,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: 31,
            height: 24,
            bits_per_pixel: 24,
            format: PixelFormat::Rgb24,
            length_model: LengthModel::Naive,
            target: MarkTarget::LastByte,
            marker: 0xff,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// ARGB8888 bytes (`[B, G, R, A]`) shown before the first blit
    pub background_color: [u8; 4],
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "surface-stride".to_string(),
            width: 800,
            height: 600,
            background_color: [0, 0, 0, 255],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DemoConfig {
    #[serde(default)]
    pub surface: SurfaceConfig,

    #[serde(default)]
    pub window: WindowConfig,
}

impl DemoConfig {
    /// Get the path to the configuration file
    pub fn get_config_path() -> PathBuf {
        let config_dir = if let Some(config_dir) = dirs::config_dir() {
            config_dir.join("surface-stride")
        } else {
            PathBuf::from(".config/surface-stride")
        };

        config_dir.join("config.toml")
    }

    /// Load configuration from file, returning default if not found
    pub fn load_from_file() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = Self::get_config_path();

        match fs::read_to_string(&config_path) {
            Ok(content) => Self::from_toml_str(&content),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("No config at {}, using defaults", config_path.display());
                Ok(Self::default())
            }
            Err(e) => Err(Box::new(e)),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_legacy_demo() {
        let config = DemoConfig::default();
        assert_eq!(config.surface.width, 31);
        assert_eq!(config.surface.height, 24);
        assert_eq!(config.surface.bits_per_pixel, 24);
        assert_eq!(config.surface.format, PixelFormat::Rgb24);
        assert_eq!(config.surface.length_model, LengthModel::Naive);
        assert_eq!(config.surface.target, MarkTarget::LastByte);
        assert_eq!((config.window.width, config.window.height), (800, 600));
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(DemoConfig::from_toml_str("").unwrap(), DemoConfig::default());
    }

    #[test]
    fn partial_file_fills_from_defaults() {
        let config = DemoConfig::from_toml_str(
            r#"
            [surface]
            width = 32
            length_model = "padded"
            target = "last_pixel"

            [window]
            title = "stride"
            "#,
        )
        .unwrap();
        assert_eq!(config.surface.width, 32);
        assert_eq!(config.surface.height, 24);
        assert_eq!(config.surface.length_model, LengthModel::Padded);
        assert_eq!(config.surface.target, MarkTarget::LastPixel);
        assert_eq!(config.window.title, "stride");
        assert_eq!(config.window.width, 800);
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!(DemoConfig::from_toml_str("[surface]\nformat = \"yuv\"\n").is_err());
    }

    #[test]
    fn round_trips_through_toml() {
        let text = toml::to_string_pretty(&DemoConfig::default()).unwrap();
        assert_eq!(DemoConfig::from_toml_str(&text).unwrap(), DemoConfig::default());
    }
}
