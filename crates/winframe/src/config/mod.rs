//! Configuration system
//!
//! Window and backend settings that can be kept in TOML or RON files.

use std::path::Path;

pub use serde::{Deserialize, Serialize};

use crate::window::backend::WindowFlags;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        match Format::of(path)? {
            Format::Toml => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            Format::Ron => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match Format::of(path)? {
            Format::Toml => toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?,
            Format::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

enum Format {
    Toml,
    Ron,
}

impl Format {
    fn of(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Settings for opening a top-level window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Title bar text
    pub title: String,
    /// Client width in window coordinates
    pub width: i32,
    /// Client height in window coordinates
    pub height: i32,
    /// Raw creation flag bits, passed to the backend unchanged
    pub flags: u64,
}

impl WindowConfig {
    /// Creation flags, keeping bits that have no name
    pub const fn window_flags(&self) -> WindowFlags {
        WindowFlags::from_bits_retain(self.flags)
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "winframe".to_string(),
            width: 800,
            height: 600,
            flags: WindowFlags::RESIZABLE.bits(),
        }
    }
}

impl Config for WindowConfig {}

/// Settings for the in-memory backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadlessConfig {
    /// Pixels per window coordinate for high-density windows
    pub pixel_density: i32,
    /// Where new top-level windows are placed
    pub default_position: (i32, i32),
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            pixel_density: 1,
            default_position: (0, 0),
        }
    }
}

impl Config for HeadlessConfig {}
