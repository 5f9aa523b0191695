//! Process-level settings for chart generation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use renderer::canvas::MAX_DIMENSION as MAX_IMAGE_DIMENSION;

/// Where charts go and how large they are.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorSettings {
    /// Directory holding cached charts.
    pub output_dir: PathBuf,

    /// Chart width in pixels.
    pub image_width: usize,

    /// Chart height in pixels.
    pub image_height: usize,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            image_width: 1200,
            image_height: 800,
        }
    }
}

/// `$HOME/.omfg`, or a directory under the system temp dir without a home.
pub fn default_output_dir() -> PathBuf {
    match std::env::var_os("HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home).join(".omfg"),
        _ => std::env::temp_dir().join(".omfg"),
    }
}

impl GeneratorSettings {
    /// Load settings from environment variables.
    pub fn from_env() -> Self {
        let mut settings = Self::default();

        if let Ok(val) = std::env::var("OMFG_OUTPUT_DIR") {
            if !val.is_empty() {
                settings.output_dir = PathBuf::from(val);
            }
        }

        if let Ok(val) = std::env::var("OMFG_IMAGE_WIDTH") {
            if let Ok(width) = val.parse() {
                settings.image_width = width;
            }
        }

        if let Ok(val) = std::env::var("OMFG_IMAGE_HEIGHT") {
            if let Ok(height) = val.parse() {
                settings.image_height = height;
            }
        }

        settings
    }

    /// Validate the settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.output_dir.as_os_str().is_empty() {
            return Err("output_dir must not be empty".to_string());
        }

        for (name, value) in [("image_width", self.image_width), ("image_height", self.image_height)] {
            if value == 0 || value > MAX_IMAGE_DIMENSION {
                return Err(format!("{} must be 1-{}", name, MAX_IMAGE_DIMENSION));
            }
        }

        Ok(())
    }
}
