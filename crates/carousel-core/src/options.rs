use crate::document::DEFAULT_DPI;
use crate::layout::CanvasSpec;
use crate::types::*;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Complete configuration for one carousel build
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CarouselOptions {
    // Input
    pub inputs: Vec<PathBuf>,

    // Output
    pub output: PathBuf,
    pub export_dir: Option<PathBuf>,

    // Canvas
    pub preset: CanvasPreset,
    pub fit: FitMode,
    pub margin: u32,
    pub background: Color,

    // Encoding
    pub quality: u8,
    pub dpi: u32,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            output: PathBuf::from("carousel.pdf"),
            export_dir: None,
            preset: CanvasPreset::Portrait,
            fit: FitMode::Contain,
            margin: 0,
            background: Color::WHITE,
            quality: 92,
            dpi: DEFAULT_DPI,
        }
    }
}

impl CarouselOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes).map_err(|e| {
            CarouselError::InvalidConfiguration(format!("Failed to parse config: {}", e))
        })?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            CarouselError::InvalidConfiguration(format!("Failed to serialize config: {}", e))
        })?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options before any file is touched
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() {
            return Err(CarouselError::InvalidConfiguration(
                "No input paths specified".to_string(),
            ));
        }

        if self.quality > 100 {
            return Err(CarouselError::InvalidConfiguration(format!(
                "Quality must be between 0 and 100, got {}",
                self.quality
            )));
        }

        if self.dpi == 0 {
            return Err(CarouselError::InvalidConfiguration(
                "DPI must be positive".to_string(),
            ));
        }

        let (width, height) = self.preset.dimensions_px();
        if width == 0 || height == 0 {
            return Err(CarouselError::InvalidConfiguration(format!(
                "Canvas size must be positive, got {}x{}",
                width, height
            )));
        }

        self.canvas().usable_area()?;
        Ok(())
    }

    /// The canvas every slide is normalized onto
    pub fn canvas(&self) -> CanvasSpec {
        let (width, height) = self.preset.dimensions_px();
        CanvasSpec {
            width,
            height,
            margin: self.margin,
            background: self.background,
            fit: self.fit,
        }
    }
}
