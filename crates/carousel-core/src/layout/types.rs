//! Layout data types for slide normalization
//!
//! These describe the fixed canvas every slide is drawn onto and where a
//! scaled source image lands on it.

use crate::types::{CarouselError, Color, FitMode, Result};

/// Target canvas shared by every page of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSpec {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Uniform margin on all four sides, in pixels
    pub margin: u32,
    /// Fill color for padding and transparent pixels
    pub background: Color,
    pub fit: FitMode,
}

impl CanvasSpec {
    /// Area left inside the margins as (width, height).
    ///
    /// Fails when the margins consume either dimension entirely.
    pub fn usable_area(&self) -> Result<(u32, u32)> {
        let inset = u64::from(self.margin) * 2;
        let usable_width = u64::from(self.width).saturating_sub(inset);
        let usable_height = u64::from(self.height).saturating_sub(inset);

        if usable_width == 0 || usable_height == 0 {
            return Err(CarouselError::InvalidConfiguration(format!(
                "Margin {}px leaves no usable area on a {}x{} canvas",
                self.margin, self.width, self.height
            )));
        }

        Ok((usable_width as u32, usable_height as u32))
    }
}

/// Where a scaled source image lands on the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Width of the source after scaling, before any crop
    pub scaled_width: u32,
    /// Height of the source after scaling, before any crop
    pub scaled_height: u32,
    /// Left edge of the visible image on the canvas
    pub offset_x: u32,
    /// Top edge of the visible image on the canvas
    pub offset_y: u32,
    /// Uniform scale factor applied to both axes
    pub scale: f64,
}

impl Placement {
    /// Visible part of the scaled image, in scaled-image coordinates.
    ///
    /// For `contain` placements this is the whole image. For `cover`
    /// placements the overflow is split evenly, with any odd pixel
    /// dropped from the right or bottom edge.
    pub fn crop_window(&self, canvas: &CanvasSpec) -> Result<CropWindow> {
        let (usable_width, usable_height) = canvas.usable_area()?;
        let width = self.scaled_width.min(usable_width);
        let height = self.scaled_height.min(usable_height);

        Ok(CropWindow {
            x: (self.scaled_width - width) / 2,
            y: (self.scaled_height - height) / 2,
            width,
            height,
        })
    }
}

/// A rectangle inside a scaled image, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CropWindow {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}
