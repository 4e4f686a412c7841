//! Fitting a source image onto the canvas
//!
//! Both modes scale uniformly, so the source aspect ratio is kept. Scaled
//! sizes are rounded half-to-even and then clamped so that `contain` never
//! leaves the usable area and `cover` never falls short of it.

use crate::types::{FitMode, ImageDimensions, Result};

use super::{CanvasSpec, Placement};

impl FitMode {
    /// Uniform scale factor that maps `source` onto `usable` for this mode
    pub fn scale_factor(self, source: ImageDimensions, usable: (u32, u32)) -> f64 {
        let scale_x = f64::from(usable.0) / f64::from(source.width());
        let scale_y = f64::from(usable.1) / f64::from(source.height());
        match self {
            FitMode::Contain => scale_x.min(scale_y),
            FitMode::Cover => scale_x.max(scale_y),
        }
    }

    /// Clamp a rounded scaled length against the usable length on one axis
    fn clamp_axis(self, scaled: u32, usable: u32) -> u32 {
        match self {
            FitMode::Contain => scaled.clamp(1, usable),
            FitMode::Cover => scaled.max(usable),
        }
    }
}

/// Compute where `source` lands on `canvas`.
///
/// Offsets are measured from the canvas's top-left corner. A `contain`
/// placement is centered in the usable area, with an odd leftover pixel
/// going to the right or bottom. A `cover` placement starts at the margin,
/// and [`Placement::crop_window`] gives the centered part that is drawn.
pub fn fit(source: ImageDimensions, canvas: &CanvasSpec) -> Result<Placement> {
    let (usable_width, usable_height) = canvas.usable_area()?;
    let scale = canvas.fit.scale_factor(source, (usable_width, usable_height));

    let scaled_width = canvas
        .fit
        .clamp_axis(scale_length(source.width(), scale), usable_width);
    let scaled_height = canvas
        .fit
        .clamp_axis(scale_length(source.height(), scale), usable_height);

    let (offset_x, offset_y) = match canvas.fit {
        FitMode::Contain => (
            canvas.margin + (usable_width - scaled_width) / 2,
            canvas.margin + (usable_height - scaled_height) / 2,
        ),
        FitMode::Cover => (canvas.margin, canvas.margin),
    };

    Ok(Placement {
        scaled_width,
        scaled_height,
        offset_x,
        offset_y,
        scale,
    })
}

fn scale_length(length: u32, scale: f64) -> u32 {
    // `as` saturates, which only matters for absurd cover scales
    (f64::from(length) * scale).round_ties_even() as u32
}
