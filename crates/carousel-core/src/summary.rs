use crate::layout::{CanvasSpec, Placement, fit};
use crate::types::*;
use std::fmt;

/// One-line description of a build, printed before processing starts
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselSummary {
    pub slides: usize,
    pub canvas: CanvasSpec,
}

impl CarouselSummary {
    pub fn new(slides: usize, canvas: &CanvasSpec) -> Self {
        Self {
            slides,
            canvas: *canvas,
        }
    }
}

impl fmt::Display for CarouselSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Slides: {} | Size: {}x{} | Fit: {} | Margin: {}px | BG: {}",
            self.slides,
            self.canvas.width,
            self.canvas.height,
            self.canvas.fit,
            self.canvas.margin,
            self.canvas.background
        )
    }
}

/// Placement of each source on `canvas`, in the given order
pub fn plan(dimensions: &[ImageDimensions], canvas: &CanvasSpec) -> Result<Vec<Placement>> {
    dimensions.iter().map(|&source| fit(source, canvas)).collect()
}
