//! Layout calculation for slide normalization
//!
//! - Canvas geometry (usable area inside the margins)
//! - Fitting a source image in `contain` or `cover` mode
//! - Crop windows for overflowing `cover` placements

mod fit;
mod types;

pub use fit::*;
pub use types::*;
