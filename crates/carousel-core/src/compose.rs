//! Drawing a decoded image onto its normalized canvas

use crate::layout::{CanvasSpec, CropWindow, Placement, fit};
use crate::types::{Color, ImageDimensions, Result};
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgb, RgbImage};

/// Produce a `canvas.width x canvas.height` RGB slide from `image`.
///
/// Transparent pixels are blended over the background color first, so the
/// output never carries an alpha channel.
pub fn normalize(image: &DynamicImage, canvas: &CanvasSpec) -> Result<RgbImage> {
    let source = flatten(image, canvas.background);
    let dimensions = ImageDimensions::new(source.width(), source.height())?;
    let placement = fit(dimensions, canvas)?;
    let window = placement.crop_window(canvas)?;

    let visible = scale_visible(&source, &placement, &window);

    let mut slide = blank_canvas(canvas);
    imageops::replace(
        &mut slide,
        &visible,
        i64::from(placement.offset_x),
        i64::from(placement.offset_y),
    );
    Ok(slide)
}

/// Allocate a canvas filled with the background color
pub fn blank_canvas(canvas: &CanvasSpec) -> RgbImage {
    RgbImage::from_pixel(canvas.width, canvas.height, Rgb(canvas.background.channels()))
}

/// Drop the alpha channel by compositing over `background`
pub fn flatten(image: &DynamicImage, background: Color) -> RgbImage {
    if !image.color().has_alpha() {
        return image.to_rgb8();
    }

    let rgba = image.to_rgba8();
    let bg = background.channels();
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let blend = |fg: u8, bg: u8| {
            let a = u32::from(a);
            ((u32::from(fg) * a + u32::from(bg) * (255 - a) + 127) / 255) as u8
        };
        Rgb([blend(r, bg[0]), blend(g, bg[1]), blend(b, bg[2])])
    })
}

/// Resample only the part of `source` that ends up visible.
///
/// Cropping before resizing keeps `cover` placements from materializing
/// the full overflowing image.
fn scale_visible(source: &RgbImage, placement: &Placement, window: &CropWindow) -> RgbImage {
    let full = window.width == placement.scaled_width && window.height == placement.scaled_height;

    let region = if full {
        None
    } else {
        Some(source_region(source, placement, window))
    };

    match region {
        None if source.dimensions() == (window.width, window.height) => source.clone(),
        None => imageops::resize(source, window.width, window.height, FilterType::Lanczos3),
        Some(region) => {
            let cropped =
                imageops::crop_imm(source, region.x, region.y, region.width, region.height)
                    .to_image();
            if cropped.dimensions() == (window.width, window.height) {
                cropped
            } else {
                imageops::resize(&cropped, window.width, window.height, FilterType::Lanczos3)
            }
        }
    }
}

/// Map a crop window in scaled coordinates back onto the source pixels
fn source_region(source: &RgbImage, placement: &Placement, window: &CropWindow) -> CropWindow {
    let to_source = |v: u32| (f64::from(v) / placement.scale).round_ties_even() as u32;

    let width = to_source(window.width).clamp(1, source.width());
    let height = to_source(window.height).clamp(1, source.height());
    let x = to_source(window.x).min(source.width() - width);
    let y = to_source(window.y).min(source.height() - height);

    CropWindow {
        x,
        y,
        width,
        height,
    }
}
