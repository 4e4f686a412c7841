//! Multi-page PDF assembly
//!
//! Every slide becomes one page showing a single JPEG image XObject that
//! covers the whole MediaBox.

use crate::types::{CarouselError, Result};
use image::RgbImage;
use image::codecs::jpeg::JpegEncoder;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// Resolution used to turn slide pixels into page points
pub const DEFAULT_DPI: u32 = 300;

/// Page side length in points for `pixels` at `dpi`
pub fn pixels_to_pt(pixels: u32, dpi: u32) -> f32 {
    pixels as f32 * 72.0 / dpi as f32
}

/// Build a PDF with one page per slide, in order.
///
/// All slides must share the same pixel size.
pub fn assemble_document(pages: &[RgbImage], quality: u8, dpi: u32) -> Result<Document> {
    let first = pages.first().ok_or(CarouselError::EmptyInputSet)?;
    if dpi == 0 {
        return Err(CarouselError::InvalidConfiguration(
            "DPI must be positive".to_string(),
        ));
    }

    let (width_px, height_px) = first.dimensions();
    if let Some((index, page)) = pages
        .iter()
        .enumerate()
        .find(|(_, page)| page.dimensions() != (width_px, height_px))
    {
        return Err(CarouselError::InvalidConfiguration(format!(
            "Slide {} is {}x{}, expected {}x{}",
            index + 1,
            page.width(),
            page.height(),
            width_px,
            height_px
        )));
    }

    let width_pt = pixels_to_pt(width_px, dpi);
    let height_pt = pixels_to_pt(height_px, dpi);

    let mut output = Document::with_version("1.7");
    let pages_tree_id = output.new_object_id();
    let mut page_refs = Vec::with_capacity(pages.len());

    for page in pages {
        let image_id = output.add_object(jpeg_image_stream(page, quality)?);
        let page_id = render_slide_page(&mut output, image_id, width_pt, height_pt, pages_tree_id);
        page_refs.push(Object::Reference(page_id));
    }

    // Create pages tree
    let count = page_refs.len() as i64;
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(page_refs)),
        ("Count", Object::Integer(count)),
    ]);
    output
        .objects
        .insert(pages_tree_id, Object::Dictionary(pages_dict));

    // Create catalog
    let catalog_id = output.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_tree_id)),
    ]));

    output.trailer.set("Root", catalog_id);

    Ok(output)
}

/// Encode a slide as JPEG bytes
pub fn encode_jpeg(page: &RgbImage, quality: u8) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut bytes, quality.clamp(1, 100));
    page.write_with_encoder(encoder)?;
    Ok(bytes)
}

fn jpeg_image_stream(page: &RgbImage, quality: u8) -> Result<Stream> {
    let jpeg_bytes = encode_jpeg(page, quality)?;

    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name(b"XObject".to_vec()));
    dict.set("Subtype", Object::Name(b"Image".to_vec()));
    dict.set("Width", Object::Integer(i64::from(page.width())));
    dict.set("Height", Object::Integer(i64::from(page.height())));
    dict.set("ColorSpace", Object::Name(b"DeviceRGB".to_vec()));
    dict.set("BitsPerComponent", Object::Integer(8));
    dict.set("Filter", Object::Name(b"DCTDecode".to_vec()));

    // Already compressed; keep lopdf from deflating it again
    Ok(Stream::new(dict, jpeg_bytes).with_compression(false))
}

fn render_slide_page(
    output: &mut Document,
    image_id: ObjectId,
    width_pt: f32,
    height_pt: f32,
    parent_pages_id: ObjectId,
) -> ObjectId {
    let mut xobjects = Dictionary::new();
    xobjects.set("Im0", Object::Reference(image_id));

    let mut resources = Dictionary::new();
    resources.set("XObject", Object::Dictionary(xobjects));

    let content = format!("q {} 0 0 {} 0 0 cm /Im0 Do Q\n", width_pt, height_pt);
    let content_id = output.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

    let mut page_dict = Dictionary::new();
    page_dict.set("Type", Object::Name(b"Page".to_vec()));
    page_dict.set("Parent", Object::Reference(parent_pages_id));
    page_dict.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(width_pt),
            Object::Real(height_pt),
        ]),
    );
    page_dict.set("Contents", Object::Reference(content_id));
    page_dict.set("Resources", Object::Dictionary(resources));

    output.add_object(page_dict)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixels_map_to_points_at_dpi() {
        assert_eq!(pixels_to_pt(300, 300), 72.0);
        assert_eq!(pixels_to_pt(1080, 72), 1080.0);
    }
}
