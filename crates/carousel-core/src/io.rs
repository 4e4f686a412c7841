//! File I/O for slides and the assembled document
//!
//! Decoding, resampling and encoding are CPU-bound and run on the blocking
//! pool; everything else goes through `tokio::fs`.

use crate::compose::normalize;
use crate::document::{assemble_document, encode_jpeg};
use crate::layout::CanvasSpec;
use crate::types::*;
use image::{DynamicImage, ImageReader, RgbImage};
use lopdf::Document;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Decode a single image file
pub async fn load_image(path: impl AsRef<Path>) -> Result<DynamicImage> {
    let path = path.as_ref().to_owned();
    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            return Err(CarouselError::UnreadableImage {
                path,
                source: image::ImageError::IoError(e),
            });
        }
    };
    tokio::task::spawn_blocking(move || decode(&path, bytes)).await?
}

/// Read only the header of an image to get its pixel size.
///
/// The format is sniffed from the content, the same way slides are decoded.
pub async fn read_dimensions(path: impl AsRef<Path>) -> Result<ImageDimensions> {
    let path = path.as_ref().to_owned();
    tokio::task::spawn_blocking(move || {
        let (width, height) = ImageReader::open(&path)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(image::ImageError::IoError)
            .and_then(|reader| reader.into_dimensions())
            .map_err(|source| CarouselError::UnreadableImage { path, source })?;
        ImageDimensions::new(width, height)
    })
    .await?
}

/// Normalize every file onto `canvas`, returning slides in input order.
///
/// Files are decoded and resampled on the blocking pool, one batch of up
/// to one file per available core at a time. The first failure, in input
/// order, aborts the run.
pub async fn normalize_all(paths: &[PathBuf], canvas: &CanvasSpec) -> Result<Vec<RgbImage>> {
    normalize_all_with_progress(paths, canvas, |_, _| {}).await
}

/// Like [`normalize_all`], calling `on_done(index, path)` as each slide
/// is collected. Calls arrive in input order.
pub async fn normalize_all_with_progress(
    paths: &[PathBuf],
    canvas: &CanvasSpec,
    mut on_done: impl FnMut(usize, &Path),
) -> Result<Vec<RgbImage>> {
    let workers = std::thread::available_parallelism().map_or(1, |n| n.get());
    let mut slides = Vec::with_capacity(paths.len());

    for batch in paths.chunks(workers) {
        let handles: Vec<_> = batch
            .iter()
            .map(|path| {
                let path = path.clone();
                let canvas = *canvas;
                tokio::task::spawn_blocking(move || normalize_file(&path, &canvas))
            })
            .collect();

        for (path, handle) in batch.iter().zip(handles) {
            slides.push(handle.await??);
            on_done(slides.len() - 1, path);
        }
    }
    Ok(slides)
}

fn normalize_file(path: &Path, canvas: &CanvasSpec) -> Result<RgbImage> {
    let bytes = std::fs::read(path).map_err(|e| CarouselError::UnreadableImage {
        path: path.to_path_buf(),
        source: image::ImageError::IoError(e),
    })?;
    let image = decode(path, bytes)?;
    log::debug!(
        "Normalizing {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    normalize(&image, canvas)
}

/// Write each slide as `slide_NN.jpg` into `dir`, numbering from 1
pub async fn export_slides(
    dir: impl AsRef<Path>,
    slides: &[RgbImage],
    quality: u8,
) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref().to_owned();
    tokio::fs::create_dir_all(&dir).await?;

    let slides = slides.to_vec();
    let encoded = tokio::task::spawn_blocking(move || {
        slides
            .iter()
            .map(|slide| encode_jpeg(slide, quality))
            .collect::<Result<Vec<_>>>()
    })
    .await??;

    let mut written = Vec::with_capacity(encoded.len());
    for (index, bytes) in encoded.into_iter().enumerate() {
        let path = dir.join(slide_file_name(index + 1));
        tokio::fs::write(&path, bytes).await?;
        written.push(path);
    }
    log::info!("Exported {} slides to {}", written.len(), dir.display());
    Ok(written)
}

/// File name for the 1-based slide `number`
pub fn slide_file_name(number: usize) -> String {
    format!("slide_{:02}.jpg", number)
}

/// Assemble slides into a PDF and write it to `output_path`
pub async fn generate_pdf(
    slides: Vec<RgbImage>,
    quality: u8,
    dpi: u32,
    output_path: impl AsRef<Path>,
) -> Result<()> {
    let doc =
        tokio::task::spawn_blocking(move || assemble_document(&slides, quality, dpi)).await??;
    save_pdf(doc, output_path).await
}

/// Save the assembled document
pub async fn save_pdf(mut doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::task::spawn_blocking(move || {
        let mut writer = Vec::new();
        doc.save_to(&mut writer)?;
        Ok::<_, CarouselError>(writer)
    })
    .await??;
    tokio::fs::write(&path, bytes).await?;
    log::info!("Saved {}", path.display());
    Ok(())
}

fn decode(path: &Path, bytes: Vec<u8>) -> Result<DynamicImage> {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(image::ImageError::IoError)
        .and_then(|reader| reader.decode())
        .map_err(|source| CarouselError::UnreadableImage {
            path: path.to_path_buf(),
            source,
        })
}
