//! Resolving command-line paths into an ordered list of slide images

use crate::natural::sort_paths;
use crate::types::{CarouselError, Result};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File extensions accepted as slides (compared case-insensitively)
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Expand files and directories into the naturally sorted slide list.
///
/// Directories are searched recursively without following symlinked
/// subdirectories. Explicit files without an image extension are skipped,
/// missing paths are an error.
pub fn find_images(paths: &[impl AsRef<Path>]) -> Result<Vec<PathBuf>> {
    let mut found = BTreeSet::new();

    for path in paths {
        let path = path.as_ref();
        if path.is_dir() {
            collect_dir(path, &mut found)?;
        } else if path.is_file() {
            if is_image_path(path) {
                found.insert(path.to_path_buf());
            } else {
                log::debug!("Skipping non-image file {}", path.display());
            }
        } else {
            return Err(CarouselError::InvalidConfiguration(format!(
                "Input path does not exist: {}",
                path.display()
            )));
        }
    }

    if found.is_empty() {
        return Err(CarouselError::EmptyInputSet);
    }

    let mut images: Vec<PathBuf> = found.into_iter().collect();
    sort_paths(&mut images);
    log::debug!("Found {} images", images.len());
    Ok(images)
}

fn collect_dir(dir: &Path, found: &mut BTreeSet<PathBuf>) -> Result<()> {
    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(std::io::Error::from)?;
        // Symlinked files count, symlinked directories are not descended
        if entry.path().is_file() && is_image_path(entry.path()) {
            found.insert(entry.into_path());
        }
    }
    Ok(())
}
