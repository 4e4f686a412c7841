use carousel_core::*;
use image::{Rgb, RgbImage, Rgba, RgbaImage};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_png(path: &Path, width: u32, height: u32) {
    RgbImage::from_pixel(width, height, Rgb([200, 10, 10]))
        .save(path)
        .unwrap();
}

fn names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn test_find_images_scans_recursively_in_natural_order() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("nested")).unwrap();
    write_png(&dir.path().join("img10.png"), 4, 4);
    write_png(&dir.path().join("img2.png"), 4, 4);
    write_png(&dir.path().join("nested").join("img1.PNG"), 4, 4);
    std::fs::write(dir.path().join("notes.txt"), "skip me").unwrap();

    let found = find_images(&[dir.path()]).unwrap();
    assert_eq!(names(&found), vec!["img1.PNG", "img2.png", "img10.png"]);
}

#[test]
fn test_find_images_filters_explicit_files_and_dedupes() {
    let dir = TempDir::new().unwrap();
    let png = dir.path().join("a.png");
    let txt = dir.path().join("b.txt");
    write_png(&png, 2, 2);
    std::fs::write(&txt, "x").unwrap();

    let found = find_images(&[png.clone(), txt, png.clone(), dir.path().to_path_buf()]).unwrap();
    assert_eq!(found, vec![png]);
}

#[cfg(unix)]
#[test]
fn test_find_images_ignores_symlink_loops() {
    let dir = TempDir::new().unwrap();
    write_png(&dir.path().join("a1.png"), 4, 4);
    std::os::unix::fs::symlink(dir.path(), dir.path().join("loop")).unwrap();

    let found = find_images(&[dir.path()]).unwrap();
    assert_eq!(found, vec![dir.path().join("a1.png")]);
}

#[cfg(unix)]
#[test]
fn test_find_images_keeps_symlinked_files() {
    let dir = TempDir::new().unwrap();
    let real = dir.path().join("real");
    let slides = dir.path().join("slides");
    std::fs::create_dir(&real).unwrap();
    std::fs::create_dir(&slides).unwrap();
    write_png(&real.join("img1.png"), 4, 4);
    std::os::unix::fs::symlink(real.join("img1.png"), slides.join("img2.png")).unwrap();

    let found = find_images(&[&slides]).unwrap();
    assert_eq!(names(&found), vec!["img2.png"]);
}

#[test]
fn test_find_images_empty_set() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("readme.md"), "no images").unwrap();
    assert!(matches!(
        find_images(&[dir.path()]),
        Err(CarouselError::EmptyInputSet)
    ));
}

#[test]
fn test_find_images_missing_path() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope");
    assert!(matches!(
        find_images(&[missing]),
        Err(CarouselError::InvalidConfiguration(_))
    ));
}

#[tokio::test]
async fn test_read_dimensions_and_load_image() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("slide.png");
    write_png(&path, 30, 20);

    let dims = read_dimensions(&path).await.unwrap();
    assert_eq!((dims.width(), dims.height()), (30, 20));

    let image = load_image(&path).await.unwrap();
    assert_eq!((image.width(), image.height()), (30, 20));
}

#[tokio::test]
async fn test_content_decides_format_not_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("slide.jpg");
    RgbImage::from_pixel(30, 20, Rgb([200, 10, 10]))
        .save_with_format(&path, image::ImageFormat::Png)
        .unwrap();

    let dims = read_dimensions(&path).await.unwrap();
    assert_eq!((dims.width(), dims.height()), (30, 20));

    let canvas = CanvasSpec {
        width: 30,
        height: 20,
        margin: 0,
        background: Color::WHITE,
        fit: FitMode::Contain,
    };
    let slides = normalize_all(&[path], &canvas).await.unwrap();
    assert_eq!(slides[0].dimensions(), (30, 20));
}

#[tokio::test]
async fn test_read_dimensions_unreadable_header() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.jpg");
    std::fs::write(&path, b"not an image at all").unwrap();

    match read_dimensions(&path).await {
        Err(CarouselError::UnreadableImage { path: bad, .. }) => assert_eq!(bad, path),
        other => panic!("Expected UnreadableImage, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unreadable_image_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.png");
    std::fs::write(&path, b"definitely not a png").unwrap();

    match load_image(&path).await {
        Err(CarouselError::UnreadableImage { path: bad, .. }) => assert_eq!(bad, path),
        other => panic!("Expected UnreadableImage, got {other:?}"),
    }
}

#[tokio::test]
async fn test_normalize_all_preserves_order() {
    let dir = TempDir::new().unwrap();
    let mut paths = Vec::new();
    for (i, shade) in [10u8, 120, 250].into_iter().enumerate() {
        let path = dir.path().join(format!("s{}.png", i));
        RgbImage::from_pixel(50, 50, Rgb([shade, shade, shade]))
            .save(&path)
            .unwrap();
        paths.push(path);
    }

    let canvas = CanvasSpec {
        width: 50,
        height: 50,
        margin: 0,
        background: Color::BLACK,
        fit: FitMode::Contain,
    };
    let slides = normalize_all(&paths, &canvas).await.unwrap();
    let shades: Vec<u8> = slides.iter().map(|s| s.get_pixel(25, 25).0[0]).collect();
    assert_eq!(shades, vec![10, 120, 250]);
}

#[tokio::test]
async fn test_progress_reports_each_slide_in_order() {
    let dir = TempDir::new().unwrap();
    let paths: Vec<PathBuf> = (0..5)
        .map(|i| {
            let path = dir.path().join(format!("p{}.png", i));
            write_png(&path, 6, 6);
            path
        })
        .collect();

    let mut seen = Vec::new();
    let canvas = CarouselOptions::default().canvas();
    let slides = normalize_all_with_progress(&paths, &canvas, |index, path| {
        seen.push((index, path.to_path_buf()))
    })
    .await
    .unwrap();

    assert_eq!(slides.len(), 5);
    let expected: Vec<_> = paths.iter().cloned().enumerate().collect();
    assert_eq!(seen, expected);
}

#[tokio::test]
async fn test_normalize_all_aborts_on_bad_file() {
    let dir = TempDir::new().unwrap();
    let good = dir.path().join("good.png");
    let bad = dir.path().join("bad.png");
    write_png(&good, 8, 8);
    std::fs::write(&bad, b"garbage").unwrap();

    let canvas = CarouselOptions::default().canvas();
    match normalize_all(&[good, bad.clone()], &canvas).await {
        Err(CarouselError::UnreadableImage { path, .. }) => assert_eq!(path, bad),
        other => panic!("Expected UnreadableImage, got {:?}", other.map(|s| s.len())),
    }
}

#[tokio::test]
async fn test_transparent_png_is_flattened() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("alpha.png");
    RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 0]))
        .save(&path)
        .unwrap();

    let canvas = CanvasSpec {
        width: 10,
        height: 10,
        margin: 0,
        background: Color::WHITE,
        fit: FitMode::Contain,
    };
    let slides = normalize_all(&[path], &canvas).await.unwrap();
    assert!(slides[0].pixels().all(|p| p.0 == [255, 255, 255]));
}

#[tokio::test]
async fn test_export_slides_numbering() {
    let dir = TempDir::new().unwrap();
    let export = dir.path().join("out").join("slides");
    let slides = vec![RgbImage::new(8, 10); 3];

    let written = export_slides(&export, &slides, 90).await.unwrap();
    assert_eq!(
        names(&written),
        vec!["slide_01.jpg", "slide_02.jpg", "slide_03.jpg"]
    );
    for path in &written {
        let dims = image::image_dimensions(path).unwrap();
        assert_eq!(dims, (8, 10));
    }
    assert_eq!(io::slide_file_name(123), "slide_123.jpg");
}

#[tokio::test]
async fn test_generate_pdf_writes_file() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("carousel.pdf");
    let slides = vec![RgbImage::new(27, 34); 2];

    generate_pdf(slides, 92, 300, &output).await.unwrap();

    let loaded = lopdf::Document::load(&output).unwrap();
    assert_eq!(loaded.get_pages().len(), 2);
}

#[tokio::test]
async fn test_end_to_end_contain_build() {
    let dir = TempDir::new().unwrap();
    write_png(&dir.path().join("img2.png"), 1200, 1200);
    write_png(&dir.path().join("img10.png"), 400, 1000);
    write_png(&dir.path().join("img1.png"), 800, 600);

    let mut options = CarouselOptions::default();
    options.inputs.push(dir.path().to_path_buf());
    options.output = dir.path().join("carousel.pdf");
    options.validate().unwrap();

    let images = find_images(&options.inputs).unwrap();
    assert_eq!(names(&images), vec!["img1.png", "img2.png", "img10.png"]);

    let canvas = options.canvas();
    let slides = normalize_all(&images, &canvas).await.unwrap();
    assert!(slides.iter().all(|s| s.dimensions() == (1080, 1350)));

    generate_pdf(slides, options.quality, options.dpi, &options.output)
        .await
        .unwrap();
    let loaded = lopdf::Document::load(&options.output).unwrap();
    assert_eq!(loaded.get_pages().len(), 3);
}
