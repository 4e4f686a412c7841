mod logger;

use anyhow::{Context, Result, bail};
use carousel_core::{
    CanvasPreset, CarouselError, CarouselOptions, CarouselSummary, FitMode, export_slides,
    find_images, generate_pdf, normalize_all_with_progress, plan, read_dimensions,
};
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use logger::CliLogger;
use std::path::PathBuf;

/// Convert PNG/JPG/WebP images to a PDF carousel.
///
/// Defaults to 1080x1350 (portrait, 4:5). Use --square for 1080x1080 (1:1).
#[derive(Parser)]
#[command(name = "carousel", version)]
struct Cli {
    /// Files and/or folders with PNG/JPG/WebP images
    paths: Vec<PathBuf>,

    /// Output PDF file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Use 1080x1080 instead of 1080x1350
    #[arg(long)]
    square: bool,

    /// Custom width in pixels (overrides --square, requires --height)
    #[arg(long)]
    width: Option<u32>,

    /// Custom height in pixels (overrides --square, requires --width)
    #[arg(long)]
    height: Option<u32>,

    /// Image fit strategy
    #[arg(long, value_enum)]
    fit: Option<FitArg>,

    /// Canvas background color (hex or CSS name)
    #[arg(long)]
    bg: Option<String>,

    /// Uniform margin in pixels inside the canvas
    #[arg(long)]
    margin: Option<u32>,

    /// JPEG quality (0-100) for embedded and exported slides
    #[arg(long)]
    quality: Option<u8>,

    /// Resolution used to size PDF pages
    #[arg(long)]
    dpi: Option<u32>,

    /// Also write normalized slides as JPEG files into this directory
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Load options from a JSON file; flags given here override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective options to a JSON file
    #[arg(long)]
    save_config: Option<PathBuf>,

    /// Print the slide plan without writing anything
    #[arg(long)]
    dry_run: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum FitArg {
    /// Scale to fit inside the canvas, padding the rest
    Contain,
    /// Scale to fill the canvas, cropping the overflow
    Cover,
}

impl From<FitArg> for FitMode {
    fn from(arg: FitArg) -> Self {
        match arg {
            FitArg::Contain => Self::Contain,
            FitArg::Cover => Self::Cover,
        }
    }
}

impl Cli {
    /// Merge flags over the config file (or defaults)
    async fn options(&self) -> Result<CarouselOptions> {
        let mut options = match &self.config {
            Some(path) => CarouselOptions::load(path)
                .await
                .with_context(|| format!("loading config {}", path.display()))?,
            None => CarouselOptions::default(),
        };

        if !self.paths.is_empty() {
            options.inputs = self.paths.clone();
        }
        if let Some(output) = &self.output {
            options.output = output.clone();
        }

        options.preset = match (self.width, self.height) {
            (Some(width), Some(height)) => CanvasPreset::Custom { width, height },
            (None, None) if self.square => CanvasPreset::Square,
            (None, None) => options.preset,
            _ => bail!(CarouselError::InvalidConfiguration(
                "If you set --width or --height, you must set both".to_string()
            )),
        };

        if let Some(fit) = self.fit {
            options.fit = fit.into();
        }
        if let Some(bg) = &self.bg {
            options.background = bg.parse()?;
        }
        if let Some(margin) = self.margin {
            options.margin = margin;
        }
        if let Some(quality) = self.quality {
            options.quality = quality;
        }
        if let Some(dpi) = self.dpi {
            options.dpi = dpi;
        }
        if self.export_dir.is_some() {
            options.export_dir = self.export_dir.clone();
        }

        options.validate()?;
        Ok(options)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    CliLogger::new(cli.verbose)
        .init()
        .context("installing logger")?;

    let options = cli.options().await?;
    if let Some(path) = &cli.save_config {
        options
            .save(path)
            .await
            .with_context(|| format!("saving config {}", path.display()))?;
        log::info!("Saved options to {}", path.display());
    }

    let images = find_images(&options.inputs)?;
    let canvas = options.canvas();
    println!("{}", CarouselSummary::new(images.len(), &canvas));

    if cli.dry_run {
        let mut dimensions = Vec::with_capacity(images.len());
        for path in &images {
            dimensions.push(read_dimensions(path).await?);
        }
        let placements = plan(&dimensions, &canvas)?;
        for ((path, source), placement) in images.iter().zip(&dimensions).zip(&placements) {
            println!(
                "  {}: {} -> {}x{} at ({}, {})",
                path.display(),
                source,
                placement.scaled_width,
                placement.scaled_height,
                placement.offset_x,
                placement.offset_y
            );
        }
        return Ok(());
    }

    // Debug lines would tear through the bar, so -v hides it
    let progress = if cli.verbose {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(images.len() as u64);
        pb.set_style(
            ProgressStyle::with_template("{msg} [{bar:40.cyan/blue}] {pos}/{len} [{elapsed}]")?
                .progress_chars("#>-"),
        );
        pb.set_message("Processing");
        pb
    };
    let slides = normalize_all_with_progress(&images, &canvas, |_, _| progress.inc(1)).await;
    progress.finish_and_clear();
    let slides = slides?;

    if let Some(dir) = &options.export_dir {
        export_slides(dir, &slides, options.quality)
            .await
            .with_context(|| format!("exporting slides to {}", dir.display()))?;
    }

    generate_pdf(slides, options.quality, options.dpi, &options.output)
        .await
        .with_context(|| format!("writing {}", options.output.display()))?;
    println!("Saved: {}", options.output.display());

    Ok(())
}
