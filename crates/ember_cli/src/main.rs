//! ember command line renderer.
//!
//! Builds one of the built-in scenes, renders it and writes a PPM image.

mod cli;
mod scenes;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Args;
use ember_renderer::{render, ImageBuffer, RenderConfig, RenderControl};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;
use std::time::Instant;

fn load_config(path: Option<&Path>) -> Result<RenderConfig> {
    let Some(path) = path else {
        return Ok(RenderConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid config {}", path.display()))
}

fn save_ppm(image: &ImageBuffer, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    image
        .write_ppm(BufWriter::new(file))
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// True when `done` is the first row past a 10% step.
fn crosses_tenth(done: u32, total: u32) -> bool {
    done > 0 && total > 0 && (done * 10 / total) != ((done - 1) * 10 / total)
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    log::info!("Starting ember");

    let config = args.apply(load_config(args.config.as_deref())?);
    config.validate().context("Invalid render config")?;

    let start = Instant::now();
    let (world, camera) = scenes::build(args.scene, config.seed);
    let camera = camera
        .with_resolution(config.width, config.height)
        .build()
        .context("Invalid camera")?;
    log::info!("Scene {:?} built in {:?}", args.scene, start.elapsed());

    log::info!(
        "Rendering {}x{} @ {} spp, depth {}, {} bands, {:?} mode",
        config.width,
        config.height,
        config.samples_per_pixel,
        config.max_depth,
        config.band_count,
        config.mode
    );

    let progress = |done: u32, total: u32| {
        if crosses_tenth(done, total) {
            log::info!("{}% ({}/{} rows)", done * 100 / total, done, total);
        }
    };
    let control = RenderControl::new().with_progress(&progress);

    let start = Instant::now();
    let image = render(&camera, &world, &config, &control).context("Render failed")?;
    log::info!("Rendered in {:?}", start.elapsed());

    save_ppm(&image, &args.output)?;
    log::info!("Saved to {}", args.output.display());

    Ok(())
}
