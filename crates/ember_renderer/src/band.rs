//! Band-based parallel rendering.
//!
//! Divides the image into contiguous row ranges (bands) that are rendered
//! independently and in parallel using rayon. Each band gets its own slice
//! of the output buffer, so workers never write to the same pixel.

use crate::random::mix_seed;
use crate::renderer::{color_to_rgb, render_pixel};
use crate::{Camera, Hittable, ImageBuffer, Random, RenderConfig, RenderError, Result, Rgb};
use rayon::prelude::*;
use std::ops::Range;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::Instant;

/// A contiguous range of image rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    /// Index of this band, top to bottom
    pub index: usize,
    /// First row of the band
    pub start: u32,
    /// One past the last row
    pub end: u32,
}

impl Band {
    /// Create a new band.
    pub fn new(index: usize, start: u32, end: u32) -> Self {
        Self { index, start, end }
    }

    /// Rows covered by this band.
    pub fn rows(&self) -> Range<u32> {
        self.start..self.end
    }

    /// Get the number of rows in this band.
    pub fn row_count(&self) -> u32 {
        self.end - self.start
    }

    /// Get the total number of pixels in this band.
    pub fn pixel_count(&self, width: u32) -> usize {
        self.row_count() as usize * width as usize
    }
}

/// Split `height` rows into `band_count` contiguous bands.
///
/// Every band gets `height / band_count` rows and the last one absorbs the
/// remainder. The band count is capped at the height so no band is empty.
pub fn generate_bands(height: u32, band_count: u32) -> Vec<Band> {
    let count = band_count.min(height);
    if count == 0 {
        return Vec::new();
    }

    let rows_per_band = height / count;
    (0..count)
        .map(|i| {
            let start = i * rows_per_band;
            let end = if i == count - 1 {
                height
            } else {
                start + rows_per_band
            };
            Band::new(i as usize, start, end)
        })
        .collect()
}

/// Progress callback: `(rows_done, rows_total)`.
pub type ProgressFn<'a> = dyn Fn(u32, u32) + Sync + 'a;

/// Optional hooks into a running render.
#[derive(Default, Clone, Copy)]
pub struct RenderControl<'a> {
    progress: Option<&'a ProgressFn<'a>>,
    cancel: Option<&'a AtomicBool>,
}

impl<'a> RenderControl<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called after every finished row, from whichever worker finished it.
    pub fn with_progress(mut self, progress: &'a ProgressFn<'a>) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Checked before every row; once set, workers stop and the render fails.
    pub fn with_cancel(mut self, cancel: &'a AtomicBool) -> Self {
        self.cancel = Some(cancel);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

/// Render one band into its slice of the output buffer.
///
/// `pixels` must hold exactly the band's rows. Row `r` is rendered with a
/// generator seeded from `(base_seed, r)`, so the result does not depend on
/// how rows are grouped into bands.
#[allow(clippy::too_many_arguments)]
pub fn render_band(
    band: &Band,
    pixels: &mut [Rgb],
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    base_seed: u64,
    control: &RenderControl,
    rows_done: &AtomicU32,
) -> Result<()> {
    let width = config.width as usize;
    if pixels.len() != band.pixel_count(config.width) {
        return Err(RenderError::BufferSize {
            expected: band.pixel_count(config.width),
            actual: pixels.len(),
        });
    }

    log::debug!(
        "band {} start: rows [{}, {})",
        band.index,
        band.start,
        band.end
    );

    let mut random = Random::seeded(base_seed);
    for (row, line) in band.rows().zip(pixels.chunks_exact_mut(width)) {
        if control.is_cancelled() {
            log::debug!("band {} cancelled at row {}", band.index, row);
            return Err(RenderError::Cancelled);
        }

        random.reseed(mix_seed(base_seed, row as u64));
        for (col, pixel) in line.iter_mut().enumerate() {
            let color = render_pixel(camera, world, col as u32, row, config, &mut random);
            *pixel = color_to_rgb(color, config);
        }

        let done = rows_done.fetch_add(1, Ordering::Relaxed) + 1;
        if let Some(progress) = control.progress {
            progress(done, config.height);
        }
    }

    log::debug!("band {} done", band.index);
    Ok(())
}

/// Render the entire scene into `image`.
///
/// Validates the config, splits the buffer into disjoint band slices and
/// runs one rayon task per band. Blocks until every band has finished.
pub fn render_into(
    image: &mut ImageBuffer,
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    control: &RenderControl,
) -> Result<()> {
    config.validate()?;
    if image.width() != config.width || image.height() != config.height {
        return Err(RenderError::BufferSize {
            expected: config.pixel_count(),
            actual: image.pixels().len(),
        });
    }

    let bands = generate_bands(config.height, config.band_count);
    let base_seed = config.base_seed();
    let rows_done = AtomicU32::new(0);

    // Hand each band its own disjoint slice of the buffer
    let mut rest = image.pixels_mut();
    let mut work = Vec::with_capacity(bands.len());
    for band in &bands {
        log::debug!(
            "band {} created: rows [{}, {})",
            band.index,
            band.start,
            band.end
        );
        let (slice, tail) = std::mem::take(&mut rest).split_at_mut(band.pixel_count(config.width));
        work.push((band, slice));
        rest = tail;
    }

    let start = Instant::now();
    work.into_par_iter().try_for_each(|(band, pixels)| {
        render_band(band, pixels, camera, world, config, base_seed, control, &rows_done)
    })?;

    log::info!(
        "Rendered {}x{} @ {} spp in {} bands ({:?})",
        config.width,
        config.height,
        config.samples_per_pixel,
        bands.len(),
        start.elapsed()
    );
    Ok(())
}

/// Render the entire scene to a new image buffer.
pub fn render(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    control: &RenderControl,
) -> Result<ImageBuffer> {
    config.validate()?;
    let mut image = ImageBuffer::new(config.width, config.height);
    render_into(&mut image, camera, world, config, control)?;
    Ok(image)
}
