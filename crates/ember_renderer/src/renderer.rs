//! Radiance estimation.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with a hard depth ceiling
//! - Gamma correction and 8-bit quantization
//! - Anti-aliasing via jittered multi-sampling

use crate::{
    material::diffuse_direction, Camera, Hittable, Random, Ray, RenderConfig, RenderMode, Rgb,
    Scatter,
};
use ember_math::{Color, Interval, Vec3};

/// Attenuation applied per bounce when materials are ignored.
const DIFFUSE_ATTENUATION: f32 = 0.5;

/// Rec. 709 luminance weights.
const LUMINANCE: Vec3 = Vec3::new(0.2126, 0.7152, 0.0722);

/// Compute the light carried back along `ray`.
///
/// Returns `None` when the path carries no light: it was absorbed, or it
/// was still bouncing when `depth` reached `config.max_depth`. Callers
/// drop such samples instead of averaging them in as black.
pub fn ray_color(
    ray: &Ray,
    world: &dyn Hittable,
    depth: u32,
    config: &RenderConfig,
    random: &mut Random,
) -> Option<Color> {
    let ray_t = config.hit_interval();
    match config.mode {
        RenderMode::Shaded | RenderMode::Grayscale => shaded(ray, world, depth, ray_t, config, random),
        RenderMode::NormalMap => Some(normal_map(ray, world, ray_t, config)),
        RenderMode::Diffuse => diffuse(ray, world, depth, ray_t, config, random),
    }
}

fn shaded(
    ray: &Ray,
    world: &dyn Hittable,
    depth: u32,
    ray_t: Interval,
    config: &RenderConfig,
    random: &mut Random,
) -> Option<Color> {
    let Some(rec) = world.hit(ray, ray_t) else {
        return Some(config.background.color(ray.direction()));
    };
    if depth >= config.max_depth {
        return None;
    }

    let result = rec.material.scatter(ray, &rec, random)?;
    shaded(&result.scattered, world, depth + 1, ray_t, config, random)
        .map(|incoming| result.attenuation * incoming)
}

fn normal_map(ray: &Ray, world: &dyn Hittable, ray_t: Interval, config: &RenderConfig) -> Color {
    match world.hit(ray, ray_t) {
        Some(rec) => 0.5 * (rec.normal + Vec3::ONE),
        None => config.background.color(ray.direction()),
    }
}

fn diffuse(
    ray: &Ray,
    world: &dyn Hittable,
    depth: u32,
    ray_t: Interval,
    config: &RenderConfig,
    random: &mut Random,
) -> Option<Color> {
    let Some(rec) = world.hit(ray, ray_t) else {
        return Some(config.background.color(ray.direction()));
    };
    // The depth check also stops paths trapped inside negative-radius spheres
    if depth >= config.max_depth {
        return None;
    }

    let bounce = Ray::new(rec.p, diffuse_direction(rec.normal, random));
    diffuse(&bounce, world, depth + 1, ray_t, config, random).map(|c| DIFFUSE_ATTENUATION * c)
}

/// Estimate the linear color of one pixel.
///
/// `row` 0 is the top of the image. Each sample jitters inside the pixel
/// footprint; samples that carry no light are excluded from the average.
/// A pixel where every sample was dropped is black.
///
/// `col` and `row` must lie inside the image described by `config`.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    col: u32,
    row: u32,
    config: &RenderConfig,
    random: &mut Random,
) -> Color {
    debug_assert!(
        col < config.width && row < config.height,
        "pixel ({col}, {row}) outside {}x{} image",
        config.width,
        config.height
    );

    let mut pixel_color = Color::ZERO;
    let mut contributing = 0u32;

    // Camera t runs bottom to top
    let flipped_row = (config.height - 1 - row) as f32;

    for _ in 0..config.samples_per_pixel {
        let s = (col as f32 + random.get()) / config.width as f32;
        let t = (flipped_row + random.get()) / config.height as f32;
        let ray = camera.get_ray(s, t, random);

        if let Some(color) = ray_color(&ray, world, 0, config, random) {
            pixel_color += color;
            contributing += 1;
        }
    }

    if contributing == 0 {
        return Color::ZERO;
    }

    // Average the samples
    pixel_color / contributing as f32
}

/// Apply display gamma to one linear channel.
#[inline]
pub fn linear_to_gamma(linear: f32, gamma: f32) -> f32 {
    if linear > 0.0 {
        linear.powf(1.0 / gamma)
    } else {
        0.0
    }
}

/// Undo [`linear_to_gamma`].
#[inline]
pub fn gamma_to_linear(encoded: f32, gamma: f32) -> f32 {
    if encoded > 0.0 {
        encoded.powf(gamma)
    } else {
        0.0
    }
}

/// Clamp to [0, 1] and map to 0..=255.
#[inline]
pub fn quantize(channel: f32) -> u8 {
    (255.999 * Interval::UNIT.clamp(channel)).floor() as u8
}

/// Luminance of a linear color.
#[inline]
pub fn luminance(color: Color) -> f32 {
    color.dot(LUMINANCE)
}

/// Convert an averaged linear color to the stored 8-bit pixel.
pub fn color_to_rgb(color: Color, config: &RenderConfig) -> Rgb {
    let encode = |c: f32| quantize(linear_to_gamma(c, config.gamma));

    match config.mode {
        RenderMode::Grayscale => {
            // Reduce before gamma so the weights apply to linear light
            let level = encode(luminance(color));
            Rgb::new(level, level, level)
        }
        _ => Rgb::new(encode(color.x), encode(color.y), encode(color.z)),
    }
}
