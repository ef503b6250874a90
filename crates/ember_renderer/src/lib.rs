//! ember - CPU path tracing
//!
//! A Monte Carlo path tracer for spheres with diffuse, metal and glass
//! surfaces. Rows of the image are split into bands and rendered in
//! parallel with per-row seeded random sources, so a fixed seed gives the
//! same image for any number of bands.

mod band;
mod camera;
mod config;
mod error;
mod hittable;
mod image;
mod material;
mod random;
mod renderer;
mod sphere;

pub use band::{generate_bands, render, render_band, render_into, Band, ProgressFn, RenderControl};
pub use camera::{Camera, CameraSettings};
pub use config::{RenderConfig, RenderMode, Seeding, Sky};
pub use error::{CameraError, ConfigError, RenderError, Result};
pub use hittable::{Geometry, HitRecord, Hittable, HittableList};
pub use image::{ImageBuffer, Rgb};
pub use material::{
    reflect, refract, schlick, Dielectric, Lambertian, Material, Metal, Refraction, Scatter,
    ScatterResult,
};
pub use random::{mix_seed, Random};
pub use renderer::{
    color_to_rgb, gamma_to_linear, linear_to_gamma, luminance, quantize, ray_color, render_pixel,
};
pub use sphere::Sphere;

/// Re-export Vec3 and common math types from ember_math
pub use ember_math::{Color, Interval, Ray, Vec3};
