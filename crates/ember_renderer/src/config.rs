//! Render configuration.
//!
//! Everything the core needs besides the scene and camera. All fields have
//! defaults so a partial JSON document deserializes cleanly.

use crate::ConfigError;
use ember_math::{Color, Interval, Vec3};
use serde::{Deserialize, Serialize};

/// How each radiance sample is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenderMode {
    /// Full material scattering.
    #[default]
    Shaded,
    /// Surface normals mapped to RGB, no bouncing.
    NormalMap,
    /// Shaded radiance reduced to luminance before gamma.
    Grayscale,
    /// Materials ignored; every surface is a 50% grey diffuser.
    Diffuse,
}

/// Where per-row seeds come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Seeding {
    /// Use `seed` as is: identical output on every run.
    #[default]
    Deterministic,
    /// Mix `seed` with OS entropy once per render.
    Entropy,
}

/// Vertical background gradient seen by rays that leave the scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sky {
    /// Color looking straight down
    pub horizon: Color,
    /// Color looking straight up
    pub zenith: Color,
}

impl Sky {
    /// Blend between horizon and zenith by the direction's height.
    pub fn color(&self, direction: Vec3) -> Color {
        let unit_direction = direction.normalize();
        let a = 0.5 * (unit_direction.y + 1.0);
        (1.0 - a) * self.horizon + a * self.zenith
    }
}

impl Default for Sky {
    fn default() -> Self {
        Self {
            horizon: Color::new(1.0, 1.0, 1.0),
            zenith: Color::new(0.5, 0.7, 1.0),
        }
    }
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum number of bounces before a path is dropped
    pub max_depth: u32,
    /// Smallest accepted hit distance; keeps bounced rays off their own surface
    pub t_min: f32,
    /// Largest accepted hit distance
    pub t_max: f32,
    /// Display gamma; channels are raised to 1/gamma before quantization
    pub gamma: f32,
    /// Number of row bands rendered in parallel
    pub band_count: u32,
    /// Base seed for the per-row generators
    pub seed: u64,
    pub seeding: Seeding,
    pub mode: RenderMode,
    pub background: Sky,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            samples_per_pixel: 100,
            max_depth: 50,
            t_min: 0.001,
            t_max: f32::MAX,
            gamma: 2.0,
            band_count: 8,
            seed: 0,
            seeding: Seeding::Deterministic,
            mode: RenderMode::Shaded,
            background: Sky::default(),
        }
    }
}

impl RenderConfig {
    /// Check the settings before any work is scheduled.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyImage {
                width: self.width,
                height: self.height,
            });
        }
        if self.samples_per_pixel == 0 {
            return Err(ConfigError::NoSamples);
        }
        if self.max_depth == 0 {
            return Err(ConfigError::NoDepth);
        }
        if self.band_count == 0 {
            return Err(ConfigError::NoBands);
        }
        if !(self.gamma > 0.0 && self.gamma.is_finite()) {
            return Err(ConfigError::InvalidGamma(self.gamma));
        }
        if !(self.t_min >= 0.0 && self.t_min < self.t_max) {
            return Err(ConfigError::InvalidRayRange {
                t_min: self.t_min,
                t_max: self.t_max,
            });
        }
        Ok(())
    }

    /// Accepted hit distances, exclusive on both ends.
    pub fn hit_interval(&self) -> Interval {
        Interval::new(self.t_min, self.t_max)
    }

    /// Total number of pixels in the image.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Resolve the base seed for one render.
    pub fn base_seed(&self) -> u64 {
        match self.seeding {
            Seeding::Deterministic => self.seed,
            Seeding::Entropy => self.seed ^ rand::random::<u64>(),
        }
    }
}
