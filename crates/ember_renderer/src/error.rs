//! Error types for the renderer.
//!
//! Everything here is a precondition failure caught before rendering
//! starts. Once workers are running the only way out is cancellation.

use thiserror::Error;

/// Invalid render settings.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("image dimensions must be non-zero, got {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    #[error("samples per pixel must be at least 1")]
    NoSamples,

    #[error("max depth must be at least 1")]
    NoDepth,

    #[error("band count must be at least 1")]
    NoBands,

    #[error("gamma must be positive and finite, got {0}")]
    InvalidGamma(f32),

    #[error("invalid ray range ({t_min}, {t_max}): need 0 <= t_min < t_max")]
    InvalidRayRange { t_min: f32, t_max: f32 },
}

/// Camera parameters that cannot produce a valid view basis.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CameraError {
    #[error("look-from and look-at are the same point")]
    ZeroViewDirection,

    #[error("up vector is parallel to the view direction")]
    DegenerateUp,

    #[error("vertical field of view must be in (0, 180) degrees, got {0}")]
    InvalidFov(f32),

    #[error("aspect ratio must be positive and finite, got {0}")]
    InvalidAspectRatio(f32),

    #[error("aperture must be non-negative, got {0}")]
    InvalidAperture(f32),

    #[error("focus distance must be positive, got {0}")]
    InvalidFocusDistance(f32),
}

/// Errors returned by [`crate::render`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid camera: {0}")]
    Camera(#[from] CameraError),

    #[error("image buffer holds {actual} pixels, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    #[error("render cancelled")]
    Cancelled,
}

/// Result type for rendering operations.
pub type Result<T> = std::result::Result<T, RenderError>;
