//! Camera for ray generation.

use crate::{CameraError, Random, Ray};
use ember_math::Vec3;

/// Camera placement and lens settings.
///
/// Build with the `with_*` methods, then call [`CameraSettings::build`]
/// to validate and derive the view basis.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraSettings {
    // Camera positioning
    look_from: Vec3,
    look_at: Vec3,
    vup: Vec3,

    // Lens settings
    vfov: f32,         // Vertical field of view in degrees
    aspect_ratio: f32, // Width over height
    aperture: f32,     // Lens diameter, 0 = pinhole
    focus_dist: f32,   // Distance from camera to plane of perfect focus
}

impl CameraSettings {
    /// Create camera settings with default values.
    pub fn new() -> Self {
        Self {
            look_from: Vec3::new(0.0, 0.0, 0.0),
            look_at: Vec3::new(0.0, 0.0, -1.0),
            vup: Vec3::new(0.0, 1.0, 0.0),
            vfov: 90.0,
            aspect_ratio: 2.0,
            aperture: 0.0,
            focus_dist: 1.0,
        }
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f32, aperture: f32, focus_dist: f32) -> Self {
        self.vfov = vfov;
        self.aperture = aperture;
        self.focus_dist = focus_dist;
        self
    }

    /// Set the aspect ratio (width / height).
    pub fn with_aspect_ratio(mut self, aspect_ratio: f32) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Set the aspect ratio from image dimensions.
    pub fn with_resolution(self, width: u32, height: u32) -> Self {
        self.with_aspect_ratio(width as f32 / height as f32)
    }

    /// Focus exactly on the look-at point.
    pub fn focus_on_target(mut self) -> Self {
        self.focus_dist = (self.look_from - self.look_at).length();
        self
    }

    /// Validate the settings and derive the view basis.
    pub fn build(&self) -> Result<Camera, CameraError> {
        if !(self.vfov > 0.0 && self.vfov < 180.0) {
            return Err(CameraError::InvalidFov(self.vfov));
        }
        if !(self.aspect_ratio > 0.0 && self.aspect_ratio.is_finite()) {
            return Err(CameraError::InvalidAspectRatio(self.aspect_ratio));
        }
        if !(self.aperture >= 0.0 && self.aperture.is_finite()) {
            return Err(CameraError::InvalidAperture(self.aperture));
        }
        if !(self.focus_dist > 0.0 && self.focus_dist.is_finite()) {
            return Err(CameraError::InvalidFocusDistance(self.focus_dist));
        }

        // Calculate camera basis vectors
        let view = self.look_from - self.look_at;
        if view.length_squared() <= f32::EPSILON {
            return Err(CameraError::ZeroViewDirection);
        }
        let w = view.normalize();
        let side = self.vup.cross(w);
        if side.length_squared() <= f32::EPSILON {
            return Err(CameraError::DegenerateUp);
        }
        let u = side.normalize();
        let v = w.cross(u);

        // Calculate viewport dimensions on the focus plane
        let half_height = (self.vfov.to_radians() / 2.0).tan();
        let half_width = self.aspect_ratio * half_height;

        let origin = self.look_from;
        let lower_left_corner = origin
            - half_width * self.focus_dist * u
            - half_height * self.focus_dist * v
            - self.focus_dist * w;

        Ok(Camera {
            origin,
            lower_left_corner,
            horizontal: 2.0 * half_width * self.focus_dist * u,
            vertical: 2.0 * half_height * self.focus_dist * v,
            u,
            v,
            w,
            lens_radius: self.aperture / 2.0,
        })
    }
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self::new()
    }
}

/// An immutable, validated camera.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    lens_radius: f32,
}

impl Camera {
    /// Generate the ray through normalized focus-plane coordinates.
    ///
    /// `(0, 0)` is the lower-left corner of the view and `(1, 1)` the
    /// upper-right. With a non-zero aperture the origin is jittered across
    /// the lens while the ray still passes through the same focus-plane point.
    pub fn get_ray(&self, s: f32, t: f32, random: &mut Random) -> Ray {
        let offset = if self.lens_radius > 0.0 {
            let rd = self.lens_radius * random.in_unit_disk();
            self.u * rd.x + self.v * rd.y
        } else {
            Vec3::ZERO
        };

        let target = self.lower_left_corner + s * self.horizontal + t * self.vertical;
        Ray::new(self.origin + offset, target - self.origin - offset)
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// The orthonormal basis `(u, v, w)`; `w` points away from the scene.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.w)
    }

    pub fn lens_radius(&self) -> f32 {
        self.lens_radius
    }
}
