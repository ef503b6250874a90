//! Math primitives for the ember path tracer.
//!
//! `Vec3` comes straight from glam and doubles as an RGB triple; `Ray` and
//! `Interval` are the small value types the intersection code is built on.

// Re-export glam for convenience
pub use glam::*;

mod interval;
mod ray;

pub use interval::Interval;
pub use ray::Ray;

/// RGB color with linear channels, nominally in [0, 1].
///
/// Channels are not clamped here; quantization clamps them.
pub type Color = Vec3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(3.0, 0.0, 2.0);
        let b = Vec3::new(-1.0, 4.0, 2.0);

        assert_eq!(a.cross(b), Vec3::new(-8.0, -8.0, 12.0));
        assert_eq!(a.dot(b), 1.0);
        assert_eq!(a + b, Vec3::new(2.0, 4.0, 4.0));
        assert_eq!(a - b, Vec3::new(4.0, -4.0, 0.0));
        assert_eq!(a / 2.0, Vec3::new(1.5, 0.0, 1.0));
        assert_eq!(a.length_squared(), 13.0);
    }

    #[test]
    fn test_color_is_componentwise() {
        let attenuation = Color::new(0.5, 0.25, 1.0);
        let incoming = Color::new(0.8, 0.8, 0.2);
        assert_eq!(attenuation * incoming, Color::new(0.4, 0.2, 0.2));
    }
}
