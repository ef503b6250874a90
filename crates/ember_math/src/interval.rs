/// Bounds on a ray parameter or a color channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// The unit interval, used to clamp color channels before quantization.
    pub const UNIT: Interval = Interval::new(0.0, 1.0);

    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Open-interval test: both endpoints are rejected.
    ///
    /// Hit distances must pass this, so a bounced ray starting exactly at
    /// `min` never re-hits its own surface.
    pub fn surrounds(&self, t: f32) -> bool {
        self.min < t && t < self.max
    }

    /// Pin `value` into `[min, max]`.
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    /// Same lower bound with the upper bound lowered to `max`.
    ///
    /// Used by aggregates to reject hits behind the closest one found so far.
    pub fn with_max(&self, max: f32) -> Interval {
        Interval::new(self.min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surrounds_excludes_endpoints() {
        let hits = Interval::new(0.001, 100.0);

        assert!(hits.surrounds(0.5));
        assert!(hits.surrounds(99.0));

        assert!(!hits.surrounds(0.001));
        assert!(!hits.surrounds(100.0));
        assert!(!hits.surrounds(0.0));
        assert!(!hits.surrounds(-1.0));
    }

    #[test]
    fn test_unit_clamp() {
        assert_eq!(Interval::UNIT.clamp(-0.25), 0.0);
        assert_eq!(Interval::UNIT.clamp(0.75), 0.75);
        assert_eq!(Interval::UNIT.clamp(3.0), 1.0);
    }

    #[test]
    fn test_with_max_shrinks_window() {
        let window = Interval::new(0.001, f32::MAX).with_max(3.0);
        assert_eq!(window, Interval::new(0.001, 3.0));
        assert!(window.surrounds(2.5));
        assert!(!window.surrounds(3.0));
    }
}
