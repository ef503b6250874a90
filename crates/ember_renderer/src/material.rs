//! Materials and how rays scatter off them.
//!
//! The set of materials is closed: [`Material`] is an enum over the three
//! surface models and dispatches to each variant's [`Scatter`] impl.
//! Materials are immutable and shared between primitives through `Arc`.

use crate::{hittable::HitRecord, Random, Ray};
use ember_math::{Color, Vec3};

/// Result of a scatter that was not absorbed.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    /// Per-channel multiplier for the light carried back along `scattered`
    pub attenuation: Color,
    /// The continuation ray
    pub scattered: Ray,
}

/// Surface response to an incoming ray.
pub trait Scatter {
    /// Scatter an incoming ray.
    ///
    /// Returns `None` if the ray is absorbed.
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, random: &mut Random) -> Option<ScatterResult>;
}

/// Any material a primitive can carry.
#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    Lambertian(Lambertian),
    Metal(Metal),
    Dielectric(Dielectric),
}

impl Scatter for Material {
    #[inline]
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, random: &mut Random) -> Option<ScatterResult> {
        match self {
            Material::Lambertian(m) => m.scatter(ray_in, rec, random),
            Material::Metal(m) => m.scatter(ray_in, rec, random),
            Material::Dielectric(m) => m.scatter(ray_in, rec, random),
        }
    }
}

impl From<Lambertian> for Material {
    fn from(m: Lambertian) -> Self {
        Material::Lambertian(m)
    }
}

impl From<Metal> for Material {
    fn from(m: Metal) -> Self {
        Material::Metal(m)
    }
}

impl From<Dielectric> for Material {
    fn from(m: Dielectric) -> Self {
        Material::Dielectric(m)
    }
}

/// Lambertian (diffuse) material.
#[derive(Debug, Clone, PartialEq)]
pub struct Lambertian {
    albedo: Color,
}

impl Lambertian {
    /// Create a new Lambertian material with the given albedo color.
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }
}

impl Scatter for Lambertian {
    fn scatter(&self, _ray_in: &Ray, rec: &HitRecord, random: &mut Random) -> Option<ScatterResult> {
        Some(ScatterResult {
            attenuation: self.albedo,
            scattered: Ray::new(rec.p, diffuse_direction(rec.normal, random)),
        })
    }
}

/// Metal (specular) material.
#[derive(Debug, Clone, PartialEq)]
pub struct Metal {
    albedo: Color,
    fuzz: f32,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough. Clamped to [0, 1].
    pub fn new(albedo: Color, fuzz: f32) -> Self {
        Self {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    pub fn fuzz(&self) -> f32 {
        self.fuzz
    }
}

impl Scatter for Metal {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, random: &mut Random) -> Option<ScatterResult> {
        let reflected = reflect(ray_in.direction().normalize(), rec.normal);
        let direction = reflected + self.fuzz * random.in_unit_sphere();

        // Fuzz or a grazing angle can push the ray below the surface
        if direction.dot(rec.normal) > 0.0 {
            Some(ScatterResult {
                attenuation: self.albedo,
                scattered: Ray::new(rec.p, direction),
            })
        } else {
            None
        }
    }
}

/// Dielectric (glass) material.
#[derive(Debug, Clone, PartialEq)]
pub struct Dielectric {
    albedo: Color,
    /// Index of refraction
    ior: f32,
}

impl Dielectric {
    /// Create a clear dielectric.
    ///
    /// - `ior`: Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub fn new(ior: f32) -> Self {
        Self::with_albedo(Color::ONE, ior)
    }

    /// Create a tinted dielectric.
    pub fn with_albedo(albedo: Color, ior: f32) -> Self {
        Self { albedo, ior }
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }

    /// Choose between reflection and refraction for a unit direction.
    ///
    /// `normal` is the stored (outward) normal. Returns the probability of
    /// reflecting and the refracted direction, if refraction is possible.
    /// Total internal reflection yields probability 1 and no refraction.
    pub fn reflect_probability(&self, unit_direction: Vec3, normal: Vec3) -> (f32, Option<Vec3>) {
        let dt = unit_direction.dot(normal);
        let exiting = dt > 0.0;
        let (facing_normal, ratio) = if exiting {
            (-normal, self.ior)
        } else {
            (normal, 1.0 / self.ior)
        };

        match refract(unit_direction, facing_normal, ratio) {
            Some(refraction) => {
                // Schlick needs the angle on the air side, the larger one
                let cosine = if exiting {
                    refraction.cos_transmitted
                } else {
                    -dt
                };
                (schlick(cosine, self.ior), Some(refraction.direction))
            }
            None => (1.0, None),
        }
    }
}

impl Scatter for Dielectric {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, random: &mut Random) -> Option<ScatterResult> {
        let unit_direction = ray_in.direction().normalize();
        let (reflect_prob, refracted) = self.reflect_probability(unit_direction, rec.normal);

        let direction = match refracted {
            Some(refracted) if random.get() >= reflect_prob => refracted,
            _ => reflect(unit_direction, rec.normal),
        };

        Some(ScatterResult {
            attenuation: self.albedo,
            scattered: Ray::new(rec.p, direction),
        })
    }
}

// =============================================================================
// Helper functions
// =============================================================================

/// Diffuse bounce direction: normal tip plus a point in the unit sphere.
pub(crate) fn diffuse_direction(normal: Vec3, random: &mut Random) -> Vec3 {
    let direction = normal + random.in_unit_sphere();

    // Catch degenerate scatter direction
    if direction.length_squared() < 1e-8 {
        normal
    } else {
        direction
    }
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// A successful refraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Refraction {
    pub direction: Vec3,
    /// Cosine of the angle between the transmitted ray and the normal
    pub cos_transmitted: f32,
}

/// Refract unit vector `v` through a surface with normal `n` facing it.
///
/// `ratio` is n_incident / n_transmitted. Returns `None` on total internal
/// reflection (discriminant <= 0).
#[inline]
pub fn refract(v: Vec3, n: Vec3, ratio: f32) -> Option<Refraction> {
    let dt = v.dot(n);
    let discriminant = 1.0 - ratio * ratio * (1.0 - dt * dt);
    if discriminant <= 0.0 {
        return None;
    }

    let cos_transmitted = discriminant.sqrt();
    Some(Refraction {
        direction: ratio * (v - n * dt) - n * cos_transmitted,
        cos_transmitted,
    })
}

/// Schlick's approximation for reflectance
#[inline]
pub fn schlick(cosine: f32, ior: f32) -> f32 {
    let r0 = ((1.0 - ior) / (1.0 + ior)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(material: &Material, p: Vec3, normal: Vec3) -> HitRecord<'_> {
        HitRecord {
            t: 1.0,
            p,
            normal,
            material,
        }
    }

    #[test]
    fn test_reflect_twice_is_identity() {
        let n = Vec3::new(0.0, 1.0, 0.0);
        let v = Vec3::new(0.3, -0.8, 0.5);
        let back = reflect(reflect(v, n), n);
        assert!((back - v).length() < 1e-6);

        let tilted = Vec3::new(1.0, 1.0, 0.0).normalize();
        let back = reflect(reflect(v, tilted), tilted);
        assert!((back - v).length() < 1e-6);
    }

    #[test]
    fn test_perfect_mirror_reflection() {
        let mirror = Material::from(Metal::new(Color::ONE, 0.0));
        let rec = record(&mirror, Vec3::ZERO, Vec3::Y);
        let ray_in = Ray::new(Vec3::new(-1.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        let mut random = Random::seeded(0);

        let result = mirror.scatter(&ray_in, &rec, &mut random).expect("mirror reflects");
        let expected = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert!((result.scattered.direction() - expected).length() < 1e-6);
        assert_eq!(result.attenuation, Color::ONE);
    }

    #[test]
    fn test_metal_fuzz_is_clamped() {
        assert_eq!(Metal::new(Color::ONE, 3.0).fuzz(), 1.0);
        assert_eq!(Metal::new(Color::ONE, -1.0).fuzz(), 0.0);
    }

    #[test]
    fn test_metal_absorbs_below_surface() {
        // Approaching from below the stored normal: the reflection points
        // into the surface and the ray is absorbed.
        let mirror = Material::from(Metal::new(Color::ONE, 0.0));
        let rec = record(&mirror, Vec3::ZERO, Vec3::Y);
        let ray_in = Ray::new(Vec3::new(-1.0, -1.0, 0.0), Vec3::new(1.0, 1.0, 0.0));
        let mut random = Random::seeded(0);

        assert!(mirror.scatter(&ray_in, &rec, &mut random).is_none());
    }

    #[test]
    fn test_lambertian_never_absorbs() {
        let albedo = Color::new(0.2, 0.4, 0.6);
        let diffuse = Material::from(Lambertian::new(albedo));
        let rec = record(&diffuse, Vec3::new(0.0, 1.0, 0.0), Vec3::Y);
        let ray_in = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        let mut random = Random::seeded(11);

        for _ in 0..1_000 {
            let result = diffuse.scatter(&ray_in, &rec, &mut random).expect("diffuse scatters");
            assert_eq!(result.attenuation, albedo);
            assert_eq!(result.scattered.origin(), rec.p);
            // normal + point inside the unit sphere stays in the upper hemisphere
            assert!(result.scattered.direction().dot(rec.normal) > 0.0);
        }
    }

    #[test]
    fn test_total_internal_reflection_forces_reflection() {
        let glass = Dielectric::new(1.5);
        // Inside the glass, grazing the boundary: dot(v, n) = 0.2
        let normal = Vec3::Y;
        let v = Vec3::new((1.0f32 - 0.04).sqrt(), 0.2, 0.0);

        let (prob, refracted) = glass.reflect_probability(v, normal);
        assert_eq!(prob, 1.0);
        assert!(refracted.is_none());

        let material = Material::from(glass);
        let rec = record(&material, Vec3::ZERO, normal);
        let ray_in = Ray::new(Vec3::ZERO - v, v);
        let mut random = Random::seeded(5);
        for _ in 0..100 {
            let result = material.scatter(&ray_in, &rec, &mut random).expect("glass never absorbs");
            assert!((result.scattered.direction() - reflect(v, normal)).length() < 1e-6);
        }
    }

    #[test]
    fn test_head_on_entry_mostly_refracts() {
        let glass = Dielectric::new(1.5);
        let (prob, refracted) = glass.reflect_probability(Vec3::new(0.0, -1.0, 0.0), Vec3::Y);

        // R0 for 1.5 is 0.04 at normal incidence
        assert!((prob - 0.04).abs() < 1e-6);
        let refracted = refracted.expect("head-on ray refracts");
        assert!((refracted - Vec3::new(0.0, -1.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_exit_uses_transmitted_angle() {
        let glass = Dielectric::new(1.5);
        // Leaving the glass at 30 degrees: the air-side angle is larger
        let sin_i: f32 = 0.5;
        let v = Vec3::new(sin_i, (1.0 - sin_i * sin_i).sqrt(), 0.0);
        let (prob, refracted) = glass.reflect_probability(v, Vec3::Y);

        let cos_t = (1.0 - 1.5f32 * 1.5 * sin_i * sin_i).sqrt();
        assert!((prob - schlick(cos_t, 1.5)).abs() < 1e-6);
        assert!(prob > schlick(v.y, 1.5));
        let refracted = refracted.expect("below the critical angle");
        assert!((refracted.length() - 1.0).abs() < 1e-5);
        assert!((refracted.x - 0.75).abs() < 1e-5);
    }

    #[test]
    fn test_refract_snell() {
        // Entering glass at 45 degrees
        let v = Vec3::new(1.0, -1.0, 0.0).normalize();
        let r = refract(v, Vec3::Y, 1.0 / 1.5).expect("refracts");
        let sin_t = r.direction.x / r.direction.length();
        assert!((sin_t - (45f32.to_radians().sin() / 1.5)).abs() < 1e-5);
        assert!(r.direction.y < 0.0);
    }

    #[test]
    fn test_schlick_bounds() {
        assert!((schlick(1.0, 1.5) - 0.04).abs() < 1e-6);
        assert!((schlick(0.0, 1.5) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_dielectric_tint() {
        let tinted = Material::from(Dielectric::with_albedo(Color::new(0.9, 1.0, 0.9), 1.5));
        let rec = record(&tinted, Vec3::ZERO, Vec3::Y);
        let ray_in = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        let mut random = Random::seeded(2);

        let result = tinted.scatter(&ray_in, &rec, &mut random).expect("glass never absorbs");
        assert_eq!(result.attenuation, Color::new(0.9, 1.0, 0.9));
        assert_eq!(Dielectric::new(1.5).albedo(), Color::ONE);
    }
}
