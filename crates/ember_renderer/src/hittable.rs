//! Hittable trait, HitRecord and the scene aggregate.

use crate::{Material, Ray, Sphere};
use ember_math::{Interval, Vec3};

/// Record of a ray-object intersection.
///
/// Lives only as long as the radiance step that asked for it.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Point of intersection
    pub p: Vec3,
    /// Geometric normal, unit length, facing out of the primitive
    /// (into it for negative-radius spheres)
    pub normal: Vec3,
    /// Material of the object that was hit
    pub material: &'a Material,
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Closest intersection with parameter strictly inside `ray_t`.
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>>;
}

/// The closed set of primitives a scene can hold.
#[derive(Debug, Clone)]
pub enum Geometry {
    Sphere(Sphere),
}

impl From<Sphere> for Geometry {
    fn from(sphere: Sphere) -> Self {
        Geometry::Sphere(sphere)
    }
}

impl Hittable for Geometry {
    #[inline]
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        match self {
            Geometry::Sphere(sphere) => sphere.hit(ray, ray_t),
        }
    }
}

/// An ordered list of primitives, hit-tested as one object.
#[derive(Debug, Clone, Default)]
pub struct HittableList {
    objects: Vec<Geometry>,
}

impl HittableList {
    /// Create a new empty hittable list.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: impl Into<Geometry>) {
        self.objects.push(object.into());
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Iterate over the objects in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Geometry> {
        self.objects.iter()
    }
}

impl FromIterator<Geometry> for HittableList {
    fn from_iter<I: IntoIterator<Item = Geometry>>(iter: I) -> Self {
        Self {
            objects: iter.into_iter().collect(),
        }
    }
}

impl Hittable for HittableList {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        let mut closest: Option<HitRecord<'a>> = None;

        for object in &self.objects {
            let window = match &closest {
                Some(rec) => ray_t.with_max(rec.t),
                None => ray_t,
            };
            if let Some(rec) = object.hit(ray, window) {
                closest = Some(rec);
            }
        }

        closest
    }
}
