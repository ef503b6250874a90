//! Sphere primitive for ray tracing.

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray,
};
use ember_math::{Interval, Vec3};
use std::sync::Arc;

/// A sphere primitive.
///
/// A negative radius flips the stored normal so it points inward; placed
/// inside a glass sphere of the same center this makes a hollow shell.
/// A zero radius never reports a hit.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Arc<Material>,
}

impl Sphere {
    /// Create a new sphere sharing `material` with any other primitive.
    pub fn new(center: Vec3, radius: f32, material: Arc<Material>) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn material(&self) -> &Arc<Material> {
        &self.material
    }
}

impl Hittable for Sphere {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        if self.radius == 0.0 {
            return None;
        }

        // Half-coefficient form of |O + tD - C|^2 = R^2
        let oc = ray.origin() - self.center;
        let a = ray.direction().length_squared();
        let b = oc.dot(ray.direction());
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = b * b - a * c;
        if discriminant <= 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (-b - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (-b + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let p = ray.at(root);
        Some(HitRecord {
            t: root,
            p,
            normal: (p - self.center) / self.radius,
            material: self.material.as_ref(),
        })
    }
}
