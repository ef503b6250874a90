//! Built-in scenes.
//!
//! Each scene pairs a finished, immutable world with the camera placement
//! that frames it. The aspect ratio is filled in from the render config.

use crate::cli::SceneChoice;
use ember_renderer::{
    CameraSettings, Color, Dielectric, HittableList, Lambertian, Material, Metal, Sphere, Vec3,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

/// Build the world and camera placement for `choice`.
pub fn build(choice: SceneChoice, seed: u64) -> (HittableList, CameraSettings) {
    match choice {
        SceneChoice::TwoSpheres => two_spheres(),
        SceneChoice::Materials => materials(),
        SceneChoice::Random => random_spheres(seed),
    }
}

fn shared(material: impl Into<Material>) -> Arc<Material> {
    Arc::new(material.into())
}

fn default_view() -> CameraSettings {
    CameraSettings::new()
        .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
        .with_lens(90.0, 0.0, 1.0)
}

pub fn two_spheres() -> (HittableList, CameraSettings) {
    let mut world = HittableList::new();
    world.add(Sphere::new(
        Vec3::new(0.0, 0.0, -1.0),
        0.5,
        shared(Lambertian::new(Color::new(0.8, 0.3, 0.3))),
    ));
    world.add(Sphere::new(
        Vec3::new(0.0, -100.5, -1.0),
        100.0,
        shared(Lambertian::new(Color::new(0.8, 0.8, 0.0))),
    ));
    (world, default_view())
}

pub fn materials() -> (HittableList, CameraSettings) {
    let glass = shared(Dielectric::new(1.5));

    let mut world = HittableList::new();
    world.add(Sphere::new(
        Vec3::new(0.0, 0.0, -1.0),
        0.5,
        shared(Lambertian::new(Color::new(0.1, 0.2, 0.5))),
    ));
    world.add(Sphere::new(
        Vec3::new(0.0, -100.5, -1.0),
        100.0,
        shared(Lambertian::new(Color::new(0.8, 0.8, 0.0))),
    ));
    world.add(Sphere::new(
        Vec3::new(1.0, 0.0, -1.0),
        0.5,
        shared(Metal::new(Color::new(0.8, 0.6, 0.2), 0.3)),
    ));
    // Hollow glass: the inner negative-radius sphere flips the normals
    world.add(Sphere::new(Vec3::new(-1.0, 0.0, -1.0), 0.5, glass.clone()));
    world.add(Sphere::new(Vec3::new(-1.0, 0.0, -1.0), -0.45, glass));

    let camera = CameraSettings::new()
        .with_position(Vec3::new(3.0, 3.0, 2.0), Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
        .with_lens(20.0, 2.0, 1.0)
        .focus_on_target();
    (world, camera)
}

pub fn random_spheres(seed: u64) -> (HittableList, CameraSettings) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut world = HittableList::new();

    // Ground
    world.add(Sphere::new(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        shared(Lambertian::new(Color::new(0.5, 0.5, 0.5))),
    ));

    // Small random spheres
    for a in -11..11 {
        for b in -11..11 {
            let center = Vec3::new(
                a as f32 + 0.9 * rng.gen::<f32>(),
                0.2,
                b as f32 + 0.9 * rng.gen::<f32>(),
            );
            if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let choose_mat: f32 = rng.gen();
            let material = if choose_mat < 0.8 {
                // Diffuse
                let albedo = Color::new(
                    rng.gen::<f32>() * rng.gen::<f32>(),
                    rng.gen::<f32>() * rng.gen::<f32>(),
                    rng.gen::<f32>() * rng.gen::<f32>(),
                );
                shared(Lambertian::new(albedo))
            } else if choose_mat < 0.95 {
                // Metal
                let albedo = Color::new(
                    0.5 * (1.0 + rng.gen::<f32>()),
                    0.5 * (1.0 + rng.gen::<f32>()),
                    0.5 * (1.0 + rng.gen::<f32>()),
                );
                shared(Metal::new(albedo, 0.5 * rng.gen::<f32>()))
            } else {
                // Glass
                shared(Dielectric::new(1.5))
            };
            world.add(Sphere::new(center, 0.2, material));
        }
    }

    // Three main spheres
    world.add(Sphere::new(
        Vec3::new(0.0, 1.0, 0.0),
        1.0,
        shared(Dielectric::new(1.5)),
    ));
    world.add(Sphere::new(
        Vec3::new(-4.0, 1.0, 0.0),
        1.0,
        shared(Lambertian::new(Color::new(0.4, 0.2, 0.1))),
    ));
    world.add(Sphere::new(
        Vec3::new(4.0, 1.0, 0.0),
        1.0,
        shared(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0)),
    ));

    log::info!("Created {} objects", world.len());

    let camera = CameraSettings::new()
        .with_position(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.1, 10.0);
    (world, camera)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenes_build_valid_cameras() {
        for choice in [SceneChoice::TwoSpheres, SceneChoice::Materials, SceneChoice::Random] {
            let (world, camera) = build(choice, 1);
            assert!(!world.is_empty());
            assert!(camera.with_resolution(16, 9).build().is_ok(), "{choice:?}");
        }
    }

    #[test]
    fn test_random_scene_is_seeded() {
        let (a, _) = random_spheres(5);
        let (b, _) = random_spheres(5);
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            let (ember_renderer::Geometry::Sphere(x), ember_renderer::Geometry::Sphere(y)) = (x, y);
            assert_eq!(x.center(), y.center());
            assert_eq!(x.material(), y.material());
        }
    }

    #[test]
    fn test_materials_scene_has_hollow_glass() {
        let (world, _) = materials();
        let radii: Vec<f32> = world
            .iter()
            .map(|g| match g {
                ember_renderer::Geometry::Sphere(s) => s.radius(),
            })
            .collect();
        assert!(radii.contains(&-0.45));
    }
}
