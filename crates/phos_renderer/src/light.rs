//! Shadow sampling and Phong shading for scene lights.
//!
//! Lights are sampled over a square of side `radius` centered on the light
//! position and facing the shaded point. A `root × root` grid is laid over
//! the square and one jittered shadow ray is cast per cell.

use phos_core::Light;
use phos_math::{approx_eq, orthonormal_pair, Color, DVec3, Ray};
use rand::{Rng, RngCore};

use crate::surface::{closest_surface, Hittable, Surface};

/// True if nothing blocks the segment from `source` to `dest`.
///
/// `dest` is expected to lie on a surface; that surface itself does not
/// count as an occluder when the first hit along the ray is `dest`.
pub fn is_path_clear(source: DVec3, dest: DVec3, surfaces: &[Surface]) -> bool {
    if approx_eq(source, dest) {
        return true;
    }

    let ray = Ray::between_points(source, dest);
    match closest_surface(&ray, surfaces, None) {
        None => true,
        Some(hit) => approx_eq(dest, hit.point),
    }
}

/// Fraction of `light` reaching `point`, in `[1 - shadow_intensity, 1]`.
///
/// With `root <= 1` this is a single hard-shadow test against the light
/// position. Otherwise `root²` stratified samples are drawn from `rng`.
pub fn calculate_intensity(
    light: &Light,
    surfaces: &[Surface],
    root: u32,
    point: DVec3,
    rng: &mut dyn RngCore,
) -> f64 {
    if root <= 1 {
        return if is_path_clear(light.position, point, surfaces) {
            1.0
        } else {
            1.0 - light.shadow_intensity
        };
    }

    let direction = Ray::between_points(light.position, point).direction;
    let (u, v) = orthonormal_pair(direction);

    let cell = light.radius / root as f64;
    let corner = light.position - 0.5 * light.radius * (u + v);

    let mut clear = 0u32;
    for row in 0..root {
        for col in 0..root {
            let su = (row as f64 + rng.gen::<f64>()) * cell;
            let sv = (col as f64 + rng.gen::<f64>()) * cell;
            let sample = corner + su * u + sv * v;
            if is_path_clear(sample, point, surfaces) {
                clear += 1;
            }
        }
    }

    let lit_fraction = clear as f64 / (root * root) as f64;
    (1.0 - light.shadow_intensity) + light.shadow_intensity * lit_fraction
}

/// Diffuse plus specular light from `light` arriving at `point` on `surface`.
///
/// `viewer` points from `point` back towards whoever is looking. A light
/// behind the surface, or on the other side of it from the viewer,
/// contributes nothing. The specular lobe is zero whenever the reflected
/// light direction faces away from the viewer.
pub fn phong_contribution(
    light: &Light,
    point: DVec3,
    viewer: &Ray,
    surface: &Surface,
    surfaces: &[Surface],
    root: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let to_light = Ray::between_points(point, light.position);
    // Oriented towards the viewer, so a light on the far side of a
    // two-sided surface fails the incidence test below.
    let normal = surface.normal_at_point(point, -viewer.direction);

    let cos_incidence = normal.dot(to_light.direction);
    if cos_incidence <= 0.0 {
        return Color::ZERO;
    }

    let material = surface.material();
    let reflected = surface.reflection_ray(&-to_light, point);
    let cos_view = viewer.direction.dot(reflected.direction);

    let diffuse = material.diffuse_color * cos_incidence;
    let specular = if cos_view > 0.0 {
        material.specular_color * light.specular_intensity * cos_view.powf(material.shininess)
    } else {
        Color::ZERO
    };

    let intensity = calculate_intensity(light, surfaces, root, point, rng);
    (diffuse + specular) * light.color * intensity
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cube, InfinitePlane, Sphere};
    use phos_core::Material;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn grey() -> Arc<Material> {
        Arc::new(Material::matte(Color::splat(0.5)))
    }

    fn floor() -> Surface {
        Surface::new(InfinitePlane::new(DVec3::Y, 0.0), grey())
    }

    fn ceiling() -> Surface {
        Surface::new(InfinitePlane::new(DVec3::Y, 5.0), grey())
    }

    fn area_light(shadow_intensity: f64) -> Light {
        Light {
            position: DVec3::new(0.0, 10.0, 0.0),
            color: Color::ONE,
            specular_intensity: 1.0,
            shadow_intensity,
            radius: 2.0,
        }
    }

    #[test]
    fn test_path_clear_to_own_surface() {
        let surfaces = vec![floor()];
        assert!(is_path_clear(DVec3::new(0.0, 10.0, 0.0), DVec3::new(3.0, 0.0, -2.0), &surfaces));
    }

    #[test]
    fn test_path_blocked_by_occluder() {
        let surfaces = vec![
            floor(),
            Surface::new(Sphere::new(DVec3::new(0.0, 5.0, 0.0), 1.0), grey()),
        ];
        assert!(!is_path_clear(DVec3::new(0.0, 10.0, 0.0), DVec3::ZERO, &surfaces));
    }

    #[test]
    fn test_hard_shadow() {
        let light = area_light(0.7);
        let mut rng = StdRng::seed_from_u64(1);

        let open = vec![floor()];
        assert_eq!(calculate_intensity(&light, &open, 1, DVec3::ZERO, &mut rng), 1.0);

        let blocked = vec![floor(), Surface::new(Cube::new(DVec3::new(0.0, 5.0, 0.0), 1.0), grey())];
        let intensity = calculate_intensity(&light, &blocked, 1, DVec3::ZERO, &mut rng);
        assert!((intensity - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_no_shadow_intensity_is_always_fully_lit() {
        let light = area_light(0.0);
        let blocked = vec![floor(), ceiling()];
        let mut rng = StdRng::seed_from_u64(7);

        for root in [1, 2, 5] {
            assert_eq!(calculate_intensity(&light, &blocked, root, DVec3::ZERO, &mut rng), 1.0);
        }
    }

    #[test]
    fn test_fully_occluded_soft_shadow() {
        // The ceiling sits between every light sample and the floor
        let light = area_light(0.6);
        let blocked = vec![floor(), ceiling()];
        let mut rng = StdRng::seed_from_u64(7);

        let intensity = calculate_intensity(&light, &blocked, 4, DVec3::ZERO, &mut rng);
        assert!((intensity - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_partial_occlusion_is_between_bounds() {
        // A small sphere hides part of the light square from the origin
        let light = area_light(1.0);
        let surfaces = vec![
            floor(),
            Surface::new(Sphere::new(DVec3::new(0.5, 5.0, 0.0), 0.4), grey()),
        ];
        let mut rng = StdRng::seed_from_u64(42);

        let intensity = calculate_intensity(&light, &surfaces, 8, DVec3::ZERO, &mut rng);
        assert!(intensity > 0.0 && intensity < 1.0, "intensity = {intensity}");
    }

    #[test]
    fn test_intensity_grows_with_visible_fraction() {
        let light = area_light(1.0);
        let mut rng = StdRng::seed_from_u64(3);

        let large = vec![floor(), Surface::new(Sphere::new(DVec3::new(0.0, 5.0, 0.0), 0.6), grey())];
        let small = vec![floor(), Surface::new(Sphere::new(DVec3::new(0.0, 5.0, 0.0), 0.2), grey())];
        let none = vec![floor()];

        let mut average = |surfaces: &[Surface]| -> f64 {
            (0..20)
                .map(|_| calculate_intensity(&light, surfaces, 6, DVec3::ZERO, &mut rng))
                .sum::<f64>()
                / 20.0
        };

        let dark = average(large.as_slice());
        let dim = average(small.as_slice());
        let lit = average(none.as_slice());
        assert!(dark < dim, "{dark} !< {dim}");
        assert!(dim < lit, "{dim} !< {lit}");
        assert_eq!(lit, 1.0);
    }

    #[test]
    fn test_same_seed_same_samples() {
        let light = area_light(1.0);
        let surfaces = vec![
            floor(),
            Surface::new(Sphere::new(DVec3::new(0.5, 5.0, 0.0), 0.4), grey()),
        ];

        let a = calculate_intensity(&light, &surfaces, 5, DVec3::ZERO, &mut StdRng::seed_from_u64(9));
        let b = calculate_intensity(&light, &surfaces, 5, DVec3::ZERO, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_phong_matches_formula() {
        let material = Arc::new(Material {
            diffuse_color: Color::new(0.8, 0.4, 0.2),
            specular_color: Color::new(1.0, 1.0, 0.5),
            reflection_color: Color::ZERO,
            shininess: 2.0,
            transparency: 0.0,
        });
        let sphere = Surface::new(Sphere::new(DVec3::ZERO, 1.0), material);
        let surfaces = vec![sphere.clone()];
        let light = Light {
            position: DVec3::new(3.0, 4.0, 0.0),
            color: Color::new(1.0, 0.5, 1.0),
            specular_intensity: 0.5,
            shadow_intensity: 0.0,
            radius: 1.0,
        };
        let point = DVec3::Y;
        let viewer = Ray::new(point, DVec3::Y);
        let mut rng = StdRng::seed_from_u64(0);

        let color = phong_contribution(&light, point, &viewer, &sphere, &surfaces, 3, &mut rng);

        // n·l = 1/√2 and v·r = 1/√2, so the specular term uses 0.5
        let cos = std::f64::consts::FRAC_1_SQRT_2;
        let expected = (Color::new(0.8, 0.4, 0.2) * cos + Color::new(1.0, 1.0, 0.5) * 0.5 * 0.5)
            * Color::new(1.0, 0.5, 1.0);
        assert!((color - expected).length() < 1e-9, "{color} != {expected}");
    }

    #[test]
    fn test_light_behind_surface_adds_nothing() {
        let material = Arc::new(Material {
            specular_color: Color::ONE,
            shininess: 0.0,
            ..Material::matte(Color::ONE)
        });
        let sphere = Surface::new(Sphere::new(DVec3::ZERO, 1.0), material);
        let surfaces = vec![sphere.clone()];
        let mut light = Light::new(DVec3::new(0.0, -5.0, 0.0));
        light.shadow_intensity = 0.0;

        let point = DVec3::Y;
        let viewer = Ray::new(point, DVec3::Y);
        let mut rng = StdRng::seed_from_u64(0);

        let color = phong_contribution(&light, point, &viewer, &sphere, &surfaces, 1, &mut rng);
        assert_eq!(color, Color::ZERO);
    }

    #[test]
    fn test_light_under_floor_does_not_reach_viewer_above() {
        let material = Arc::new(Material {
            specular_color: Color::ONE,
            ..Material::matte(Color::ONE)
        });
        let floor = Surface::new(InfinitePlane::new(DVec3::Y, 0.0), material);
        let surfaces = vec![floor.clone()];
        let mut light = Light::new(DVec3::new(0.0, -5.0, 0.0));
        light.shadow_intensity = 1.0;

        let point = DVec3::ZERO;
        let viewer = Ray::new(point, DVec3::Y);
        let mut rng = StdRng::seed_from_u64(0);

        let color = phong_contribution(&light, point, &viewer, &floor, &surfaces, 1, &mut rng);
        assert_eq!(color, Color::ZERO);

        // Seen from below, the same light does reach the floor
        let below = Ray::new(point, DVec3::NEG_Y);
        let color = phong_contribution(&light, point, &below, &floor, &surfaces, 1, &mut rng);
        assert!(color.cmpgt(Color::ZERO).all(), "{color}");
    }
}
