//! Render-ready scene: intersectable surfaces, lights and settings.

use phos_core::{Light, Scene, SceneError, SceneSettings};

use crate::Surface;

/// Everything the integrator reads while tracing. Never mutated once built.
#[derive(Debug, Clone)]
pub struct World {
    pub surfaces: Vec<Surface>,
    pub lights: Vec<Light>,
    pub settings: SceneSettings,
}

impl World {
    /// Create a world from already-built surfaces.
    pub fn new(surfaces: Vec<Surface>, lights: Vec<Light>, settings: SceneSettings) -> Self {
        Self {
            surfaces,
            lights,
            settings,
        }
    }

    /// Validate `scene` and build a surface for each of its primitives.
    pub fn from_scene(scene: &Scene) -> Result<Self, SceneError> {
        scene.validate()?;

        let surfaces = scene
            .primitives
            .iter()
            .enumerate()
            .map(|(i, primitive)| Surface::from_primitive(i, primitive, &scene.materials))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(surfaces, scene.lights.clone(), scene.settings.clone()))
    }

    /// Get the number of surfaces.
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    /// Check if the world has no surfaces.
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phos_core::{Camera, Material, Primitive};
    use phos_math::{Color, DVec3};

    fn camera() -> Camera {
        Camera {
            position: DVec3::new(0.0, 0.0, -5.0),
            look_at: DVec3::ZERO,
            up_vector: DVec3::Y,
            screen_distance: 1.0,
            screen_width: 1.0,
        }
    }

    #[test]
    fn test_from_scene() {
        let mut scene = Scene::new(camera(), SceneSettings::default());
        let red = scene.add_material(Material::matte(Color::new(1.0, 0.0, 0.0)));
        scene.add_primitive(Primitive::Sphere {
            center: DVec3::ZERO,
            radius: 1.0,
            material: red,
        });
        scene.add_primitive(Primitive::Plane {
            normal: DVec3::Y,
            offset: -1.0,
            material: red,
        });
        scene.add_light(Light::new(DVec3::new(0.0, 5.0, 0.0)));

        let world = World::from_scene(&scene).expect("valid scene");
        assert_eq!(world.len(), 2);
        assert_eq!(world.lights.len(), 1);
        assert_eq!(world.surfaces[0].material().diffuse_color, Color::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_from_invalid_scene() {
        let mut settings = SceneSettings::default();
        settings.root_number_shadow_rays = 0;
        let scene = Scene::new(camera(), settings);

        assert!(World::from_scene(&scene).is_err());
    }
}
