//! Scene description types for Phos.
//!
//! Everything here is plain data: the renderer builds its own intersection
//! primitives from a validated [`Scene`] and never mutates it afterwards.

use std::sync::Arc;

use phos_math::{Color, DVec3, EPSILON};
use thiserror::Error;

/// Errors describing a scene that violates its invariants.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("{entity}: {message}")]
    Invalid { entity: String, message: String },

    #[error("Surface {surface} references material {material}, but only {available} are defined")]
    UnknownMaterial {
        surface: usize,
        material: usize,
        available: usize,
    },

    #[error("Camera up vector is parallel to the viewing direction")]
    DegenerateCamera,

    #[error("Scene has no camera")]
    MissingCamera,

    #[error("Scene has no settings")]
    MissingSettings,
}

/// Result type for scene validation.
pub type SceneResult<T> = Result<T, SceneError>;

fn invalid(entity: impl Into<String>, message: impl Into<String>) -> SceneError {
    SceneError::Invalid {
        entity: entity.into(),
        message: message.into(),
    }
}

fn check_unit_color(entity: &str, field: &str, color: Color) -> SceneResult<()> {
    if color.cmpge(DVec3::ZERO).all() && color.cmple(DVec3::ONE).all() {
        Ok(())
    } else {
        Err(invalid(entity, format!("{field} {color} is outside [0, 1]")))
    }
}

/// Optical properties shared by any number of surfaces.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// Diffuse color (RGB, 0-1)
    pub diffuse_color: Color,

    /// Specular highlight color (RGB, 0-1)
    pub specular_color: Color,

    /// Mirror reflection color (RGB, 0-1); black means not reflective
    pub reflection_color: Color,

    /// Phong exponent
    pub shininess: f64,

    /// Fraction of light passing straight through (0=opaque, 1=clear)
    pub transparency: f64,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            diffuse_color: Color::splat(0.5), // Grey default
            specular_color: Color::ZERO,
            reflection_color: Color::ZERO,
            shininess: 1.0,
            transparency: 0.0,
        }
    }
}

impl Material {
    /// Create an opaque, non-reflective matte material.
    pub fn matte(diffuse_color: Color) -> Self {
        Self {
            diffuse_color,
            ..Default::default()
        }
    }

    /// True if the reflection color has any non-zero channel.
    pub fn is_reflective(&self) -> bool {
        self.reflection_color.cmpne(Color::ZERO).any()
    }

    /// Check channel ranges, shininess and transparency.
    pub fn validate(&self, entity: &str) -> SceneResult<()> {
        check_unit_color(entity, "diffuse color", self.diffuse_color)?;
        check_unit_color(entity, "specular color", self.specular_color)?;
        check_unit_color(entity, "reflection color", self.reflection_color)?;
        if !(self.shininess >= 0.0) {
            return Err(invalid(entity, format!("shininess {} is negative", self.shininess)));
        }
        if !(0.0..=1.0).contains(&self.transparency) {
            return Err(invalid(
                entity,
                format!("transparency {} is outside [0, 1]", self.transparency),
            ));
        }
        Ok(())
    }
}

/// A point light with a square area used for soft shadows.
#[derive(Clone, Debug, PartialEq)]
pub struct Light {
    pub position: DVec3,
    pub color: Color,
    /// Multiplier on the Phong specular term
    pub specular_intensity: f64,
    /// How dark fully occluded points get (0=no shadows, 1=black)
    pub shadow_intensity: f64,
    /// Side length of the light's sampling square
    pub radius: f64,
}

impl Light {
    /// Create a white point light that casts hard, full-strength shadows.
    pub fn new(position: DVec3) -> Self {
        Self {
            position,
            color: Color::ONE,
            specular_intensity: 1.0,
            shadow_intensity: 1.0,
            radius: 0.0,
        }
    }

    pub fn validate(&self, entity: &str) -> SceneResult<()> {
        if !self.color.cmpge(Color::ZERO).all() {
            return Err(invalid(entity, format!("color {} is negative", self.color)));
        }
        if !(self.specular_intensity >= 0.0) {
            return Err(invalid(entity, "specular intensity is negative"));
        }
        if !(0.0..=1.0).contains(&self.shadow_intensity) {
            return Err(invalid(
                entity,
                format!("shadow intensity {} is outside [0, 1]", self.shadow_intensity),
            ));
        }
        if !(self.radius >= 0.0) {
            return Err(invalid(entity, format!("radius {} is negative", self.radius)));
        }
        Ok(())
    }
}

/// Pinhole camera looking through a flat screen.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub position: DVec3,
    pub look_at: DVec3,
    pub up_vector: DVec3,
    /// Distance from the camera to the screen center
    pub screen_distance: f64,
    /// Screen width in world units
    pub screen_width: f64,
}

impl Camera {
    pub fn validate(&self) -> SceneResult<()> {
        if !(self.screen_distance > 0.0) {
            return Err(invalid("camera", "screen distance must be positive"));
        }
        if !(self.screen_width > 0.0) {
            return Err(invalid("camera", "screen width must be positive"));
        }
        let forward = self.look_at - self.position;
        if forward.length() < EPSILON {
            return Err(invalid("camera", "look-at point coincides with the position"));
        }
        if forward.normalize().cross(self.up_vector).length() < EPSILON {
            return Err(SceneError::DegenerateCamera);
        }
        Ok(())
    }
}

/// Global render settings stored in the scene file.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneSettings {
    pub background_color: Color,
    /// Shadow rays per light axis; each light is sampled this many squared
    pub root_number_shadow_rays: u32,
    /// Bounce budget for reflection and transparency rays
    pub max_recursions: u32,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            background_color: Color::ZERO,
            root_number_shadow_rays: 1,
            max_recursions: 10,
        }
    }
}

impl SceneSettings {
    pub fn validate(&self) -> SceneResult<()> {
        if self.root_number_shadow_rays < 1 {
            return Err(invalid("settings", "root number of shadow rays must be at least 1"));
        }
        if !self.background_color.cmpge(Color::ZERO).all() {
            return Err(invalid("settings", "background color is negative"));
        }
        Ok(())
    }
}

/// A surface description with a zero-based material index.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Sphere {
        center: DVec3,
        radius: f64,
        material: usize,
    },
    /// Infinite plane of points `x` with `normal · x = offset`
    Plane {
        normal: DVec3,
        offset: f64,
        material: usize,
    },
    /// Axis-aligned cube with edge length `scale`
    Cube {
        center: DVec3,
        scale: f64,
        material: usize,
    },
}

impl Primitive {
    /// Index into [`Scene::materials`].
    pub fn material(&self) -> usize {
        match self {
            Primitive::Sphere { material, .. }
            | Primitive::Plane { material, .. }
            | Primitive::Cube { material, .. } => *material,
        }
    }

    fn validate(&self, entity: &str) -> SceneResult<()> {
        match self {
            Primitive::Sphere { radius, .. } if !(*radius >= 0.0) => {
                Err(invalid(entity, format!("radius {radius} is negative")))
            }
            Primitive::Plane { normal, .. } if normal.length() < EPSILON => {
                Err(invalid(entity, "plane normal has zero length"))
            }
            Primitive::Cube { scale, .. } if !(*scale >= 0.0) => {
                Err(invalid(entity, format!("scale {scale} is negative")))
            }
            _ => Ok(()),
        }
    }
}

/// A complete scene: camera, settings, materials, surfaces and lights.
#[derive(Clone, Debug)]
pub struct Scene {
    pub camera: Camera,

    pub settings: SceneSettings,

    /// Materials shared by the primitives
    pub materials: Vec<Arc<Material>>,

    /// Surfaces in declaration order
    pub primitives: Vec<Primitive>,

    pub lights: Vec<Light>,
}

impl Scene {
    /// Create a scene with no surfaces or lights.
    pub fn new(camera: Camera, settings: SceneSettings) -> Self {
        Self {
            camera,
            settings,
            materials: Vec::new(),
            primitives: Vec::new(),
            lights: Vec::new(),
        }
    }

    /// Add a material to the scene and return its ID.
    pub fn add_material(&mut self, material: Material) -> usize {
        let id = self.materials.len();
        self.materials.push(Arc::new(material));
        id
    }

    /// Add a surface.
    pub fn add_primitive(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    /// Add a light.
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    pub fn surface_count(&self) -> usize {
        self.primitives.len()
    }

    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    /// Check every invariant the renderer relies on.
    ///
    /// Nothing is clamped or repaired: the first violation is returned.
    pub fn validate(&self) -> SceneResult<()> {
        self.camera.validate()?;
        self.settings.validate()?;

        for (i, material) in self.materials.iter().enumerate() {
            material.validate(&format!("material {}", i + 1))?;
        }

        for (i, primitive) in self.primitives.iter().enumerate() {
            if primitive.material() >= self.materials.len() {
                return Err(SceneError::UnknownMaterial {
                    surface: i + 1,
                    material: primitive.material() + 1,
                    available: self.materials.len(),
                });
            }
            primitive.validate(&format!("surface {}", i + 1))?;
        }

        for (i, light) in self.lights.iter().enumerate() {
            light.validate(&format!("light {}", i + 1))?;
        }

        Ok(())
    }
}
