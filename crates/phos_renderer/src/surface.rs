//! Hittable trait, the closed set of surface shapes, and the closest-hit query.

use std::sync::Arc;

use phos_core::{Material, Primitive, SceneError};
use phos_math::{normalize_or, DVec3, Ray};

use crate::{Cube, InfinitePlane, Sphere};

/// Trait for shapes that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// The nearest intersection point at a non-negative ray parameter.
    fn intersect(&self, ray: &Ray) -> Option<DVec3>;

    /// Unit surface normal at `point`, which is assumed to lie on the surface.
    ///
    /// `incident` is the direction of the ray arriving at the point. Shapes
    /// with an inside and an outside return the outward normal; shapes
    /// without one orient the normal against `incident`.
    fn normal_at_point(&self, point: DVec3, incident: DVec3) -> DVec3;

    /// Mirror `ray` about the surface normal at `point`.
    fn reflection_ray(&self, ray: &Ray, point: DVec3) -> Ray {
        let normal = self.normal_at_point(point, ray.direction);
        let reflected = ray.direction - 2.0 * ray.direction.dot(normal) * normal;
        Ray::new(point, normalize_or(reflected, normal))
    }
}

/// Every shape the renderer understands.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Sphere(Sphere),
    Plane(InfinitePlane),
    Cube(Cube),
}

impl Hittable for Shape {
    fn intersect(&self, ray: &Ray) -> Option<DVec3> {
        match self {
            Shape::Sphere(sphere) => sphere.intersect(ray),
            Shape::Plane(plane) => plane.intersect(ray),
            Shape::Cube(cube) => cube.intersect(ray),
        }
    }

    fn normal_at_point(&self, point: DVec3, incident: DVec3) -> DVec3 {
        match self {
            Shape::Sphere(sphere) => sphere.normal_at_point(point, incident),
            Shape::Plane(plane) => plane.normal_at_point(point, incident),
            Shape::Cube(cube) => cube.normal_at_point(point, incident),
        }
    }
}

impl From<Sphere> for Shape {
    fn from(sphere: Sphere) -> Self {
        Shape::Sphere(sphere)
    }
}

impl From<InfinitePlane> for Shape {
    fn from(plane: InfinitePlane) -> Self {
        Shape::Plane(plane)
    }
}

impl From<Cube> for Shape {
    fn from(cube: Cube) -> Self {
        Shape::Cube(cube)
    }
}

impl From<&Primitive> for Shape {
    fn from(primitive: &Primitive) -> Self {
        match *primitive {
            Primitive::Sphere { center, radius, .. } => Shape::Sphere(Sphere::new(center, radius)),
            Primitive::Plane { normal, offset, .. } => {
                Shape::Plane(InfinitePlane::new(normal, offset))
            }
            Primitive::Cube { center, scale, .. } => Shape::Cube(Cube::new(center, scale)),
        }
    }
}

/// A shape bound to a shared material.
#[derive(Debug, Clone)]
pub struct Surface {
    shape: Shape,
    material: Arc<Material>,
}

impl Surface {
    /// Create a new surface.
    pub fn new(shape: impl Into<Shape>, material: Arc<Material>) -> Self {
        Self {
            shape: shape.into(),
            material,
        }
    }

    /// Build the surface for a scene primitive, resolving its material.
    pub fn from_primitive(
        index: usize,
        primitive: &Primitive,
        materials: &[Arc<Material>],
    ) -> Result<Self, SceneError> {
        let material = materials
            .get(primitive.material())
            .cloned()
            .ok_or(SceneError::UnknownMaterial {
                surface: index + 1,
                material: primitive.material() + 1,
                available: materials.len(),
            })?;
        Ok(Self::new(Shape::from(primitive), material))
    }

    pub fn material(&self) -> &Material {
        &self.material
    }
}

impl Hittable for Surface {
    #[inline]
    fn intersect(&self, ray: &Ray) -> Option<DVec3> {
        self.shape.intersect(ray)
    }

    #[inline]
    fn normal_at_point(&self, point: DVec3, incident: DVec3) -> DVec3 {
        self.shape.normal_at_point(point, incident)
    }
}

/// Record of the closest ray-surface intersection.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Position of the surface in the scene's surface list
    pub index: usize,
    /// The surface that was hit
    pub surface: &'a Surface,
    /// Point of intersection
    pub point: DVec3,
}

/// Find the surface whose intersection lies closest to the ray origin.
///
/// The surface at index `exclude` is skipped; pass the surface a ray leaves
/// from so it cannot hit itself again.
pub fn closest_surface<'a>(
    ray: &Ray,
    surfaces: &'a [Surface],
    exclude: Option<usize>,
) -> Option<HitRecord<'a>> {
    let mut closest: Option<HitRecord<'a>> = None;
    let mut closest_so_far = f64::INFINITY;

    for (index, surface) in surfaces.iter().enumerate() {
        if exclude == Some(index) {
            continue;
        }
        let Some(point) = surface.intersect(ray) else {
            continue;
        };

        let distance = point.distance(ray.origin);
        if distance < closest_so_far {
            closest_so_far = distance;
            closest = Some(HitRecord {
                index,
                surface,
                point,
            });
        }
    }

    closest
}
