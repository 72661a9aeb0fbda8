//! Sphere primitive for ray tracing.

use crate::Hittable;
use phos_math::{normalize_or, DVec3, Ray};

/// A sphere primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    center: DVec3,
    radius: f64,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: DVec3, radius: f64) -> Self {
        Self { center, radius }
    }
}

impl Hittable for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<DVec3> {
        let oc = ray.origin() - self.center;
        let a = ray.direction().length_squared();
        let b = 2.0 * oc.dot(ray.direction());
        let c = oc.length_squared() - self.radius * self.radius;

        if a == 0.0 {
            return None;
        }

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();
        let t1 = (-b - sqrtd) / (2.0 * a);
        let t2 = (-b + sqrtd) / (2.0 * a);

        // Both roots ahead: the nearer one. Origin inside: the one ahead.
        if t1 >= 0.0 && t2 >= 0.0 {
            return Some(ray.at(t1.min(t2)));
        }
        let t = t1.max(t2);
        (t >= 0.0).then(|| ray.at(t))
    }

    fn normal_at_point(&self, point: DVec3, incident: DVec3) -> DVec3 {
        normalize_or(point - self.center, -incident)
    }
}
