//! Infinite plane primitive.

use crate::Hittable;
use phos_math::{normalize_or, DVec3, Ray, EPSILON};

/// The plane of points `x` with `normal · x = offset`.
#[derive(Debug, Clone, PartialEq)]
pub struct InfinitePlane {
    normal: DVec3,
    offset: f64,
}

impl InfinitePlane {
    /// Create a new plane. The normal is normalized here.
    pub fn new(normal: DVec3, offset: f64) -> Self {
        Self {
            normal: normalize_or(normal, DVec3::Y),
            offset,
        }
    }
}

impl Hittable for InfinitePlane {
    fn intersect(&self, ray: &Ray) -> Option<DVec3> {
        let denom = self.normal.dot(ray.direction());

        // Parallel rays never meet the plane
        if denom.abs() < EPSILON {
            return None;
        }

        let t = (self.offset - self.normal.dot(ray.origin())) / denom;
        (t >= 0.0).then(|| ray.at(t))
    }

    /// The plane normal, flipped to face the side the ray comes from.
    fn normal_at_point(&self, _point: DVec3, incident: DVec3) -> DVec3 {
        if self.normal.dot(incident) > 0.0 {
            -self.normal
        } else {
            self.normal
        }
    }
}
