//! Axis-aligned cube primitive.

use crate::Hittable;
use phos_math::{DVec3, Interval, Ray};

/// Outward normals of the six faces.
const FACE_NORMALS: [DVec3; 6] = [
    DVec3::X,
    DVec3::NEG_X,
    DVec3::Y,
    DVec3::NEG_Y,
    DVec3::Z,
    DVec3::NEG_Z,
];

/// An axis-aligned cube with edge length `scale`.
#[derive(Debug, Clone, PartialEq)]
pub struct Cube {
    center: DVec3,
    half_scale: f64,
}

impl Cube {
    /// Create a new cube.
    pub fn new(center: DVec3, scale: f64) -> Self {
        Self {
            center,
            half_scale: scale / 2.0,
        }
    }

    /// The extent of the cube along `axis` (0=X, 1=Y, 2=Z).
    fn slab(&self, axis: usize) -> Interval {
        Interval::new(
            self.center[axis] - self.half_scale,
            self.center[axis] + self.half_scale,
        )
    }
}

impl Hittable for Cube {
    /// Slab method with early exit per axis.
    fn intersect(&self, ray: &Ray) -> Option<DVec3> {
        let mut ray_t = Interval::UNIVERSE;

        for axis in 0..3 {
            let slab = self.slab(axis);
            let origin = ray.origin()[axis];
            let direction = ray.direction()[axis];

            if direction == 0.0 {
                if !slab.contains(origin) {
                    return None;
                }
                continue;
            }

            let bounds = Interval::spanning(
                (slab.min - origin) / direction,
                (slab.max - origin) / direction,
            );
            ray_t = ray_t.intersect(&bounds);
            if ray_t.is_empty() || ray_t.max < 0.0 {
                return None;
            }
        }

        let t = if ray_t.min >= 0.0 { ray_t.min } else { ray_t.max };
        (t >= 0.0 && t.is_finite()).then(|| ray.at(t))
    }

    /// Normal of the face whose center is nearest to `point`.
    ///
    /// Close to edges and corners this can pick a neighbouring face.
    fn normal_at_point(&self, point: DVec3, _incident: DVec3) -> DVec3 {
        let mut best = FACE_NORMALS[0];
        let mut best_distance = f64::INFINITY;

        for normal in FACE_NORMALS {
            let face_center = self.center + normal * self.half_scale;
            let distance = point.distance_squared(face_center);
            if distance < best_distance {
                best = normal;
                best_distance = distance;
            }
        }

        best
    }
}
