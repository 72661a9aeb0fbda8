use std::ops::Neg;

use crate::{normalize_or, DVec3};

/// A ray in 3D space with an origin and a direction.
///
/// Directions are expected to be unit length; [`Ray::between_points`]
/// normalizes for you, [`Ray::new`] takes the direction as given.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self { origin, direction }
    }

    /// Create a ray starting at `source` and heading towards `dest`.
    ///
    /// Coincident points have no direction between them; the ray then points
    /// along +Z so callers never see a NaN direction.
    pub fn between_points(source: DVec3, dest: DVec3) -> Self {
        Self {
            origin: source,
            direction: normalize_or(dest - source, DVec3::Z),
        }
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> DVec3 {
        self.origin
    }

    /// Get the direction vector of the ray.
    #[inline]
    pub fn direction(&self) -> DVec3 {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }
}

impl Neg for Ray {
    type Output = Ray;

    /// Flip the direction, keeping the origin.
    fn neg(self) -> Ray {
        Ray::new(self.origin, -self.direction)
    }
}
