//! Tolerances, guarded normalization and orthonormal bases.

use crate::DVec3;

/// Absolute tolerance for parallel-ray tests and point comparisons.
pub const EPSILON: f64 = 1e-6;

/// Relative part of the point-comparison tolerance.
const RELATIVE_TOLERANCE: f64 = 1e-5;

/// Component-wise closeness test with an absolute and a relative term.
///
/// `|a - b| <= EPSILON + 1e-5 * |b|` must hold on every axis, so points far
/// from the origin tolerate proportionally larger rounding error.
pub fn approx_eq(a: DVec3, b: DVec3) -> bool {
    let tolerance = DVec3::splat(EPSILON) + RELATIVE_TOLERANCE * b.abs();
    (a - b).abs().cmple(tolerance).all()
}

/// Normalize `v`, or return `fallback` when `v` has no usable length.
#[inline]
pub fn normalize_or(v: DVec3, fallback: DVec3) -> DVec3 {
    v.try_normalize().unwrap_or(fallback)
}

/// Two unit vectors perpendicular to `direction` and to each other.
///
/// `direction` must be unit length. The helper axis is X unless `direction`
/// is close to the X axis (either sign), in which case Y is used, so the
/// cross products never vanish.
pub fn orthonormal_pair(direction: DVec3) -> (DVec3, DVec3) {
    let helper = if direction.x.abs() > 0.9 { DVec3::Y } else { DVec3::X };
    let first = direction.cross(helper).normalize();
    let second = direction.cross(first).normalize();
    (first, second)
}
