// Re-export glam for convenience
pub use glam::*;

// Phos math types
mod basis;
mod interval;
mod ray;

pub use basis::{approx_eq, normalize_or, orthonormal_pair, EPSILON};
pub use interval::Interval;
pub use ray::Ray;

/// Linear RGB color, unclamped until the output stage.
pub type Color = DVec3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dvec3_creation() {
        let v = DVec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_color_is_componentwise() {
        let a = Color::new(0.5, 1.0, 0.25);
        let b = Color::new(2.0, 0.5, 4.0);
        assert_eq!(a * b, Color::new(1.0, 0.5, 1.0));
    }
}
