//! Camera for primary ray generation.

use phos_math::{normalize_or, orthonormal_pair, DVec3, Ray};

/// A scene camera resolved against an image resolution.
///
/// The basis and screen geometry are derived once; [`Camera::get_ray`] then
/// only does a couple of multiply-adds per pixel.
#[derive(Debug, Clone)]
pub struct Camera {
    // Image settings
    pub image_width: u32,
    pub image_height: u32,

    position: DVec3,

    // Cached computed values
    right: DVec3,
    up: DVec3,
    screen_center: DVec3,
    pixel_size: f64,
}

impl Camera {
    /// Derive the camera basis for an image of `width × height` pixels.
    pub fn new(desc: &phos_core::Camera, width: u32, height: u32) -> Self {
        let forward = Ray::between_points(desc.position, desc.look_at).direction;

        // A validated scene never has `up_vector` parallel to `forward`; if
        // one slips through, any perpendicular pair keeps the rays finite.
        let (fallback_right, fallback_up) = orthonormal_pair(forward);
        let right = normalize_or(forward.cross(desc.up_vector), fallback_right);
        let up = normalize_or(right.cross(forward), fallback_up);

        Self {
            image_width: width,
            image_height: height,
            position: desc.position,
            right,
            up,
            screen_center: desc.position + forward * desc.screen_distance,
            pixel_size: desc.screen_width / width.max(1) as f64,
        }
    }

    /// Generate the primary ray through pixel (`x`, `y`), `y` counting rows
    /// from the top of the image.
    pub fn get_ray(&self, x: u32, y: u32) -> Ray {
        let column = x as f64 - (self.image_width / 2) as f64;
        let row = y as f64 - (self.image_height / 2) as f64;

        let pixel = self.screen_center + column * self.pixel_size * self.right
            - row * self.pixel_size * self.up;
        Ray::between_points(self.position, pixel)
    }
}
