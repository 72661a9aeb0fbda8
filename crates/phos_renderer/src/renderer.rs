//! Core recursive ray tracer.
//!
//! Implements Whitted-style tracing with:
//! - Phong shading with soft shadows for every light
//! - Transparency as straight pass-through rays
//! - Mirror reflection weighted by the material's reflection color
//! - A recursion budget shared by both kinds of secondary rays

use std::path::{Path, PathBuf};

use phos_math::{Color, Interval, Ray};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use thiserror::Error;

use crate::light::phong_contribution;
use crate::surface::{closest_surface, Hittable};
use crate::{Camera, World};

/// Render configuration.
///
/// The image size is fixed by the [`Camera`] passed alongside it.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Edge length of the square tiles rendered in parallel
    pub bucket_size: u32,
    /// Base seed for soft-shadow sampling
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            bucket_size: crate::DEFAULT_BUCKET_SIZE,
            seed: 0,
        }
    }
}

/// Compute the color seen along `ray`.
///
/// `source_surface` is the index of the surface the ray leaves from, which is
/// ignored when looking for the next hit. `depth` counts the bounces taken so
/// far; at `max_recursions` the background is returned without tracing.
pub fn calculate_color(
    ray: &Ray,
    world: &World,
    source_surface: Option<usize>,
    depth: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let settings = &world.settings;
    if depth >= settings.max_recursions {
        return settings.background_color;
    }

    let Some(hit) = closest_surface(ray, &world.surfaces, source_surface) else {
        return settings.background_color;
    };
    let material = hit.surface.material();
    let viewer = -*ray;

    let local: Color = world
        .lights
        .iter()
        .map(|light| {
            phong_contribution(
                light,
                hit.point,
                &viewer,
                hit.surface,
                &world.surfaces,
                settings.root_number_shadow_rays,
                rng,
            )
        })
        .sum();
    let mut color = local * (1.0 - material.transparency);

    if material.transparency > 0.0 {
        let through = Ray::new(hit.point, ray.direction);
        color += calculate_color(&through, world, Some(hit.index), depth + 1, rng)
            * material.transparency;
    }

    if material.is_reflective() {
        let reflected = hit.surface.reflection_ray(ray, hit.point);
        color += calculate_color(&reflected, world, Some(hit.index), depth + 1, rng)
            * material.reflection_color;
    }

    color
}

/// Trace a primary ray from the camera.
pub fn ray_color(ray: &Ray, world: &World, rng: &mut dyn RngCore) -> Color {
    calculate_color(ray, world, None, 0, rng)
}

/// The random source for one pixel.
///
/// Seeded from the pixel position alone, so a pixel renders the same no
/// matter which thread or bucket picks it up.
pub fn pixel_rng(seed: u64, x: u32, y: u32, width: u32) -> StdRng {
    let pixel_index = y as u64 * width as u64 + x as u64;
    StdRng::seed_from_u64(seed ^ pixel_index.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Render a single pixel.
pub fn render_pixel(
    camera: &Camera,
    world: &World,
    x: u32,
    y: u32,
    config: &RenderConfig,
) -> Color {
    let ray = camera.get_ray(x, y);
    let mut rng = pixel_rng(config.seed, x, y, camera.image_width);
    ray_color(&ray, world, &mut rng)
}

/// Convert a linear color to 8-bit RGB, clamping each channel to [0, 1].
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let unit = Interval::UNIT;
    [
        (255.0 * unit.clamp(color.x)) as u8,
        (255.0 * unit.clamp(color.y)) as u8,
        (255.0 * unit.clamp(color.z)) as u8,
    ]
}

/// Errors that can occur while writing an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Simple image buffer for storing render output.
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Convert to RGB bytes (for display or saving).
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb8(*color));
        }
        bytes
    }

    /// Save as an 8-bit RGB image; the format follows the file extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), OutputError> {
        let path = path.as_ref();
        image::save_buffer(
            path,
            &self.to_rgb8(),
            self.width,
            self.height,
            image::ColorType::Rgb8,
        )
        .map_err(|source| OutputError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Render the entire scene to an image buffer.
///
/// This is a simple single-threaded renderer for testing; see
/// [`crate::render_buckets`] for the parallel one.
pub fn render(camera: &Camera, world: &World, config: &RenderConfig) -> ImageBuffer {
    let mut image = ImageBuffer::new(camera.image_width, camera.image_height);

    for y in 0..camera.image_height {
        for x in 0..camera.image_width {
            let color = render_pixel(camera, world, x, y, config);
            image.set(x, y, color);
        }
    }

    image
}
