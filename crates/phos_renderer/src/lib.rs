//! Phos renderer - recursive Whitted-style ray tracing
//!
//! Traces primary rays through a pinhole camera into a flat list of
//! spheres, infinite planes and axis-aligned cubes, shading hits with
//! Phong lighting, area-light soft shadows, transparency and mirror
//! reflection. Buckets of pixels are rendered in parallel with rayon.

mod bucket;
mod camera;
mod cube;
mod light;
mod plane;
mod renderer;
mod sphere;
mod surface;
mod world;

pub use bucket::{
    generate_buckets, render_bucket, render_buckets, Bucket, BucketResult, DEFAULT_BUCKET_SIZE,
};
pub use camera::Camera;
pub use cube::Cube;
pub use light::{calculate_intensity, is_path_clear, phong_contribution};
pub use plane::InfinitePlane;
pub use renderer::{
    calculate_color, color_to_rgb8, pixel_rng, ray_color, render, render_pixel, ImageBuffer,
    OutputError, RenderConfig,
};
pub use sphere::Sphere;
pub use surface::{closest_surface, HitRecord, Hittable, Shape, Surface};
pub use world::World;

/// Re-export common math types from phos_math
pub use phos_math::{Color, DVec3, Interval, Ray};
