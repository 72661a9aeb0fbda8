//! Simple ray tracer example.
//!
//! Builds a small scene in code, renders it in parallel and saves a PNG.

use std::sync::Arc;

use phos_core::{Light, Material, SceneSettings};
use phos_renderer::{
    render_buckets, Camera, Color, Cube, DVec3, InfinitePlane, RenderConfig, Sphere, Surface,
    World,
};

fn main() {
    println!("Phos Ray Tracer - Simple Example");
    println!("================================");

    let start = std::time::Instant::now();
    let world = build_scene();
    println!("Scene built in {:?}", start.elapsed());

    let (width, height) = (640, 360);
    let config = RenderConfig::default();
    let camera = Camera::new(
        &phos_core::Camera {
            position: DVec3::new(0.0, 2.0, -8.0),
            look_at: DVec3::new(0.0, 0.5, 0.0),
            up_vector: DVec3::Y,
            screen_distance: 1.0,
            screen_width: 1.2,
        },
        width,
        height,
    );

    println!(
        "Rendering {}x{} with {}² shadow rays...",
        width, height, world.settings.root_number_shadow_rays
    );

    let start = std::time::Instant::now();
    let image = render_buckets(&camera, &world, &config, |_| {});
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.png";
    image.save(filename).expect("Failed to save image");
    println!("Saved to {}", filename);
}

fn build_scene() -> World {
    let floor = Arc::new(Material {
        reflection_color: Color::splat(0.2),
        ..Material::matte(Color::new(0.4, 0.4, 0.45))
    });
    let red = Arc::new(Material {
        specular_color: Color::ONE,
        shininess: 30.0,
        ..Material::matte(Color::new(0.9, 0.1, 0.1))
    });
    let glass = Arc::new(Material {
        specular_color: Color::ONE,
        reflection_color: Color::splat(0.1),
        shininess: 100.0,
        transparency: 0.7,
        ..Material::matte(Color::new(0.1, 0.2, 0.3))
    });
    let mirror = Arc::new(Material {
        reflection_color: Color::splat(0.9),
        ..Material::matte(Color::ZERO)
    });

    let surfaces = vec![
        Surface::new(InfinitePlane::new(DVec3::Y, 0.0), floor),
        Surface::new(Sphere::new(DVec3::new(-1.6, 1.0, 0.0), 1.0), red),
        Surface::new(Sphere::new(DVec3::new(0.0, 0.8, -1.5), 0.8), glass),
        Surface::new(Cube::new(DVec3::new(1.8, 0.75, 0.5), 1.5), mirror),
    ];

    let mut key = Light::new(DVec3::new(-3.0, 6.0, -4.0));
    key.specular_intensity = 1.0;
    key.shadow_intensity = 0.9;
    key.radius = 1.0;

    let mut fill = Light::new(DVec3::new(4.0, 3.0, -2.0));
    fill.color = Color::new(0.3, 0.3, 0.4);
    fill.shadow_intensity = 0.5;

    let settings = SceneSettings {
        background_color: Color::new(0.6, 0.75, 0.9),
        root_number_shadow_rays: 4,
        max_recursions: 6,
    };

    println!("Created {} surfaces", surfaces.len());
    World::new(surfaces, vec![key, fill], settings)
}
