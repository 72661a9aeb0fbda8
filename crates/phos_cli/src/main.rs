//! `phos`: render a scene file to an image.

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn, LevelFilter};

use phos_core::load_scene;
use phos_renderer::{render_buckets, Camera, RenderConfig, World};

mod cli;

use cli::Args;

/// Initialize the logger; `RUST_LOG` overrides `level` when set.
fn init_logger(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure the worker pool")?;
    }

    let scene = load_scene(&args.scene_file)
        .with_context(|| format!("Failed to load scene {}", args.scene_file.display()))?;
    let world = World::from_scene(&scene).context("Scene is not renderable")?;
    if world.is_empty() {
        warn!("Scene has no surfaces; the image will be background only");
    }

    let config = RenderConfig {
        bucket_size: args.bucket_size,
        seed: args.seed,
    };
    let camera = Camera::new(&scene.camera, args.width, args.height);

    info!(
        "Rendering {}x{} ({} surfaces, {} lights, {}² shadow rays, {} bounces) on {} threads",
        camera.image_width,
        camera.image_height,
        world.len(),
        world.lights.len(),
        world.settings.root_number_shadow_rays,
        world.settings.max_recursions,
        rayon::current_num_threads()
    );

    let progress = if args.no_progress {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(camera.image_width as u64 * camera.image_height as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{elapsed_precise} {bar:40} {percent:>3}% ETA: {eta}")
                .context("Invalid progress bar template")?,
        );
        bar
    };

    let start = Instant::now();
    let image = render_buckets(&camera, &world, &config, |result| {
        progress.inc(result.pixels.len() as u64);
    });
    progress.finish_and_clear();
    info!("Rendered in {:.2?}", start.elapsed());

    image
        .save(&args.output_image)
        .with_context(|| format!("Failed to save {}", args.output_image.display()))?;
    info!("Saved {}", args.output_image.display());

    Ok(())
}
